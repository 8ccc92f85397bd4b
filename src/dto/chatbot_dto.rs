use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ChatbotQuery {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct ChatbotResponse {
    pub query: String,
    pub answer: String,
}
