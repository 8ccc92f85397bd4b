//! Chatbot de soporte
//!
//! Reenvía la pregunta del estudiante a la API `generateContent` de Gemini.
//! El cliente HTTP lleva timeout y cualquier fallo se devuelve como error
//! de upstream, nunca bloquea las reservas.

use log::{error, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

pub const FALLBACK_ANSWER: &str = "Sorry, I couldn't generate a response.";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[derive(Clone)]
pub struct ChatbotService {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl ChatbotService {
    pub fn new(config: &EnvironmentConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.chatbot_timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn ask(&self, query: &str) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Internal("Gemini API key not configured".to_string()))?;

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(query)),
                }],
            }],
        };

        info!("🤖 Consulta al chatbot ({} chars)", query.len());

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Gemini no responde: {}", e);
                AppError::ExternalApi(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!("❌ Gemini devolvió {}: {}", status, text);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("Gemini error: {}", text),
            });
        }

        // Una respuesta sin candidato legible no es un error para el cliente
        let answer = response
            .json::<GenerateContentResponse>()
            .await
            .ok()
            .and_then(GenerateContentResponse::first_text)
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());

        Ok(answer)
    }
}

fn build_prompt(query: &str) -> String {
    format!(
        "You are UniPool's friendly AI assistant for a university ride-sharing platform.\n\n\
         Your role:\n\
         - Help students with ride bookings, cancellations, and queries\n\
         - Provide information about vehicle sharing and OBD diagnostics\n\
         - Give clear, helpful responses in a conversational tone\n\
         - Keep responses concise but informative\n\
         - Use bullet points for lists when helpful\n\n\
         Context: UniPool connects university students for safe, affordable ride sharing.\n\n\
         Student Question: {}\n\n\
         Please provide a helpful, well-structured response:",
        query
    )
}
