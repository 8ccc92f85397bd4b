//! Conexión a PostgreSQL
//!
//! Este módulo crea el pool de conexiones y aplica las migraciones.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Conexión a la base de datos con su pool
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Conectar usando `DATABASE_URL`
    pub async fn new_default() -> Result<Self> {
        let config = DatabaseConfig::from_env()?;
        Self::new(&config).await
    }

    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        info!("🐘 Conectando a PostgreSQL en {}", config.masked_url());

        let pool = config
            .create_pool()
            .await
            .context("No se pudo crear el pool de PostgreSQL")?;

        Ok(Self { pool })
    }

    /// Ejecutar migraciones de la base de datos
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Error aplicando migraciones")?;

        info!("✅ Migraciones aplicadas");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
