// src/config.rs
use crate::{
    error::{AppError, AppResult},
    services::store::DEFAULT_USERS_KEY,
};
use std::{env, net::SocketAddr};

// Tamanho mínimo exigido pela chave de cookies assinados
const MIN_SECRET_LEN: usize = 64;

/// Configuração lida das variáveis de ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    pub bind_addr: SocketAddr,
    pub users_key: String,
    pub session_inactivity_days: i64,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;
        let session_secret = env::var("SESSION_SECRET")?;
        if session_secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Config(format!(
                "SESSION_SECRET precisa de pelo menos {} bytes",
                MIN_SECRET_LEN
            )));
        }

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("BIND_ADDR inválido: {}", e)))?;

        let users_key = env::var("USERS_KEY").unwrap_or_else(|_| DEFAULT_USERS_KEY.to_string());
        if users_key.trim().is_empty() {
            return Err(AppError::Config("USERS_KEY não pode ser vazio".to_string()));
        }

        let session_inactivity_days = match env::var("SESSION_INACTIVITY_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or_else(|| AppError::Config(format!("SESSION_INACTIVITY_DAYS inválido: '{}'", raw)))?,
            Err(_) => 1,
        };

        Ok(Self {
            database_url,
            session_secret,
            bind_addr,
            users_key,
            session_inactivity_days,
        })
    }
}
