// src/error.rs
use crate::services::validation::FieldErrors;
use axum::{http::StatusCode, response::Html, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // Erros de campo: o formulário volta a ser mostrado com as mensagens
    #[error("Dados do formulário inválidos: {0:?}")]
    Validation(FieldErrors),

    #[error("CPF já cadastrado!")]
    DuplicateCredential,

    // Mensagem única para CPF desconhecido e senha errada
    #[error("CPF ou senha inválidos!")]
    InvalidCredentials,

    #[error("Armazenamento indisponível: {0}")]
    PersistenceUnavailable(String),

    #[error("Dados armazenados não seguem o formato esperado: {0}")]
    StoredDataInvalid(#[from] serde_json::Error),

    #[error("Erro na base de dados: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Erro de migração da base de dados: {0}")]
    SqlxMigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Erro de variável de ambiente: {0}")]
    EnvVarError(#[from] std::env::VarError),

    #[error("Configuração inválida: {0}")]
    Config(String),

    #[error("Erro na sessão: {0}")]
    SessionError(String),

    #[error("Erro ao renderizar página: {0}")]
    TemplateError(#[from] askama::Error),
}

impl AppError {
    /// Erros que o utilizador resolve corrigindo o formulário.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_) | AppError::DuplicateCredential | AppError::InvalidCredentials
        )
    }
}

// Como converter AppError numa resposta HTTP
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // Loga o erro detalhado no servidor
        if self.is_recoverable() {
            tracing::debug!("Erro de formulário não tratado pelo handler: {:?}", self);
        } else {
            tracing::error!("Erro processado: {:?}", self);
        }

        let (status, user_message) = match self {
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Dados inválidos."),
            AppError::DuplicateCredential => (StatusCode::CONFLICT, "CPF já cadastrado!"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "CPF ou senha inválidos!"),
            AppError::PersistenceUnavailable(_)
            | AppError::StoredDataInvalid(_)
            | AppError::SqlxError(_)
            | AppError::SqlxMigrateError(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Não foi possível aceder aos dados. Tente novamente mais tarde.",
            ),
            AppError::EnvVarError(_) | AppError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro de configuração.")
            }
            AppError::SessionError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Erro na gestão da sua sessão.")
            }
            AppError::TemplateError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        (status, Html(format!(r#"
            <!DOCTYPE html><html lang="pt-BR"><head><meta charset="utf-8"><title>Erro</title><style>body{{font-family:sans-serif;}}</style></head>
            <body><h1>Erro {status_code}</h1><p>{message}</p><a href="/">Voltar</a></body></html>
         "#, status_code = status.as_u16(), message = user_message))).into_response()
    }
}

// Tipo Result padrão para a aplicação
pub type AppResult<T = ()> = Result<T, AppError>;
