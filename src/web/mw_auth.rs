// src/web/mw_auth.rs
use crate::{error::AppError, services::profile_service};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

// Middleware que só deixa passar quem tem sessão ativa
pub async fn require_session(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match profile_service::load_profile(&session).await? {
        Some(profile) => {
            tracing::debug!("Autenticação MW: sessão ativa para '{}'. Prosseguindo...", profile.name);
            // O handler recebe o perfil já pronto via extensão
            request.extensions_mut().insert(profile);
            Ok(next.run(request).await)
        }
        None => {
            // Sem sessão: volta para a entrada, sem página de erro
            tracing::debug!("Autenticação MW: sem sessão. Redirecionando para /");
            Ok(Redirect::to("/").into_response())
        }
    }
}
