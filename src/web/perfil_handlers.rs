// src/web/perfil_handlers.rs
use crate::{
    error::AppResult,
    services::profile_service::ProfileView,
    state::AppState,
    templates::{self, PerfilPage},
    web::flash,
};
use axum::{
    extract::{Extension, State},
    response::Response,
};
use tower_cookies::Cookies;

/// GET /perfil (protegido por `require_session`)
pub async fn perfil_page_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(profile): Extension<ProfileView>,
) -> AppResult<Response> {
    tracing::debug!("GET /perfil: Acesso para {}", profile.name);
    let notice = flash::take_flash(&cookies, &state.cookie_key);
    templates::render(&PerfilPage { profile, notice })
}
