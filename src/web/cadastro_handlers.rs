// src/web/cadastro_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::RegisterForm,
    services::user_service,
    state::AppState,
    templates::{self, CadastroPage},
    web::flash::{self, Notice},
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

// GET /cadastro
pub async fn show_cadastro_form(State(state): State<AppState>, cookies: Cookies) -> AppResult<Response> {
    let notice = flash::take_flash(&cookies, &state.cookie_key);
    templates::render(&CadastroPage { notice, ..CadastroPage::default() })
}

// POST /cadastro
pub async fn handle_cadastro(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    match user_service::register_user(state.store.as_ref(), &form).await {
        Ok(_) => {
            flash::set_flash(&cookies, &state.cookie_key, Notice::success("Cadastro realizado com sucesso!"));
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::Validation(errors)) => templates::render(&CadastroPage::from_form(&form, errors, None)),
        Err(e @ AppError::DuplicateCredential) => {
            let notice = Notice::error(e.to_string());
            templates::render(&CadastroPage::from_form(&form, Default::default(), Some(notice)))
        }
        Err(e) => Err(e),
    }
}
