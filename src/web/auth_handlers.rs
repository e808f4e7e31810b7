// src/web/auth_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{LoginForm, RecoveryForm},
    services::{auth_service, profile_service, store::SessionSlot},
    state::AppState,
    templates::{self, LoginPage},
    web::flash::{self, Notice},
};
use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;
use tower_sessions::Session;

// GET / (página de entrada; quem já tem sessão vai direto para o perfil)
pub async fn show_login_form(
    State(state): State<AppState>,
    session: Session,
    cookies: Cookies,
) -> AppResult<Response> {
    if session.get_session().await.ok().flatten().is_some() {
        tracing::debug!("GET /: Utilizador já logado, redirecionando para /perfil");
        return Ok(Redirect::to("/perfil").into_response());
    }
    let notice = flash::take_flash(&cookies, &state.cookie_key);
    templates::render(&LoginPage::with_notice(notice))
}

// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    match auth_service::login(state.store.as_ref(), &session, &form).await {
        Ok(_) => {
            flash::set_flash(&cookies, &state.cookie_key, Notice::success("Login realizado com sucesso!"));
            Ok(Redirect::to("/perfil").into_response())
        }
        Err(AppError::Validation(errors)) => templates::render(&LoginPage::from_form(&form, errors, None)),
        Err(e @ AppError::InvalidCredentials) => {
            // Mesma mensagem para CPF desconhecido e senha errada
            let notice = Notice::error(e.to_string());
            templates::render(&LoginPage::from_form(&form, Default::default(), Some(notice)))
        }
        Err(e) => Err(e),
    }
}

// POST /recuperar-senha (simulado, nenhum e-mail é enviado)
pub async fn handle_password_recovery(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<RecoveryForm>,
) -> AppResult<Response> {
    match auth_service::request_password_recovery(&form).await {
        Ok(()) => {
            flash::set_flash(&cookies, &state.cookie_key, Notice::success("E-mail de recuperação enviado!"));
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::Validation(errors)) => templates::render(&LoginPage {
            errors,
            show_recovery: true,
            recovery_email: form.email.clone(),
            ..LoginPage::default()
        }),
        Err(e) => Err(e),
    }
}

// GET /logout
pub async fn handle_logout(session: Session) -> AppResult<Redirect> {
    profile_service::logout(&session).await?;
    Ok(Redirect::to("/"))
}
