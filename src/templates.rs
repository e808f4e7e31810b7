// src/templates.rs
use crate::{
    error::AppResult,
    models::user::{LoginForm, RegisterForm, UserType, USER_TYPES},
    services::{profile_service::ProfileView, validation::FieldErrors},
    web::flash::Notice,
};
use askama::Template;
use axum::response::{Html, IntoResponse, Response};

// Página de entrada: login + "Esqueci minha senha"
#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct LoginPage {
    // CPF já com máscara, para voltar a preencher o campo
    pub cpf: String,
    pub errors: FieldErrors,
    pub notice: Option<Notice>,
    pub show_recovery: bool,
    pub recovery_email: String,
}

impl LoginPage {
    pub fn with_notice(notice: Option<Notice>) -> Self {
        Self { notice, ..Self::default() }
    }

    /// Volta a mostrar o formulário com o que o utilizador escreveu (sem a senha).
    pub fn from_form(form: &LoginForm, errors: FieldErrors, notice: Option<Notice>) -> Self {
        Self {
            cpf: crate::services::validation::format_cpf(&form.cpf),
            errors,
            notice,
            ..Self::default()
        }
    }
}

#[derive(Template, Default)]
#[template(path = "cadastro.html")]
pub struct CadastroPage {
    pub name: String,
    pub email: String,
    pub cpf: String,
    pub course: String,
    pub user_type: String,
    pub errors: FieldErrors,
    pub notice: Option<Notice>,
}

impl CadastroPage {
    pub fn from_form(form: &RegisterForm, errors: FieldErrors, notice: Option<Notice>) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            cpf: crate::services::validation::format_cpf(&form.cpf),
            course: form.course.clone(),
            user_type: form.user_type.clone(),
            errors,
            notice,
        }
    }

    pub fn user_types(&self) -> &'static [UserType] {
        &USER_TYPES
    }
}

#[derive(Template)]
#[template(path = "perfil.html")]
pub struct PerfilPage {
    pub profile: ProfileView,
    pub notice: Option<Notice>,
}

/// Renderiza um template numa resposta HTML, registando a falha se houver.
pub fn render<T: Template>(template: &T) -> AppResult<Response> {
    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Falha ao renderizar template: {}", e);
            Err(e.into())
        }
    }
}
