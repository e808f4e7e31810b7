// src/services/auth_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{Cpf, LoginForm, RecoveryForm, UserRecord},
    services::{
        store::{SessionSlot, UserStore},
        validation::{self, FieldErrors},
    },
};

/// Autentica por CPF + senha e marca o utilizador como sessão atual.
///
/// CPF desconhecido e senha errada dão o mesmo `InvalidCredentials`.
pub async fn login(
    store: &dyn UserStore,
    slot: &dyn SessionSlot,
    form: &LoginForm,
) -> AppResult<UserRecord> {
    let mut errors = FieldErrors::new();
    let cpf = Cpf::parse(&form.cpf);
    if cpf.is_none() {
        errors.insert("cpf", "CPF inválido");
    }
    if form.password.is_empty() {
        errors.insert("password", "Senha é obrigatória");
    }
    let Some(cpf) = cpf.filter(|_| errors.is_empty()) else {
        return Err(AppError::Validation(errors));
    };

    tracing::info!("Tentativa de login para CPF: {}", cpf);
    let Some(user) = store.find_by_credential(&cpf, &form.password).await? else {
        tracing::warn!("Credenciais inválidas para CPF: {}", cpf);
        return Err(AppError::InvalidCredentials);
    };

    slot.set_session(&user).await?;
    tracing::info!("✅ Login bem-sucedido para: {}", user.cpf);
    Ok(user)
}

/// Recuperação de senha simulada: só valida o e-mail e regista o pedido.
/// Não consulta os registos, por isso nunca revela se o e-mail existe.
pub async fn request_password_recovery(form: &RecoveryForm) -> AppResult<()> {
    let email = form.email.trim();
    if !validation::validate_email(email) {
        let mut errors = FieldErrors::new();
        errors.insert("email", "E-mail inválido");
        return Err(AppError::Validation(errors));
    }
    tracing::info!("📧 E-mail de recuperação (simulado) enviado para {}", email);
    Ok(())
}
