// src/services/user_service.rs
use crate::{
    error::{AppError, AppResult},
    models::user::{Cpf, RegisterForm, UserRecord, UserType},
    services::{
        store::UserStore,
        validation::{self, FieldErrors},
    },
};

/// Valida todos os campos do cadastro de uma vez.
///
/// Devolve o registo pronto a gravar (CPF normalizado, texto aparado) ou o
/// mapa com todos os campos inválidos.
pub fn validate_registration(form: &RegisterForm) -> Result<UserRecord, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert("name", "Nome completo é obrigatório");
    }

    let email = form.email.trim();
    if !validation::validate_email(email) {
        errors.insert("email", "E-mail inválido");
    }

    let cpf = Cpf::parse(&form.cpf);
    if cpf.is_none() {
        errors.insert("cpf", "CPF inválido");
    }

    let course = form.course.trim();
    if course.is_empty() {
        errors.insert("course", "Curso é obrigatório");
    }

    let user_type = UserType::from(form.user_type.clone());
    if !user_type.is_known() {
        errors.insert("userType", "Tipo de usuário é obrigatório");
    }

    if !validation::validate_password(&form.password) {
        errors.insert("password", "A senha deve ter no mínimo 8 caracteres");
    }

    if form.password != form.confirm_password {
        errors.insert("confirmPassword", "As senhas não coincidem");
    }

    match cpf {
        Some(cpf) if errors.is_empty() => Ok(UserRecord {
            name: name.to_string(),
            email: email.to_string(),
            cpf,
            course: course.to_string(),
            user_type,
            password: form.password.clone(),
        }),
        _ => Err(errors),
    }
}

/// Fluxo de cadastro: valida, rejeita CPF duplicado e grava.
pub async fn register_user(store: &dyn UserStore, form: &RegisterForm) -> AppResult<UserRecord> {
    let record = validate_registration(form).map_err(|errors| {
        tracing::debug!("Cadastro rejeitado, campos inválidos: {:?}", errors.fields().collect::<Vec<_>>());
        AppError::Validation(errors)
    })?;

    tracing::info!("Tentando cadastrar CPF: {}", record.cpf);
    if store.exists_by_cpf(&record.cpf).await? {
        tracing::warn!("Falha ao cadastrar: CPF '{}' já existe.", record.cpf);
        return Err(AppError::DuplicateCredential);
    }

    store.append(record.clone()).await?;
    tracing::info!("✅ Utilizador '{}' cadastrado com sucesso.", record.cpf);
    Ok(record)
}
