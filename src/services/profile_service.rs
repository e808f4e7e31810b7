// src/services/profile_service.rs
use crate::{error::AppResult, models::user::UserRecord, services::store::SessionSlot};

/// Dados do perfil já prontos para exibição.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub course: String,
    pub user_type: String,
}

impl From<&UserRecord> for ProfileView {
    fn from(user: &UserRecord) -> Self {
        Self {
            name: user.name.clone(),
            cpf: user.cpf.formatted(),
            email: user.email.clone(),
            course: user.course.clone(),
            user_type: user.user_type.label().to_string(),
        }
    }
}

/// `None` quando não há sessão; quem chama redireciona para a entrada.
pub async fn load_profile(slot: &dyn SessionSlot) -> AppResult<Option<ProfileView>> {
    let profile = slot.get_session().await?.as_ref().map(ProfileView::from);
    if profile.is_none() {
        tracing::debug!("Perfil pedido sem sessão ativa.");
    }
    Ok(profile)
}

/// Limpa sempre o marcador; a leitura prévia serve só para o log.
pub async fn logout(slot: &dyn SessionSlot) -> AppResult<()> {
    match slot.get_session().await.ok().flatten() {
        Some(user) => tracing::info!("🚪 Utilizador '{}' desligado.", user.cpf),
        None => tracing::info!("🚪 Sessão anónima desligada."),
    }
    slot.clear_session().await
}
