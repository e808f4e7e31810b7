// src/services/store.rs
//! Acesso aos dados persistidos: a coleção de utilizadores registados e o
//! slot da sessão atual.
//!
//! As operações são read-modify-write sem transação. Dois cadastros em
//! simultâneo podem sobrescrever-se; aceitável com um único escritor.
use crate::{
    error::{AppError, AppResult},
    models::user::{Cpf, UserRecord},
};
use async_trait::async_trait;
#[cfg(test)]
use tokio::sync::Mutex;
use tower_sessions::Session;

/// Chave por omissão da coleção de utilizadores.
pub const DEFAULT_USERS_KEY: &str = "users";
/// Chave do marcador de sessão.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Repositório dos registos de utilizador.
///
/// Só `load_all` e `append` são obrigatórios; as pesquisas são varrimentos
/// lineares por cima de `load_all`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Coleção completa, por ordem de inserção. Slot ausente = coleção vazia.
    async fn load_all(&self) -> AppResult<Vec<UserRecord>>;

    /// Grava `load_all() + [record]`. Quem chama já verificou `exists_by_cpf`.
    async fn append(&self, record: UserRecord) -> AppResult<()>;

    async fn exists_by_cpf(&self, cpf: &Cpf) -> AppResult<bool> {
        Ok(self.load_all().await?.iter().any(|u| &u.cpf == cpf))
    }

    /// Primeiro registo com CPF e senha exatamente iguais.
    async fn find_by_credential(&self, cpf: &Cpf, password: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .find(|u| &u.cpf == cpf && u.password == password))
    }
}

/// Slot do "utilizador atual", separado da coleção de registos.
#[async_trait]
pub trait SessionSlot: Send + Sync {
    async fn set_session(&self, record: &UserRecord) -> AppResult<()>;
    async fn get_session(&self) -> AppResult<Option<UserRecord>>;
    async fn clear_session(&self) -> AppResult<()>;
}

// Em produção o marcador vive na sessão do browser (tower-sessions)
#[async_trait]
impl SessionSlot for Session {
    async fn set_session(&self, record: &UserRecord) -> AppResult<()> {
        // Gera novo ID de sessão antes de autenticar
        self.cycle_id()
            .await
            .map_err(|e| AppError::SessionError(format!("Falha ao rodar ID: {}", e)))?;
        self.insert(CURRENT_USER_KEY, record)
            .await
            .map_err(|e| AppError::SessionError(format!("Falha ao inserir na sessão: {}", e)))
    }

    // Marcador ilegível (esquema antigo, registo corrompido) conta como ausente e é apagado
    async fn get_session(&self) -> AppResult<Option<UserRecord>> {
        let Some(value) = self
            .get_value(CURRENT_USER_KEY)
            .await
            .map_err(|e| AppError::SessionError(format!("Erro ao ler sessão: {}", e)))?
        else {
            return Ok(None);
        };
        match serde_json::from_value::<UserRecord>(value) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!("Marcador de sessão inválido descartado: {}", e);
                self.clear_session().await?;
                Ok(None)
            }
        }
    }

    async fn clear_session(&self) -> AppResult<()> {
        // remove_value não desserializa, por isso apaga também marcadores ilegíveis
        self.remove_value(CURRENT_USER_KEY)
            .await
            .map_err(|e| AppError::SessionError(format!("Falha ao limpar sessão: {}", e)))?;
        Ok(())
    }
}

/// Armazenamento em memória, usado nos testes.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: Mutex<Vec<UserRecord>>,
    quota: Option<usize>,
}

#[cfg(test)]
impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simula a quota do armazenamento: escritas além de `max_records` falham.
    pub fn with_quota(max_records: usize) -> Self {
        Self {
            records: Mutex::default(),
            quota: Some(max_records),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl UserStore for MemoryUserStore {
    async fn load_all(&self) -> AppResult<Vec<UserRecord>> {
        Ok(self.records.lock().await.clone())
    }

    async fn append(&self, record: UserRecord) -> AppResult<()> {
        let mut records = self.records.lock().await;
        if self.quota.is_some_and(|max| records.len() >= max) {
            return Err(AppError::PersistenceUnavailable(
                "quota do armazenamento excedida".to_string(),
            ));
        }
        records.push(record);
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySessionSlot {
    current: Mutex<Option<UserRecord>>,
}

#[cfg(test)]
impl MemorySessionSlot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
#[async_trait]
impl SessionSlot for MemorySessionSlot {
    async fn set_session(&self, record: &UserRecord) -> AppResult<()> {
        *self.current.lock().await = Some(record.clone());
        Ok(())
    }

    async fn get_session(&self) -> AppResult<Option<UserRecord>> {
        Ok(self.current.lock().await.clone())
    }

    async fn clear_session(&self) -> AppResult<()> {
        self.current.lock().await.take();
        Ok(())
    }
}
