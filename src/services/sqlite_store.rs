// src/services/sqlite_store.rs
use crate::{
    error::{AppError, AppResult},
    models::user::UserRecord,
    services::store::UserStore,
};
use async_trait::async_trait;
use sqlx::SqlitePool;

/// Coleção de utilizadores guardada como um único blob JSON na tabela
/// `kv_slots`, sob a chave configurada (por omissão `users`).
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    db_pool: SqlitePool,
    users_key: String,
}

impl SqliteUserStore {
    pub fn new(db_pool: SqlitePool, users_key: impl Into<String>) -> Self {
        Self {
            db_pool,
            users_key: users_key.into(),
        }
    }

    async fn read_slot(&self) -> AppResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM kv_slots WHERE key = ?1")
            .bind(&self.users_key)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| {
                tracing::error!("Falha ao ler slot '{}': {:?}", self.users_key, e);
                AppError::PersistenceUnavailable(format!("leitura de '{}': {}", self.users_key, e))
            })
    }

    async fn write_slot(&self, value: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_slots (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(&self.users_key)
        .bind(value)
        .execute(&self.db_pool)
        .await
        .map_err(|e| {
            tracing::error!("Falha ao gravar slot '{}': {:?}", self.users_key, e);
            AppError::PersistenceUnavailable(format!("escrita de '{}': {}", self.users_key, e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn load_all(&self) -> AppResult<Vec<UserRecord>> {
        let Some(blob) = self.read_slot().await? else {
            tracing::debug!("Slot '{}' vazio, coleção vazia.", self.users_key);
            return Ok(Vec::new());
        };
        // Registos fora do esquema são rejeitados, não ignorados
        let users: Vec<UserRecord> = serde_json::from_str(&blob).map_err(|e| {
            tracing::error!("Slot '{}' com dados inválidos: {}", self.users_key, e);
            AppError::StoredDataInvalid(e)
        })?;
        tracing::debug!("Carregados {} utilizadores.", users.len());
        Ok(users)
    }

    async fn append(&self, record: UserRecord) -> AppResult<()> {
        let mut users = self.load_all().await?;
        users.push(record);
        let blob = serde_json::to_string(&users)?;
        self.write_slot(&blob).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Cpf;
    use crate::services::store::tests::record;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        // Uma só conexão: cada conexão a ":memory:" é uma base diferente
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn missing_slot_is_empty_collection() {
        let store = SqliteUserStore::new(memory_pool().await, "users");
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_writes_back_whole_collection() {
        let pool = memory_pool().await;
        let store = SqliteUserStore::new(pool.clone(), "users");
        store.append(record("Ana", "11111111111", "senha123")).await.unwrap();
        store.append(record("Bia", "22222222222", "senha456")).await.unwrap();

        let blob: String = sqlx::query_scalar("SELECT value FROM kv_slots WHERE key = 'users'")
            .fetch_one(&pool)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["cpf"], "11111111111");
        assert_eq!(json[1]["userType"], "aluno");

        let cpf = Cpf::parse("222.222.222-22").unwrap();
        assert!(store.exists_by_cpf(&cpf).await.unwrap());
        let found = store.find_by_credential(&cpf, "senha456").await.unwrap();
        assert_eq!(found.map(|u| u.name), Some("Bia".to_string()));
    }

    #[tokio::test]
    async fn stores_with_different_keys_do_not_share_records() {
        let pool = memory_pool().await;
        let users = SqliteUserStore::new(pool.clone(), "users");
        let legacy = SqliteUserStore::new(pool, "usuarios");
        users.append(record("Ana", "11111111111", "senha123")).await.unwrap();
        assert!(legacy.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_blob_is_rejected() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO kv_slots (key, value) VALUES ('users', ?1)")
            .bind(r#"[{"name":"Ana","cpf":"123.456.789-09"}]"#)
            .execute(&pool)
            .await
            .unwrap();
        let store = SqliteUserStore::new(pool, "users");
        let err = store.load_all().await.unwrap_err();
        assert!(matches!(err, AppError::StoredDataInvalid(_)));
    }

    #[tokio::test]
    async fn closed_pool_reports_persistence_unavailable() {
        let pool = memory_pool().await;
        let store = SqliteUserStore::new(pool.clone(), "users");
        pool.close().await;
        let err = store.append(record("Ana", "11111111111", "senha123")).await.unwrap_err();
        assert!(matches!(err, AppError::PersistenceUnavailable(_)));
    }
}
