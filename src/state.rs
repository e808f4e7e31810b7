// src/state.rs
use crate::services::store::UserStore;
use std::sync::Arc;
use tower_cookies::Key;

#[derive(Clone)]
pub struct AppState {
    // Repositório injetado: SQLite em produção, memória nos testes
    pub store: Arc<dyn UserStore>,
    // Chave para assinar o cookie das notificações
    pub cookie_key: Key,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, cookie_key: Key) -> Self {
        Self { store, cookie_key }
    }
}

