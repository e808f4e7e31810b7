// src/main.rs

// --- Declaração dos Módulos ---
mod config;
mod db;
mod error;
mod models;
mod services;
mod state;
mod templates;
mod web;

// --- Imports ---
use crate::{config::Config, services::sqlite_store::SqliteUserStore, state::AppState};
use axum::serve;
use std::{env, sync::Arc};
use time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_cookies::{CookieManagerLayer, Key};
use tower_http::trace::TraceLayer;
use tower_sessions::{ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuração do Logging (Tracing) ---
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                env::var("RUST_LOG")
                    .unwrap_or_else(|_| "flipper=debug,tower_http=info,sqlx=warn,tower_sessions=info".into())
                    .into()
            }),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("🐬 Iniciando portal Flipper...");

    let config = Config::from_env().map_err(|e| {
        tracing::error!("❌ Configuração inválida: {}", e);
        anyhow::anyhow!("Falha ao ler configuração: {}", e)
    })?;

    // --- Configuração da Base de Dados ---
    let db_pool = match db::create_db_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("❌ Falha crítica ao inicializar a base de dados: {}", e);
            return Err(anyhow::anyhow!("Falha ao conectar/migrar DB: {}", e));
        }
    };

    // --- Configuração das Sessões ---
    let session_store = SqliteStore::new(db_pool.clone())
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("Falha ao criar session store: {}", e))?;
    session_store
        .migrate()
        .await
        .map_err(|e| anyhow::anyhow!("Falha ao migrar tabela de sessões: {}", e))?;

    // Limpeza periódica de sessões expiradas
    let session_store_clone = session_store.clone();
    tokio::spawn(async move {
        if let Err(e) = session_store_clone
            .continuously_delete_expired(tokio::time::Duration::from_secs(60 * 60))
            .await
        {
            tracing::error!("Erro na task de limpeza de sessões: {:?}", e);
        }
    });
    tracing::info!("🧹 Tarefa de limpeza de sessões iniciada.");

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(config.session_inactivity_days)));
    tracing::info!("🔑 Camada de sessão configurada.");

    // Já validada com >= 64 bytes em Config::from_env
    let cookie_key = Key::try_from(config.session_secret.as_bytes())
        .map_err(|e| anyhow::anyhow!("SESSION_SECRET inválida para assinar cookies: {}", e))?;

    // --- Criação do Estado da Aplicação ---
    let store = SqliteUserStore::new(db_pool, config.users_key.clone());
    tracing::info!("📦 Registos de utilizadores no slot '{}'.", config.users_key);
    let app_state = AppState::new(Arc::new(store), cookie_key);

    // --- Configuração do Endereço e Listener ---
    tracing::info!("📡 Servidor escutando em http://{}", config.bind_addr);
    let listener = match TcpListener::bind(config.bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar listener em {}: {}", config.bind_addr, e);
            return Err(e.into());
        }
    };

    // --- Router e Camadas (Middlewares) ---
    let app = web::routes::create_router(app_state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CookieManagerLayer::new())
            .layer(session_layer),
    );

    tracing::info!("👂 Servidor pronto para aceitar conexões...");
    if let Err(e) = serve(listener, app.into_make_service()).await {
        tracing::error!("❌ Erro fatal no servidor: {}", e);
        return Err(e.into());
    }

    Ok(())
}
