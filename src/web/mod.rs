// src/web/mod.rs
pub mod auth_handlers;
pub mod cadastro_handlers;
pub mod flash;
pub mod mw_auth;
pub mod perfil_handlers;
pub mod routes;
