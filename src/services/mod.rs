// src/services/mod.rs
pub mod auth_service;
pub mod profile_service;
pub mod sqlite_store;
pub mod store;
pub mod user_service;
pub mod validation;
