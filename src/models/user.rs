// src/models/user.rs
use crate::services::validation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// CPF normalizado: sempre exatamente 11 dígitos, sem pontuação.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpf(String);

impl Cpf {
    /// Aceita o CPF com ou sem máscara. Devolve `None` se não sobrarem
    /// exatamente 11 dígitos.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = validation::normalize_cpf(raw);
        validation::validate_cpf(&digits).then_some(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Versão com máscara `000.000.000-00`, para exibição.
    pub fn formatted(&self) -> String {
        validation::format_cpf(&self.0)
    }
}

impl TryFrom<String> for Cpf {
    type Error = String;

    // Registos guardados têm de vir já normalizados; pontuação aqui é dado corrompido.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() == validation::CPF_DIGITS && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value))
        } else {
            Err(format!("CPF armazenado inválido: '{}'", value))
        }
    }
}

impl From<Cpf> for String {
    fn from(cpf: Cpf) -> Self {
        cpf.0
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tipo de utilizador do portal.
///
/// `Other` guarda valores desconhecidos vindos do armazenamento, para que o
/// perfil ainda os consiga mostrar em bruto. O cadastro nunca o aceita.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserType {
    Aluno,
    Coordenador,
    Administrativo,
    Professor,
    Other(String),
}

/// Tipos aceites no cadastro, pela ordem do seletor.
pub static USER_TYPES: [UserType; 4] = [
    UserType::Aluno,
    UserType::Coordenador,
    UserType::Administrativo,
    UserType::Professor,
];

impl UserType {
    pub fn as_str(&self) -> &str {
        match self {
            UserType::Aluno => "aluno",
            UserType::Coordenador => "coordenador",
            UserType::Administrativo => "administrativo",
            UserType::Professor => "professor",
            UserType::Other(raw) => raw,
        }
    }

    /// Rótulo de exibição. Valores fora da tabela aparecem como foram guardados.
    pub fn label(&self) -> &str {
        match self {
            UserType::Aluno => "Aluno",
            UserType::Coordenador => "Coordenador",
            UserType::Administrativo => "Administrativo",
            UserType::Professor => "Professor",
            UserType::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, UserType::Other(_))
    }
}

impl From<String> for UserType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "aluno" => UserType::Aluno,
            "coordenador" => UserType::Coordenador,
            "administrativo" => UserType::Administrativo,
            "professor" => UserType::Professor,
            _ => UserType::Other(value),
        }
    }
}

impl From<UserType> for String {
    fn from(user_type: UserType) -> Self {
        match user_type {
            UserType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

// Representa um utilizador registado, tal como é guardado (JSON camelCase)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub cpf: Cpf,
    pub course: String,
    pub user_type: UserType,
    pub password: String,
}

// Struct para dados do formulário de cadastro
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub user_type: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

// Struct para dados do formulário de login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub cpf: String,
    #[serde(default)]
    pub password: String,
}

// Formulário "Esqueci minha senha"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecoveryForm {
    #[serde(default, rename = "recoveryEmail")]
    pub email: String,
}
