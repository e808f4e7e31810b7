// src/services/validation.rs
//! Formatação e validação dos campos dos formulários.
//!
//! Funções puras: nunca falham, entrada inválida dá `false` ou uma máscara
//! parcial. A validação do CPF é só de formato (11 dígitos), sem cálculo dos
//! dígitos verificadores.
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const CPF_DIGITS: usize = 11;
pub const MIN_PASSWORD_LEN: usize = 8;

// "algo@algo.algo", sem espaços nem '@' extra
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("regex de e-mail inválida")
});

/// Projeção só com os dígitos.
pub fn normalize_cpf(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Aplica a máscara `000.000.000-00`. Dígitos a partir do 12.º são descartados.
pub fn format_cpf(raw: &str) -> String {
    let mut out = String::with_capacity(CPF_DIGITS + 3);
    for (i, digit) in raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(CPF_DIGITS)
        .enumerate()
    {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(digit);
    }
    out
}

pub fn validate_cpf(value: &str) -> bool {
    normalize_cpf(value).len() == CPF_DIGITS
}

pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Conta caracteres, não bytes ("ç" conta como um).
pub fn validate_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LEN
}

/// Mapa de erros por campo (`{campo: mensagem}`), devolvido ao formulário
/// para ser mostrado junto de cada input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    /// Mensagem do campo, ou string vazia se o campo está válido.
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}
