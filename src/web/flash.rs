// src/web/flash.rs
//! Notificações transitórias ("toasts") que sobrevivem a um redirect.
//!
//! Guardadas num cookie assinado, lidas uma única vez e apagadas.
//! A mensagem vai em base64url: o tower-cookies decodifica `%XX` na
//! leitura, o que invalidaria a assinatura de um valor percent-encoded.
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use tower_cookies::{Cookie, Cookies, Key};

const FLASH_COOKIE: &str = "flipper_flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }

    /// Classe CSS usada pelos templates.
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "toast sucesso",
            NoticeKind::Error => "toast erro",
        }
    }

    fn encode(&self) -> String {
        let prefix = match self.kind {
            NoticeKind::Success => "ok",
            NoticeKind::Error => "erro",
        };
        format!("{}:{}", prefix, URL_SAFE_NO_PAD.encode(self.message.as_bytes()))
    }

    fn decode(raw: &str) -> Option<Self> {
        let (prefix, encoded) = raw.split_once(':')?;
        let bytes = URL_SAFE_NO_PAD.decode(encoded).ok()?;
        let message = String::from_utf8(bytes).ok()?;
        match prefix {
            "ok" => Some(Self::success(message)),
            "erro" => Some(Self::error(message)),
            _ => None,
        }
    }
}

pub fn set_flash(cookies: &Cookies, key: &Key, notice: Notice) {
    let cookie = Cookie::build((FLASH_COOKIE, notice.encode()))
        .path("/")
        .http_only(true)
        .build();
    cookies.signed(key).add(cookie);
}

/// Lê e apaga a notificação pendente. Cookies adulterados são descartados.
pub fn take_flash(cookies: &Cookies, key: &Key) -> Option<Notice> {
    let signed = cookies.signed(key);
    let cookie = signed.get(FLASH_COOKIE)?;
    signed.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
    let notice = Notice::decode(cookie.value());
    if notice.is_none() {
        tracing::warn!("Cookie de notificação com formato inválido descartado.");
    }
    notice
}
