use axum_extra::extract::cookie::{Cookie, CookieJar};
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

/// Name of the one-time flash cookie.
pub const FLASH_COOKIE: &str = "notekeep_flash";

/// Severity of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(FlashLevel::Success),
            "error" => Some(FlashLevel::Error),
            _ => None,
        }
    }
}

/// A one-time notice, surfaced by the next rendered view and then gone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a flash message for the next rendered view.
pub fn set(jar: CookieJar, level: FlashLevel, message: &str) -> CookieJar {
    // Percent-encode the message so free text stays a valid cookie value.
    let value = format!(
        "{}:{}",
        level.as_str(),
        utf8_percent_encode(message, NON_ALPHANUMERIC)
    );
    jar.add(
        Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .build(),
    )
}

/// Consume the pending flash message, clearing its cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar.get(FLASH_COOKIE).and_then(|cookie| parse(cookie.value()));
    let mut removal = Cookie::from(FLASH_COOKIE);
    removal.set_path("/");
    (jar.remove(removal), flash)
}

fn parse(value: &str) -> Option<Flash> {
    let (level, message) = value.split_once(':')?;
    let level = FlashLevel::parse(level)?;
    let message = percent_decode_str(message).decode_utf8().ok()?.into_owned();
    Some(Flash { level, message })
}
