//! One-shot flash messages carried across a redirect.
//!
//! Messages queue up in the `messages` cookie as a JSON list and are drained by
//! the next JSON view that renders them. The list is stored URL-safe base64
//! encoded so the cookie value only holds token characters.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use tower_cookies::{Cookie, Cookies};
use tracing::warn;

const FLASH_COOKIE: &str = "messages";

/// Severity of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Neutral information
    Info,
    /// A completed action
    Success,
    /// Something the user should notice
    Warning,
    /// A request that could not be carried out
    Error,
}

/// A message shown once on the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    /// Severity
    pub level: Level,
    /// Human-readable text
    pub message: String,
}

fn encode(messages: &[FlashMessage]) -> serde_json::Result<String> {
    serde_json::to_vec(messages).map(|json| URL_SAFE_NO_PAD.encode(json))
}

fn decode(value: &str) -> Option<Vec<FlashMessage>> {
    let json = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&json).ok()
}

fn pending(cookies: &Cookies) -> Vec<FlashMessage> {
    cookies
        .get(FLASH_COOKIE)
        .and_then(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

/// Queues a message for the next rendered page.
pub fn push(cookies: &Cookies, level: Level, message: impl Into<String>) {
    let mut messages = pending(cookies);
    messages.push(FlashMessage {
        level,
        message: message.into(),
    });

    match encode(&messages) {
        Ok(value) => cookies.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .build(),
        ),
        Err(e) => warn!("Failed to encode flash messages: {e}"),
    }
}

/// Drains all pending messages.
pub fn take(cookies: &Cookies) -> Vec<FlashMessage> {
    if cookies.get(FLASH_COOKIE).is_none() {
        return Vec::new();
    }
    let messages = pending(cookies);
    cookies.remove(Cookie::build(FLASH_COOKIE).path("/").build());
    messages
}
