//! One-shot status messages shown on the page after a redirect.
//!
//! The message text stays on the server. The browser only carries a random token in a
//! short-lived cookie; the next page that takes the message removes it.

use axum::http::{HeaderMap, header};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

pub const FLASH_COOKIE: &str = "contact_flash";

struct Pending {
    message: String,
    created_at: Instant,
}

pub struct FlashMessages {
    pending: Mutex<HashMap<Uuid, Pending>>,
    ttl: Duration,
}

impl FlashMessages {
    pub fn new(ttl: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores `message` and returns the token that redeems it.
    pub async fn push(&self, message: impl Into<String>) -> Uuid {
        let now = Instant::now();
        let token = Uuid::new_v4();
        let mut pending = self.pending.lock().await;
        pending.retain(|_, entry| now.duration_since(entry.created_at) < self.ttl);
        pending.insert(
            token,
            Pending {
                message: message.into(),
                created_at: now,
            },
        );
        token
    }

    /// Removes and returns the message for `token`, if it has not expired.
    pub async fn take(&self, token: Uuid) -> Option<String> {
        let entry = self.pending.lock().await.remove(&token)?;
        (entry.created_at.elapsed() < self.ttl).then_some(entry.message)
    }

    /// `Set-Cookie` value handing `token` to the browser.
    pub fn cookie(&self, token: Uuid) -> String {
        format!(
            "{FLASH_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            self.ttl.as_secs().max(1)
        )
    }
}

/// `Set-Cookie` value that drops a consumed token.
pub fn clear_cookie() -> &'static str {
    "contact_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"
}

/// Extracts the flash token from the request's `Cookie` headers.
pub fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == FLASH_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}
