//! Formatter service gateway -- free-text normalization (trimming, spacing,
//! casing, punctuation). Falls back to the original input whenever the
//! service cannot improve on it.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::Transport;

#[derive(Deserialize)]
struct FormatResponse {
    #[serde(default)]
    success: bool,
    formatted: Option<String>,
}

pub struct FormatterGateway {
    transport: Transport,
    base: Url,
}

impl FormatterGateway {
    pub fn new(base: Url, timeout: Duration) -> Self {
        Self {
            transport: Transport::new(timeout),
            base,
        }
    }

    pub fn is_available(&self) -> bool {
        let Ok(url) = self.base.join("health") else {
            return false;
        };
        self.transport.probe(url)
    }

    /// Normalize `text`. Blank input is returned as-is without a network
    /// call; any service failure returns the original text.
    pub fn format(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }
        let Ok(url) = self.base.join("format") else {
            return text.to_string();
        };
        let body = serde_json::json!({ "text": text });
        match self.transport.post_json::<FormatResponse>(url, &body) {
            Some(FormatResponse {
                success: true,
                formatted: Some(formatted),
            }) => formatted,
            _ => text.to_string(),
        }
    }
}
