//! Service gateways.
//!
//! Thin fault-tolerant adapters around the three companion services (timer,
//! reminder, formatter). Every call is one synchronous request with a
//! bounded timeout; any network error, non-2xx status, or malformed body
//! yields the documented fallback value. Callers branch on domain values
//! (`None`, `false`, empty list, original input), never on transport
//! errors.
//!
//! Requests go through async reqwest blocked on a process-wide tokio
//! runtime, keeping each CLI command a plain synchronous call.

pub mod formatter;
pub mod reminder;
pub mod timer;

use std::fmt;
use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;
use url::Url;

fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| Runtime::new().expect("failed to start async runtime"))
}

fn block_on<F: Future>(future: F) -> F::Output {
    runtime().block_on(future)
}

/// A service-assigned id. The wire format does not pin the type, so both
/// JSON numbers and strings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceId {
    Num(u64),
    Text(String),
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceId::Num(n) => write!(f, "{n}"),
            ServiceId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Shared HTTP plumbing for the gateways: one client, one timeout, and the
/// uniform failure-to-fallback mapping.
pub(crate) struct Transport {
    http: Client,
    timeout: Duration,
}

impl Transport {
    pub(crate) fn new(timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            timeout,
        }
    }

    /// True iff GET on `url` answers with a 2xx status in time.
    pub(crate) fn probe(&self, url: Url) -> bool {
        block_on(async {
            match self.http.get(url).timeout(self.timeout).send().await {
                Ok(resp) => resp.status().is_success(),
                Err(_) => false,
            }
        })
    }

    pub(crate) fn get_json<T: DeserializeOwned>(&self, url: Url) -> Option<T> {
        block_on(async {
            let resp = self.http.get(url).timeout(self.timeout).send().await.ok()?;
            if !resp.status().is_success() {
                return None;
            }
            resp.json::<T>().await.ok()
        })
    }

    pub(crate) fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Option<T> {
        self.post_with_status(url, body)
            .and_then(|(status, parsed)| status.is_success().then_some(parsed))
    }

    /// POST returning the status alongside the parsed body, for endpoints
    /// whose contract names a specific status (reminder creation: 201).
    pub(crate) fn post_with_status<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &impl Serialize,
    ) -> Option<(StatusCode, T)> {
        block_on(async {
            let resp = self
                .http
                .post(url)
                .json(body)
                .timeout(self.timeout)
                .send()
                .await
                .ok()?;
            let status = resp.status();
            let parsed = resp.json::<T>().await.ok()?;
            Some((status, parsed))
        })
    }

    pub(crate) fn delete_json<T: DeserializeOwned>(&self, url: Url) -> Option<T> {
        block_on(async {
            let resp = self
                .http
                .delete(url)
                .timeout(self.timeout)
                .send()
                .await
                .ok()?;
            if !resp.status().is_success() {
                return None;
            }
            resp.json::<T>().await.ok()
        })
    }
}
