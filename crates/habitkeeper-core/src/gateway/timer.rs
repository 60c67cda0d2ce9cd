//! Timer service gateway -- start/stop elapsed-time tracking by label.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use super::{ServiceId, Transport};
use crate::store::DurationRecord;

#[derive(Deserialize)]
struct StartResponse {
    #[serde(default)]
    success: bool,
    timer: Option<StartedTimer>,
}

#[derive(Deserialize)]
struct StartedTimer {
    id: ServiceId,
}

#[derive(Deserialize)]
struct StopResponse {
    #[serde(default)]
    success: bool,
    timer: Option<StoppedTimer>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoppedTimer {
    elapsed_time: DurationRecord,
}

pub struct TimerGateway {
    transport: Transport,
    base: Url,
}

impl TimerGateway {
    pub fn new(base: Url, timeout: Duration) -> Self {
        Self {
            transport: Transport::new(timeout),
            base,
        }
    }

    /// True if the service answers its listing endpoint.
    pub fn is_available(&self) -> bool {
        let Ok(url) = self.base.join("timers") else {
            return false;
        };
        self.transport.probe(url)
    }

    /// Start a timer under `label`. `None` when the service is down or
    /// refuses.
    pub fn start(&self, label: &str) -> Option<ServiceId> {
        let url = self.base.join("timers/start").ok()?;
        let body = serde_json::json!({ "label": label });
        let resp: StartResponse = self.transport.post_json(url, &body)?;
        if !resp.success {
            return None;
        }
        resp.timer.map(|t| t.id)
    }

    /// Stop a running timer and collect its elapsed duration.
    pub fn stop(&self, id: &ServiceId) -> Option<DurationRecord> {
        let path = format!("timers/{}/stop", urlencoding::encode(&id.to_string()));
        let url = self.base.join(&path).ok()?;
        let resp: StopResponse = self.transport.post_json(url, &serde_json::json!({}))?;
        if !resp.success {
            return None;
        }
        resp.timer.map(|t| t.elapsed_time)
    }
}
