//! Reminder service gateway.
//!
//! Reminder lifecycle state lives entirely in the service; this side only
//! creates reminders, reads the `fired` flag off listings, and issues
//! deletes.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

pub use super::ServiceId;
use super::Transport;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
const DAILY_RECURRENCES: u32 = 365;

/// One reminder as reported by the listing endpoint. Fields are tolerant of
/// absence; the service's wire format is not under our control.
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderRecord {
    pub id: Option<ServiceId>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub fired: bool,
    /// "timed" or "recurring".
    #[serde(default = "default_kind", rename = "type")]
    pub kind: String,
    /// Remaining occurrences of a recurring reminder.
    pub remaining: Option<u64>,
}

fn default_kind() -> String {
    "timed".to_string()
}

impl ReminderRecord {
    pub fn is_recurring(&self) -> bool {
        self.kind == "recurring"
    }
}

/// Per-leg outcome of a daily reminder setup.
///
/// Daily setup is a dual write (a one-time reminder for the first
/// notification plus a recurring one for every day after). The legs are
/// independent and the create responses carry no id, so a partial failure
/// cannot be rolled back; it is reported instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySetup {
    /// The one-time leg for the initial notification went through.
    pub initial: bool,
    /// The recurring daily leg went through.
    pub recurring: bool,
}

impl DailySetup {
    pub fn is_complete(&self) -> bool {
        self.initial && self.recurring
    }

    pub fn is_total_failure(&self) -> bool {
        !self.initial && !self.recurring
    }
}

#[derive(Deserialize)]
struct CreateResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    success: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteFiredResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    deleted_count: u64,
}

pub struct ReminderGateway {
    transport: Transport,
    base: Url,
}

impl ReminderGateway {
    pub fn new(base: Url, timeout: Duration) -> Self {
        Self {
            transport: Transport::new(timeout),
            base,
        }
    }

    /// True if the service answers its listing endpoint.
    pub fn is_available(&self) -> bool {
        let Ok(url) = self.base.join("reminders") else {
            return false;
        };
        self.transport.probe(url)
    }

    /// Create a one-time reminder firing after `seconds`. Success requires
    /// HTTP 201 and `success: true` in the body.
    pub fn create_one_time(&self, message: &str, seconds: u64) -> bool {
        let Ok(url) = self.base.join("reminders") else {
            return false;
        };
        let body = serde_json::json!({ "message": message, "seconds": seconds });
        match self.transport.post_with_status::<CreateResponse>(url, &body) {
            Some((status, resp)) if status == StatusCode::CREATED => resp.success,
            _ => false,
        }
    }

    /// Set up a daily reminder: one-time leg firing after `initial_seconds`,
    /// then a recurring leg every 24 hours for a year.
    pub fn create_daily(&self, message: &str, initial_seconds: u64) -> DailySetup {
        let initial = self.create_one_time(message, initial_seconds);

        let recurring = match self.base.join("reminders/recurring") {
            Ok(url) => {
                let body = serde_json::json!({
                    "message": message,
                    "duration_seconds": SECONDS_PER_DAY,
                    "recurrences": DAILY_RECURRENCES,
                    "interval": "daily",
                });
                match self.transport.post_with_status::<CreateResponse>(url, &body) {
                    Some((status, resp)) if status == StatusCode::CREATED => resp.success,
                    _ => false,
                }
            }
            Err(_) => false,
        };

        DailySetup { initial, recurring }
    }

    /// All reminders known to the service. Empty on any failure.
    pub fn list(&self) -> Vec<ReminderRecord> {
        let Ok(url) = self.base.join("reminders") else {
            return Vec::new();
        };
        self.transport.get_json(url).unwrap_or_default()
    }

    /// Delete one reminder by id.
    pub fn delete(&self, id: &ServiceId) -> bool {
        let path = format!("reminders/{}", urlencoding::encode(&id.to_string()));
        let Ok(url) = self.base.join(&path) else {
            return false;
        };
        self.transport
            .delete_json::<DeleteResponse>(url)
            .map(|resp| resp.success)
            .unwrap_or(false)
    }

    /// Delete every fired reminder. `Some(count)` on success, `None` when
    /// the service is unreachable or refuses.
    pub fn delete_all_fired(&self) -> Option<u64> {
        let url = self.base.join("reminders/fired/all").ok()?;
        let resp: DeleteFiredResponse = self.transport.delete_json(url)?;
        resp.success.then_some(resp.deleted_count)
    }
}
