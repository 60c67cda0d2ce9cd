//! Gateway contract tests against a mock HTTP server.
//!
//! Every gateway call must resolve to its documented fallback on network
//! failure, non-2xx status, or malformed body -- never an error or panic.

use std::time::Duration;

use mockito::Matcher;
use url::Url;

use habitkeeper_core::{FormatterGateway, ReminderGateway, ServiceId, TimerGateway};

const TIMEOUT: Duration = Duration::from_secs(2);

fn base(server: &mockito::ServerGuard) -> Url {
    Url::parse(&server.url()).unwrap()
}

/// Nothing listens here; connections are refused immediately.
fn dead_base() -> Url {
    Url::parse("http://127.0.0.1:9").unwrap()
}

// ── Timer ────────────────────────────────────────────────────────────

#[test]
fn timer_start_returns_id() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/timers/start")
        .match_body(Matcher::PartialJson(serde_json::json!({"label": "Reading"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "timer": {"id": 42, "label": "Reading"}}"#)
        .create();

    let gateway = TimerGateway::new(base(&server), TIMEOUT);
    assert_eq!(gateway.start("Reading"), Some(ServiceId::Num(42)));
    mock.assert();
}

#[test]
fn timer_start_accepts_string_ids() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/timers/start")
        .with_status(200)
        .with_body(r#"{"success": true, "timer": {"id": "t-7"}}"#)
        .create();

    let gateway = TimerGateway::new(base(&server), TIMEOUT);
    assert_eq!(gateway.start("Run"), Some(ServiceId::Text("t-7".into())));
}

#[test]
fn timer_start_unsuccessful_body_is_none() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/timers/start")
        .with_status(200)
        .with_body(r#"{"success": false}"#)
        .create();

    let gateway = TimerGateway::new(base(&server), TIMEOUT);
    assert_eq!(gateway.start("Run"), None);
}

#[test]
fn timer_stop_parses_elapsed_duration() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/timers/42/stop")
        .with_status(200)
        .with_body(
            r#"{"success": true, "timer": {"elapsedTime": {"totalSeconds": 330, "formatted": "00:05:30"}}}"#,
        )
        .create();

    let gateway = TimerGateway::new(base(&server), TIMEOUT);
    let elapsed = gateway.stop(&ServiceId::Num(42)).unwrap();
    assert_eq!(elapsed.total_seconds, 330);
    assert_eq!(elapsed.formatted, "00:05:30");
    mock.assert();
}

#[test]
fn timer_stop_malformed_body_is_none() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/timers/42/stop")
        .with_status(200)
        .with_body("not json at all")
        .create();

    let gateway = TimerGateway::new(base(&server), TIMEOUT);
    assert_eq!(gateway.stop(&ServiceId::Num(42)), None);
}

#[test]
fn timer_server_error_is_none() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/timers/start")
        .with_status(500)
        .with_body(r#"{"success": true, "timer": {"id": 1}}"#)
        .create();

    let gateway = TimerGateway::new(base(&server), TIMEOUT);
    assert_eq!(gateway.start("Run"), None);
}

#[test]
fn timer_availability_follows_listing_endpoint() {
    let mut server = mockito::Server::new();
    let _m = server.mock("GET", "/timers").with_status(200).create();

    assert!(TimerGateway::new(base(&server), TIMEOUT).is_available());
    assert!(!TimerGateway::new(dead_base(), TIMEOUT).is_available());
}

#[test]
fn timer_dead_service_falls_back_everywhere() {
    let gateway = TimerGateway::new(dead_base(), TIMEOUT);
    assert_eq!(gateway.start("Run"), None);
    assert_eq!(gateway.stop(&ServiceId::Num(1)), None);
}

// ── Reminder ─────────────────────────────────────────────────────────

#[test]
fn reminder_create_requires_201_and_success() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/reminders")
        .match_body(Matcher::PartialJson(
            serde_json::json!({"message": "⏰ Time to do your habit: Reading", "seconds": 90}),
        ))
        .with_status(201)
        .with_body(r#"{"success": true}"#)
        .create();

    let gateway = ReminderGateway::new(base(&server), TIMEOUT);
    assert!(gateway.create_one_time("⏰ Time to do your habit: Reading", 90));
    mock.assert();
}

#[test]
fn reminder_create_with_200_is_failure() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/reminders")
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create();

    let gateway = ReminderGateway::new(base(&server), TIMEOUT);
    assert!(!gateway.create_one_time("msg", 60));
}

#[test]
fn daily_setup_reports_both_legs() {
    let mut server = mockito::Server::new();
    let _one_time = server
        .mock("POST", "/reminders")
        .with_status(201)
        .with_body(r#"{"success": true}"#)
        .create();
    let recurring = server
        .mock("POST", "/reminders/recurring")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "duration_seconds": 86400,
            "recurrences": 365,
            "interval": "daily",
        })))
        .with_status(201)
        .with_body(r#"{"success": true}"#)
        .create();

    let gateway = ReminderGateway::new(base(&server), TIMEOUT);
    let setup = gateway.create_daily("⏰ Time to do your habit: Reading", 3600);
    assert!(setup.is_complete());
    recurring.assert();
}

#[test]
fn daily_setup_partial_failure_is_visible() {
    let mut server = mockito::Server::new();
    let _one_time = server
        .mock("POST", "/reminders")
        .with_status(201)
        .with_body(r#"{"success": true}"#)
        .create();
    let _recurring = server
        .mock("POST", "/reminders/recurring")
        .with_status(500)
        .with_body(r#"{"success": false}"#)
        .create();

    let gateway = ReminderGateway::new(base(&server), TIMEOUT);
    let setup = gateway.create_daily("msg", 3600);
    assert!(setup.initial);
    assert!(!setup.recurring);
    assert!(!setup.is_complete());
    assert!(!setup.is_total_failure());
}

#[test]
fn reminder_list_parses_records() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/reminders")
        .with_status(200)
        .with_body(
            r#"[
                {"id": 1, "message": "⏰ Time to do your habit: Reading", "fired": true, "type": "timed"},
                {"id": "r-2", "message": "daily one", "fired": false, "type": "recurring", "remaining": 12}
            ]"#,
        )
        .create();

    let gateway = ReminderGateway::new(base(&server), TIMEOUT);
    let reminders = gateway.list();
    assert_eq!(reminders.len(), 2);
    assert!(reminders[0].fired);
    assert!(!reminders[0].is_recurring());
    assert!(reminders[1].is_recurring());
    assert_eq!(reminders[1].remaining, Some(12));
    assert_eq!(reminders[1].id, Some(ServiceId::Text("r-2".into())));
}

#[test]
fn reminder_list_malformed_body_is_empty() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/reminders")
        .with_status(200)
        .with_body(r#"{"oops": "not an array"}"#)
        .create();

    let gateway = ReminderGateway::new(base(&server), TIMEOUT);
    assert!(gateway.list().is_empty());
}

#[test]
fn reminder_delete_by_id() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("DELETE", "/reminders/7")
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create();

    let gateway = ReminderGateway::new(base(&server), TIMEOUT);
    assert!(gateway.delete(&ServiceId::Num(7)));
    mock.assert();
}

#[test]
fn reminder_delete_all_fired_returns_count() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("DELETE", "/reminders/fired/all")
        .with_status(200)
        .with_body(r#"{"success": true, "deletedCount": 3}"#)
        .create();

    let gateway = ReminderGateway::new(base(&server), TIMEOUT);
    assert_eq!(gateway.delete_all_fired(), Some(3));
}

#[test]
fn reminder_dead_service_falls_back_everywhere() {
    let gateway = ReminderGateway::new(dead_base(), TIMEOUT);
    assert!(!gateway.is_available());
    assert!(!gateway.create_one_time("msg", 60));
    assert!(gateway.create_daily("msg", 3600).is_total_failure());
    assert!(gateway.list().is_empty());
    assert!(!gateway.delete(&ServiceId::Num(1)));
    assert_eq!(gateway.delete_all_fired(), None);
}

// ── Formatter ────────────────────────────────────────────────────────

#[test]
fn formatter_returns_cleaned_text() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/format")
        .match_body(Matcher::PartialJson(serde_json::json!({"text": "  drink   water"})))
        .with_status(200)
        .with_body(r#"{"success": true, "formatted": "Drink water"}"#)
        .create();

    let gateway = FormatterGateway::new(base(&server), TIMEOUT);
    assert_eq!(gateway.format("  drink   water"), "Drink water");
    mock.assert();
}

#[test]
fn formatter_failure_returns_original_text() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/format")
        .with_status(500)
        .with_body("boom")
        .create();

    let gateway = FormatterGateway::new(base(&server), TIMEOUT);
    assert_eq!(gateway.format("keep me"), "keep me");
}

#[test]
fn formatter_unsuccessful_body_returns_original_text() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("POST", "/format")
        .with_status(200)
        .with_body(r#"{"success": false}"#)
        .create();

    let gateway = FormatterGateway::new(base(&server), TIMEOUT);
    assert_eq!(gateway.format("keep me"), "keep me");
}

#[test]
fn formatter_skips_network_for_blank_input() {
    // Dead endpoint: a network call would fall back, but blank input must
    // short-circuit before any request.
    let gateway = FormatterGateway::new(dead_base(), TIMEOUT);
    assert_eq!(gateway.format("   "), "   ");
    assert_eq!(gateway.format(""), "");
}

#[test]
fn formatter_health_endpoint() {
    let mut server = mockito::Server::new();
    let _m = server.mock("GET", "/health").with_status(200).create();

    assert!(FormatterGateway::new(base(&server), TIMEOUT).is_available());
    assert!(!FormatterGateway::new(dead_base(), TIMEOUT).is_available());
}
