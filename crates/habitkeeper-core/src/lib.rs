//! # Habitkeeper Core Library
//!
//! Core business logic for the Habitkeeper habit tracker. The CLI binary is
//! a thin interactive layer over this crate.
//!
//! ## Architecture
//!
//! - **Record Store**: JSON-file persistence of habit completion histories,
//!   loaded fresh per command and written back atomically
//! - **Completion Engine**: one-completion-per-day enforcement, duration
//!   merging, aggregate statistics
//! - **Reminder Reconciliation**: recovery of habit identity from fired
//!   free-text reminder messages
//! - **Service Gateways**: fault-tolerant adapters for the timer, reminder,
//!   and formatter services (bounded timeout, fallback on any failure)
//!
//! ## Key Components
//!
//! - [`HabitStore`]: persisted habit -> completion-entry mapping
//! - [`HabitStats`]: per-habit aggregates
//! - [`Config`]: application configuration management
//! - [`gateway`]: the three service adapters

pub mod completion;
pub mod config;
pub mod error;
pub mod gateway;
pub mod reconcile;
pub mod store;

pub use completion::{format_hms, is_completed_on, record_completion, HabitStats, RepeatPolicy};
pub use config::{Config, ServicesConfig, UiConfig};
pub use error::{ConfigError, CoreError, HabitError, StoreError, ValidationError};
pub use gateway::formatter::FormatterGateway;
pub use gateway::reminder::{DailySetup, ReminderGateway, ReminderRecord};
pub use gateway::timer::TimerGateway;
pub use gateway::ServiceId;
pub use store::{CompletionEntry, DurationRecord, HabitStore};
