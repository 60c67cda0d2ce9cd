//! Completion engine.
//!
//! Pure functions over explicit entry slices: the caller loads the store,
//! passes the relevant entries in, and persists whatever comes back. One
//! completion per habit per calendar date, unless the caller explicitly
//! opts into a repeat (the timed flow does, on user confirmation).

use chrono::NaiveDate;

use crate::error::HabitError;
use crate::store::{CompletionEntry, DurationRecord};

/// Whether a second completion on the same date is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPolicy {
    /// Reject a completion for a date that already has one.
    DenyRepeat,
    /// Append a second same-day entry (explicit user opt-in).
    AllowRepeat,
}

/// True if any entry is dated `date`.
pub fn is_completed_on(entries: &[CompletionEntry], date: NaiveDate) -> bool {
    entries.iter().any(|entry| entry.date == date)
}

/// Append a completion for `date`.
///
/// With [`RepeatPolicy::DenyRepeat`], a same-date entry makes this fail
/// with [`HabitError::AlreadyCompleted`] and the list is not modified.
pub fn record_completion(
    entries: &mut Vec<CompletionEntry>,
    habit: &str,
    date: NaiveDate,
    duration: Option<DurationRecord>,
    policy: RepeatPolicy,
) -> Result<(), HabitError> {
    if policy == RepeatPolicy::DenyRepeat && is_completed_on(entries, date) {
        return Err(HabitError::AlreadyCompleted(habit.to_string()));
    }
    entries.push(CompletionEntry::new(date, duration));
    Ok(())
}

/// Aggregate statistics for one habit's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitStats {
    pub total_count: usize,
    /// Date of the most recently recorded entry (insertion order, which may
    /// differ from the latest calendar date).
    pub last_completed: Option<NaiveDate>,
    pub last_duration: Option<DurationRecord>,
    pub timed_count: usize,
    /// Floor of mean `total_seconds` over timed entries; `None` when no
    /// entry carries a duration.
    pub average_seconds: Option<u64>,
}

impl HabitStats {
    pub fn compute(entries: &[CompletionEntry]) -> Self {
        let last = entries.last();
        let timed: Vec<&DurationRecord> =
            entries.iter().filter_map(|e| e.duration.as_ref()).collect();

        let average_seconds = if timed.is_empty() {
            None
        } else {
            let total: u64 = timed.iter().map(|d| d.total_seconds).sum();
            Some(total / timed.len() as u64)
        };

        Self {
            total_count: entries.len(),
            last_completed: last.map(|e| e.date),
            last_duration: last.and_then(|e| e.duration.clone()),
            timed_count: timed.len(),
            average_seconds,
        }
    }
}

/// `HH:MM:SS` with two-digit zero-padded fields.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
