//! Reminder reconciliation.
//!
//! Fired reminders arrive as free text. Habit identity is recovered from a
//! fixed message convention and matched against the tracked habit set:
//!
//! - candidates are the text after the first `:`, split on commas and
//!   trimmed ("Time to do your habit: Meditation, Reading" yields two);
//! - a candidate matches a habit when their lowercase forms are equal.
//!
//! The grammar is deliberately this small; the message format is a fixed
//! convention shared with the reminder service, not a general language.

use crate::gateway::reminder::ReminderRecord;

/// Habit-name candidates embedded in a reminder message.
///
/// No colon means no identifiable habit: the result is empty.
pub fn extract_candidates(message: &str) -> Vec<String> {
    let Some((_, after)) = message.split_once(':') else {
        return Vec::new();
    };
    let after = after.trim();
    if after.contains(',') {
        after.split(',').map(|part| part.trim().to_string()).collect()
    } else {
        vec![after.to_string()]
    }
}

/// Match candidates against tracked habit names, case-insensitively.
///
/// The first habit whose lowercase form equals the candidate's wins. Output
/// follows candidate order; each matched habit appears once, first seen
/// first.
pub fn match_to_habits(candidates: &[String], habit_names: &[String]) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();
    for candidate in candidates {
        let lowered = candidate.to_lowercase();
        let hit = habit_names
            .iter()
            .find(|name| name.to_lowercase() == lowered);
        if let Some(name) = hit {
            if !matched.contains(name) {
                matched.push(name.clone());
            }
        }
    }
    matched
}

/// Messages of fired reminders that mention a tracked habit.
///
/// A reminder qualifies only if its `fired` flag is set and its message
/// contains some tracked habit name as a case-insensitive substring.
/// Everything else is dropped silently.
pub fn filter_fired_relevant(reminders: &[ReminderRecord], habit_names: &[String]) -> Vec<String> {
    reminders
        .iter()
        .filter(|reminder| reminder.fired)
        .filter(|reminder| {
            let message = reminder.message.to_lowercase();
            habit_names
                .iter()
                .any(|name| message.contains(&name.to_lowercase()))
        })
        .map(|reminder| reminder.message.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::reminder::{ReminderRecord, ServiceId};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn reminder(message: &str, fired: bool) -> ReminderRecord {
        ReminderRecord {
            id: Some(ServiceId::Num(1)),
            message: message.to_string(),
            fired,
            kind: "timed".to_string(),
            remaining: None,
        }
    }

    #[test]
    fn extracts_comma_separated_candidates_after_colon() {
        assert_eq!(
            extract_candidates("⏰ Time to do your habit: Meditation, Reading"),
            names(&["Meditation", "Reading"])
        );
    }

    #[test]
    fn extracts_single_candidate() {
        assert_eq!(
            extract_candidates("Time to do your habit: Meditation"),
            names(&["Meditation"])
        );
    }

    #[test]
    fn splits_on_first_colon_only() {
        assert_eq!(
            extract_candidates("Note: remember: Stretch"),
            names(&["remember: Stretch"])
        );
    }

    #[test]
    fn no_colon_means_no_candidates() {
        assert!(extract_candidates("Drink some water").is_empty());
    }

    #[test]
    fn matches_case_insensitively_to_stored_name() {
        assert_eq!(
            match_to_habits(&names(&["meditation"]), &names(&["Meditation", "Reading"])),
            names(&["Meditation"])
        );
    }

    #[test]
    fn duplicate_candidates_collapse_first_seen_order() {
        assert_eq!(
            match_to_habits(
                &names(&["reading", "Meditation", "READING"]),
                &names(&["Meditation", "Reading"]),
            ),
            names(&["Reading", "Meditation"])
        );
    }

    #[test]
    fn unknown_candidates_are_dropped() {
        assert!(match_to_habits(&names(&["Juggling"]), &names(&["Reading"])).is_empty());
    }

    #[test]
    fn keeps_only_fired_reminders_mentioning_tracked_habits() {
        let reminders = vec![
            reminder("⏰ Time to do your habit: Reading", true),
            reminder("⏰ Time to do your habit: Reading", false),
            reminder("Pick up groceries", true),
            reminder("don't forget READING time", true),
        ];

        let relevant = filter_fired_relevant(&reminders, &names(&["Reading"]));
        assert_eq!(
            relevant,
            names(&[
                "⏰ Time to do your habit: Reading",
                "don't forget READING time",
            ])
        );
    }

    #[test]
    fn no_tracked_habits_means_nothing_is_relevant() {
        let reminders = vec![reminder("⏰ Time to do your habit: Reading", true)];
        assert!(filter_fired_relevant(&reminders, &[]).is_empty());
    }
}
