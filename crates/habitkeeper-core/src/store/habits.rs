//! Habit record store.
//!
//! One JSON document maps habit name to its list of completion entries:
//!
//! ```json
//! { "Meditation": [ { "date": "2024-01-01", "duration": null } ] }
//! ```
//!
//! Entry order within a habit is insertion order and is preserved on disk.
//! An older format stored bare date strings instead of entry objects; it is
//! migrated transparently on load.
//!
//! The store's lifetime is one command: load fresh, mutate in memory, save.
//! Saves go through a sibling temp file and `fs::rename`, so a failed write
//! leaves the previous file intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{HabitError, Result, StoreError};

const DATA_FILE: &str = "habits.json";

/// Elapsed time as reported by the timer service.
///
/// `formatted` is opaque display text supplied by the service; the core
/// aggregates `total_seconds` and never rewrites `formatted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationRecord {
    pub total_seconds: u64,
    pub formatted: String,
}

/// One recorded completion of a habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub date: NaiveDate,
    pub duration: Option<DurationRecord>,
}

impl CompletionEntry {
    pub fn new(date: NaiveDate, duration: Option<DurationRecord>) -> Self {
        Self { date, duration }
    }
}

/// On-disk entry shape: either the current object form or a legacy bare
/// date string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Full(CompletionEntry),
    Legacy(NaiveDate),
}

impl From<RawEntry> for CompletionEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Full(entry) => entry,
            RawEntry::Legacy(date) => CompletionEntry::new(date, None),
        }
    }
}

/// All tracked habits and their completion histories.
///
/// Habit names are case-sensitive keys. Iteration order is name order, not
/// insertion order; entry order within a habit is insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitStore {
    habits: BTreeMap<String, Vec<CompletionEntry>>,
}

impl HabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default on-disk location: `<data_dir>/habits.json`.
    pub fn default_path() -> Result<PathBuf> {
        Ok(data_dir()?.join(DATA_FILE))
    }

    /// Load from the default path.
    pub fn load() -> Result<Self> {
        Ok(Self::load_from(&Self::default_path()?)?)
    }

    /// Save to the default path.
    pub fn save(&self) -> Result<()> {
        Ok(self.save_to(&Self::default_path()?)?)
    }

    /// Read the store from `path`. A missing file is an empty store, not an
    /// error. Legacy bare-date entries are migrated as they are read.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(StoreError::ReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        let raw: BTreeMap<String, Vec<RawEntry>> =
            serde_json::from_str(&content).map_err(|e| StoreError::ParseFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        let habits = raw
            .into_iter()
            .map(|(name, entries)| (name, entries.into_iter().map(Into::into).collect()))
            .collect();

        Ok(Self { habits })
    }

    /// Write the whole store to `path`, replacing prior content.
    ///
    /// Serializes first, writes to `<path>.tmp`, then renames over the
    /// target, so the previous file survives any failure.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        let write_failed = |message: String| StoreError::WriteFailed {
            path: path.to_path_buf(),
            message,
        };

        let content =
            serde_json::to_string_pretty(&self.habits).map_err(|e| write_failed(e.to_string()))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(|e| write_failed(e.to_string()))?;
        std::fs::rename(&tmp, path).map_err(|e| write_failed(e.to_string()))
    }

    // ── Map operations ───────────────────────────────────────────────

    /// Start tracking a new habit with an empty history.
    pub fn add(&mut self, name: &str) -> Result<(), HabitError> {
        if self.habits.contains_key(name) {
            return Err(HabitError::DuplicateName(name.to_string()));
        }
        self.habits.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Move a habit's history to a new name, preserving entry order.
    ///
    /// Fails without touching either key if `old` is missing or `new` is
    /// already taken (case-sensitive).
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), HabitError> {
        if !self.habits.contains_key(old) {
            return Err(HabitError::NotFound(old.to_string()));
        }
        if self.habits.contains_key(new) {
            return Err(HabitError::DuplicateName(new.to_string()));
        }
        let entries = self.habits.remove(old).unwrap_or_default();
        self.habits.insert(new.to_string(), entries);
        Ok(())
    }

    /// Stop tracking a habit, returning its history.
    pub fn remove(&mut self, name: &str) -> Result<Vec<CompletionEntry>, HabitError> {
        self.habits
            .remove(name)
            .ok_or_else(|| HabitError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.habits.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.habits.keys().cloned().collect()
    }

    pub fn entries(&self, name: &str) -> Option<&[CompletionEntry]> {
        self.habits.get(name).map(Vec::as_slice)
    }

    pub fn entries_mut(&mut self, name: &str) -> Option<&mut Vec<CompletionEntry>> {
        self.habits.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CompletionEntry])> {
        self.habits
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn timed(secs: u64, formatted: &str) -> Option<DurationRecord> {
        Some(DurationRecord {
            total_seconds: secs,
            formatted: formatted.to_string(),
        })
    }

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = HabitStore::load_from(&dir.path().join("habits.json")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn legacy_bare_dates_are_migrated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        std::fs::write(&path, r#"{"Run": ["2024-01-01", "2024-01-02"]}"#).unwrap();

        let store = HabitStore::load_from(&path).unwrap();
        assert_eq!(
            store.entries("Run").unwrap(),
            &[
                CompletionEntry::new(date("2024-01-01"), None),
                CompletionEntry::new(date("2024-01-02"), None),
            ]
        );
    }

    #[test]
    fn mixed_legacy_and_current_entries_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        std::fs::write(
            &path,
            r#"{"Run": ["2024-01-01", {"date": "2024-01-02", "duration": {"totalSeconds": 90, "formatted": "00:01:30"}}]}"#,
        )
        .unwrap();

        let store = HabitStore::load_from(&path).unwrap();
        let entries = store.entries("Run").unwrap();
        assert_eq!(entries[0].duration, None);
        assert_eq!(entries[1].duration, timed(90, "00:01:30"));
    }

    #[test]
    fn save_load_roundtrip_preserves_entry_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");

        let mut store = HabitStore::new();
        store.add("Read").unwrap();
        let entries = store.entries_mut("Read").unwrap();
        // Deliberately out of date order: insertion order must survive.
        entries.push(CompletionEntry::new(date("2024-03-02"), None));
        entries.push(CompletionEntry::new(
            date("2024-03-01"),
            timed(120, "00:02:00"),
        ));

        store.save_to(&path).unwrap();
        let loaded = HabitStore::load_from(&path).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn save_overwrites_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");

        let mut store = HabitStore::new();
        store.add("Run").unwrap();
        store.save_to(&path).unwrap();
        store.add("Read").unwrap();
        store.save_to(&path).unwrap();

        let loaded = HabitStore::load_from(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn garbled_file_is_a_parse_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("habits.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            HabitStore::load_from(&path),
            Err(StoreError::ParseFailed { .. })
        ));
    }

    #[test]
    fn add_rejects_duplicate_case_sensitive() {
        let mut store = HabitStore::new();
        store.add("Run").unwrap();
        assert_eq!(
            store.add("Run"),
            Err(HabitError::DuplicateName("Run".to_string()))
        );
        // Different case is a different key.
        store.add("run").unwrap();
    }

    #[test]
    fn rename_moves_history() {
        let mut store = HabitStore::new();
        store.add("Jog").unwrap();
        store
            .entries_mut("Jog")
            .unwrap()
            .push(CompletionEntry::new(date("2024-01-01"), None));

        store.rename("Jog", "Run").unwrap();
        assert!(!store.contains("Jog"));
        assert_eq!(store.entries("Run").unwrap().len(), 1);
    }

    #[test]
    fn rename_onto_existing_name_leaves_both_untouched() {
        let mut store = HabitStore::new();
        store.add("Jog").unwrap();
        store.add("Run").unwrap();
        store
            .entries_mut("Jog")
            .unwrap()
            .push(CompletionEntry::new(date("2024-01-01"), None));

        assert_eq!(
            store.rename("Jog", "Run"),
            Err(HabitError::DuplicateName("Run".to_string()))
        );
        assert_eq!(store.entries("Jog").unwrap().len(), 1);
        assert_eq!(store.entries("Run").unwrap().len(), 0);
    }

    #[test]
    fn remove_missing_habit_is_not_found() {
        let mut store = HabitStore::new();
        assert_eq!(
            store.remove("Ghost"),
            Err(HabitError::NotFound("Ghost".to_string()))
        );
    }

    proptest! {
        #[test]
        fn roundtrip_any_store(
            habits in proptest::collection::btree_map(
                "[A-Za-z][A-Za-z ]{0,15}",
                proptest::collection::vec(
                    (0u64..3650, proptest::option::of(0u64..86_400)),
                    0..8,
                ),
                0..5,
            )
        ) {
            let base = date("2020-01-01");
            let mut store = HabitStore::new();
            for (name, days) in habits {
                store.add(&name).unwrap();
                let entries = store.entries_mut(&name).unwrap();
                for (offset, secs) in days {
                    let duration = secs.map(|s| DurationRecord {
                        total_seconds: s,
                        formatted: crate::completion::format_hms(s),
                    });
                    entries.push(CompletionEntry::new(
                        base + chrono::Days::new(offset),
                        duration,
                    ));
                }
            }

            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("habits.json");
            store.save_to(&path).unwrap();
            prop_assert_eq!(HabitStore::load_from(&path).unwrap(), store);
        }
    }
}
