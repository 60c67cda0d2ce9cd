//! Shared command helpers: the app context and habit selection.

use std::path::PathBuf;

use habitkeeper_core::error::Result;
use habitkeeper_core::{
    Config, FormatterGateway, HabitStore, ReminderGateway, TimerGateway, ValidationError,
};

use crate::ui::Ui;

/// Everything a command needs: terminal helpers, the three gateways, and
/// the location of the habit file. The store itself is NOT held here -- it
/// is loaded fresh and saved back within each command.
pub struct App {
    pub ui: Ui,
    pub timer: TimerGateway,
    pub reminders: ReminderGateway,
    pub formatter: FormatterGateway,
    data_path: PathBuf,
}

impl App {
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.services.timeout();
        Ok(Self {
            ui: Ui::new(&config.ui),
            timer: TimerGateway::new(config.services.timer_endpoint()?, timeout),
            reminders: ReminderGateway::new(config.services.reminder_endpoint()?, timeout),
            formatter: FormatterGateway::new(config.services.formatter_endpoint()?, timeout),
            data_path: HabitStore::default_path()?,
        })
    }

    pub fn load_store(&self) -> Result<HabitStore> {
        Ok(HabitStore::load_from(&self.data_path)?)
    }

    pub fn save_store(&self, store: &HabitStore) -> Result<()> {
        Ok(store.save_to(&self.data_path)?)
    }
}

pub fn list_habits(store: &HabitStore) {
    println!("\nYour habits:");
    for (i, name) in store.names().iter().enumerate() {
        println!("{}. {}", i + 1, name);
    }
}

/// Resolve user input to a habit name: a digit is a 1-based index into the
/// listing, anything else is taken verbatim. Empty input and out-of-range
/// indices resolve to nothing.
pub fn resolve_choice(store: &HabitStore, choice: &str) -> Option<String> {
    if choice.is_empty() {
        return None;
    }
    if choice.chars().all(|c| c.is_ascii_digit()) {
        let idx = choice.parse::<usize>().ok()?.checked_sub(1)?;
        return store.names().get(idx).cloned();
    }
    Some(choice.to_string())
}

/// List habits and ask the user to pick one. `None` covers the empty
/// store, cancellation, and out-of-range indices; the returned name is not
/// guaranteed to exist (verbatim input), so callers still check membership.
pub fn select_habit(ui: &Ui, store: &HabitStore, prompt: &str) -> Option<String> {
    if store.is_empty() {
        ui.say("\nNo habits available.");
        ui.pause();
        return None;
    }
    list_habits(store);
    let choice = ui.prompt(prompt)?;
    resolve_choice(store, &choice)
}

/// Reminder delay menu: seconds / minutes / hours, each with its accepted
/// range. Prints its own error messages and returns `None` for any invalid
/// input. On success: (delay in seconds, human description).
pub fn read_delay(ui: &Ui, min_seconds: u64) -> Option<(u64, String)> {
    ui.say("\nChoose time unit:");
    ui.say(&format!("1. Seconds ({min_seconds}-3600 seconds)"));
    ui.say("2. Minutes (1-1440 minutes)");
    ui.say("3. Hours (1-24 hours)");

    let unit = ui.prompt("\nSelect unit (1-3): ")?;
    let (question, unit_name, min, max, factor) = match unit.as_str() {
        "1" => (
            format!("\nRemind me in how many seconds? ({min_seconds}-3600): "),
            "seconds",
            min_seconds,
            3600,
            1,
        ),
        "2" => (
            "\nRemind me in how many minutes? (1-1440): ".to_string(),
            "minutes",
            1,
            1440,
            60,
        ),
        "3" => (
            "\nRemind me in how many hours? (1-24): ".to_string(),
            "hours",
            1,
            24,
            3600,
        ),
        _ => {
            ui.say("\n⚠️  Invalid choice.");
            return None;
        }
    };

    let input = ui.prompt(&question)?;
    let amount = match input.parse::<u64>() {
        Ok(amount) => amount,
        Err(_) => {
            ui.say(&format!("\n⚠️  {}.", ValidationError::NotANumber));
            return None;
        }
    };
    if amount < min || amount > max {
        let err = ValidationError::OutOfRange {
            unit: unit_name.to_string(),
            min,
            max,
        };
        ui.say(&format!("\n⚠️  {err}."));
        return None;
    }

    Some((amount * factor, format!("{amount} {unit_name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> HabitStore {
        let mut store = HabitStore::new();
        for name in names {
            store.add(name).unwrap();
        }
        store
    }

    #[test]
    fn resolve_digit_as_one_based_index() {
        let store = store_with(&["Meditation", "Reading"]);
        assert_eq!(resolve_choice(&store, "1"), Some("Meditation".to_string()));
        assert_eq!(resolve_choice(&store, "2"), Some("Reading".to_string()));
    }

    #[test]
    fn resolve_out_of_range_index_is_none() {
        let store = store_with(&["Reading"]);
        assert_eq!(resolve_choice(&store, "0"), None);
        assert_eq!(resolve_choice(&store, "2"), None);
    }

    #[test]
    fn resolve_name_passes_through_verbatim() {
        let store = store_with(&["Reading"]);
        assert_eq!(
            resolve_choice(&store, "Reading"),
            Some("Reading".to_string())
        );
        // Unknown names pass through; the caller checks membership.
        assert_eq!(
            resolve_choice(&store, "Juggling"),
            Some("Juggling".to_string())
        );
    }

    #[test]
    fn resolve_empty_input_is_none() {
        let store = store_with(&["Reading"]);
        assert_eq!(resolve_choice(&store, ""), None);
    }
}
