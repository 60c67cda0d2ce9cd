//! Rename a habit, keeping its completion history.

use habitkeeper_core::error::Result;
use habitkeeper_core::HabitError;

use crate::common::{select_habit, App};

pub fn run(app: &App) -> Result<()> {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nRENAME HABIT");
    ui.say("-----------");

    let mut store = app.load_store()?;
    let Some(old) = select_habit(
        ui,
        &store,
        "\nWhich habit would you like to rename? (enter name or number, or press Enter to cancel): ",
    ) else {
        ui.say("\nCancelled renaming.");
        return Ok(());
    };
    if !store.contains(&old) {
        ui.say("\nHabit not found. Please try again.");
        ui.pause();
        return Ok(());
    }

    let new = ui
        .prompt(&format!(
            "\nEnter the new name for '{old}' (or press Enter to cancel): "
        ))
        .unwrap_or_default();
    if new.is_empty() || new == old {
        ui.say("\nRename cancelled or unchanged.");
        ui.pause();
        return Ok(());
    }

    let formatted = app.formatter.format(&new);
    if formatted != new && !formatted.trim().is_empty() {
        ui.say(&format!("\n✨ Formatted as: '{formatted}'"));
    }

    match store.rename(&old, &formatted) {
        Err(HabitError::DuplicateName(_)) => {
            ui.say(&format!(
                "\nA habit named '{formatted}' already exists. Choose a different name."
            ));
        }
        Err(e) => return Err(e.into()),
        Ok(()) => {
            app.save_store(&store)?;
            ui.say(&format!("\nRenamed '{old}' to '{formatted}'."));
        }
    }

    ui.pause();
    Ok(())
}
