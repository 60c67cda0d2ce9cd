//! Add a new habit. The name is normalized through the formatter service
//! when it is reachable.

use habitkeeper_core::error::Result;
use habitkeeper_core::HabitError;

use crate::common::App;

pub fn run(app: &App) -> Result<()> {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nADDING NEW HABIT");
    ui.say("----------------");

    let name = ui
        .prompt("\nWhat habit would you like to track? (or press Enter to cancel): ")
        .unwrap_or_default();
    if name.is_empty() {
        ui.say("\nCancelled adding new habit.");
        ui.pause();
        return Ok(());
    }

    let formatted = app.formatter.format(&name);
    if formatted != name && !formatted.trim().is_empty() {
        ui.say(&format!("\n✨ Formatted as: '{formatted}'"));
    }

    let mut store = app.load_store()?;
    match store.add(&formatted) {
        Err(HabitError::DuplicateName(_)) => {
            ui.say("\nThis habit is already being tracked!");
        }
        Err(e) => return Err(e.into()),
        Ok(()) => {
            app.save_store(&store)?;
            ui.say(&format!("\nGreat! I'll help you track '{formatted}'."));
            ui.say("\nTips:");
            ui.say("  • Use 'timed' to track how long you spend on this habit");
            ui.say("  • Use 'remind' to set up daily reminders for this habit");
        }
    }

    ui.pause();
    Ok(())
}
