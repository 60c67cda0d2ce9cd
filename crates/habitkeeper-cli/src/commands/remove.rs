//! Remove a habit and its whole history, behind a two-step confirmation.

use habitkeeper_core::error::Result;

use crate::common::{select_habit, App};

pub fn run(app: &App) -> Result<()> {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nREMOVE HABIT");
    ui.say("-----------");

    let mut store = app.load_store()?;
    let Some(name) = select_habit(
        ui,
        &store,
        "\nWhich habit would you like to remove? (enter name or number, or press Enter to cancel): ",
    ) else {
        ui.say("\nCancelled removal.");
        return Ok(());
    };
    if !store.contains(&name) {
        ui.say("\nHabit not found. Please try again.");
        ui.pause();
        return Ok(());
    }

    if !ui.confirm(&format!("\nAre you sure you want to remove '{name}'? (y/N): ")) {
        ui.say("\nRemoval cancelled.");
        ui.pause();
        return Ok(());
    }
    let typed = ui
        .prompt("\nThis is permanent. Type DELETE to confirm removal (or press Enter to cancel): ")
        .unwrap_or_default();
    if typed != "DELETE" {
        ui.say("\nRemoval cancelled.");
        ui.pause();
        return Ok(());
    }

    store.remove(&name)?;
    app.save_store(&store)?;
    ui.say(&format!("\nHabit '{name}' has been removed permanently."));
    ui.pause();
    Ok(())
}
