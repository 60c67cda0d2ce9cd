//! Mark a habit completed for today (no duration).

use habitkeeper_core::error::Result;
use habitkeeper_core::{completion, HabitError, RepeatPolicy};

use crate::common::{select_habit, App};

pub fn run(app: &App) -> Result<()> {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nMARK HABIT COMPLETE");
    ui.say("------------------");

    let mut store = app.load_store()?;
    let Some(name) = select_habit(
        ui,
        &store,
        "\nWhich habit did you complete? (enter name or number, or press Enter to cancel): ",
    ) else {
        ui.say("\nCancelled marking habit.");
        return Ok(());
    };

    let Some(entries) = store.entries_mut(&name) else {
        ui.say("\nHabit not found. Please try again.");
        ui.pause();
        return Ok(());
    };

    let today = chrono::Local::now().date_naive();
    match completion::record_completion(entries, &name, today, None, RepeatPolicy::DenyRepeat) {
        Err(HabitError::AlreadyCompleted(_)) => {
            ui.say(&format!(
                "\nYou've already marked '{name}' as complete today. Great job!"
            ));
        }
        Err(e) => return Err(e.into()),
        Ok(()) => {
            app.save_store(&store)?;
            ui.say(&format!("\nAwesome! '{name}' marked as completed for today!"));
            ui.say("\nTip: Use 'timed' command next time to track how long it takes!");
        }
    }

    ui.pause();
    Ok(())
}
