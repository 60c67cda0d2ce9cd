//! Timed habit tracking: start a timer, do the habit, stop the timer, and
//! record the completion with its elapsed duration.
//!
//! A second same-day session is allowed only on explicit confirmation.
//! Losing the timer mid-flight degrades to an untimed completion.

use habitkeeper_core::error::Result;
use habitkeeper_core::{completion, RepeatPolicy};

use crate::common::{select_habit, App};

pub fn run(app: &App) -> Result<()> {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nTIMED HABIT TRACKING");
    ui.say("--------------------");
    ui.say("\nThis feature lets you time how long you spend on a habit.");

    if !app.timer.is_available() {
        ui.say("\n⚠️  The timer service is not running!");
        ui.say("\nStart it and try again, or use the regular 'mark' command instead.");
        ui.pause();
        return Ok(());
    }

    let mut store = app.load_store()?;
    let Some(name) = select_habit(
        ui,
        &store,
        "\nWhich habit are you about to do? (enter name or number, or press Enter to cancel): ",
    ) else {
        ui.say("\nCancelled timed tracking.");
        return Ok(());
    };
    if !store.contains(&name) {
        ui.say("\nHabit not found. Please try again.");
        ui.pause();
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    let mut policy = RepeatPolicy::DenyRepeat;
    if completion::is_completed_on(store.entries(&name).unwrap_or_default(), today) {
        ui.say(&format!(
            "\n⚠️  You've already marked '{name}' as complete today."
        ));
        if !ui.confirm("\nDo you want to track another session anyway? (y/N): ") {
            ui.say("\nCancelled timed tracking.");
            ui.pause();
            return Ok(());
        }
        policy = RepeatPolicy::AllowRepeat;
    }

    ui.say(&format!("\n🎬 Starting timer for '{name}'..."));
    let Some(timer_id) = app.timer.start(&name) else {
        ui.say("\n❌ Failed to start timer. Please try again.");
        ui.pause();
        return Ok(());
    };

    ui.say(&format!("\n✅ Timer started! (ID: {timer_id})"));
    ui.say(&format!("\nNow go do your habit: '{name}'"));
    ui.say("\nWhen you're done, press Enter to stop the timer...");
    let _ = ui.prompt("");

    ui.say("\n⏹️  Stopping timer...");
    let elapsed = app.timer.stop(&timer_id);

    let Some(entries) = store.entries_mut(&name) else {
        return Ok(());
    };
    let Some(elapsed) = elapsed else {
        ui.say("\n❌ Failed to stop timer. Marking habit without time data.");
        completion::record_completion(entries, &name, today, None, policy)?;
        app.save_store(&store)?;
        ui.pause();
        return Ok(());
    };

    completion::record_completion(entries, &name, today, Some(elapsed.clone()), policy)?;
    app.save_store(&store)?;

    ui.say(&format!("\n🎉 Awesome! '{name}' completed!"));
    ui.say(&format!("\n⏱️  Time spent: {}", elapsed.formatted));
    ui.say(&format!("   ({} seconds)", elapsed.total_seconds));

    if elapsed.total_seconds >= 300 {
        ui.say("\n💪 Great dedication! That's some quality time invested!");
    } else if elapsed.total_seconds >= 60 {
        ui.say("\n👍 Nice work! Every minute counts!");
    } else {
        ui.say("\n⚡ Quick and efficient! Consistency is key!");
    }

    ui.pause();
    Ok(())
}
