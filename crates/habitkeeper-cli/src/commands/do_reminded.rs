//! Quickly complete a habit recovered from fired reminder messages.

use habitkeeper_core::error::Result;
use habitkeeper_core::{completion, reconcile, HabitError, RepeatPolicy};

use crate::common::App;
use crate::ui::Ui;

pub fn run(app: &App, fired: &[String]) -> Result<()> {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nCOMPLETE REMINDED HABIT");
    ui.say("----------------------");

    let candidates: Vec<String> = fired
        .iter()
        .flat_map(|message| reconcile::extract_candidates(message))
        .filter(|c| !c.is_empty())
        .collect();

    if candidates.is_empty() {
        ui.say("\nCouldn't identify specific habits from reminders.");
        ui.say("Use 'mark' or 'timed' to complete habits manually.");
        ui.pause();
        return Ok(());
    }

    let mut store = app.load_store()?;
    let matched = reconcile::match_to_habits(&candidates, &store.names());
    if matched.is_empty() {
        ui.say(&format!("\nReminded habits: {}", candidates.join(", ")));
        ui.say("\nNone of these match your tracked habits.");
        ui.say("Use 'mark' or 'timed' to complete habits manually.");
        ui.pause();
        return Ok(());
    }

    ui.say("\nYou were reminded about:");
    for (i, habit) in matched.iter().enumerate() {
        println!("{}. {}", i + 1, habit);
    }

    ui.say("\nHow would you like to complete it?");
    ui.say("1. Quick mark (no timer)");
    ui.say("2. Track time with timer");
    ui.say("3. Cancel");

    let choice = ui.prompt("\nSelect option (1-3): ").unwrap_or_default();
    match choice.as_str() {
        "1" => {
            let Some(name) = pick_habit(ui, &matched) else {
                ui.pause();
                return Ok(());
            };
            quick_mark(app, &mut store, &name)?;
            offer_cleanup(app);
            ui.pause();
        }
        "2" => {
            let Some(name) = pick_habit(ui, &matched) else {
                ui.pause();
                return Ok(());
            };
            timed_mark(app, &mut store, &name)?;
            offer_cleanup(app);
            ui.pause();
        }
        _ => {
            ui.say("\nCancelled.");
            ui.pause();
        }
    }
    Ok(())
}

/// One match selects itself; more than one asks for a number.
fn pick_habit(ui: &Ui, matched: &[String]) -> Option<String> {
    if matched.len() == 1 {
        return Some(matched[0].clone());
    }
    let input = ui.prompt(&format!("\nWhich habit? (1-{}): ", matched.len()))?;
    match input.parse::<usize>() {
        Ok(n) if (1..=matched.len()).contains(&n) => Some(matched[n - 1].clone()),
        Ok(_) => {
            ui.say("\nInvalid choice.");
            None
        }
        Err(_) => {
            ui.say("\nInvalid input.");
            None
        }
    }
}

fn quick_mark(app: &App, store: &mut habitkeeper_core::HabitStore, name: &str) -> Result<()> {
    let ui = &app.ui;
    let today = chrono::Local::now().date_naive();
    let Some(entries) = store.entries_mut(name) else {
        return Ok(());
    };
    match completion::record_completion(entries, name, today, None, RepeatPolicy::DenyRepeat) {
        Err(HabitError::AlreadyCompleted(_)) => {
            ui.say(&format!("\n'{name}' already completed today!"));
        }
        Err(e) => return Err(e.into()),
        Ok(()) => {
            app.save_store(store)?;
            ui.say(&format!("\n✅ '{name}' marked complete!"));
        }
    }
    Ok(())
}

fn timed_mark(app: &App, store: &mut habitkeeper_core::HabitStore, name: &str) -> Result<()> {
    let ui = &app.ui;
    let today = chrono::Local::now().date_naive();

    if !app.timer.is_available() {
        ui.say("\n⚠️  Timer service not running. Marking without time...");
        let Some(entries) = store.entries_mut(name) else {
            return Ok(());
        };
        if !completion::is_completed_on(entries, today) {
            completion::record_completion(entries, name, today, None, RepeatPolicy::DenyRepeat)?;
            app.save_store(store)?;
            ui.say(&format!("\n✅ '{name}' marked complete!"));
        }
        return Ok(());
    }

    let mut policy = RepeatPolicy::DenyRepeat;
    if completion::is_completed_on(store.entries(name).unwrap_or_default(), today) {
        ui.say(&format!(
            "\n⚠️  You've already marked '{name}' as complete today."
        ));
        if !ui.confirm("\nDo you want to track another session anyway? (y/N): ") {
            ui.say("\nCancelled.");
            return Ok(());
        }
        policy = RepeatPolicy::AllowRepeat;
    }

    ui.say(&format!("\n🎬 Starting timer for '{name}'..."));
    let Some(timer_id) = app.timer.start(name) else {
        ui.say("\n❌ Failed to start timer.");
        return Ok(());
    };

    ui.say("\n✅ Timer started!");
    ui.say(&format!("\nGo do '{name}' and press Enter when done..."));
    let _ = ui.prompt("");

    ui.say("\n⏹️  Stopping timer...");
    let elapsed = app.timer.stop(&timer_id);

    let Some(entries) = store.entries_mut(name) else {
        return Ok(());
    };
    match elapsed {
        Some(elapsed) => {
            completion::record_completion(entries, name, today, Some(elapsed.clone()), policy)?;
            app.save_store(store)?;
            ui.say(&format!("\n🎉 '{name}' completed in {}!", elapsed.formatted));
        }
        None => {
            completion::record_completion(entries, name, today, None, policy)?;
            app.save_store(store)?;
            ui.say(&format!("\n✅ '{name}' marked complete!"));
        }
    }
    Ok(())
}

/// Default-yes offer to clear fired reminders once the habit is handled.
fn offer_cleanup(app: &App) {
    let ui = &app.ui;
    let decline = ui
        .prompt("\nClear fired reminders for this habit? (Y/n): ")
        .map(|s| s.to_lowercase() == "n")
        .unwrap_or(true);
    if decline {
        return;
    }
    if let Some(count) = app.reminders.delete_all_fired() {
        if count > 0 {
            ui.say(&format!("🗑️  Cleared {count} fired reminder(s)."));
        }
    }
}
