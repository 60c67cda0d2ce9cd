//! Reminder setup: one-time and daily reminders for a habit, plus viewing
//! and deleting what the reminder service currently holds.

use habitkeeper_core::error::Result;
use habitkeeper_core::ReminderRecord;

use crate::common::{read_delay, select_habit, App};

pub fn run(app: &App) -> Result<()> {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nREMINDER SETUP");
    ui.say("--------------");
    ui.say("\nSet up reminders to help you remember your habits!");

    if !app.reminders.is_available() {
        ui.say("\n⚠️  The reminder service is not running!");
        ui.say("\nStart it and come back to set up reminders.");
        ui.pause();
        return Ok(());
    }

    ui.say("\nReminder Options:");
    ui.say("1. Set a one-time reminder for a specific habit");
    ui.say("2. Set a daily reminder for a specific habit");
    ui.say("3. View all active reminders");
    ui.say("4. Delete/manage reminders");
    ui.say("5. Cancel");

    let choice = ui.prompt("\nSelect an option (1-5): ").unwrap_or_default();
    match choice.as_str() {
        "1" => one_time(app)?,
        "2" => daily(app)?,
        "3" => view_reminders(app),
        "4" => manage(app),
        _ => {
            ui.say("\nCancelled reminder setup.");
            ui.pause();
        }
    }
    Ok(())
}

fn one_time(app: &App) -> Result<()> {
    let ui = &app.ui;
    let store = app.load_store()?;
    if store.is_empty() {
        ui.say("\nNo habits available to set reminders for.");
        ui.say("Create a habit first using 'new' command.");
        ui.pause();
        return Ok(());
    }

    ui.clear_screen();
    ui.say("\nONE-TIME HABIT REMINDER");
    ui.say("-----------------------");

    let name = select_habit(
        ui,
        &store,
        "\nWhich habit would you like to be reminded of? (enter name or number, or press Enter to cancel): ",
    );
    let Some(name) = name.filter(|n| store.contains(n)) else {
        ui.say("\nCancelled reminder setup.");
        ui.pause();
        return Ok(());
    };

    ui.clear_screen();
    ui.say(&format!("\nREMINDER FOR: {name}"));
    ui.say(&"-".repeat(14 + name.chars().count()));

    if let Some((seconds, time_str)) = read_delay(ui, 10) {
        let message = format!("⏰ Time to do your habit: {name}");
        if app.reminders.create_one_time(&message, seconds) {
            ui.say(&format!("\n✅ Reminder set for '{name}'!"));
            ui.say(&format!("\nYou'll be reminded in {time_str}."));
            ui.say("\n💡 Tip: Use 'do' command when the reminder fires to quickly complete it!");
        } else {
            ui.say("\n❌ Failed to create reminder.");
        }
    }

    ui.pause();
    Ok(())
}

fn daily(app: &App) -> Result<()> {
    let ui = &app.ui;
    let store = app.load_store()?;
    let name = select_habit(
        ui,
        &store,
        "\nWhich habit would you like daily reminders for? (enter name or number, or press Enter to cancel): ",
    );
    let Some(name) = name.filter(|n| store.contains(n)) else {
        ui.say("\nCancelled reminder setup.");
        ui.pause();
        return Ok(());
    };

    ui.clear_screen();
    ui.say(&format!("\nDAILY REMINDER FOR: {name}"));
    ui.say(&"-".repeat(20 + name.chars().count()));

    let input = ui
        .prompt("\nRemind me in how many hours from now? (1-24): ")
        .unwrap_or_default();
    let hours = match input.parse::<u64>() {
        Ok(hours) if (1..=24).contains(&hours) => hours,
        Ok(_) => {
            ui.say("\n⚠️  Please enter a number between 1 and 24.");
            ui.pause();
            return Ok(());
        }
        Err(_) => {
            ui.say("\n⚠️  Invalid input. Please enter a number.");
            ui.pause();
            return Ok(());
        }
    };

    let message = format!("⏰ Time to do your habit: {name}");
    let setup = app.reminders.create_daily(&message, hours * 3600);
    if setup.is_complete() {
        ui.say(&format!("\n✅ Daily reminder set for '{name}'!"));
        ui.say(&format!(
            "\nYou'll be reminded in {hours} hour(s), then daily after that."
        ));
        ui.say("\nNote: The reminder service must stay running for this to work.");
    } else if setup.initial {
        ui.say("\n❌ Failed to set up the recurring part of the daily reminder.");
        ui.say("The first reminder will still fire; set it up again for the daily repeats.");
    } else if setup.recurring {
        ui.say("\n❌ Failed to set up the first notification.");
        ui.say("Daily repeats start in 24 hours; the initial reminder will not fire.");
    } else {
        ui.say("\n❌ Failed to create daily reminder.");
    }

    ui.pause();
    Ok(())
}

/// Reminders whose message mentions a habit at all -- keeps the listing
/// free of unrelated reminders sharing the service.
fn habit_reminders(app: &App) -> Vec<ReminderRecord> {
    app.reminders
        .list()
        .into_iter()
        .filter(|r| r.message.to_lowercase().contains("habit"))
        .collect()
}

fn print_reminder(reminder: &ReminderRecord, index: usize, with_id: bool) {
    let status = if reminder.fired { "FIRED" } else { "ACTIVE" };
    println!("{}. [{status}] {}", index + 1, reminder.message);
    if with_id {
        match &reminder.id {
            Some(id) => println!("   ID: {id}"),
            None => println!("   ID: unknown"),
        }
    }
    if reminder.is_recurring() {
        println!(
            "   Type: Daily Recurring ({} remaining)",
            reminder.remaining.unwrap_or(0)
        );
    } else {
        println!("   Type: One-time");
    }
    println!();
}

fn view_reminders(app: &App) {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nACTIVE REMINDERS");
    ui.say("----------------");

    let reminders = habit_reminders(app);
    if reminders.is_empty() {
        ui.say("\nNo habit-related reminders found.");
    } else {
        ui.say(&format!("\nFound {} habit reminder(s):\n", reminders.len()));
        for (i, reminder) in reminders.iter().enumerate() {
            print_reminder(reminder, i, false);
        }
    }

    ui.pause();
}

fn manage(app: &App) {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nMANAGE REMINDERS");
    ui.say("----------------");

    let reminders = habit_reminders(app);
    if reminders.is_empty() {
        ui.say("\nNo habit-related reminders found.");
        ui.pause();
        return;
    }

    ui.say(&format!("\nFound {} habit reminder(s):\n", reminders.len()));
    for (i, reminder) in reminders.iter().enumerate() {
        print_reminder(reminder, i, true);
    }

    ui.say("\nDelete Options:");
    ui.say("1. Delete a specific reminder by number");
    ui.say("2. Delete all fired reminders");
    ui.say("3. Cancel");

    let choice = ui.prompt("\nSelect option (1-3): ").unwrap_or_default();
    match choice.as_str() {
        "1" => delete_one(app, &reminders),
        "2" => delete_fired(app, &reminders),
        _ => ui.say("\nCancelled."),
    }

    ui.pause();
}

fn delete_one(app: &App, reminders: &[ReminderRecord]) {
    let ui = &app.ui;
    let input = ui
        .prompt(&format!(
            "\nWhich reminder to delete? (1-{}): ",
            reminders.len()
        ))
        .unwrap_or_default();

    let target = match input.parse::<usize>() {
        Ok(n) if (1..=reminders.len()).contains(&n) => &reminders[n - 1],
        Ok(_) => {
            ui.say("\n⚠️  Invalid reminder number.");
            return;
        }
        Err(_) => {
            ui.say("\n⚠️  Invalid input.");
            return;
        }
    };

    if !ui.confirm(&format!("\nDelete '{}'? (y/N): ", target.message)) {
        ui.say("\nDeletion cancelled.");
        return;
    }

    let deleted = target
        .id
        .as_ref()
        .map(|id| app.reminders.delete(id))
        .unwrap_or(false);
    if deleted {
        ui.say("\n✅ Reminder deleted successfully!");
    } else {
        ui.say("\n❌ Failed to delete reminder.");
    }
}

fn delete_fired(app: &App, reminders: &[ReminderRecord]) {
    let ui = &app.ui;
    let fired_count = reminders.iter().filter(|r| r.fired).count();
    if fired_count == 0 {
        ui.say("\nNo fired reminders to delete.");
        return;
    }

    if !ui.confirm(&format!(
        "\nDelete all {fired_count} fired reminder(s)? (y/N): "
    )) {
        ui.say("\nDeletion cancelled.");
        return;
    }

    match app.reminders.delete_all_fired() {
        Some(count) => ui.say(&format!("\n✅ Deleted {count} fired reminder(s)!")),
        None => ui.say("\n❌ Failed to delete fired reminders."),
    }
}
