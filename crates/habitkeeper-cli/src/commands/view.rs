//! Per-habit progress overview, with an optional follow-up reminder for
//! anything not completed today.

use habitkeeper_core::error::Result;
use habitkeeper_core::{completion, format_hms, HabitStats};

use crate::common::{read_delay, App};

pub fn run(app: &App) -> Result<()> {
    let ui = &app.ui;
    ui.clear_screen();
    let store = app.load_store()?;
    ui.say("\nYOUR HABITS & PROGRESS");
    ui.say("--------------------");

    if store.is_empty() {
        ui.say("\nNo habits found. Try adding one!");
        ui.pause();
        return Ok(());
    }

    let today = chrono::Local::now().date_naive();
    let mut incomplete: Vec<String> = Vec::new();

    for (name, entries) in store.iter() {
        let completed_today = completion::is_completed_on(entries, today);
        let status = if completed_today { "✓" } else { "○" };
        if !completed_today {
            incomplete.push(name.to_string());
        }

        let stats = HabitStats::compute(entries);
        println!("\n{status} {name}");
        println!("   Total completions: {}", stats.total_count);

        if let Some(last) = stats.last_completed {
            match stats.last_duration {
                Some(duration) => {
                    println!("   Last completed: {last} ({})", duration.formatted);
                }
                None => println!("   Last completed: {last}"),
            }
        }
        if let Some(average) = stats.average_seconds {
            println!(
                "   Average time: {} ({} timed sessions)",
                format_hms(average),
                stats.timed_count
            );
        }
    }

    if !incomplete.is_empty() && app.reminders.is_available() {
        offer_reminder(app, &incomplete);
    }

    ui.pause();
    Ok(())
}

/// Offer a one-time reminder covering every habit not completed today.
fn offer_reminder(app: &App, incomplete: &[String]) {
    let ui = &app.ui;
    ui.say(&format!(
        "\n\n💡 You have {} habit(s) not completed today.",
        incomplete.len()
    ));
    if !ui.confirm("\nWould you like to set a reminder to do them later? (y/N): ") {
        return;
    }

    let Some((seconds, time_str)) = read_delay(ui, 30) else {
        return;
    };

    let message = format!("⏰ Don't forget your habits: {}", incomplete.join(", "));
    if app.reminders.create_one_time(&message, seconds) {
        ui.say(&format!("\n✅ Reminder set for {time_str} from now!"));
    } else {
        ui.say("\n❌ Failed to create reminder.");
    }
}
