use std::thread;
use std::time::Duration;

use indoc::indoc;

use habitkeeper_core::error::Result;
use habitkeeper_core::{reconcile, Config};

mod commands;
mod common;
mod ui;

use common::App;

const TITLE: &str = indoc! {r#"
    =======================
        HABIT TRACKER
    =======================
    "We are what we repeatedly do. Excellence, then, is not an act,
    but a habit." - Aristotle

    NOTE: Track your habits in under 2 minutes a day!
"#};

const COMMANDS: &str = indoc! {"
    COMMANDS:
    Type 'new' to add a new habit to track
    Type 'mark' to mark a habit as completed for today
    Type 'timed' to start a timer, do your habit, then mark it complete with time tracked
    Type 'remind' to set up reminders for your habits
    Type 'view' to see all your habits and progress
    Type 'do' to quickly complete a reminded habit (when reminders show above)
    Type 'edit' to rename an existing habit
    Type 'remove' to delete an existing habit
    Type 'about' to learn why this program was created
    Type 'q' or 'quit' to exit the program
"};

/// Fired reminder messages that mention a currently tracked habit.
/// Any service or store hiccup here degrades to "no alerts".
fn fired_alerts(app: &App) -> Vec<String> {
    if !app.reminders.is_available() {
        return Vec::new();
    }
    let Ok(store) = app.load_store() else {
        return Vec::new();
    };
    reconcile::filter_fired_relevant(&app.reminders.list(), &store.names())
}

fn print_alerts(alerts: &[String]) {
    let bar = "=".repeat(50);
    println!("\n{bar}");
    println!("{:^50}", "🔔 REMINDER ALERT! 🔔");
    println!("{bar}");
    for message in alerts {
        println!("  {message}");
    }
    println!("{bar}");
    println!("\n💡 TIP: Type 'do' to quickly complete these habits!\n");
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("error: {e}");
    }
}

fn main() {
    let config = Config::load_or_default();
    let app = match App::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    loop {
        app.ui.clear_screen();
        println!("{TITLE}");

        let alerts = fired_alerts(&app);
        if !alerts.is_empty() {
            print_alerts(&alerts);
        }

        println!("{COMMANDS}");
        let Some(command) = app.ui.prompt("\nWhat would you like to do? ") else {
            break;
        };

        match command.to_lowercase().as_str() {
            "q" | "quit" | "exit" => {
                app.ui.say("\nKeep up the good habits! Goodbye!");
                break;
            }
            "d" | "do" => {
                if alerts.is_empty() {
                    app.ui.say("\nNo fired reminders to act on.");
                    app.ui.say("Use 'mark' or 'timed' to complete habits manually.");
                    thread::sleep(Duration::from_secs(2));
                } else {
                    report(commands::do_reminded::run(&app, &alerts));
                }
            }
            "n" | "new" => report(commands::add::run(&app)),
            "m" | "mark" => report(commands::mark::run(&app)),
            "t" | "timed" => report(commands::timed::run(&app)),
            "remind" | "reminders" => report(commands::remind::run(&app)),
            "v" | "view" => report(commands::view::run(&app)),
            "e" | "edit" => report(commands::edit::run(&app)),
            "r" | "remove" => report(commands::remove::run(&app)),
            "about" => report(commands::about::run(&app)),
            "" => {}
            _ => {
                app.ui
                    .say("\nI didn't understand that command. Please try again.");
                thread::sleep(Duration::from_secs(1));
            }
        }
    }
}
