//! Program background plus live service health.

use habitkeeper_core::error::Result;

use crate::common::App;

pub fn run(app: &App) -> Result<()> {
    let ui = &app.ui;
    ui.clear_screen();
    ui.say("\nABOUT THIS PROGRAM");
    ui.say("-------------------");
    ui.say("\nI created this program because I wanted to develop new habits and be able to track them easily.");
    ui.say("Use this tool to record your daily wins and review progress over time.");
    ui.say("\nNow with integrated services:");
    ui.say("  ⏱️  Timer Service - Track time spent on habits");
    ui.say("  ⏰ Reminder Service - Never forget to do your habits");
    ui.say("  ✨ Formatter Service - Automatically clean up habit names");

    ui.say("\nService Status:");
    let status = |up: bool| if up { "✅ Running" } else { "❌ Not running" };
    ui.say(&format!("  Timer:     {}", status(app.timer.is_available())));
    ui.say(&format!("  Reminder:  {}", status(app.reminders.is_available())));
    ui.say(&format!("  Formatter: {}", status(app.formatter.is_available())));

    ui.pause();
    Ok(())
}
