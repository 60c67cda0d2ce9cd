//! Terminal plumbing: paced output, prompts, confirmations, screen clears.
//!
//! All of this is presentation only. Pacing and clearing are driven by the
//! `[ui]` config section so they can be switched off.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use habitkeeper_core::UiConfig;

pub struct Ui {
    delay: Duration,
    clear: bool,
}

impl Ui {
    pub fn new(cfg: &UiConfig) -> Self {
        Self {
            delay: Duration::from_millis(cfg.typewriter_delay_ms),
            clear: cfg.clear_screen,
        }
    }

    /// Clear the terminal and home the cursor, when enabled.
    pub fn clear_screen(&self) {
        if self.clear {
            print!("\x1b[2J\x1b[1;1H");
            let _ = io::stdout().flush();
        }
    }

    /// Print a line with the typewriter pacing effect.
    pub fn say(&self, message: &str) {
        if self.delay.is_zero() {
            println!("{message}");
            return;
        }
        let mut out = io::stdout();
        for ch in message.chars() {
            print!("{ch}");
            let _ = out.flush();
            thread::sleep(self.delay);
        }
        println!();
    }

    /// Print `message` without a newline and read one line of input,
    /// trimmed. `None` means stdin is closed.
    pub fn prompt(&self, message: &str) -> Option<String> {
        print!("{message}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// y/N confirmation; anything but "y"/"yes" (case-insensitive) is no.
    pub fn confirm(&self, message: &str) -> bool {
        matches!(
            self.prompt(message).map(|s| s.to_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }

    /// Block until the user presses Enter.
    pub fn pause(&self) {
        let _ = self.prompt("\nPress Enter to continue...");
    }
}
