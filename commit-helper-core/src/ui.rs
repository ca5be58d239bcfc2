// console helpers shared by the flow, the review loop and the commit step

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const FRAME: &str = "═══════════════════════════════════════";

/// start a steady-ticking spinner with `message`
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn banner() {
    println!("{}", style("\ngit-commit-helper 🧙").cyan().bold());
    println!(
        "{}\n",
        style("commit messages for your staged changes, drafted by gemini").dim()
    );
}

/// the message between two rules, so multi-line bodies stay readable
pub fn framed(message: &str) -> String {
    format!("{FRAME}\n{message}\n{FRAME}")
}

pub fn print_framed(title: &str, message: &str) {
    println!("\n{}", style(title).green().bold());
    println!("{}", style(framed(message)).yellow());
    println!();
}

pub fn notice(text: &str) {
    println!("{}", style(text).yellow());
}

pub fn success(text: &str) {
    println!("{}", style(text).green().bold());
}

pub fn error(text: &str) {
    eprintln!("{} {}", style("❌").red(), style(text).red().bold());
}
