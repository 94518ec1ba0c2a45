use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

/// Pretty-printed JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

pub fn print_header(title: &str) {
    println!("{}", title.bold());
    println!("────────────────────────────────");
}

/// Ten-cell bar for a 0-100 value
pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) / 10;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(10 - filled))
}

/// Score coloured by band: green from 80, yellow from 50, red below
pub fn colored_score(score: u8) -> String {
    let text = score.to_string();
    match score {
        80.. => text.green().to_string(),
        50..=79 => text.yellow().to_string(),
        _ => text.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), "[░░░░░░░░░░]");
        assert_eq!(progress_bar(45), "[████░░░░░░]");
        assert_eq!(progress_bar(100), "[██████████]");
    }
}
