// Author Dustin Pilgrim
// License: MIT

use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Ask a yes/no question on the terminal. Only `y`/`yes` (any case) confirms;
/// everything else, including empty input or a failed read, declines.
pub fn confirm(question: &str) -> bool {
    print!("{} {}? [y/N] ", "==>".green().bold(), question);
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        is_affirmative(&s)
    } else {
        false
    }
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
