use colored::Colorize;
use std::fmt;

/// Prints an informational message.
pub fn info(message: impl fmt::Display) {
    println!("{} {}", "[i]".cyan().bold(), message);
}

/// Prints a success message.
pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow().bold(), message);
}

/// Prints an error message to stderr.
pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red().bold(), message);
}
