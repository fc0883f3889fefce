//! Consistent styling for CLI output, using owo-colors.
//!
//! Colors are dropped when `NO_COLOR` is set.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    fn plain() -> bool {
        std::env::var_os("NO_COLOR").is_some()
    }

    /// Section headers (e.g. "Configuration")
    pub fn header<T: Display>(text: T) -> String {
        if Self::plain() {
            return text.to_string();
        }
        format!("{}", text.bold())
    }

    /// Labels and keys (e.g. "model", "max_tokens")
    pub fn label<T: Display>(text: T) -> String {
        if Self::plain() {
            return text.to_string();
        }
        format!("{}", text.dimmed())
    }

    /// Primary values (e.g. model names, counts)
    pub fn value<T: Display>(text: T) -> String {
        if Self::plain() {
            return text.to_string();
        }
        format!("{}", text.cyan())
    }

    /// Error prefix
    pub fn error<T: Display>(text: T) -> String {
        if Self::plain() {
            return text.to_string();
        }
        format!("{}", text.red().bold())
    }

    /// Hints and notes
    pub fn hint<T: Display>(text: T) -> String {
        if Self::plain() {
            return text.to_string();
        }
        format!("{}", text.dimmed().italic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_no_color_returns_plain_text() {
        let original = std::env::var_os("NO_COLOR");
        unsafe { std::env::set_var("NO_COLOR", "1") };

        assert_eq!(Style::header("Configuration"), "Configuration");
        assert_eq!(Style::value(42), "42");
        assert_eq!(Style::error("Error:"), "Error:");

        match original {
            Some(val) => unsafe { std::env::set_var("NO_COLOR", val) },
            None => unsafe { std::env::remove_var("NO_COLOR") },
        }
    }

    #[test]
    #[serial]
    fn test_styled_text_keeps_content() {
        assert!(Style::label("model").contains("model"));
        assert!(Style::hint("(stub)").contains("(stub)"));
    }
}
