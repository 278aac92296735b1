//! Character variety sections - lowercase, uppercase, digits and symbols.

use super::SectionResult;

/// Symbols that count alongside digits.
pub(crate) const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Checks for at least one ASCII lowercase letter.
pub fn lowercase_section(password: &str) -> SectionResult {
    password.chars().any(|c| c.is_ascii_lowercase())
}

/// Checks for at least one ASCII uppercase letter.
pub fn uppercase_section(password: &str) -> SectionResult {
    password.chars().any(|c| c.is_ascii_uppercase())
}

/// Checks for at least one ASCII digit or one of [`SYMBOLS`].
pub fn digit_or_symbol_section(password: &str) -> SectionResult {
    password
        .chars()
        .any(|c| c.is_ascii_digit() || SYMBOLS.contains(c))
}
