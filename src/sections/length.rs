//! Length section - checks password minimum length.

use super::SectionResult;

pub(crate) const MIN_LENGTH: usize = 8;

/// Checks if the password meets the minimum length.
///
/// Length is counted in UTF-16 code units, the unit browsers report for
/// an input's value.
pub fn length_section(password: &str) -> SectionResult {
    password.encode_utf16().count() >= MIN_LENGTH
}
