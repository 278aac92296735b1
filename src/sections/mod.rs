//! Password scoring sections
//!
//! Each section checks one independent criterion and is worth
//! [`SECTION_POINTS`] when met.

mod length;
mod variety;

pub use length::length_section;
pub use variety::{digit_or_symbol_section, lowercase_section, uppercase_section};

/// Points awarded by a section whose criterion is met.
pub const SECTION_POINTS: u8 = 25;

/// Result type for section functions.
/// - `true` - criterion met, the section adds its points
/// - `false` - criterion not met
pub type SectionResult = bool;
