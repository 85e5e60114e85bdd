//! Password evaluation sections
//!
//! Each section checks one strength criterion.

mod length;
mod special;
mod variety;

pub use length::{length_section, MIN_LENGTH};
pub use special::{special_section, SPECIAL_CHARS};
pub use variety::{digit_section, lowercase_section, uppercase_section};

/// Result type for section checks.
/// - `None` - Criterion met
/// - `Some(hint)` - Criterion missed, with a hint to show the user
pub type SectionResult = Option<String>;
