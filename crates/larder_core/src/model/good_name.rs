//! Good-name input policy.
//!
//! # Responsibility
//! - Expose the dialog-level naming policy (alphabetic plus whitespace)
//!   for the shell to apply before registering a good.
//!
//! # Invariants
//! - Registries themselves only reject empty names; this stricter policy
//!   is applied by the caller, not inside the registries.

use once_cell::sync::Lazy;
use regex::Regex;

// Literal pattern; compilation cannot fail at runtime.
static GOOD_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("literal pattern compiles"));

/// Returns whether `name` passes the entry policy: non-blank, letters and
/// whitespace only.
pub fn is_valid_good_name(name: &str) -> bool {
    !name.trim().is_empty() && GOOD_NAME_PATTERN.is_match(name)
}
