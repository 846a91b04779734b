//! Identifier and day-ordinal aliases.
//!
//! Kept as type aliases to make semantic intent explicit in signatures.

/// Stable id of a good (a named category of perishable item).
pub type GoodId = u32;

/// Stable id of an expiration date entry.
pub type DateId = u32;

/// Stable id of one physical inventory unit.
pub type CanId = u32;

/// Integer count of days from a fixed epoch (Julian day in the desktop
/// shell). Subtraction gives a day difference without calendar logic.
pub type DayNumber = i64;

/// Reserved day ordinal meaning "no date"; never stored in a registry.
pub const NO_DATE: DayNumber = 0;
