//! Domain primitives for the canned-goods inventory.
//!
//! # Responsibility
//! - Define the identifier and day-ordinal types shared by all registries.
//! - Provide expiration classification and the good-name input policy.
//!
//! # Invariants
//! - Ids are positive integers; `0` is never a valid id.
//! - Day ordinals are plain integer day counts; `0` is the reserved
//!   "no date" sentinel and never a stored value.

pub mod expiration;
pub mod good_name;
pub mod ids;
