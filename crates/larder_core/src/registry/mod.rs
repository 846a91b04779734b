//! Registry layer: the three relational tables of the inventory.
//!
//! # Responsibility
//! - Own goods, expiration dates, and cans as observable tabular data.
//! - Enforce id compaction, uniqueness, and referential integrity on
//!   every public mutation.
//!
//! # Invariants
//! - No transient integrity violation survives a public call: mutations
//!   fully apply or fully fail.
//! - Can foreign keys always resolve in the good and date registries.
//! - Date rows are garbage-collected when their last referencing can
//!   goes away; good rows are only ever removed by the caller.

use crate::model::ids::{CanId, DateId, DayNumber, GoodId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod can_registry;
pub mod date_registry;
pub mod good_registry;

pub use can_registry::CanRegistry;
pub use date_registry::DateRegistry;
pub use good_registry::GoodRegistry;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Validation and not-found failures raised by registry mutations.
///
/// Every variant is recoverable: callers surface the rejection (a dialog
/// in the desktop shell) and carry on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An id of zero was supplied; ids start at 1.
    InvalidId,
    /// A good name must not be empty.
    EmptyName,
    /// A date value of zero is the "no date" sentinel and cannot be stored.
    ZeroDate,
    /// The id is already assigned in its registry.
    DuplicateId(u32),
    /// The good name is already registered (names are case-sensitive).
    DuplicateName(String),
    /// The date value is already registered.
    DuplicateDate(DayNumber),
    /// No good with this id exists.
    GoodNotFound(GoodId),
    /// No good with this name exists.
    GoodNameNotFound(String),
    /// No date with this id exists.
    DateNotFound(DateId),
    /// No date with this value exists.
    DateValueNotFound(DayNumber),
    /// No can with this id exists.
    CanNotFound(CanId),
    /// The edit resolves to the value already set; no-op edits are rejected.
    UnchangedEdit(CanId),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId => write!(f, "ids must be positive"),
            Self::EmptyName => write!(f, "good name must not be empty"),
            Self::ZeroDate => write!(f, "date value zero is reserved"),
            Self::DuplicateId(id) => write!(f, "id already in use: {id}"),
            Self::DuplicateName(name) => write!(f, "good already registered: {name}"),
            Self::DuplicateDate(value) => write!(f, "date already registered: {value}"),
            Self::GoodNotFound(id) => write!(f, "good not found: {id}"),
            Self::GoodNameNotFound(name) => write!(f, "good not found: {name}"),
            Self::DateNotFound(id) => write!(f, "date not found: {id}"),
            Self::DateValueNotFound(value) => write!(f, "date value not found: {value}"),
            Self::CanNotFound(id) => write!(f, "can not found: {id}"),
            Self::UnchangedEdit(id) => write!(f, "edit leaves can {id} unchanged"),
        }
    }
}

impl Error for RegistryError {}

/// Gap scan over a registry's assigned ids: sort them and return the
/// smallest positive id whose slot is unoccupied.
pub(crate) fn next_free_id(ids: impl Iterator<Item = u32>) -> u32 {
    let mut assigned: Vec<u32> = ids.collect();
    assigned.sort_unstable();

    let mut candidate: u32 = 1;
    for id in assigned {
        if candidate < id {
            break;
        }
        candidate += 1;
    }
    candidate
}
