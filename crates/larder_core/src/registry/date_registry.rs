//! Date registry: the table of distinct expiration dates.
//!
//! # Responsibility
//! - Own the set of day ordinals in use, each with a stable compacted id.
//!
//! # Invariants
//! - Day ordinal zero is the "no date" sentinel and is rejected.
//! - Rows keep natural insertion order; the can view owns the sorted
//!   presentation, so this table never re-sorts.
//! - Rows are created on first use by a can and garbage-collected by the
//!   can registry when their last reference drops.

use crate::model::ids::{DateId, DayNumber, NO_DATE};
use crate::observe::{Observers, TableObserver};
use crate::registry::{next_free_id, RegistryError, RegistryResult};
use std::collections::HashMap;

/// Observable table of expiration dates: `(id, day ordinal)` rows.
#[derive(Default)]
pub struct DateRegistry {
    values_by_id: HashMap<DateId, DayNumber>,
    ids_by_value: HashMap<DayNumber, DateId>,
    order: Vec<DayNumber>,
    observers: Observers,
}

impl DateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table observer for row change notifications.
    pub fn subscribe(&mut self, observer: Box<dyn TableObserver>) {
        self.observers.subscribe(observer);
    }

    /// Adds a new date under the smallest free id and returns that id.
    ///
    /// # Errors
    /// - `DuplicateDate` when the value is already registered.
    /// - `ZeroDate` for the reserved zero value.
    pub fn add(&mut self, value: DayNumber) -> RegistryResult<DateId> {
        if self.contains_value(value) {
            return Err(RegistryError::DuplicateDate(value));
        }
        let id = self.next_id();
        self.insert(id, value)?;
        Ok(id)
    }

    /// Inserts a date under a caller-chosen id. Used by deserialization.
    ///
    /// # Errors
    /// - `InvalidId` for id zero, `ZeroDate` for the reserved value.
    /// - `DuplicateId` / `DuplicateDate` when either is already taken.
    pub fn insert(&mut self, id: DateId, value: DayNumber) -> RegistryResult<()> {
        if id == 0 {
            return Err(RegistryError::InvalidId);
        }
        if value == NO_DATE {
            return Err(RegistryError::ZeroDate);
        }
        if self.contains_id(id) {
            return Err(RegistryError::DuplicateId(id));
        }
        if self.contains_value(value) {
            return Err(RegistryError::DuplicateDate(value));
        }

        self.values_by_id.insert(id, value);
        self.ids_by_value.insert(value, id);
        self.order.push(value);

        self.observers.row_inserted(self.order.len() - 1);
        Ok(())
    }

    /// Removes the date with the given value.
    ///
    /// # Errors
    /// - `ZeroDate` for the reserved value.
    /// - `DateValueNotFound` when the value is not registered.
    pub fn remove(&mut self, value: DayNumber) -> RegistryResult<()> {
        if value == NO_DATE {
            return Err(RegistryError::ZeroDate);
        }
        let id = self
            .id_of(value)
            .ok_or(RegistryError::DateValueNotFound(value))?;
        let row = self
            .order
            .iter()
            .position(|&entry| entry == value)
            .unwrap_or_default();

        self.values_by_id.remove(&id);
        self.ids_by_value.remove(&value);
        self.order.retain(|&entry| entry != value);

        self.observers.row_removed(row);
        Ok(())
    }

    /// Removes all dates with one batched range notification.
    /// No-op (and no notification) when already empty.
    pub fn clear(&mut self) {
        let size = self.order.len();
        if size == 0 {
            return;
        }

        self.values_by_id.clear();
        self.ids_by_value.clear();
        self.order.clear();

        self.observers.batch_begin();
        self.observers.row_range_removed(0, size - 1);
        self.observers.batch_end();
    }

    pub fn contains_id(&self, id: DateId) -> bool {
        self.values_by_id.contains_key(&id)
    }

    pub fn contains_value(&self, value: DayNumber) -> bool {
        self.ids_by_value.contains_key(&value)
    }

    /// Day ordinal of the date with the given id, when it exists.
    pub fn value_of(&self, id: DateId) -> Option<DayNumber> {
        self.values_by_id.get(&id).copied()
    }

    /// Id of the date with the given value, when it exists.
    pub fn id_of(&self, value: DayNumber) -> Option<DateId> {
        self.ids_by_value.get(&value).copied()
    }

    /// Smallest positive id not currently assigned.
    pub fn next_id(&self) -> DateId {
        next_free_id(self.values_by_id.keys().copied())
    }

    pub fn row_count(&self) -> usize {
        self.order.len()
    }

    /// `(id, value)` at the given display row.
    pub fn date_at(&self, row: usize) -> Option<(DateId, DayNumber)> {
        let value = *self.order.get(row)?;
        let id = self.id_of(value)?;
        Some((id, value))
    }
}
