//! Good registry: the table of distinct good names.
//!
//! # Responsibility
//! - Own the set of good names, each with a stable compacted id.
//! - Keep the display ordering sorted case-insensitively by name.
//!
//! # Invariants
//! - Names are unique case-sensitively; `Milk` and `milk` are two goods.
//! - `next_id` always returns the smallest unassigned positive id, so
//!   ids are reused after removal.
//! - Goods are never removed automatically; cascading cleanup is the
//!   caller's decision (asymmetric with the date registry).

use crate::model::ids::GoodId;
use crate::observe::{Observers, TableObserver};
use crate::registry::{next_free_id, RegistryError, RegistryResult};
use std::collections::HashMap;

/// Observable table of goods: `(id, name)` rows sorted by name.
#[derive(Default)]
pub struct GoodRegistry {
    names_by_id: HashMap<GoodId, String>,
    ids_by_name: HashMap<String, GoodId>,
    order: Vec<String>,
    observers: Observers,
}

impl GoodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table observer for row change notifications.
    pub fn subscribe(&mut self, observer: Box<dyn TableObserver>) {
        self.observers.subscribe(observer);
    }

    /// Adds a new good under the smallest free id and returns that id.
    ///
    /// # Errors
    /// - `DuplicateName` when the name is already registered.
    /// - `EmptyName` when the name is empty.
    pub fn add(&mut self, name: &str) -> RegistryResult<GoodId> {
        if self.contains_name(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        let id = self.next_id();
        self.insert(id, name)?;
        Ok(id)
    }

    /// Inserts a good under a caller-chosen id. Used by deserialization.
    ///
    /// Notifies `row_inserted` at the post-sort position.
    ///
    /// # Errors
    /// - `InvalidId` for id zero, `EmptyName` for an empty name.
    /// - `DuplicateId` / `DuplicateName` when either is already taken.
    pub fn insert(&mut self, id: GoodId, name: &str) -> RegistryResult<()> {
        if id == 0 {
            return Err(RegistryError::InvalidId);
        }
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.contains_id(id) {
            return Err(RegistryError::DuplicateId(id));
        }
        if self.contains_name(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        self.names_by_id.insert(id, name.to_string());
        self.ids_by_name.insert(name.to_string(), id);
        self.order.push(name.to_string());
        self.resort();

        if let Some(row) = self.row_of(name) {
            self.observers.row_inserted(row);
        }
        Ok(())
    }

    /// Removes the named good and notifies `row_removed` at its old row.
    ///
    /// # Errors
    /// - `GoodNameNotFound` when the name is not registered.
    pub fn remove(&mut self, name: &str) -> RegistryResult<()> {
        let id = self
            .id_of(name)
            .ok_or_else(|| RegistryError::GoodNameNotFound(name.to_string()))?;
        let row = self.row_of(name).unwrap_or_default();

        self.names_by_id.remove(&id);
        self.ids_by_name.remove(name);
        self.order.retain(|entry| entry != name);

        self.observers.row_removed(row);
        Ok(())
    }

    /// Removes all goods with one batched range notification.
    /// No-op (and no notification) when already empty.
    pub fn clear(&mut self) {
        let size = self.order.len();
        if size == 0 {
            return;
        }

        self.names_by_id.clear();
        self.ids_by_name.clear();
        self.order.clear();

        self.observers.batch_begin();
        self.observers.row_range_removed(0, size - 1);
        self.observers.batch_end();
    }

    pub fn contains_id(&self, id: GoodId) -> bool {
        self.names_by_id.contains_key(&id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.ids_by_name.contains_key(name)
    }

    /// Name of the good with the given id, when it exists.
    pub fn name_of(&self, id: GoodId) -> Option<&str> {
        self.names_by_id.get(&id).map(String::as_str)
    }

    /// Id of the named good, when it exists.
    pub fn id_of(&self, name: &str) -> Option<GoodId> {
        self.ids_by_name.get(name).copied()
    }

    /// Smallest positive id not currently assigned.
    pub fn next_id(&self) -> GoodId {
        next_free_id(self.names_by_id.keys().copied())
    }

    pub fn row_count(&self) -> usize {
        self.order.len()
    }

    /// `(id, name)` at the given display row.
    pub fn good_at(&self, row: usize) -> Option<(GoodId, &str)> {
        let name = self.order.get(row)?;
        let id = self.id_of(name)?;
        Some((id, name.as_str()))
    }

    /// Current display row of the named good.
    pub fn row_of(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|entry| entry == name)
    }

    fn resort(&mut self) {
        self.order.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
    }
}
