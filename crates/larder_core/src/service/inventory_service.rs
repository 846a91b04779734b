//! Inventory use-case service.
//!
//! # Responsibility
//! - Own the three registries and the document store, constructed once
//!   at startup and handed to whatever needs them.
//! - Provide the dialog-level flows of the desktop shell: add a can,
//!   edit it, remove a good together with its cans, poll expirations.
//!
//! # Invariants
//! - All mutations run on one logical caller at a time; the service adds
//!   no locking of its own.
//! - The registries form one logical unit of state: only this service
//!   hands out access to them.

use crate::model::ids::{CanId, DayNumber, GoodId};
use crate::registry::{CanRegistry, DateRegistry, GoodRegistry, RegistryError, RegistryResult};
use crate::store::{JsonStore, StoreResult};
use log::info;
use std::path::PathBuf;

/// Composition root for the inventory core.
pub struct InventoryService {
    goods: GoodRegistry,
    dates: DateRegistry,
    cans: CanRegistry,
    store: JsonStore,
}

impl InventoryService {
    /// Creates an empty inventory persisted at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            goods: GoodRegistry::new(),
            dates: DateRegistry::new(),
            cans: CanRegistry::new(),
            store: JsonStore::new(path),
        }
    }

    /// Loads the persisted inventory, bootstrapping a fresh document on
    /// first run.
    pub fn load(&mut self) -> StoreResult<()> {
        self.store
            .load(&mut self.goods, &mut self.dates, &mut self.cans)
    }

    /// Saves the inventory with atomic replace semantics.
    pub fn save(&self) -> StoreResult<()> {
        self.store.save(&self.goods, &self.dates, &self.cans)
    }

    /// Adds a can for the named good expiring at `value`, creating the
    /// good and date on first use. Returns the chosen can id.
    pub fn add_can(
        &mut self,
        name: &str,
        value: DayNumber,
        id_hint: Option<CanId>,
    ) -> RegistryResult<CanId> {
        let can_id = self
            .cans
            .add(&mut self.goods, &mut self.dates, name, value, id_hint)?;
        info!("event=can_added module=service status=ok can_id={can_id}");
        Ok(can_id)
    }

    /// Repoints a can at an existing good. The can table is left for an
    /// explicit `sort_cans` after a batch of edits.
    pub fn edit_can_good(&mut self, can_id: CanId, new_name: &str) -> RegistryResult<()> {
        self.cans.edit_good(&self.goods, can_id, new_name)
    }

    /// Repoints a can at a day ordinal, creating the date on first use
    /// and garbage-collecting the old one when orphaned.
    pub fn edit_can_date(&mut self, can_id: CanId, new_value: DayNumber) -> RegistryResult<()> {
        self.cans.edit_date(&mut self.dates, can_id, new_value)
    }

    /// Removes one can, cascading to its date when unreferenced.
    pub fn remove_can(&mut self, can_id: CanId) -> RegistryResult<()> {
        self.cans.remove(&mut self.dates, can_id)
    }

    /// Registers a good ahead of any can referencing it.
    pub fn add_good(&mut self, name: &str) -> RegistryResult<GoodId> {
        self.goods.add(name)
    }

    /// Removes a good and every can referencing it; returns how many
    /// cans went with it. This is the one place good removal cascades,
    /// and it is caller-initiated by design.
    pub fn remove_good(&mut self, name: &str) -> RegistryResult<usize> {
        let good_id = self
            .goods
            .id_of(name)
            .ok_or_else(|| RegistryError::GoodNameNotFound(name.to_string()))?;

        let removed = self.cans.remove_by_good(&mut self.dates, good_id);
        self.goods.remove(name)?;
        info!("event=good_removed module=service status=ok name={name} cans_removed={removed}");
        Ok(removed)
    }

    /// Restores the three-key display order after edits.
    pub fn sort_cans(&mut self) {
        self.cans.sort(&self.goods, &self.dates);
    }

    /// Number of cans expiring within `days` of `today`, inclusive.
    /// `today` comes from the caller: the core has no clock of its own.
    pub fn expiring_within(&self, today: DayNumber, days: i64) -> usize {
        self.cans.expiring_within(&self.dates, today, days)
    }

    pub fn goods(&self) -> &GoodRegistry {
        &self.goods
    }

    pub fn goods_mut(&mut self) -> &mut GoodRegistry {
        &mut self.goods
    }

    pub fn dates(&self) -> &DateRegistry {
        &self.dates
    }

    pub fn dates_mut(&mut self) -> &mut DateRegistry {
        &mut self.dates
    }

    pub fn cans(&self) -> &CanRegistry {
        &self.cans
    }

    pub fn cans_mut(&mut self) -> &mut CanRegistry {
        &mut self.cans
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }
}
