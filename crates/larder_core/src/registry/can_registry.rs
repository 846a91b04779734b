//! Can registry: the table of physical inventory units.
//!
//! # Responsibility
//! - Own the can rows, each referencing one good id and one date id.
//! - Enforce referential integrity against the good and date registries.
//! - Garbage-collect date rows whose last reference drops.
//!
//! # Invariants
//! - Foreign keys always resolve; no mutation may leave a dangling
//!   reference, even transiently.
//! - Date cleanup cascades automatically; good cleanup never does.
//! - Display order is the fixed three-key sort (date, good name, can id)
//!   and is only refreshed implicitly on insert. Edits require an
//!   explicit `sort` call afterwards.
//!
//! The good and date registries are passed in by reference per call:
//! this registry holds no ambient state beyond its own rows.

use crate::model::ids::{CanId, DateId, DayNumber, GoodId};
use crate::observe::{Observers, TableObserver};
use crate::registry::{next_free_id, DateRegistry, GoodRegistry, RegistryError, RegistryResult};
use std::collections::HashMap;

/// Column of the can id in the tabular view.
pub const COL_CAN_ID: usize = 0;
/// Column of the referenced good.
pub const COL_GOOD: usize = 1;
/// Column of the referenced expiration date.
pub const COL_DATE: usize = 2;

/// Observable table of cans: `(can id, good id, date id)` rows kept in
/// the three-key display order.
#[derive(Default)]
pub struct CanRegistry {
    goods_by_can: HashMap<CanId, GoodId>,
    dates_by_can: HashMap<CanId, DateId>,
    order: Vec<CanId>,
    last_row_added: usize,
    observers: Observers,
}

impl CanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table observer for row change notifications.
    pub fn subscribe(&mut self, observer: Box<dyn TableObserver>) {
        self.observers.subscribe(observer);
    }

    /// Adds a can for the named good and the given day ordinal, creating
    /// the good and the date on first use. Returns the chosen can id:
    /// `id_hint` when it is a free positive id, else the smallest free id.
    ///
    /// # Errors
    /// - `EmptyName` when the good name is empty.
    /// - `ZeroDate` for the reserved day ordinal.
    pub fn add(
        &mut self,
        goods: &mut GoodRegistry,
        dates: &mut DateRegistry,
        name: &str,
        value: DayNumber,
        id_hint: Option<CanId>,
    ) -> RegistryResult<CanId> {
        let good_id = match goods.id_of(name) {
            Some(id) => id,
            None => goods.add(name)?,
        };
        let date_id = match dates.id_of(value) {
            Some(id) => id,
            None => dates.add(value)?,
        };

        let can_id = self.next_id(id_hint.unwrap_or(0));
        self.insert(goods, dates, can_id, good_id, date_id)?;
        Ok(can_id)
    }

    /// Inserts a can row under a caller-chosen id. Used by `add` and by
    /// deserialization. Re-sorts, records the post-sort row as the last
    /// row added, and notifies `row_inserted` there.
    ///
    /// # Errors
    /// - `InvalidId` when any id is zero.
    /// - `GoodNotFound` / `DateNotFound` when a foreign key does not
    ///   resolve; nothing is inserted.
    /// - `DuplicateId` when the can id is already taken.
    pub fn insert(
        &mut self,
        goods: &GoodRegistry,
        dates: &DateRegistry,
        can_id: CanId,
        good_id: GoodId,
        date_id: DateId,
    ) -> RegistryResult<()> {
        if can_id == 0 || good_id == 0 || date_id == 0 {
            return Err(RegistryError::InvalidId);
        }
        if !goods.contains_id(good_id) {
            return Err(RegistryError::GoodNotFound(good_id));
        }
        if !dates.contains_id(date_id) {
            return Err(RegistryError::DateNotFound(date_id));
        }
        if self.contains_id(can_id) {
            return Err(RegistryError::DuplicateId(can_id));
        }

        self.goods_by_can.insert(can_id, good_id);
        self.dates_by_can.insert(can_id, date_id);
        self.order.push(can_id);
        self.sort(goods, dates);

        let row = self.row_of(can_id).unwrap_or_default();
        self.last_row_added = row;
        self.observers.row_inserted(row);
        Ok(())
    }

    /// Repoints a can at an already-registered good.
    ///
    /// Notifies a single `cell_changed` and does not re-sort; callers
    /// sort explicitly after a batch of edits.
    ///
    /// # Errors
    /// - `CanNotFound` when the can is absent.
    /// - `GoodNameNotFound` when the good does not pre-exist (this edit,
    ///   unlike `edit_date`, never creates one).
    /// - `UnchangedEdit` when the can already references that good.
    pub fn edit_good(
        &mut self,
        goods: &GoodRegistry,
        can_id: CanId,
        new_name: &str,
    ) -> RegistryResult<()> {
        if !self.contains_id(can_id) {
            return Err(RegistryError::CanNotFound(can_id));
        }
        let good_id = goods
            .id_of(new_name)
            .ok_or_else(|| RegistryError::GoodNameNotFound(new_name.to_string()))?;
        if self.goods_by_can.get(&can_id) == Some(&good_id) {
            return Err(RegistryError::UnchangedEdit(can_id));
        }

        self.goods_by_can.insert(can_id, good_id);
        let row = self.row_of(can_id).unwrap_or_default();
        self.observers.cell_changed(row, COL_GOOD);
        Ok(())
    }

    /// Repoints a can at the given day ordinal, registering the date on
    /// first use. When the old date's reference count drops to zero it is
    /// removed from the date registry.
    ///
    /// Notifies a single `cell_changed` and does not re-sort.
    ///
    /// # Errors
    /// - `CanNotFound` when the can is absent.
    /// - `ZeroDate` for the reserved day ordinal.
    /// - `UnchangedEdit` when the can already carries that date.
    pub fn edit_date(
        &mut self,
        dates: &mut DateRegistry,
        can_id: CanId,
        new_value: DayNumber,
    ) -> RegistryResult<()> {
        if !self.contains_id(can_id) {
            return Err(RegistryError::CanNotFound(can_id));
        }
        let date_id = match dates.id_of(new_value) {
            Some(id) => id,
            None => dates.add(new_value)?,
        };
        let old_date_id = self.dates_by_can.get(&can_id).copied().unwrap_or_default();
        if date_id == old_date_id {
            return Err(RegistryError::UnchangedEdit(can_id));
        }

        self.dates_by_can.insert(can_id, date_id);
        let row = self.row_of(can_id).unwrap_or_default();
        self.observers.cell_changed(row, COL_DATE);

        self.collect_date_if_orphaned(dates, old_date_id);
        Ok(())
    }

    /// Removes a can, then garbage-collects its date when unreferenced.
    /// Goods are never cascaded.
    ///
    /// # Errors
    /// - `CanNotFound` when the can is absent.
    pub fn remove(&mut self, dates: &mut DateRegistry, can_id: CanId) -> RegistryResult<()> {
        let row = self
            .row_of(can_id)
            .ok_or(RegistryError::CanNotFound(can_id))?;
        let old_date_id = self.dates_by_can.get(&can_id).copied().unwrap_or_default();

        self.goods_by_can.remove(&can_id);
        self.dates_by_can.remove(&can_id);
        self.order.retain(|&entry| entry != can_id);
        self.observers.row_removed(row);

        self.collect_date_if_orphaned(dates, old_date_id);
        Ok(())
    }

    /// Removes every can referencing the given good and returns how many
    /// were removed. The good row itself is left for the caller.
    pub fn remove_by_good(&mut self, dates: &mut DateRegistry, good_id: GoodId) -> usize {
        let can_ids: Vec<CanId> = self
            .goods_by_can
            .iter()
            .filter(|&(_, &entry)| entry == good_id)
            .map(|(&can_id, _)| can_id)
            .collect();
        if can_ids.is_empty() {
            return 0;
        }

        self.observers.batch_begin();
        let mut removed = 0;
        for can_id in can_ids {
            if self.remove(dates, can_id).is_ok() {
                removed += 1;
            }
        }
        self.observers.batch_end();
        removed
    }

    /// Removes all cans with one batched range notification. Does not
    /// cascade to goods or dates; callers clear those separately.
    pub fn clear(&mut self) {
        let size = self.order.len();
        if size == 0 {
            return;
        }

        self.goods_by_can.clear();
        self.dates_by_can.clear();
        self.order.clear();
        self.last_row_added = 0;

        self.observers.batch_begin();
        self.observers.row_range_removed(0, size - 1);
        self.observers.batch_end();
    }

    /// Re-sorts the display order by date ascending, then good name
    /// case-insensitive ascending, then can id ascending.
    pub fn sort(&mut self, goods: &GoodRegistry, dates: &DateRegistry) {
        let goods_by_can = &self.goods_by_can;
        let dates_by_can = &self.dates_by_can;

        self.order.sort_by(|&a, &b| {
            let date_a = resolve_date(dates, dates_by_can, a);
            let date_b = resolve_date(dates, dates_by_can, b);
            date_a
                .cmp(&date_b)
                .then_with(|| {
                    let good_a = resolve_good(goods, goods_by_can, a).to_lowercase();
                    let good_b = resolve_good(goods, goods_by_can, b).to_lowercase();
                    good_a.cmp(&good_b)
                })
                .then_with(|| a.cmp(&b))
        });
    }

    pub fn contains_id(&self, can_id: CanId) -> bool {
        self.goods_by_can.contains_key(&can_id)
    }

    /// Number of cans expiring within `days` of `today`, inclusive:
    /// `days = 0` counts cans already expired or expiring today.
    pub fn expiring_within(&self, dates: &DateRegistry, today: DayNumber, days: i64) -> usize {
        self.order
            .iter()
            .filter_map(|can_id| self.dates_by_can.get(can_id))
            .filter_map(|date_id| dates.value_of(*date_id))
            .filter(|expires| expires - today <= days)
            .count()
    }

    /// Number of cans referencing the given good.
    pub fn good_ref_count(&self, good_id: GoodId) -> usize {
        self.goods_by_can
            .values()
            .filter(|&&entry| entry == good_id)
            .count()
    }

    /// Number of cans referencing the given date.
    pub fn date_ref_count(&self, date_id: DateId) -> usize {
        self.dates_by_can
            .values()
            .filter(|&&entry| entry == date_id)
            .count()
    }

    /// Current display row of the can, when it exists.
    pub fn row_of(&self, can_id: CanId) -> Option<usize> {
        self.order.iter().position(|&entry| entry == can_id)
    }

    /// Post-sort row of the most recently inserted can, zero before any
    /// insertion.
    pub fn last_row_added(&self) -> usize {
        self.last_row_added
    }

    /// Smallest free positive can id, honoring `hint` when it is free
    /// and positive.
    pub fn next_id(&self, hint: CanId) -> CanId {
        if hint > 0 && !self.contains_id(hint) {
            return hint;
        }
        next_free_id(self.order.iter().copied())
    }

    pub fn row_count(&self) -> usize {
        self.order.len()
    }

    /// Can id at the given display row.
    pub fn can_at(&self, row: usize) -> Option<CanId> {
        self.order.get(row).copied()
    }

    /// Good id referenced by the can, when the can exists.
    pub fn good_id_of(&self, can_id: CanId) -> Option<GoodId> {
        self.goods_by_can.get(&can_id).copied()
    }

    /// Date id referenced by the can, when the can exists.
    pub fn date_id_of(&self, can_id: CanId) -> Option<DateId> {
        self.dates_by_can.get(&can_id).copied()
    }

    fn collect_date_if_orphaned(&mut self, dates: &mut DateRegistry, date_id: DateId) {
        if self.date_ref_count(date_id) == 0 {
            if let Some(value) = dates.value_of(date_id) {
                let _ = dates.remove(value);
            }
        }
    }
}

fn resolve_date(
    dates: &DateRegistry,
    dates_by_can: &HashMap<CanId, DateId>,
    can_id: CanId,
) -> DayNumber {
    dates_by_can
        .get(&can_id)
        .and_then(|date_id| dates.value_of(*date_id))
        .unwrap_or_default()
}

fn resolve_good<'a>(
    goods: &'a GoodRegistry,
    goods_by_can: &HashMap<CanId, GoodId>,
    can_id: CanId,
) -> &'a str {
    goods_by_can
        .get(&can_id)
        .and_then(|good_id| goods.name_of(*good_id))
        .unwrap_or_default()
}
