//! Table change notification interface.
//!
//! # Responsibility
//! - Let the UI shell observe row-level changes in each registry without
//!   the registries knowing anything about widget binding.
//!
//! # Invariants
//! - Notifications describe row positions at the moment they are emitted;
//!   a later sort may reshuffle rows, so observers must re-resolve stable
//!   ids through the registry lookup methods.
//! - Multi-row operations are bracketed by `batch_begin`/`batch_end`.

/// Observer of one registry's tabular view. All methods default to no-ops
/// so observers implement only what they render.
pub trait TableObserver {
    /// A row appeared at `row` (post-sort position).
    fn row_inserted(&mut self, row: usize) {
        let _ = row;
    }

    /// The row at `row` (pre-removal position) was removed.
    fn row_removed(&mut self, row: usize) {
        let _ = row;
    }

    /// The inclusive row range `first..=last` was removed in one step.
    fn row_range_removed(&mut self, first: usize, last: usize) {
        let _ = (first, last);
    }

    /// A single cell changed in place, with no reordering.
    fn cell_changed(&mut self, row: usize, column: usize) {
        let _ = (row, column);
    }

    /// A multi-row mutation is starting.
    fn batch_begin(&mut self) {}

    /// The multi-row mutation finished.
    fn batch_end(&mut self) {}
}

/// Owned set of observers embedded in each registry.
#[derive(Default)]
pub struct Observers {
    observers: Vec<Box<dyn TableObserver>>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Box<dyn TableObserver>) {
        self.observers.push(observer);
    }

    pub(crate) fn row_inserted(&mut self, row: usize) {
        for observer in &mut self.observers {
            observer.row_inserted(row);
        }
    }

    pub(crate) fn row_removed(&mut self, row: usize) {
        for observer in &mut self.observers {
            observer.row_removed(row);
        }
    }

    pub(crate) fn row_range_removed(&mut self, first: usize, last: usize) {
        for observer in &mut self.observers {
            observer.row_range_removed(first, last);
        }
    }

    pub(crate) fn cell_changed(&mut self, row: usize, column: usize) {
        for observer in &mut self.observers {
            observer.cell_changed(row, column);
        }
    }

    pub(crate) fn batch_begin(&mut self) {
        for observer in &mut self.observers {
            observer.batch_begin();
        }
    }

    pub(crate) fn batch_end(&mut self) {
        for observer in &mut self.observers {
            observer.batch_end();
        }
    }
}
