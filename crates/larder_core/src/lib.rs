//! Core domain logic for the larder canned-goods inventory.
//! This crate is the single source of truth for business invariants:
//! id compaction, referential integrity, date garbage collection, and
//! the persisted document format. The desktop shell (windows, dialogs,
//! tray icon) stays outside and talks to the core through the registry,
//! observer, and service APIs.

pub mod logging;
pub mod model;
pub mod observe;
pub mod registry;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::expiration::{days_to_expiration, ExpirationBand};
pub use model::good_name::is_valid_good_name;
pub use model::ids::{CanId, DateId, DayNumber, GoodId, NO_DATE};
pub use observe::TableObserver;
pub use registry::{
    CanRegistry, DateRegistry, GoodRegistry, RegistryError, RegistryResult,
};
pub use service::inventory_service::InventoryService;
pub use store::{JsonStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
