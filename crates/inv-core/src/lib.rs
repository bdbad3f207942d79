//! Inventory state manager for boat safety inspections.
//!
//! The [`Inventory`] owns the report collection and the boat, section and
//! item suggestion catalogs. Front ends hold it by value and call its
//! mutation methods; every mutation rewrites the affected collection in the
//! store.
//!
//! # Example
//!
//! ```
//! use inv_core::Inventory;
//! use inv_persistence::MemoryStore;
//!
//! let mut inventory = Inventory::open(MemoryStore::new());
//! let id = inventory.create_report("Marlin");
//! inventory.add_item(&id, "Bow", "Flare", "3").unwrap();
//! assert_eq!(inventory.report(&id).unwrap().total_quantity(), 3);
//! ```

mod error;
mod inventory;
mod keys;
mod tracker;

pub use error::{InventoryError, Result};
pub use inventory::Inventory;
pub use keys::StoreKey;
pub use tracker::UnsavedTracker;
