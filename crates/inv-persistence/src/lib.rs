//! Persistent storage for boat inventory data.
//!
//! This crate provides the key-value store that keeps reports and
//! suggestion catalogs across restarts.
//!
//! # Features
//!
//! - **Whole-value storage**: every key holds one complete JSON document
//! - **Atomic writes** to prevent data corruption
//! - **Versioned envelope** around each value, legacy bare values still readable
//! - **In-memory backend** with failure injection
//!
//! # Example
//!
//! ```no_run
//! use inv_persistence::{FileStore, load_value, save_value};
//!
//! let mut store = FileStore::new("/tmp/boat-inventory");
//! save_value(&mut store, "catalog_boats", &vec!["Marlin"])?;
//! let boats: Option<Vec<String>> = load_value(&store, "catalog_boats")?;
//! # Ok::<(), inv_persistence::PersistenceError>(())
//! ```
//!
//! # Architecture
//!
//! The crate is organized into:
//!
//! - `store/` - `KeyValueStore` trait with file and memory backends
//! - `io/` - File I/O operations (atomic save, load)
//! - `codec.rs` - Envelope encoding and typed load/save helpers
//! - `error.rs` - Error types with user-friendly messages

mod codec;
mod error;
mod io;
mod store;

pub use codec::{CURRENT_SCHEMA_VERSION, decode_value, encode_value, load_value, save_value};
pub use error::{PersistenceError, Result};
pub use store::{FileStore, KeyValueStore, MemoryStore};
