//! Data model for boat safety equipment inventories.
//!
//! A [`Report`] records one inspection of a boat. Its items are grouped in
//! [`Sections`] keyed by a free-form label and kept in the order the labels
//! were first used. Three [`Catalog`]s remember boat names, section labels
//! and item names for autocomplete.

pub mod catalog;
pub mod error;
pub mod fields;
pub mod ids;
pub mod item;
pub mod report;
pub mod sections;

pub use catalog::{Catalog, CatalogKind};
pub use error::{ModelError, Result};
pub use fields::require_non_empty;
pub use ids::ReportId;
pub use item::{Item, ItemInput, parse_quantity};
pub use report::Report;
pub use sections::{Section, Sections};
