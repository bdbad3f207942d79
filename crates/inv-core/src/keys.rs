//! Store keys of the four persisted collections.

use std::fmt;

use inv_model::CatalogKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoreKey {
    Reports,
    Catalog(CatalogKind),
}

impl StoreKey {
    pub const ALL: [StoreKey; 4] = [
        StoreKey::Reports,
        StoreKey::Catalog(CatalogKind::Boat),
        StoreKey::Catalog(CatalogKind::Section),
        StoreKey::Catalog(CatalogKind::Item),
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Reports => "reports",
            StoreKey::Catalog(CatalogKind::Boat) => "catalog_boats",
            StoreKey::Catalog(CatalogKind::Section) => "catalog_sections",
            StoreKey::Catalog(CatalogKind::Item) => "catalog_items",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
