//! The inventory state manager.
//!
//! [`Inventory`] owns every report and the three suggestion catalogs. Each
//! mutation changes the in-memory state first and then rewrites the
//! affected collection in full. A failed write is logged and remembered but
//! never rolls the memory state back, so the two can diverge until the next
//! successful write or an explicit [`Inventory::flush`].
//!
//! A collection stored by a newer schema version is opened empty and kept
//! read-only: it is never overwritten, and changes to it stay unsaved.

use std::collections::BTreeMap;

use chrono::Utc;
use inv_model::{Catalog, CatalogKind, Item, ItemInput, Report, ReportId};
use inv_persistence::{
    CURRENT_SCHEMA_VERSION, KeyValueStore, PersistenceError, load_value, save_value,
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, warn};

use crate::error::{InventoryError, Result};
use crate::keys::StoreKey;
use crate::tracker::UnsavedTracker;

#[derive(Debug, Clone, Default)]
struct Catalogs {
    boats: Catalog,
    sections: Catalog,
    items: Catalog,
}

impl Catalogs {
    fn get(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::Boat => &self.boats,
            CatalogKind::Section => &self.sections,
            CatalogKind::Item => &self.items,
        }
    }

    fn get_mut(&mut self, kind: CatalogKind) -> &mut Catalog {
        match kind {
            CatalogKind::Boat => &mut self.boats,
            CatalogKind::Section => &mut self.sections,
            CatalogKind::Item => &mut self.items,
        }
    }
}

/// Reports and suggestion catalogs backed by a key-value store.
#[derive(Debug)]
pub struct Inventory<S> {
    store: S,
    /// Newest first.
    reports: Vec<Report>,
    catalogs: Catalogs,
    tracker: UnsavedTracker,
    /// Keys holding data from a newer schema, with the version found.
    read_only: BTreeMap<StoreKey, u32>,
}

impl<S: KeyValueStore> Inventory<S> {
    /// Load all collections from `store`.
    ///
    /// Missing keys start empty. Unreadable or malformed values are logged
    /// and also start empty; opening never fails.
    pub fn open(store: S) -> Self {
        let mut read_only = BTreeMap::new();
        let reports: Vec<Report> = load_or_default(&store, StoreKey::Reports, &mut read_only);
        let catalogs = Catalogs {
            boats: load_or_default(&store, StoreKey::Catalog(CatalogKind::Boat), &mut read_only),
            sections: load_or_default(
                &store,
                StoreKey::Catalog(CatalogKind::Section),
                &mut read_only,
            ),
            items: load_or_default(&store, StoreKey::Catalog(CatalogKind::Item), &mut read_only),
        };
        info!(
            reports = reports.len(),
            boats = catalogs.boats.len(),
            sections = catalogs.sections.len(),
            items = catalogs.items.len(),
            "inventory loaded"
        );
        Self {
            store,
            reports,
            catalogs,
            tracker: UnsavedTracker::new(),
            read_only,
        }
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn report(&self, id: &ReportId) -> Option<&Report> {
        self.reports.iter().find(|report| &report.id == id)
    }

    pub fn catalog(&self, kind: CatalogKind) -> &Catalog {
        self.catalogs.get(kind)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Start a new, empty report for `boat_name` and put it first.
    ///
    /// The name is not checked here; front ends reject blank names.
    pub fn create_report(&mut self, boat_name: &str) -> ReportId {
        let report = Report::new(boat_name, Utc::now());
        let id = report.id.clone();
        self.reports.insert(0, report);
        info!(report_id = %id, boat_name, "report created");
        self.persist(StoreKey::Reports);
        self.remember(CatalogKind::Boat, boat_name);
        id
    }

    /// Append an item to `section` of a report, creating the section if needed.
    ///
    /// The section label and item name enter their catalogs before the
    /// report is looked up, so they are remembered even when the report is
    /// missing.
    pub fn add_item(
        &mut self,
        report_id: &ReportId,
        section: &str,
        item_name: &str,
        quantity_text: &str,
    ) -> Result<()> {
        self.remember(CatalogKind::Section, section);
        self.remember(CatalogKind::Item, item_name);

        let item = Item::from_input(item_name, quantity_text);
        let quantity = item.quantity;
        let report = self.report_mut(report_id)?;
        report.sections.push_item(section, item);
        info!(report_id = %report_id, section, item = item_name, quantity, "item added");
        self.persist(StoreKey::Reports);
        Ok(())
    }

    /// Overwrite the item at `index` in `section`, returning the old item.
    pub fn edit_item(
        &mut self,
        report_id: &ReportId,
        section: &str,
        index: usize,
        new_item: &ItemInput,
    ) -> Result<Item> {
        let item = new_item.to_item();
        let quantity = item.quantity;
        let report = self.report_mut(report_id)?;
        let previous = report.sections.replace_item(section, index, item)?;
        info!(
            report_id = %report_id,
            section,
            index,
            item = %new_item.name,
            quantity,
            "item edited"
        );
        self.persist(StoreKey::Reports);
        self.remember(CatalogKind::Item, &new_item.name);
        Ok(previous)
    }

    /// Remove the item at `index` in `section`. A section left without
    /// items disappears from the report.
    pub fn delete_item(&mut self, report_id: &ReportId, section: &str, index: usize) -> Result<Item> {
        let report = self.report_mut(report_id)?;
        let removed = report.sections.remove_item(section, index)?;
        let section_removed = !report.sections.contains(section);
        info!(
            report_id = %report_id,
            section,
            index,
            item = %removed.name,
            section_removed,
            "item deleted"
        );
        self.persist(StoreKey::Reports);
        Ok(removed)
    }

    /// Remove a whole report. Catalog entries are kept.
    pub fn delete_report(&mut self, report_id: &ReportId) -> Result<Report> {
        let position = self
            .reports
            .iter()
            .position(|report| &report.id == report_id)
            .ok_or_else(|| InventoryError::ReportNotFound(report_id.clone()))?;
        let removed = self.reports.remove(position);
        info!(report_id = %report_id, boat_name = %removed.boat_name, "report deleted");
        self.persist(StoreKey::Reports);
        Ok(removed)
    }

    /// Drop `value` from one catalog. Reports using the value keep it.
    /// Returns whether an entry was removed.
    pub fn remove_suggestion(&mut self, kind: CatalogKind, value: &str) -> bool {
        if !self.catalogs.get_mut(kind).remove(value) {
            debug!(catalog = %kind, value, "suggestion not present");
            return false;
        }
        info!(catalog = %kind, value, "suggestion removed");
        self.persist(StoreKey::Catalog(kind));
        true
    }

    /// Whether some collection failed to save and memory is ahead of the store.
    pub fn has_unsaved_changes(&self) -> bool {
        self.tracker.is_dirty()
    }

    pub fn unsaved_keys(&self) -> Vec<StoreKey> {
        self.tracker.keys().collect()
    }

    /// Collections left untouched in the store because a newer version
    /// wrote them.
    pub fn read_only_keys(&self) -> Vec<StoreKey> {
        self.read_only.keys().copied().collect()
    }

    /// Retry writing every collection whose last save failed.
    ///
    /// All pending collections are attempted; the first error is returned.
    pub fn flush(&mut self) -> inv_persistence::Result<()> {
        let pending = self.unsaved_keys();
        let mut first_error = None;
        for key in pending {
            match self.write(key) {
                Ok(()) => self.tracker.save_complete(key),
                Err(err) => {
                    warn!(key = %key, error = %err, "flush failed");
                    first_error.get_or_insert(err);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn report_mut(&mut self, id: &ReportId) -> Result<&mut Report> {
        self.reports
            .iter_mut()
            .find(|report| &report.id == id)
            .ok_or_else(|| InventoryError::ReportNotFound(id.clone()))
    }

    fn remember(&mut self, kind: CatalogKind, value: &str) {
        if self.catalogs.get_mut(kind).insert(value) {
            debug!(catalog = %kind, value, "suggestion added");
            self.persist(StoreKey::Catalog(kind));
        }
    }

    fn persist(&mut self, key: StoreKey) {
        match self.write(key) {
            Ok(()) => self.tracker.save_complete(key),
            Err(err) => {
                error!(
                    key = %key,
                    error = %err,
                    "failed to save collection; keeping in-memory changes"
                );
                self.tracker.save_failed(key);
            }
        }
    }

    fn write(&mut self, key: StoreKey) -> inv_persistence::Result<()> {
        if let Some(&found) = self.read_only.get(&key) {
            return Err(PersistenceError::UnsupportedVersion {
                key: key.as_str().to_string(),
                found,
                max_supported: CURRENT_SCHEMA_VERSION,
            });
        }
        match key {
            StoreKey::Reports => save_value(&mut self.store, key.as_str(), &self.reports),
            StoreKey::Catalog(kind) => {
                save_value(&mut self.store, key.as_str(), self.catalogs.get(kind))
            }
        }
    }
}

fn load_or_default<T, S>(
    store: &S,
    key: StoreKey,
    read_only: &mut BTreeMap<StoreKey, u32>,
) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore,
{
    match load_value(store, key.as_str()) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!(key = %key, "nothing stored yet");
            T::default()
        }
        Err(PersistenceError::UnsupportedVersion { found, .. }) => {
            error!(
                key = %key,
                found,
                max_supported = CURRENT_SCHEMA_VERSION,
                "collection written by a newer version; opening it read-only"
            );
            read_only.insert(key, found);
            T::default()
        }
        Err(err) => {
            warn!(key = %key, error = %err, "could not load collection; starting empty");
            T::default()
        }
    }
}
