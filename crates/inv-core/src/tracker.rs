//! Tracking of collections whose last write failed.

use std::collections::BTreeSet;

use crate::keys::StoreKey;

/// Remembers which collections differ from what the store holds.
///
/// A failed write leaves the in-memory state ahead of the store; the key
/// stays here until a later write of the same collection succeeds.
#[derive(Debug, Clone, Default)]
pub struct UnsavedTracker {
    unsaved: BTreeSet<StoreKey>,
}

impl UnsavedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.unsaved.is_empty()
    }

    pub fn save_failed(&mut self, key: StoreKey) {
        self.unsaved.insert(key);
    }

    pub fn save_complete(&mut self, key: StoreKey) {
        self.unsaved.remove(&key);
    }

    pub fn keys(&self) -> impl Iterator<Item = StoreKey> + '_ {
        self.unsaved.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inv_model::CatalogKind;

    #[test]
    fn test_new_tracker_is_clean() {
        let tracker = UnsavedTracker::new();
        assert!(!tracker.is_dirty());
        assert_eq!(tracker.keys().count(), 0);
    }

    #[test]
    fn test_failed_then_complete() {
        let mut tracker = UnsavedTracker::new();
        tracker.save_failed(StoreKey::Reports);
        tracker.save_failed(StoreKey::Catalog(CatalogKind::Item));
        tracker.save_failed(StoreKey::Reports);
        assert!(tracker.is_dirty());
        assert_eq!(tracker.keys().count(), 2);

        tracker.save_complete(StoreKey::Reports);
        tracker.save_complete(StoreKey::Catalog(CatalogKind::Item));
        assert!(!tracker.is_dirty());
    }
}
