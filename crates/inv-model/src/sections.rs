//! Ordered section map of a report.
//!
//! Sections keep the order in which their labels were first used. That
//! order is what the report detail and the export show, so it survives
//! serialization: a `Sections` value is written as a JSON object whose keys
//! appear in insertion order, and read back in document order.
//!
//! A section never holds zero items. Removing the last item drops the
//! label, and empty arrays found while deserializing are skipped.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};
use crate::item::Item;

/// A labelled group of items, e.g. a location on the boat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    pub items: Vec<Item>,
}

impl Section {
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |sum, item| sum.saturating_add(item.quantity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections(Vec<Section>);

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.0.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|section| section.label.as_str())
    }

    pub fn get(&self, label: &str) -> Option<&[Item]> {
        self.position(label).map(|idx| self.0[idx].items.as_slice())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Number of line items across all sections.
    pub fn item_count(&self) -> usize {
        self.0.iter().map(|section| section.items.len()).sum()
    }

    /// Sum of all item quantities.
    pub fn total_quantity(&self) -> i64 {
        self.0
            .iter()
            .fold(0i64, |sum, section| sum.saturating_add(section.total_quantity()))
    }

    /// Append an item, creating the section at the end if it is new.
    pub fn push_item(&mut self, label: &str, item: Item) {
        match self.position(label) {
            Some(idx) => self.0[idx].items.push(item),
            None => self.0.push(Section {
                label: label.to_string(),
                items: vec![item],
            }),
        }
    }

    /// Overwrite the item at `index`, returning the previous value.
    pub fn replace_item(&mut self, label: &str, index: usize, item: Item) -> Result<Item> {
        let section = self.section_mut(label)?;
        let len = section.items.len();
        let slot = section
            .items
            .get_mut(index)
            .ok_or_else(|| ModelError::ItemIndexOutOfRange {
                section: label.to_string(),
                index,
                len,
            })?;
        Ok(std::mem::replace(slot, item))
    }

    /// Remove the item at `index`. Later items shift down by one and the
    /// section itself is dropped once it has no items left.
    pub fn remove_item(&mut self, label: &str, index: usize) -> Result<Item> {
        let idx = self.position(label).ok_or_else(|| ModelError::SectionNotFound {
            section: label.to_string(),
        })?;
        let section = &mut self.0[idx];
        if index >= section.items.len() {
            return Err(ModelError::ItemIndexOutOfRange {
                section: label.to_string(),
                index,
                len: section.items.len(),
            });
        }
        let removed = section.items.remove(index);
        if section.items.is_empty() {
            self.0.remove(idx);
        }
        Ok(removed)
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.0.iter().position(|section| section.label == label)
    }

    fn section_mut(&mut self, label: &str) -> Result<&mut Section> {
        self.0
            .iter_mut()
            .find(|section| section.label == label)
            .ok_or_else(|| ModelError::SectionNotFound {
                section: label.to_string(),
            })
    }

    /// Insert a whole section read from storage. A repeated label replaces
    /// the earlier items but keeps the earlier position; empty lists remove
    /// the label.
    fn insert_loaded(&mut self, label: String, items: Vec<Item>) {
        match (self.position(&label), items.is_empty()) {
            (Some(idx), true) => {
                self.0.remove(idx);
            }
            (Some(idx), false) => self.0[idx].items = items,
            (None, true) => {}
            (None, false) => self.0.push(Section { label, items }),
        }
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Sections {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for section in &self.0 {
            map.serialize_entry(&section.label, &section.items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sections {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SectionsVisitor;

        impl<'de> Visitor<'de> for SectionsVisitor {
            type Value = Sections;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map from section label to a list of items")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut sections = Sections::new();
                while let Some((label, items)) = access.next_entry::<String, Vec<Item>>()? {
                    sections.insert_loaded(label, items);
                }
                Ok(sections)
            }
        }

        deserializer.deserialize_map(SectionsVisitor)
    }
}
