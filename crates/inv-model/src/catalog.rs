//! Autocomplete suggestion catalogs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Which suggestion list a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Boat,
    Section,
    Item,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [CatalogKind::Boat, CatalogKind::Section, CatalogKind::Item];

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogKind::Boat => "boat",
            CatalogKind::Section => "section",
            CatalogKind::Item => "item",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boat" | "boats" => Ok(CatalogKind::Boat),
            "section" | "sections" => Ok(CatalogKind::Section),
            "item" | "items" => Ok(CatalogKind::Item),
            other => Err(format!("unknown catalog: {other}")),
        }
    }
}

/// Deduplicated list of previously used values, in first-use order.
///
/// Entries are independent of report data: removing a suggestion never
/// touches reports that already use the value.
///
/// Stored lists are read through [`Catalog::insert`], so repeated entries
/// collapse to their first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog(Vec<String>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|entry| entry == value)
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Append `value` unless it is already present. Returns whether the
    /// catalog changed.
    pub fn insert(&mut self, value: &str) -> bool {
        if self.contains(value) {
            return false;
        }
        self.0.push(value.to_string());
        true
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, value: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|entry| entry != value);
        self.0.len() != before
    }

    /// Entries starting with `prefix`, compared case-insensitively.
    pub fn matching<'a>(&'a self, prefix: &str) -> impl Iterator<Item = &'a str> + 'a {
        let prefix = prefix.to_lowercase();
        self.0
            .iter()
            .filter(move |entry| entry.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Catalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for value in iter {
            catalog.insert(value.as_ref());
        }
        catalog
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<String>::deserialize(deserializer).map(|values| values.into_iter().collect())
    }
}
