//! Inspection reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::ReportId;
use crate::sections::Sections;

/// One inspection of a boat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub boat_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sections: Sections,
}

impl Report {
    /// Start an empty report with a fresh id.
    pub fn new(boat_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::with_id(ReportId::generate(), boat_name, created_at)
    }

    pub fn with_id(id: ReportId, boat_name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            boat_name: boat_name.into(),
            created_at,
            sections: Sections::new(),
        }
    }

    pub fn item_count(&self) -> usize {
        self.sections.item_count()
    }

    pub fn total_quantity(&self) -> i64 {
        self.sections.total_quantity()
    }
}
