use inv_model::{ModelError, ReportId};
use thiserror::Error;

/// Why a mutation did not apply. The inventory is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("report {0} not found")]
    ReportNotFound(ReportId),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
