//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidCatalog`] thrown when menu data fails validation.
//! - [`KeyNotFound`] thrown when an item or a category is not found.
//! - [`InvalidTransition`] thrown when the catalog loader is driven out of order.
//! - [`InvalidRecord`] thrown when an imported spreadsheet row cannot be read.
//! - [`LoadFailed`] thrown when a catalog is taken from a loader that failed.
//!
//! Store mutations never fail: malformed inputs are absorbed by the reducers.
//!
//!  [`InvalidCatalog`]: EngineError::InvalidCatalog
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidTransition`]: EngineError::InvalidTransition
//!  [`InvalidRecord`]: EngineError::InvalidRecord
//!  [`LoadFailed`]: EngineError::LoadFailed
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Menu data validation failed: {}", .0.join(", "))]
    InvalidCatalog(Vec<String>),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
    #[error("Catalog failed to load: {0}")]
    LoadFailed(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Xlsx(#[from] calamine::XlsxError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidCatalog(a), Self::InvalidCatalog(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidTransition(a), Self::InvalidTransition(b)) => a == b,
            (Self::InvalidRecord(a), Self::InvalidRecord(b)) => a == b,
            (Self::LoadFailed(a), Self::LoadFailed(b)) => a == b,
            (Self::Json(a), Self::Json(b)) => a.to_string() == b.to_string(),
            (Self::Csv(a), Self::Csv(b)) => a.to_string() == b.to_string(),
            (Self::Xlsx(a), Self::Xlsx(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
