//! Error types for the catalog crate.
//!
//! Everything that can go wrong while reading catalog or rating files is
//! captured here. The scoring engine itself never fails; these errors only
//! surface at the file-loading edges.

use thiserror::Error;

/// Errors that can occur while loading and validating a title catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// File contents were not valid JSON for the expected shape
    ///
    /// Carries the file name so the message points at the broken input
    #[error("Parse error in {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A field had an out-of-range or otherwise invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two titles in one catalog share an id
    #[error("Duplicate title id: {id}")]
    DuplicateTitle { id: String },

    /// Referenced entity doesn't exist (e.g., rating for a title not in the catalog)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: String, id: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
