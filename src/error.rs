//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.

use thiserror::Error;

use crate::schema::CanonicalField;

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// Mandatory columns could not be resolved. Fatal for the whole
    /// dataset, raised once before any row is composed.
    #[error("missing mandatory columns: {}", .missing.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", "))]
    Schema { missing: Vec<CanonicalField> },

    /// Invalid source image (zero dimensions, zero-area target box,
    /// undecodable bytes). Fatal only to the affected logo cell.
    #[error("invalid source image: {0}")]
    Image(String),

    /// Layout configuration error (ratio sums, non-positive dimensions)
    #[error("layout error: {0}")]
    Layout(String),

    /// Tabular source decode error
    #[error("table error: {0}")]
    Table(String),

    /// Rendering backend error
    #[error("render error: {0}")]
    Render(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
