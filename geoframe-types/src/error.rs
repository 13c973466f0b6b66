//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoframeTypesError {
    /// The engine could not make sense of a reference-system definition.
    #[error("invalid reference system definition '{definition}': {reason}")]
    InvalidDefinition {
        /// Definition text as given.
        definition: String,
        /// Engine message.
        reason: String,
    },
    /// Transformation between two reference systems failed.
    #[error("projection failed: {0}")]
    Projection(String),
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
}
