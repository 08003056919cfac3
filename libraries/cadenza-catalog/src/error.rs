//! Error types for catalog adapters

use thiserror::Error;

/// Catalog adapter errors
///
/// Network and parse failures are normally degraded to empty results
/// inside the adapters (with a `tracing` warning); these variants cover
/// the cases that must reach the caller.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The operation was cancelled by a superseding request
    #[error("Catalog request cancelled")]
    Cancelled,

    /// A composite track key did not have the `item/file` shape
    #[error("Malformed track key: {0}")]
    MalformedKey(String),

    /// HTTP transport error
    #[error("Catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Catalog response parse error: {0}")]
    Parse(String),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<CatalogError> for cadenza_core::CadenzaError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Cancelled => cadenza_core::CadenzaError::Cancelled,
            other => cadenza_core::CadenzaError::catalog(other.to_string()),
        }
    }
}
