use provider_apple_catalog::CatalogError;
use thiserror::Error;

/// Load-failure taxonomy for per-entity operations.
///
/// Kinds carry structured fields and compare structurally so that
/// `LoadingState` equality over errors is exact, not an approximation over
/// rendered descriptions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("No artwork found for search term '{term}'")]
    NoResults { term: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Response decode failed: {0}")]
    Decode(String),

    #[error("Image decode failed: {0}")]
    ImageDecode(String),

    #[error("No library track matches '{entity}'")]
    NoMatch { entity: String },

    #[error("Library source error: {0}")]
    Source(String),
}

impl From<CatalogError> for FetchError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NoResults { term } => FetchError::NoResults { term },
            CatalogError::Network(message) => FetchError::Network(message),
            CatalogError::Http { status, body } => {
                FetchError::Network(format!("HTTP {}: {}", status, body))
            }
            CatalogError::Decode(message) => FetchError::Decode(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
