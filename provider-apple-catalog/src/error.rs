use thiserror::Error;

/// Catalog failure kinds.
///
/// Variants carry structured fields and compare structurally, so callers can
/// match on kinds instead of comparing rendered descriptions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("No artwork found for search term '{term}'")]
    NoResults { term: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Response decode failed: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
