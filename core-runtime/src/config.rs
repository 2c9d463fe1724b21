//! # Core Configuration Module
//!
//! Builder-based configuration for a scanning session. The builder enforces
//! fail-fast validation: a missing or empty developer token and nonsensical
//! limits are rejected at `build()` time, not at first use.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::CoreConfig;
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .developer_token("eyJ...")
//!     .storefront("de")
//!     .http_client(Arc::new(MyHttpClient))
//!     .build()
//!     .expect("Failed to build config");
//!
//! let session = config.session(Arc::new(MySource))?;
//! ```

use std::sync::Arc;

use bridge_http::HttpClient;
use core_fetch::{ArtworkSession, MediaLibrarySource, SourceKind};
use provider_apple_catalog::CatalogSearchClient;

use crate::error::{Error, Result};

const DEFAULT_STOREFRONT: &str = "us";
const DEFAULT_SEARCH_LIMIT: u32 = 2;
const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Validated configuration for one run.
///
/// Use [`CoreConfig::builder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// Developer token sent as a bearer credential on catalog searches
    pub developer_token: String,

    /// Catalog storefront identifier (e.g. "us", "de")
    pub storefront: String,

    /// Result count requested per catalog search
    pub search_limit: u32,

    /// Upper bound on concurrent catalog searches in a batch
    pub max_in_flight: usize,

    /// Which media library backend reads track records
    pub source_kind: SourceKind,

    /// HTTP client used for catalog traffic (injected by the host)
    pub http_client: Option<Arc<dyn HttpClient>>,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field("developer_token", &self.developer_token)
            .field("storefront", &self.storefront)
            .field("search_limit", &self.search_limit)
            .field("max_in_flight", &self.max_in_flight)
            .field("source_kind", &self.source_kind)
            .field("http_client", &self.http_client.as_ref().map(|_| "dyn HttpClient"))
            .finish()
    }
}

impl CoreConfig {
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Builds the catalog client from this configuration.
    ///
    /// Fails with [`Error::CapabilityMissing`] when no HTTP client was
    /// injected.
    pub fn catalog_client(&self) -> Result<CatalogSearchClient> {
        let http_client = self
            .http_client
            .clone()
            .ok_or_else(http_client_missing_error)?;

        Ok(
            CatalogSearchClient::new(http_client, self.developer_token.clone())
                .with_storefront(self.storefront.clone())
                .with_search_limit(self.search_limit)
                .with_max_in_flight(self.max_in_flight),
        )
    }

    /// Builds a session over the given library source, wired to the catalog
    /// client this configuration describes.
    pub fn session(&self, source: Arc<dyn MediaLibrarySource>) -> Result<ArtworkSession> {
        let catalog = Arc::new(self.catalog_client()?);
        Ok(ArtworkSession::new(source, catalog))
    }
}

fn http_client_missing_error() -> Error {
    Error::CapabilityMissing {
        capability: "HttpClient".to_string(),
        message: "An HttpClient implementation is required for catalog searches. \
                 Inject one with CoreConfigBuilder::http_client(), e.g. \
                 bridge_http::ReqwestHttpClient on desktop."
            .to_string(),
    }
}

/// Builder for [`CoreConfig`]. Fields not set take documented defaults;
/// `developer_token` has no default and must be provided.
#[derive(Default)]
pub struct CoreConfigBuilder {
    developer_token: Option<String>,
    storefront: Option<String>,
    search_limit: Option<u32>,
    max_in_flight: Option<usize>,
    source_kind: SourceKind,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl CoreConfigBuilder {
    pub fn developer_token(mut self, token: impl Into<String>) -> Self {
        self.developer_token = Some(token.into());
        self
    }

    pub fn storefront(mut self, storefront: impl Into<String>) -> Self {
        self.storefront = Some(storefront.into());
        self
    }

    pub fn search_limit(mut self, limit: u32) -> Self {
        self.search_limit = Some(limit);
        self
    }

    pub fn max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = Some(max);
        self
    }

    pub fn source_kind(mut self, kind: SourceKind) -> Self {
        self.source_kind = kind;
        self
    }

    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Validates and builds the configuration.
    pub fn build(self) -> Result<CoreConfig> {
        let developer_token = self.developer_token.ok_or_else(|| {
            Error::Config(
                "Developer token is required. Use .developer_token() to set it.".to_string(),
            )
        })?;
        if developer_token.trim().is_empty() {
            return Err(Error::Config("Developer token must not be empty.".to_string()));
        }

        let storefront = self
            .storefront
            .unwrap_or_else(|| DEFAULT_STOREFRONT.to_string());
        if storefront.trim().is_empty() {
            return Err(Error::Config("Storefront must not be empty.".to_string()));
        }

        let search_limit = self.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        if search_limit == 0 {
            return Err(Error::Config("Search limit must be at least 1.".to_string()));
        }

        let max_in_flight = self.max_in_flight.unwrap_or(DEFAULT_MAX_IN_FLIGHT);
        if max_in_flight == 0 {
            return Err(Error::Config(
                "Max in-flight searches must be at least 1.".to_string(),
            ));
        }

        Ok(CoreConfig {
            developer_token,
            storefront,
            search_limit,
            max_in_flight,
            source_kind: self.source_kind,
            http_client: self.http_client,
        })
    }
}
