//! Apple Music catalog search client.
//!
//! Builds one deterministic search request per missing-artwork entity,
//! decodes the nested response envelope, and resolves the templated artwork
//! URLs. The batch variant isolates per-item failures and bounds fan-out
//! with a semaphore instead of firing unbounded simultaneous requests.

use crate::error::{CatalogError, Result};
use crate::types::SearchResponse;
use bridge_http::{HttpClient, HttpRequest};
use bytes::Bytes;
use core_artwork::MissingArtwork;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Catalog API base URL.
const CATALOG_API_BASE: &str = "https://api.music.apple.com/v1/catalog";

/// Number of album results requested per search term.
const DEFAULT_SEARCH_LIMIT: u32 = 2;

/// Default cap on simultaneous in-flight catalog requests.
const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Timeout for API requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Apple Music catalog search endpoint.
///
/// Requests are authenticated with a bearer developer token supplied by the
/// host application; token minting is out of scope.
pub struct CatalogSearchClient {
    http_client: Arc<dyn HttpClient>,
    developer_token: String,
    storefront: String,
    search_limit: u32,
    max_in_flight: usize,
}

impl CatalogSearchClient {
    /// Creates a client for the `us` storefront with default limits.
    pub fn new(http_client: Arc<dyn HttpClient>, developer_token: impl Into<String>) -> Self {
        Self {
            http_client,
            developer_token: developer_token.into(),
            storefront: "us".to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }

    /// Overrides the catalog storefront (e.g. `"gb"`).
    pub fn with_storefront(mut self, storefront: impl Into<String>) -> Self {
        self.storefront = storefront.into();
        self
    }

    /// Overrides the per-term album result limit.
    pub fn with_search_limit(mut self, limit: u32) -> Self {
        self.search_limit = limit;
        self
    }

    /// Overrides the cap on simultaneous in-flight requests.
    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }

    /// Deterministic search URL for an entity's term.
    fn search_url(&self, term: &str) -> String {
        format!(
            "{}/{}/search?term={}&types=albums&limit={}",
            CATALOG_API_BASE,
            self.storefront,
            urlencoding::encode(term),
            self.search_limit
        )
    }

    /// Searches the catalog for one entity and returns fetchable artwork
    /// image URLs with their `{w}`/`{h}` placeholders resolved.
    ///
    /// Zero album hits is a successful response at the wire level but is
    /// surfaced as [`CatalogError::NoResults`]; callers decide whether and
    /// when to retry with a different term.
    pub async fn search_artwork_urls(&self, entity: &MissingArtwork) -> Result<Vec<String>> {
        let term = entity.search_term();
        let url = self.search_url(&term);

        debug!(%term, "Searching catalog for artwork");

        let request = HttpRequest::get(url)
            .bearer_token(&self.developer_token)
            .header("Accept", "application/json")
            .timeout(REQUEST_TIMEOUT);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| CatalogError::Network(format!("Catalog search failed: {}", e)))?;

        if !response.is_success() {
            return Err(CatalogError::Http {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        let envelope: SearchResponse = serde_json::from_slice(&response.body)
            .map_err(|e| CatalogError::Decode(format!("Failed to parse search results: {}", e)))?;

        let urls = envelope.image_urls();
        if urls.is_empty() {
            return Err(CatalogError::NoResults { term });
        }

        debug!(%term, count = urls.len(), "Catalog returned artwork candidates");
        Ok(urls)
    }

    /// Downloads one candidate image.
    pub async fn fetch_image(&self, url: &str) -> Result<Bytes> {
        debug!(%url, "Fetching candidate artwork image");

        let request = HttpRequest::get(url).timeout(REQUEST_TIMEOUT);
        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|e| CatalogError::Network(format!("Image fetch failed: {}", e)))?;

        if !response.is_success() {
            return Err(CatalogError::Http {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).to_string(),
            });
        }

        Ok(response.body)
    }

    /// Batch variant: one output entry per input entity, in input order.
    ///
    /// Any per-entity failure (network, decode, no results) is logged and
    /// mapped to an empty URL list for that entity instead of aborting the
    /// batch. Fan-out is bounded by the configured in-flight cap.
    pub async fn search_artwork_urls_batch(
        &self,
        entities: &[MissingArtwork],
    ) -> Vec<Vec<String>> {
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));

        let lookups = entities.iter().map(|entity| {
            let semaphore = Arc::clone(&semaphore);
            async move {
                let _permit = semaphore.acquire().await.unwrap();
                match self.search_artwork_urls(entity).await {
                    Ok(urls) => urls,
                    Err(e) => {
                        warn!(entity = %entity, error = %e, "Artwork URL lookup failed");
                        Vec::new()
                    }
                }
            }
        });

        futures::future::join_all(lookups).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_http::{HttpError, HttpResponse};
    use core_artwork::AvailabilityCategory;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const ENVELOPE: &str = r#"{
        "results": {
            "albums": {
                "data": [
                    {
                        "attributes": {
                            "artwork": {
                                "width": 600,
                                "height": 600,
                                "url": "https://img.example.com/{w}x{h}.jpg"
                            }
                        }
                    }
                ]
            }
        }
    }"#;

    /// Mock HTTP client that records requests and answers per-URL.
    struct RecordingClient {
        requests: Mutex<Vec<HttpRequest>>,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
        respond: Box<dyn Fn(&HttpRequest) -> bridge_http::Result<HttpResponse> + Send + Sync>,
    }

    impl RecordingClient {
        fn new(
            respond: impl Fn(&HttpRequest) -> bridge_http::Result<HttpResponse>
                + Send
                + Sync
                + 'static,
        ) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                in_flight: AtomicUsize::new(0),
                peak_in_flight: AtomicUsize::new(0),
                respond: Box::new(respond),
            }
        }
    }

    #[async_trait]
    impl HttpClient for RecordingClient {
        async fn execute(&self, request: HttpRequest) -> bridge_http::Result<HttpResponse> {
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(current, Ordering::SeqCst);
            tokio::task::yield_now().await;
            let result = (self.respond)(&request);
            self.requests.lock().unwrap().push(request);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    fn ok_json(body: &str) -> bridge_http::Result<HttpResponse> {
        Ok(HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from(body.to_string()),
        })
    }

    fn entity(artist: &str, album: &str) -> MissingArtwork {
        MissingArtwork::ArtistAlbum {
            artist: artist.to_string(),
            album: album.to_string(),
            availability: AvailabilityCategory::None,
        }
    }

    #[tokio::test]
    async fn search_builds_deterministic_authenticated_request() {
        let http = Arc::new(RecordingClient::new(|_| ok_json(ENVELOPE)));
        let client = CatalogSearchClient::new(http.clone(), "dev-token");

        let urls = client
            .search_artwork_urls(&entity("Daft Punk", "Discovery"))
            .await
            .unwrap();
        assert_eq!(urls, vec!["https://img.example.com/600x600.jpg"]);

        let requests = http.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].url,
            "https://api.music.apple.com/v1/catalog/us/search?term=Daft%20Punk%20Discovery&types=albums&limit=2"
        );
        assert_eq!(
            requests[0].headers.get("Authorization"),
            Some(&"Bearer dev-token".to_string())
        );
    }

    #[tokio::test]
    async fn compilation_term_is_album_title_alone() {
        let http = Arc::new(RecordingClient::new(|_| ok_json(ENVELOPE)));
        let client = CatalogSearchClient::new(http.clone(), "t");

        let compilation = MissingArtwork::CompilationAlbum {
            album: "Pure Moods".to_string(),
            availability: AvailabilityCategory::None,
        };
        client.search_artwork_urls(&compilation).await.unwrap();

        let requests = http.requests.lock().unwrap();
        assert!(requests[0].url.contains("term=Pure%20Moods&"));
    }

    #[tokio::test]
    async fn zero_results_surface_as_no_results_error() {
        let http = Arc::new(RecordingClient::new(|_| ok_json(r#"{"results":{}}"#)));
        let client = CatalogSearchClient::new(http, "t");

        let err = client
            .search_artwork_urls(&entity("A", "B"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::NoResults {
                term: "A B".to_string()
            }
        );
    }

    #[tokio::test]
    async fn http_failures_map_to_structured_errors() {
        let http = Arc::new(RecordingClient::new(|_| {
            Ok(HttpResponse {
                status: 401,
                headers: HashMap::new(),
                body: Bytes::from("unauthorized"),
            })
        }));
        let client = CatalogSearchClient::new(http, "t");
        let err = client
            .search_artwork_urls(&entity("A", "B"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::Http {
                status: 401,
                body: "unauthorized".to_string()
            }
        );

        let http = Arc::new(RecordingClient::new(|_| {
            Err(HttpError::Timeout("deadline".to_string()))
        }));
        let client = CatalogSearchClient::new(http, "t");
        let err = client
            .search_artwork_urls(&entity("A", "B"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Network(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let http = Arc::new(RecordingClient::new(|_| ok_json("not json")));
        let client = CatalogSearchClient::new(http, "t");
        let err = client
            .search_artwork_urls(&entity("A", "B"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn batch_returns_one_entry_per_input_with_failure_isolation() {
        // The middle entity's term hits a failing response; the batch still
        // yields exactly one entry per input, in order.
        let http = Arc::new(RecordingClient::new(|request| {
            if request.url.contains("Broken") {
                Err(HttpError::Connect("refused".to_string()))
            } else {
                ok_json(ENVELOPE)
            }
        }));
        let client = CatalogSearchClient::new(http, "t");

        let entities = vec![
            entity("A", "First"),
            entity("B", "Broken"),
            entity("C", "Third"),
        ];
        let results = client.search_artwork_urls_batch(&entities).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], vec!["https://img.example.com/600x600.jpg"]);
        assert!(results[1].is_empty());
        assert_eq!(results[2], vec!["https://img.example.com/600x600.jpg"]);
    }

    #[tokio::test]
    async fn batch_fan_out_is_bounded_by_in_flight_cap() {
        let http = Arc::new(RecordingClient::new(|_| ok_json(ENVELOPE)));
        let client = CatalogSearchClient::new(http.clone(), "t").with_max_in_flight(2);

        let entities: Vec<MissingArtwork> = (0..8)
            .map(|i| entity("Artist", &format!("Album {}", i)))
            .collect();
        let results = client.search_artwork_urls_batch(&entities).await;

        assert_eq!(results.len(), 8);
        assert!(http.peak_in_flight.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn fetch_image_returns_body_bytes() {
        let http = Arc::new(RecordingClient::new(|_| {
            Ok(HttpResponse {
                status: 200,
                headers: HashMap::new(),
                body: Bytes::from_static(&[0xFF, 0xD8, 0xFF]),
            })
        }));
        let client = CatalogSearchClient::new(http, "t");
        let bytes = client
            .fetch_image("https://img.example.com/600x600.jpg")
            .await
            .unwrap();
        assert_eq!(bytes.as_ref(), &[0xFF, 0xD8, 0xFF]);
    }
}
