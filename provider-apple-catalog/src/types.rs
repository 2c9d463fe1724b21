//! Wire types for the catalog search response envelope.
//!
//! Shape: `results.albums.data[].attributes.artwork.{width,height,url}`.
//! Absent layers decode as empty rather than failing, since a search with no
//! album hits omits the `albums` object entirely.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: SearchResults,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SearchResults {
    #[serde(default)]
    pub albums: Option<AlbumPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumPage {
    #[serde(default)]
    pub data: Vec<AlbumEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumEntry {
    #[serde(default)]
    pub attributes: Option<AlbumAttributes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumAttributes {
    #[serde(default)]
    pub artwork: Option<ArtworkDescriptor>,
}

/// Artwork descriptor with a templated URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtworkDescriptor {
    pub width: u32,
    pub height: u32,
    pub url: String,
}

impl ArtworkDescriptor {
    /// Substitutes the `{w}` and `{h}` placeholder tokens exactly once each
    /// with the numeric width and height.
    pub fn image_url(&self) -> String {
        self.url
            .replacen("{w}", &self.width.to_string(), 1)
            .replacen("{h}", &self.height.to_string(), 1)
    }
}

impl SearchResponse {
    /// Flattens the envelope into fetchable image URLs, skipping entries
    /// without artwork attributes.
    pub fn image_urls(&self) -> Vec<String> {
        self.results
            .albums
            .as_ref()
            .map(|page| {
                page.data
                    .iter()
                    .filter_map(|entry| entry.attributes.as_ref())
                    .filter_map(|attrs| attrs.artwork.as_ref())
                    .map(ArtworkDescriptor::image_url)
                    .collect()
            })
            .unwrap_or_default()
    }
}
