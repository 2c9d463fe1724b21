//! # Apple Music Catalog Provider
//!
//! Searches the Apple Music catalog for candidate album artwork.
//!
//! ## API Endpoint
//!
//! - **Search**: `https://api.music.apple.com/v1/catalog/{storefront}/search`
//!   with `term`, `types=albums`, and `limit` query parameters, authenticated
//!   with a bearer developer token.
//!
//! Artwork URLs in the response carry literal `{w}` and `{h}` placeholder
//! tokens that are substituted with the artwork's pixel dimensions to form a
//! fetchable image URL.

pub mod client;
pub mod error;
pub mod types;

pub use client::CatalogSearchClient;
pub use error::{CatalogError, Result};
