//! Media library source capability.
//!
//! Two concrete backends exist outside this workspace (a streaming-service
//! library and a legacy desktop media library); both are interchangeable
//! behind this one trait, selected via [`SourceKind`] at composition time
//! rather than special-cased at call sites.

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use core_artwork::{MissingArtwork, TrackRecord};
use serde::{Deserialize, Serialize};

/// Which library backend to bind at composition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Streaming-service library.
    #[default]
    Streaming,
    /// Legacy desktop media library.
    LegacyDesktop,
}

/// Capability interface over a media library.
#[async_trait]
pub trait MediaLibrarySource: Send + Sync {
    /// Enumerates the raw track records of the whole library.
    ///
    /// A failure here is fatal to the aggregation pass and surfaced once.
    async fn track_records(&self) -> Result<Vec<TrackRecord>>;

    /// Returns the raw image bytes of a library track whose album already
    /// carries artwork and matches the given entity's identity.
    ///
    /// Returns [`FetchError::NoMatch`](crate::FetchError::NoMatch) when no
    /// such track exists.
    async fn matching_image(&self, entity: &MissingArtwork) -> Result<Bytes>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_default_and_serde_names() {
        assert_eq!(SourceKind::default(), SourceKind::Streaming);
        assert_eq!(
            serde_json::to_string(&SourceKind::LegacyDesktop).unwrap(),
            r#""legacy_desktop""#
        );
        let parsed: SourceKind = serde_json::from_str(r#""streaming""#).unwrap();
        assert_eq!(parsed, SourceKind::Streaming);
    }
}
