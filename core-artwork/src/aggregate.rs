//! Aggregation of raw track records into missing-artwork entities.
//!
//! The aggregator is a pure, synchronous pass over a flat track list. Per
//! grouping key it keeps one deficit counter per disc: the counter starts at
//! `track_count - 1` when a key/disc pair is first seen (or at the `-1`
//! sentinel when the track count is unknown) and is decremented for every
//! further missing-artwork track on that disc. The counter therefore encodes
//! "how many tracks are not yet accounted for as missing": a sum of zero
//! across discs means the whole disc set is missing artwork, a negative sum
//! means the data cannot be trusted, and a positive sum means some tracks
//! already have artwork.

use crate::model::{AvailabilityCategory, MissingArtwork};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Counter value marking a disc whose track count is unknown.
const UNKNOWN_TRACK_COUNT: i64 = -1;

/// One raw track record as handed over by a media library source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub artist_name: String,
    pub album_title: String,
    pub is_compilation: bool,
    pub has_artwork: bool,
    pub disc_number: i64,
    pub disc_count: i64,
    pub track_count: i64,
}

impl TrackRecord {
    /// Grouping key for this track. Availability starts as a placeholder;
    /// the classification pass replaces it and identity is unaffected.
    fn grouping_key(&self) -> MissingArtwork {
        if self.is_compilation {
            MissingArtwork::CompilationAlbum {
                album: self.album_title.clone(),
                availability: AvailabilityCategory::Unknown,
            }
        } else {
            MissingArtwork::ArtistAlbum {
                artist: self.artist_name.clone(),
                album: self.album_title.clone(),
                availability: AvailabilityCategory::Unknown,
            }
        }
    }
}

/// Aggregates track records into a deduplicated set of missing-artwork
/// entities with their availability classified.
///
/// Tracks that already have artwork never contribute. Multi-disc albums
/// accumulate one counter per disc, summed at classification time. A track
/// count of exactly 0 is the explicit "unknown" sentinel, never an empty
/// album. Output order is unspecified; callers sort explicitly.
pub fn gather_missing_artwork(tracks: &[TrackRecord]) -> Vec<MissingArtwork> {
    // key -> disc number -> deficit counter
    let mut deficits: HashMap<MissingArtwork, HashMap<i64, i64>> = HashMap::new();

    for track in tracks {
        if track.has_artwork {
            continue;
        }

        let key = track.grouping_key();
        let discs = deficits.entry(key).or_default();

        match discs.get_mut(&track.disc_number) {
            Some(counter) => {
                *counter -= 1;
            }
            None => {
                let initial = if track.track_count > 0 {
                    track.track_count - 1
                } else {
                    UNKNOWN_TRACK_COUNT
                };
                discs.insert(track.disc_number, initial);
            }
        }
    }

    let entities: Vec<MissingArtwork> = deficits
        .into_iter()
        .map(|(key, discs)| {
            let remaining: i64 = discs.values().sum();
            let availability = if remaining < 0 {
                AvailabilityCategory::Unknown
            } else if remaining == 0 {
                AvailabilityCategory::None
            } else {
                AvailabilityCategory::Partial
            };
            key.with_availability(availability)
        })
        .collect();

    debug!(count = entities.len(), "Aggregated missing-artwork entities");
    entities
}
