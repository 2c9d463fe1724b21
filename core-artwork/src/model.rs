//! Domain model for albums with missing cover artwork.
//!
//! A [`MissingArtwork`] entity identifies one album (plain or compilation)
//! known to have at least one track without cover art. Identity is the tag
//! plus the string fields only; the availability classification is computed
//! after grouping and deliberately excluded from equality and hashing, so an
//! entity keeps its key while its availability is refined.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// How completely an album's artwork is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityCategory {
    /// Some tracks have artwork, some don't.
    Partial,
    /// No track in the album has artwork.
    None,
    /// Track count could not be determined, so completeness cannot be judged.
    Unknown,
}

impl fmt::Display for AvailabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AvailabilityCategory::Partial => "partial",
            AvailabilityCategory::None => "none",
            AvailabilityCategory::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// One album known to be missing cover artwork.
///
/// Compilations group by album title alone; every other album groups by
/// artist and title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingArtwork {
    /// A regular album attributed to a single artist.
    ArtistAlbum {
        artist: String,
        album: String,
        availability: AvailabilityCategory,
    },
    /// A compilation, grouped by title regardless of per-track artists.
    CompilationAlbum {
        album: String,
        availability: AvailabilityCategory,
    },
}

impl MissingArtwork {
    /// The computed availability classification.
    pub fn availability(&self) -> AvailabilityCategory {
        match self {
            MissingArtwork::ArtistAlbum { availability, .. } => *availability,
            MissingArtwork::CompilationAlbum { availability, .. } => *availability,
        }
    }

    /// Returns the same entity with its availability replaced.
    ///
    /// Availability is not part of identity, so the result keys identically
    /// to `self` in any map or set.
    pub fn with_availability(self, availability: AvailabilityCategory) -> Self {
        match self {
            MissingArtwork::ArtistAlbum { artist, album, .. } => MissingArtwork::ArtistAlbum {
                artist,
                album,
                availability,
            },
            MissingArtwork::CompilationAlbum { album, .. } => MissingArtwork::CompilationAlbum {
                album,
                availability,
            },
        }
    }

    /// Display-ready textual representation: `"artist: album"` or `"album"`.
    ///
    /// This string also defines the total order used for deterministic
    /// sorting.
    pub fn description(&self) -> String {
        match self {
            MissingArtwork::ArtistAlbum { artist, album, .. } => {
                format!("{}: {}", artist, album)
            }
            MissingArtwork::CompilationAlbum { album, .. } => album.clone(),
        }
    }

    /// Plain-text catalog search term: `"artist album"` or `"album"`.
    pub fn search_term(&self) -> String {
        match self {
            MissingArtwork::ArtistAlbum { artist, album, .. } => {
                format!("{} {}", artist, album)
            }
            MissingArtwork::CompilationAlbum { album, .. } => album.clone(),
        }
    }

    pub fn is_compilation(&self) -> bool {
        matches!(self, MissingArtwork::CompilationAlbum { .. })
    }

    /// Discriminant used for hashing and as an ordering tiebreaker.
    fn tag(&self) -> u8 {
        match self {
            MissingArtwork::ArtistAlbum { .. } => 0,
            MissingArtwork::CompilationAlbum { .. } => 1,
        }
    }
}

impl fmt::Display for MissingArtwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// Identity: tag + string fields. Availability is excluded so that the
// placeholder entity created during grouping and the classified entity
// emitted afterwards are the same logical key.
impl PartialEq for MissingArtwork {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                MissingArtwork::ArtistAlbum { artist: a1, album: b1, .. },
                MissingArtwork::ArtistAlbum { artist: a2, album: b2, .. },
            ) => a1 == a2 && b1 == b2,
            (
                MissingArtwork::CompilationAlbum { album: b1, .. },
                MissingArtwork::CompilationAlbum { album: b2, .. },
            ) => b1 == b2,
            _ => false,
        }
    }
}

impl Eq for MissingArtwork {}

impl Hash for MissingArtwork {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
        match self {
            MissingArtwork::ArtistAlbum { artist, album, .. } => {
                artist.hash(state);
                album.hash(state);
            }
            MissingArtwork::CompilationAlbum { album, .. } => {
                album.hash(state);
            }
        }
    }
}

// Total order over the textual representation, not tag-then-field order.
// Tag and fields break ties only when two distinct entities render to the
// same text, keeping the order total and consistent with identity.
impl Ord for MissingArtwork {
    fn cmp(&self, other: &Self) -> Ordering {
        self.description()
            .cmp(&other.description())
            .then_with(|| self.tag().cmp(&other.tag()))
            .then_with(|| match (self, other) {
                (
                    MissingArtwork::ArtistAlbum { artist: a1, album: b1, .. },
                    MissingArtwork::ArtistAlbum { artist: a2, album: b2, .. },
                ) => a1.cmp(a2).then_with(|| b1.cmp(b2)),
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for MissingArtwork {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
