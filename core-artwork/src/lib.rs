//! # Artwork Gap Domain Module
//!
//! Owns the domain model for albums with missing cover artwork and the pure
//! logic that operates on it.
//!
//! ## Overview
//!
//! This module handles:
//! - The `MissingArtwork` entity and its availability classification
//! - Aggregating a flat stream of track records into deduplicated
//!   album-level entities (`gather_missing_artwork`)
//! - Filtering and sorting entity collections for display

pub mod aggregate;
pub mod filter;
pub mod model;

pub use aggregate::{gather_missing_artwork, TrackRecord};
pub use filter::{filter_and_sort, AvailabilityFilter, CategoryFilter, FilterCriteria, SortOrder};
pub use model::{AvailabilityCategory, MissingArtwork};
