//! Filtering and sorting of missing-artwork collections for display.
//!
//! All three filters are independent predicates and commute; the sort over
//! the textual total order is applied last, always.

use crate::model::{AvailabilityCategory, MissingArtwork};
use serde::{Deserialize, Serialize};

/// Restricts results by entity category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Artist albums only.
    Albums,
    /// Compilations only.
    Compilations,
}

impl CategoryFilter {
    fn matches(&self, entity: &MissingArtwork) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Albums => !entity.is_compilation(),
            CategoryFilter::Compilations => entity.is_compilation(),
        }
    }
}

/// Restricts results by availability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AvailabilityFilter {
    #[default]
    All,
    None,
    Partial,
    Unknown,
}

impl AvailabilityFilter {
    fn matches(&self, entity: &MissingArtwork) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::None => entity.availability() == AvailabilityCategory::None,
            AvailabilityFilter::Partial => entity.availability() == AvailabilityCategory::Partial,
            AvailabilityFilter::Unknown => entity.availability() == AvailabilityCategory::Unknown,
        }
    }
}

/// Sort direction over the textual total order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Filter options for querying missing-artwork entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterCriteria {
    pub category: CategoryFilter,
    pub availability: AvailabilityFilter,
    /// Case-insensitive substring match against the textual representation.
    /// Empty matches everything.
    pub search: String,
    pub sort: SortOrder,
}

impl FilterCriteria {
    fn search_matches(&self, entity: &MissingArtwork) -> bool {
        if self.search.is_empty() {
            return true;
        }
        entity
            .description()
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }
}

/// Applies the category, availability, and search predicates, then sorts.
pub fn filter_and_sort(
    entities: &[MissingArtwork],
    criteria: &FilterCriteria,
) -> Vec<MissingArtwork> {
    let mut result: Vec<MissingArtwork> = entities
        .iter()
        .filter(|e| criteria.category.matches(e))
        .filter(|e| criteria.availability.matches(e))
        .filter(|e| criteria.search_matches(e))
        .cloned()
        .collect();

    result.sort();
    if criteria.sort == SortOrder::Descending {
        result.reverse();
    }
    result
}
