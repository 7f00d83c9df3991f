use crate::models::{Provider, RadiusFilter};
use std::collections::HashSet;

/// Name predicate. `query` must already be trimmed and lowercased.
#[inline]
pub fn matches_name(provider: &Provider, query: &str) -> bool {
    provider.first_name.to_lowercase().contains(query)
        || provider.last_name.to_lowercase().contains(query)
}

/// Specialty predicate. An empty selection means no constraint.
#[inline]
pub fn matches_specialty(provider: &Provider, selected: &HashSet<String>) -> bool {
    selected.is_empty() || selected.contains(&provider.specialty)
}

/// Gender predicate. An empty value means no constraint.
#[inline]
pub fn matches_gender(provider: &Provider, gender: &str) -> bool {
    gender.is_empty() || provider.gender == gender
}

#[inline]
pub fn matches_accepting(provider: &Provider, accepting_only: bool) -> bool {
    !accepting_only || provider.accepting_new_patients
}

/// Radius predicate
///
/// A provider without coordinates never passes. The boundary is inclusive.
#[inline]
pub fn matches_radius(provider: &Provider, radius: &RadiusFilter) -> bool {
    match &provider.coordinates {
        Some(point) => super::distance::distance_between(&radius.origin, point) <= radius.radius_miles,
        None => false,
    }
}
