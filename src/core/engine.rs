use crate::models::{FilterCriteria, FilteredResult, Provider};
use crate::core::filters::{
    matches_accepting, matches_gender, matches_name, matches_radius, matches_specialty,
};
use std::sync::Arc;

/// Evaluates search criteria against the provider set
///
/// # Predicates
/// 1. Name substring (first or last name, case-insensitive)
/// 2. Specialty membership
/// 3. Gender
/// 4. Accepting new patients
/// 5. Radius around a resolved origin
///
/// A record is kept only if it passes every active predicate. The result
/// keeps source order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Select the records that pass every active predicate
    pub fn apply(&self, records: &[Arc<Provider>], criteria: &FilterCriteria) -> FilteredResult {
        let name_query = criteria.normalized_name();

        let providers: Vec<Arc<Provider>> = records
            .iter()
            .filter(|p| name_query.as_deref().map_or(true, |q| matches_name(p, q)))
            .filter(|p| matches_specialty(p, &criteria.specialties))
            .filter(|p| matches_gender(p, &criteria.gender))
            .filter(|p| matches_accepting(p, criteria.accepting_only))
            // Radius last: it is the only predicate doing trigonometry
            .filter(|p| criteria.radius.as_ref().map_or(true, |r| matches_radius(p, r)))
            .cloned()
            .collect();

        tracing::debug!(
            "Filtered {} of {} providers (radius active: {})",
            providers.len(),
            records.len(),
            criteria.radius.is_some()
        );

        FilteredResult { providers }
    }
}
