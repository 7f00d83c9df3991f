use crate::models::Provider;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Full provider set plus the derived specialty facet
///
/// Read-only between loads. Records are handed out as shared handles so
/// filtered results and markers can refer to them without copying.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    providers: Vec<Arc<Provider>>,
    by_id: HashMap<String, usize>,
    specialties: Vec<String>,
}

impl RecordStore {
    pub fn new(providers: Vec<Provider>) -> Self {
        let mut store = Self::default();
        store.load(providers);
        store
    }

    /// Replace the active set and recompute the facet
    pub fn load(&mut self, providers: Vec<Provider>) {
        self.providers = providers.into_iter().map(Arc::new).collect();

        // First occurrence wins if an id repeats
        self.by_id = HashMap::with_capacity(self.providers.len());
        for (idx, provider) in self.providers.iter().enumerate() {
            self.by_id.entry(provider.id.clone()).or_insert(idx);
        }

        // BTreeSet<String> orders by bytes, i.e. case-sensitive ordinal order
        self.specialties = self
            .providers
            .iter()
            .map(|p| p.specialty.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        tracing::info!(
            "Loaded {} providers ({} specialties)",
            self.providers.len(),
            self.specialties.len()
        );
    }

    /// Every record in source order
    pub fn all(&self) -> &[Arc<Provider>] {
        &self.providers
    }

    /// Distinct specialties, sorted
    pub fn facet_specialties(&self) -> &[String] {
        &self.specialties
    }

    /// Reverse lookup by provider id
    pub fn get(&self, id: &str) -> Option<&Arc<Provider>> {
        self.by_id.get(id).map(|&idx| &self.providers[idx])
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(id: &str, specialty: &str) -> Provider {
        Provider {
            id: id.to_string(),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            degree: "MD".to_string(),
            specialty: specialty.to_string(),
            gender: "Female".to_string(),
            practice_name: "Practice".to_string(),
            address_line1: "1 Main St".to_string(),
            address_line2: None,
            city: "Providence".to_string(),
            zip: "02903".to_string(),
            phone: "401-555-0100".to_string(),
            coordinates: None,
            accepting_new_patients: false,
        }
    }

    #[test]
    fn test_facet_dedup_sorted() {
        let store = RecordStore::new(vec![
            provider("1", "Cardiology"),
            provider("2", "Pediatrics"),
            provider("3", "Cardiology"),
        ]);

        assert_eq!(store.facet_specialties(), ["Cardiology", "Pediatrics"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_facet_case_sensitive_ordinal() {
        let store = RecordStore::new(vec![
            provider("1", "neurology"),
            provider("2", "Urology"),
            provider("3", "Allergy"),
        ]);

        assert_eq!(store.facet_specialties(), ["Allergy", "Urology", "neurology"]);
    }

    #[test]
    fn test_load_replaces_set() {
        let mut store = RecordStore::new(vec![provider("1", "Cardiology")]);
        store.load(vec![provider("9", "Dermatology"), provider("8", "Oncology")]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.facet_specialties(), ["Dermatology", "Oncology"]);
        assert!(store.get("1").is_none());
        assert_eq!(store.get("8").map(|p| p.specialty.as_str()), Some("Oncology"));
    }

    #[test]
    fn test_all_preserves_source_order() {
        let store = RecordStore::new(vec![
            provider("b", "X"),
            provider("a", "X"),
            provider("c", "X"),
        ]);

        let ids: Vec<&str> = store.all().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
