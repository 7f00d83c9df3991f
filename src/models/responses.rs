use serde::{Deserialize, Serialize};
use crate::models::domain::{GeoPoint, Provider};
use crate::view::{MapState, MarkerStats};

/// Provider details shown in the result list and the marker info panel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSummary {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub specialty: String,
    pub gender: String,
    pub practice: String,
    pub address: String,
    pub locality: String,
    pub phone: String,
    #[serde(rename = "acceptingNewPatients")]
    pub accepting_new_patients: bool,
    pub position: Option<GeoPoint>,
}

impl ProviderSummary {
    pub fn from_provider(provider: &Provider, region_code: &str) -> Self {
        Self {
            id: provider.id.clone(),
            display_name: provider.display_name(),
            specialty: provider.specialty.clone(),
            gender: provider.gender.clone(),
            practice: provider.practice_name.clone(),
            address: provider.street_address(),
            locality: provider.locality(region_code),
            phone: provider.phone.clone(),
            accepting_new_patients: provider.accepting_new_patients,
            position: provider.coordinates,
        }
    }
}

/// Response for search and clear endpoints
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    #[serde(rename = "countLabel")]
    pub count_label: String,
    pub providers: Vec<ProviderSummary>,
    pub map: MapState,
    pub stats: MarkerStats,
    pub notice: Option<String>,
}

/// Response for the marker focus endpoint
#[derive(Debug, Clone, Serialize)]
pub struct FocusResponse {
    pub provider: ProviderSummary,
    pub map: MapState,
}

/// Specialty facet values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetsResponse {
    pub specialties: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub providers: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
