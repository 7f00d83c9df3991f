// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Bounds, FilterCriteria, FilteredResult, GeoPoint, Provider, RadiusFilter};
pub use requests::SearchRequest;
pub use responses::{ErrorResponse, FacetsResponse, FocusResponse, HealthResponse, ProviderSummary, SearchResponse};
