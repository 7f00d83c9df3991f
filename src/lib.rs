//! Provider Directory - searchable directory of healthcare providers
//!
//! This library parses tabular provider data and filters it by name,
//! specialty, gender, accepting-new-patients status and distance from a
//! geocoded postal code, keeping a map-marker overlay in step with the results.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;
pub mod view;

// Re-export commonly used types
pub use crate::core::{FilterEngine, RecordStore, ParseError, haversine_distance, parse_providers};
pub use models::{FilterCriteria, FilteredResult, GeoPoint, Provider, SearchRequest};
pub use services::{AddressResolver, GeocodingClient, ResolveError};
pub use view::{DirectorySession, MapState, ViewOptions};
