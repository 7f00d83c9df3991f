// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod filters;
pub mod parser;
pub mod store;

pub use distance::{bounds_of, distance_between, haversine_distance, miles_to_meters};
pub use engine::FilterEngine;
pub use filters::{matches_accepting, matches_gender, matches_name, matches_radius, matches_specialty};
pub use parser::{parse_line, parse_providers, parse_rows, ParseError, Row};
pub use store::RecordStore;
