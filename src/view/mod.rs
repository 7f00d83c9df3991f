// Map overlay and session state
pub mod overlay;
pub mod sync;

pub use overlay::{MapState, MapSurface, Marker, MarkerKey, MarkerStyle, RadiusOverlay};
pub use sync::{criteria_for, resolve_origin, DirectorySession, MarkerStats, OriginLookup, SearchOutcome, ViewOptions};
