// Service exports
pub mod geocoder;

pub use geocoder::{AddressResolver, GeocodingClient, ResolveError};
