use crate::models::{Bounds, GeoPoint};
use geo::{BoundingRect, MultiPoint, Point};

/// Earth's radius in miles
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Meters per statute mile, for sizing the radius overlay
pub const METERS_PER_MILE: f64 = 1609.34;

/// Calculate the Haversine distance between two points in miles
///
/// # Arguments
/// * `lat1` - Latitude of first point in degrees
/// * `lon1` - Longitude of first point in degrees
/// * `lat2` - Latitude of second point in degrees
/// * `lon2` - Longitude of second point in degrees
///
/// # Returns
/// Distance in miles
#[inline]
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Haversine distance between two points, in miles
#[inline]
pub fn distance_between(a: &GeoPoint, b: &GeoPoint) -> f64 {
    haversine_distance(a.lat, a.lng, b.lat, b.lng)
}

#[inline]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

/// Smallest box containing every point, or `None` for an empty set
pub fn bounds_of<'a, I>(points: I) -> Option<Bounds>
where
    I: IntoIterator<Item = &'a GeoPoint>,
{
    let multi: MultiPoint<f64> = points
        .into_iter()
        .map(|p| Point::new(p.lng, p.lat))
        .collect::<Vec<_>>()
        .into();

    multi.bounding_rect().map(|rect| Bounds {
        south: rect.min().y,
        west: rect.min().x,
        north: rect.max().y,
        east: rect.max().x,
    })
}
