use crate::models::{Bounds, GeoPoint, Provider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Marker colour class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    Accepting,
    NotAccepting,
}

/// Identity of the record a marker was placed for
///
/// Ids are not unique keys (short rows all carry an empty id), so markers are
/// tracked by the shared record they point at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MarkerKey(usize);

impl MarkerKey {
    pub fn of(provider: &Arc<Provider>) -> Self {
        Self(Arc::as_ptr(provider) as usize)
    }
}

/// A map pin for one provider
///
/// Refers back to its provider by id only; the record itself stays in the
/// store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(skip)]
    pub key: MarkerKey,
    #[serde(rename = "providerId")]
    pub provider_id: String,
    pub position: GeoPoint,
    pub title: String,
    pub style: MarkerStyle,
}

impl Marker {
    /// Marker for a provider, or `None` if it has no coordinates
    pub fn for_provider(provider: &Arc<Provider>) -> Option<Self> {
        let position = provider.coordinates?;
        Some(Self {
            key: MarkerKey::of(provider),
            provider_id: provider.id.clone(),
            position,
            title: provider.full_name(),
            style: if provider.accepting_new_patients {
                MarkerStyle::Accepting
            } else {
                MarkerStyle::NotAccepting
            },
        })
    }

    pub fn is_accepting(&self) -> bool {
        self.style == MarkerStyle::Accepting
    }
}

/// Circle drawn around a radius search origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusOverlay {
    pub center: GeoPoint,
    #[serde(rename = "radiusMiles")]
    pub radius_miles: f64,
    #[serde(rename = "radiusMeters")]
    pub radius_meters: f64,
}

/// Operations the map widget exposes to the session
pub trait MapSurface {
    fn add_marker(&mut self, marker: Marker);
    fn remove_marker(&mut self, key: MarkerKey);
    fn fit_bounds(&mut self, bounds: Bounds);
    fn set_view(&mut self, center: GeoPoint, zoom: u8);
    fn show_radius(&mut self, overlay: RadiusOverlay);
    fn clear_radius(&mut self);
}

/// Snapshot of what the map is displaying
///
/// Serves as the in-process map surface; the HTTP layer hands it to the page
/// which mirrors it onto the real widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapState {
    pub center: GeoPoint,
    pub zoom: u8,
    pub bounds: Option<Bounds>,
    pub markers: Vec<Marker>,
    pub radius: Option<RadiusOverlay>,
}

impl MapState {
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            bounds: None,
            markers: Vec::new(),
            radius: None,
        }
    }

    pub fn marker(&self, provider_id: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.provider_id == provider_id)
    }
}

impl MapSurface for MapState {
    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn remove_marker(&mut self, key: MarkerKey) {
        if let Some(idx) = self.markers.iter().position(|m| m.key == key) {
            self.markers.remove(idx);
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds) {
        self.center = GeoPoint::new(
            (bounds.south + bounds.north) / 2.0,
            (bounds.west + bounds.east) / 2.0,
        );
        self.bounds = Some(bounds);
    }

    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
        self.bounds = None;
    }

    fn show_radius(&mut self, overlay: RadiusOverlay) {
        self.radius = Some(overlay);
    }

    fn clear_radius(&mut self) {
        self.radius = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_provider(id: &str, lat: f64, lng: f64) -> Arc<Provider> {
        Arc::new(Provider {
            id: id.to_string(),
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            degree: "MD".to_string(),
            specialty: "Pediatrics".to_string(),
            gender: "Female".to_string(),
            practice_name: "Bayside Pediatrics".to_string(),
            address_line1: "120 Dudley St".to_string(),
            address_line2: None,
            city: "Providence".to_string(),
            zip: "02905".to_string(),
            phone: "401-555-0101".to_string(),
            coordinates: Some(GeoPoint::new(lat, lng)),
            accepting_new_patients: true,
        })
    }

    #[test]
    fn test_map_state_markers() {
        let mut map = MapState::new(GeoPoint::new(41.7, -71.5), 9);
        let ann = create_provider("1", 41.8, -71.4);
        let marker = Marker::for_provider(&ann).unwrap();
        assert_eq!(marker.title, "Ann Lee");
        assert!(marker.is_accepting());

        map.add_marker(marker);
        assert!(map.marker("1").is_some());

        map.remove_marker(MarkerKey::of(&ann));
        assert!(map.markers.is_empty());
    }

    #[test]
    fn test_remove_marker_only_drops_its_record() {
        let mut map = MapState::new(GeoPoint::new(41.7, -71.5), 9);
        let first = create_provider("", 41.8, -71.4);
        let second = create_provider("", 41.0, -71.0);
        map.add_marker(Marker::for_provider(&first).unwrap());
        map.add_marker(Marker::for_provider(&second).unwrap());

        map.remove_marker(MarkerKey::of(&first));

        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.markers[0].position, GeoPoint::new(41.0, -71.0));
    }

    #[test]
    fn test_fit_bounds_recenters() {
        let mut map = MapState::new(GeoPoint::new(41.7, -71.5), 9);
        map.fit_bounds(Bounds {
            south: 41.0,
            west: -72.0,
            north: 42.0,
            east: -71.0,
        });

        assert_eq!(map.center, GeoPoint::new(41.5, -71.5));
        assert!(map.bounds.is_some());

        map.set_view(GeoPoint::new(41.7, -71.5), 11);
        assert!(map.bounds.is_none());
        assert_eq!(map.zoom, 11);
    }
}
