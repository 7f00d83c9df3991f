use crate::core::{bounds_of, miles_to_meters, FilterEngine, RecordStore};
use crate::models::{FilterCriteria, FilteredResult, GeoPoint, Provider, SearchRequest};
use crate::services::{AddressResolver, ResolveError};
use crate::view::overlay::{MapSurface, Marker, MarkerKey, RadiusOverlay};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

/// Map behaviour for a session
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub default_center: GeoPoint,
    pub default_zoom: u8,
    pub search_zoom: u8,
    pub focus_zoom: u8,
    /// Short region code printed in addresses, e.g. "RI"
    pub region_code: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            default_center: GeoPoint::new(41.7, -71.5),
            default_zoom: 9,
            search_zoom: 11,
            focus_zoom: 15,
            region_code: "RI".to_string(),
        }
    }
}

/// Counts shown next to the map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MarkerStats {
    pub markers: usize,
    pub accepting: usize,
}

/// Outcome of the postal code lookup that precedes a search
#[derive(Debug, Clone)]
pub enum OriginLookup {
    NotRequested,
    Resolved(GeoPoint),
    Failed { postal_code: String, error: ResolveError },
}

impl OriginLookup {
    pub fn point(&self) -> Option<GeoPoint> {
        match self {
            OriginLookup::Resolved(point) => Some(*point),
            _ => None,
        }
    }
}

/// Result of a search or clear, handed back to the caller for rendering
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: FilteredResult,
    pub stats: MarkerStats,
    pub notice: Option<String>,
}

/// Resolve the request's postal code, if it has one
///
/// Runs before the session is touched so a slow lookup never holds it.
pub async fn resolve_origin<R: AddressResolver>(request: &SearchRequest, resolver: &R) -> OriginLookup {
    let Some(postal_code) = request.postal_code() else {
        return OriginLookup::NotRequested;
    };

    match resolver.resolve(postal_code).await {
        Ok(point) => OriginLookup::Resolved(point),
        Err(error) => OriginLookup::Failed {
            postal_code: postal_code.to_string(),
            error,
        },
    }
}

/// Build filter criteria from a search form and its resolved origin
///
/// The radius predicate is only active when the origin resolved.
pub fn criteria_for(request: &SearchRequest, origin: &OriginLookup) -> FilterCriteria {
    let criteria = FilterCriteria::new()
        .with_name(request.name.as_str())
        .with_specialties(request.specialties.iter().cloned())
        .with_gender(request.gender.as_str())
        .accepting_only(request.accepting_only);

    match origin.point() {
        Some(point) => criteria.within(point, f64::from(request.radius_miles)),
        None => criteria,
    }
}

/// One page session: the record store, the current result and the map
///
/// All mutable view state lives here and is passed explicitly to every
/// operation.
pub struct DirectorySession<M: MapSurface> {
    id: Uuid,
    store: RecordStore,
    engine: FilterEngine,
    map: M,
    options: ViewOptions,
    markers: HashMap<MarkerKey, Marker>,
    current: FilteredResult,
}

impl<M: MapSurface> DirectorySession<M> {
    /// Start a session showing every provider
    pub fn new(store: RecordStore, map: M, options: ViewOptions) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            store,
            engine: FilterEngine::new(),
            map,
            options,
            markers: HashMap::new(),
            current: FilteredResult::default(),
        };

        let all = FilteredResult {
            providers: session.store.all().to_vec(),
        };
        let stats = session.show(all);

        tracing::info!(
            "Session {} started with {} providers ({} markers)",
            session.id,
            session.store.len(),
            stats.markers
        );
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn current(&self) -> &FilteredResult {
        &self.current
    }

    pub fn stats(&self) -> MarkerStats {
        MarkerStats {
            markers: self.markers.len(),
            accepting: self.markers.values().filter(|m| m.is_accepting()).count(),
        }
    }

    /// Resolve the postal code and run the search
    pub async fn search<R: AddressResolver>(&mut self, request: &SearchRequest, resolver: &R) -> SearchOutcome {
        let origin = resolve_origin(request, resolver).await;
        self.apply_search(request, origin)
    }

    /// Run a search whose origin lookup has already completed
    pub fn apply_search(&mut self, request: &SearchRequest, origin: OriginLookup) -> SearchOutcome {
        let notice = match &origin {
            OriginLookup::Failed { postal_code, error } => {
                tracing::warn!("Location lookup failed for {}: {}", postal_code, error);
                Some(format!("Could not find location for zip code: {}", postal_code))
            }
            _ => None,
        };

        let criteria = criteria_for(request, &origin);
        let result = self.engine.apply(self.store.all(), &criteria);
        let stats = self.show(result);

        match criteria.radius {
            Some(radius) => {
                self.map.set_view(radius.origin, self.options.search_zoom);
                self.map.show_radius(RadiusOverlay {
                    center: radius.origin,
                    radius_miles: radius.radius_miles,
                    radius_meters: miles_to_meters(radius.radius_miles),
                });
            }
            None => self.map.clear_radius(),
        }

        SearchOutcome {
            result: self.current.clone(),
            stats,
            notice,
        }
    }

    /// Drop all criteria and show every provider
    pub fn clear(&mut self) -> SearchOutcome {
        let all = FilteredResult {
            providers: self.store.all().to_vec(),
        };
        let stats = self.show(all);

        self.map.clear_radius();
        self.map.set_view(self.options.default_center, self.options.default_zoom);

        SearchOutcome {
            result: self.current.clone(),
            stats,
            notice: None,
        }
    }

    /// Replace the record set, e.g. after the source file changed
    pub fn reload(&mut self, providers: Vec<Provider>) -> SearchOutcome {
        for key in self.markers.drain().map(|(key, _)| key) {
            self.map.remove_marker(key);
        }
        self.store.load(providers);
        self.clear()
    }

    /// Center on a provider's marker and return its record
    ///
    /// Returns `None` if the provider has no marker on the map.
    pub fn focus(&mut self, provider_id: &str) -> Option<Arc<Provider>> {
        let provider = self.store.get(provider_id)?;
        let position = self.markers.get(&MarkerKey::of(provider))?.position;
        let provider = Arc::clone(provider);
        self.map.set_view(position, self.options.focus_zoom);
        Some(provider)
    }

    /// Make `result` current and bring the markers in line with it
    fn show(&mut self, result: FilteredResult) -> MarkerStats {
        let wanted: HashSet<MarkerKey> = result
            .iter()
            .filter(|p| p.has_coordinates())
            .map(MarkerKey::of)
            .collect();

        let stale: Vec<MarkerKey> = self
            .markers
            .keys()
            .filter(|key| !wanted.contains(*key))
            .copied()
            .collect();
        for key in &stale {
            self.markers.remove(key);
            self.map.remove_marker(*key);
        }

        let mut added = 0;
        for provider in result.iter() {
            let key = MarkerKey::of(provider);
            if self.markers.contains_key(&key) {
                continue;
            }
            if let Some(marker) = Marker::for_provider(provider) {
                self.map.add_marker(marker.clone());
                self.markers.insert(key, marker);
                added += 1;
            }
        }

        if let Some(bounds) = bounds_of(self.markers.values().map(|m| &m.position)) {
            self.map.fit_bounds(bounds);
        }

        tracing::debug!(
            "Markers synced: {} removed, {} added, {} shown",
            stale.len(),
            added,
            self.markers.len()
        );

        self.current = result;
        self.stats()
    }
}
