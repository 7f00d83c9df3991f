use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a point from raw text columns.
    ///
    /// Returns `None` unless both values parse to finite numbers, so a record
    /// with missing coordinates is never mistaken for one sitting at (0, 0).
    pub fn parse(lat: &str, lng: &str) -> Option<Self> {
        let lat = parse_coordinate(lat)?;
        let lng = parse_coordinate(lng)?;
        Some(Self { lat, lng })
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Healthcare provider record, immutable once parsed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub degree: String,
    pub specialty: String,
    pub gender: String,
    #[serde(rename = "practiceName")]
    pub practice_name: String,
    #[serde(rename = "addressLine1")]
    pub address_line1: String,
    #[serde(rename = "addressLine2", default)]
    pub address_line2: Option<String>,
    pub city: String,
    pub zip: String,
    pub phone: String,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(rename = "acceptingNewPatients")]
    pub accepting_new_patients: bool,
}

impl Provider {
    /// "First Last", used as the marker title
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// "First Last, Degree"
    pub fn display_name(&self) -> String {
        format!("{} {}, {}", self.first_name, self.last_name, self.degree)
    }

    /// Street address with the optional second line appended after a comma
    pub fn street_address(&self) -> String {
        match &self.address_line2 {
            Some(line2) => format!("{}, {}", self.address_line1, line2),
            None => self.address_line1.clone(),
        }
    }

    /// "City, REGION Zip"
    pub fn locality(&self, region_code: &str) -> String {
        format!("{}, {} {}", self.city, region_code, self.zip)
    }

    pub fn has_coordinates(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// Radius constraint around a resolved origin point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusFilter {
    pub origin: GeoPoint,
    pub radius_miles: f64,
}

/// Criteria for a single search, rebuilt on every invocation
///
/// Every field has an "inactive" value (empty string, empty set, `false`,
/// `None`); a default-constructed criteria matches every record.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub name_query: String,
    pub specialties: HashSet<String>,
    pub gender: String,
    pub accepting_only: bool,
    pub radius: Option<RadiusFilter>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, query: impl Into<String>) -> Self {
        self.name_query = query.into();
        self
    }

    pub fn with_specialties<I, S>(mut self, specialties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialties = specialties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn accepting_only(mut self, accepting_only: bool) -> Self {
        self.accepting_only = accepting_only;
        self
    }

    pub fn within(mut self, origin: GeoPoint, radius_miles: f64) -> Self {
        self.radius = Some(RadiusFilter { origin, radius_miles });
        self
    }

    /// Lowercased, trimmed name query, or `None` when the name predicate is inactive
    pub fn normalized_name(&self) -> Option<String> {
        let trimmed = self.name_query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// True when no predicate is active
    pub fn is_unconstrained(&self) -> bool {
        self.normalized_name().is_none()
            && self.specialties.is_empty()
            && self.gender.is_empty()
            && !self.accepting_only
            && self.radius.is_none()
    }
}

/// Ordered subsequence of the record store that passed a search
///
/// Elements are shared handles into the store, so two results can be compared
/// by record identity rather than by value.
#[derive(Debug, Clone, Default)]
pub struct FilteredResult {
    pub providers: Vec<Arc<Provider>>,
}

impl FilteredResult {
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Provider>> {
        self.providers.iter()
    }

    /// Whether this result holds this exact record (pointer identity)
    pub fn contains(&self, provider: &Arc<Provider>) -> bool {
        self.providers.iter().any(|p| Arc::ptr_eq(p, provider))
    }

    /// "1 provider" / "N providers"
    pub fn count_label(&self) -> String {
        let n = self.providers.len();
        format!("{} provider{}", n, if n == 1 { "" } else { "s" })
    }
}

/// Geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }
}
