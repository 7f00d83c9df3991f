// Unit tests for Provider Directory

use provider_directory::core::{
    distance::{distance_between, haversine_distance},
    parser::parse_line,
    FilterEngine, RecordStore,
};
use provider_directory::models::{FilterCriteria, FilteredResult, GeoPoint, Provider};
use std::sync::Arc;

fn create_provider(
    id: &str,
    first: &str,
    last: &str,
    specialty: &str,
    gender: &str,
    accepting: bool,
    coordinates: Option<(f64, f64)>,
) -> Provider {
    Provider {
        id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        degree: "MD".to_string(),
        specialty: specialty.to_string(),
        gender: gender.to_string(),
        practice_name: format!("{} Practice", last),
        address_line1: "1 Main St".to_string(),
        address_line2: None,
        city: "Providence".to_string(),
        zip: "02903".to_string(),
        phone: "401-555-0100".to_string(),
        coordinates: coordinates.map(|(lat, lng)| GeoPoint::new(lat, lng)),
        accepting_new_patients: accepting,
    }
}

/// Ann Lee and Bob Roe
fn scenario_store() -> RecordStore {
    RecordStore::new(vec![
        create_provider("1", "Ann", "Lee", "Pediatrics", "Female", true, Some((41.8, -71.4))),
        create_provider("2", "Bob", "Roe", "Cardiology", "Male", false, Some((41.0, -71.0))),
    ])
}

fn mixed_store() -> RecordStore {
    RecordStore::new(vec![
        create_provider("1", "Ann", "Lee", "Pediatrics", "Female", true, Some((41.8, -71.4))),
        create_provider("2", "Bob", "Roe", "Cardiology", "Male", false, Some((41.0, -71.0))),
        create_provider("3", "Lee", "Ames", "Cardiology", "Female", true, Some((41.71, -71.52))),
        create_provider("4", "Cara", "Leeds", "Dermatology", "Female", false, None),
        create_provider("5", "Dan", "Kim", "Pediatrics", "Male", true, Some((41.69, -71.49))),
        create_provider("6", "Eve", "Stone", "Cardiology", "Female", true, None),
    ])
}

fn ids(result: &FilteredResult) -> Vec<&str> {
    result.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn test_quoted_field_round_trip() {
    let fields = parse_line(r#""Jones, Jr.","Smith ""Doc"" Jr.""#);

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0], "Jones, Jr.");
    assert_eq!(fields[1], "Smith \"Doc\" Jr.");
}

#[test]
fn test_distance_symmetry_and_zero() {
    let a = (41.7, -71.5);
    let b = (42.3601, -71.0589);

    let ab = haversine_distance(a.0, a.1, b.0, b.1);
    let ba = haversine_distance(b.0, b.1, a.0, a.1);
    assert!((ab - ba).abs() < 1e-9);
    assert_eq!(haversine_distance(a.0, a.1, a.0, a.1), 0.0);
}

#[test]
fn test_distance_in_miles() {
    // New York to Los Angeles is roughly 2450 miles
    let distance = haversine_distance(40.7128, -74.0060, 34.0522, -118.2437);
    assert!((distance - 2450.0).abs() < 30.0, "Expected ~2450mi, got {}", distance);
}

#[test]
fn test_facet_determinism() {
    let store = RecordStore::new(vec![
        create_provider("1", "A", "A", "Cardiology", "Male", true, None),
        create_provider("2", "B", "B", "Pediatrics", "Male", true, None),
        create_provider("3", "C", "C", "Cardiology", "Male", true, None),
    ]);

    assert_eq!(store.facet_specialties(), ["Cardiology", "Pediatrics"]);
}

#[test]
fn test_empty_criteria_is_identity() {
    let store = mixed_store();
    let result = FilterEngine::new().apply(store.all(), &FilterCriteria::new());

    assert_eq!(result.len(), store.len());
    for (kept, original) in result.iter().zip(store.all()) {
        assert!(Arc::ptr_eq(kept, original));
    }
}

#[test]
fn test_stability_preserves_relative_order() {
    let store = mixed_store();
    let criteria = FilterCriteria::new().with_specialties(["Cardiology", "Pediatrics"]);

    let result = FilterEngine::new().apply(store.all(), &criteria);

    assert_eq!(ids(&result), vec!["1", "2", "3", "5", "6"]);
}

#[test]
fn test_conjunction_is_intersection() {
    let store = mixed_store();
    let engine = FilterEngine::new();
    let origin = GeoPoint::new(41.7, -71.5);

    let pairs: Vec<(FilterCriteria, FilterCriteria, FilterCriteria)> = vec![
        (
            FilterCriteria::new().with_name("lee"),
            FilterCriteria::new().accepting_only(true),
            FilterCriteria::new().with_name("lee").accepting_only(true),
        ),
        (
            FilterCriteria::new().with_specialties(["Cardiology"]),
            FilterCriteria::new().with_gender("Female"),
            FilterCriteria::new().with_specialties(["Cardiology"]).with_gender("Female"),
        ),
        (
            FilterCriteria::new().within(origin, 5.0),
            FilterCriteria::new().with_specialties(["Pediatrics"]),
            FilterCriteria::new().with_specialties(["Pediatrics"]).within(origin, 5.0),
        ),
    ];

    for (c1, c2, both) in pairs {
        let r1 = engine.apply(store.all(), &c1);
        let r2 = engine.apply(store.all(), &c2);
        let combined = engine.apply(store.all(), &both);

        let intersection: Vec<&Arc<Provider>> = r1.iter().filter(|p| r2.contains(p)).collect();

        assert_eq!(combined.len(), intersection.len());
        for (a, b) in combined.iter().zip(intersection) {
            assert!(Arc::ptr_eq(a, b));
        }
    }
}

#[test]
fn test_radius_boundary_inclusive() {
    let store = scenario_store();
    let origin = GeoPoint::new(41.7, -71.5);
    let ann = store.get("1").unwrap();
    let exact = distance_between(&origin, ann.coordinates.as_ref().unwrap());

    let at_boundary = FilterEngine::new().apply(store.all(), &FilterCriteria::new().within(origin, exact));
    assert_eq!(ids(&at_boundary), vec!["1"]);

    let just_inside = FilterEngine::new().apply(store.all(), &FilterCriteria::new().within(origin, exact - 1e-6));
    assert!(just_inside.is_empty());
}

#[test]
fn test_scenario_accepting_only() {
    let store = scenario_store();
    let result = FilterEngine::new().apply(store.all(), &FilterCriteria::new().accepting_only(true));

    assert_eq!(ids(&result), vec!["1"]);
    assert_eq!(result.providers[0].full_name(), "Ann Lee");
}

#[test]
fn test_scenario_specialty() {
    let store = scenario_store();
    let result = FilterEngine::new().apply(store.all(), &FilterCriteria::new().with_specialties(["Cardiology"]));

    assert_eq!(ids(&result), vec!["2"]);
    assert_eq!(result.providers[0].full_name(), "Bob Roe");
}

#[test]
fn test_scenario_radius_excludes_out_of_range() {
    let store = scenario_store();
    let origin = GeoPoint::new(41.7, -71.5);

    // Both records are further than 5 miles from the origin
    for provider in store.all() {
        let distance = distance_between(&origin, provider.coordinates.as_ref().unwrap());
        assert!(distance > 5.0, "{} is {} miles away", provider.full_name(), distance);
    }

    let result = FilterEngine::new().apply(store.all(), &FilterCriteria::new().within(origin, 5.0));
    assert!(result.is_empty());

    // Ann passes every other predicate but is still out of range
    let criteria = FilterCriteria::new()
        .with_name("ann")
        .with_specialties(["Pediatrics"])
        .accepting_only(true)
        .within(origin, 5.0);
    assert!(FilterEngine::new().apply(store.all(), &criteria).is_empty());
}

#[test]
fn test_missing_coordinates_never_pass_radius() {
    let store = mixed_store();
    let criteria = FilterCriteria::new().within(GeoPoint::new(0.0, 0.0), 1.0);

    // Records without coordinates must not be treated as sitting at (0, 0)
    let result = FilterEngine::new().apply(store.all(), &criteria);
    assert!(result.is_empty());
}

#[test]
fn test_name_query_is_trimmed_and_case_insensitive() {
    let store = mixed_store();
    let result = FilterEngine::new().apply(store.all(), &FilterCriteria::new().with_name("  LEE "));

    assert_eq!(ids(&result), vec!["1", "3", "4"]);

    let blank = FilterEngine::new().apply(store.all(), &FilterCriteria::new().with_name("   "));
    assert_eq!(blank.len(), store.len());
}
