use serde_json::json;

use super::*;

fn raw(value: serde_json::Value) -> RawPlace {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn full_record() -> serde_json::Value {
    json!({
        "fsq_place_id": "4b5a0f4ef964a520a0b028e3",
        "name": "Blue Note",
        "categories": [
            { "fsq_category_id": "4bf58dd8d48988d1e7931735", "name": "Jazz and Blues Venue" },
            { "fsq_category_id": "4bf58dd8d48988d116941735", "name": "Bar" }
        ],
        "location": {
            "address": "131 W 3rd St",
            "locality": "New York",
            "region": "NY",
            "formatted_address": "131 W 3rd St, New York, NY 10012"
        },
        "latitude": 40.730_9,
        "longitude": -74.000_6
    })
}

#[test]
fn normalizes_complete_record() {
    let place = normalize_place(raw(full_record()), 0).unwrap();
    assert_eq!(place.id, "4b5a0f4ef964a520a0b028e3");
    assert_eq!(place.name, "Blue Note");
    assert_eq!(place.primary_category_name, "Jazz and Blues Venue");
    assert_eq!(place.address, "131 W 3rd St");
    assert_eq!(place.locality, "New York");
    let coords = place.coordinates().unwrap();
    assert!((coords.latitude - 40.730_9).abs() < 1e-9);
    assert!((coords.longitude + 74.000_6).abs() < 1e-9);
}

#[test]
fn missing_name_is_skipped() {
    let mut record = full_record();
    record["name"] = json!(null);
    assert_eq!(
        normalize_place(raw(record), 0).unwrap_err(),
        SkipReason::MissingName
    );
}

#[test]
fn blank_name_is_skipped() {
    let mut record = full_record();
    record["name"] = json!("  ");
    assert_eq!(
        normalize_place(raw(record), 0).unwrap_err(),
        SkipReason::MissingName
    );
}

#[test]
fn empty_categories_are_skipped() {
    let mut record = full_record();
    record["categories"] = json!([]);
    assert_eq!(
        normalize_place(raw(record), 0).unwrap_err(),
        SkipReason::NoCategories
    );
}

#[test]
fn absent_categories_are_skipped() {
    let mut record = full_record();
    record.as_object_mut().unwrap().remove("categories");
    assert_eq!(
        normalize_place(raw(record), 0).unwrap_err(),
        SkipReason::NoCategories
    );
}

#[test]
fn unnamed_first_category_is_skipped() {
    let mut record = full_record();
    record["categories"] = json!([{ "fsq_category_id": "x" }, { "name": "Bar" }]);
    assert_eq!(
        normalize_place(raw(record), 0).unwrap_err(),
        SkipReason::EmptyPrimaryCategory
    );
}

#[test]
fn address_falls_back_to_formatted_address() {
    let mut record = full_record();
    record["location"] = json!({ "formatted_address": "Somewhere, NY" });
    let place = normalize_place(raw(record), 0).unwrap();
    assert_eq!(place.address, "Somewhere, NY");
    assert_eq!(place.locality, "Unknown");
}

#[test]
fn missing_location_uses_defaults() {
    let mut record = full_record();
    record.as_object_mut().unwrap().remove("location");
    let place = normalize_place(raw(record), 0).unwrap();
    assert_eq!(place.address, "Address unavailable");
    assert_eq!(place.locality, "Unknown");
}

#[test]
fn legacy_id_and_geocodes_are_accepted() {
    let record = json!({
        "fsq_id": "legacy-1",
        "name": "Old Format Cafe",
        "categories": [{ "name": "Coffee Shop" }],
        "geocodes": { "main": { "latitude": 51.5, "longitude": -0.12 } }
    });
    let place = normalize_place(raw(record), 3).unwrap();
    assert_eq!(place.id, "legacy-1");
    assert_eq!(place.latitude, Some(51.5));
    assert_eq!(place.longitude, Some(-0.12));
}

#[test]
fn missing_coordinates_keep_the_place_without_position() {
    let mut record = full_record();
    let obj = record.as_object_mut().unwrap();
    obj.remove("latitude");
    obj.remove("longitude");
    let place = normalize_place(raw(record), 0).unwrap();
    assert_eq!(place.name, "Blue Note");
    assert_eq!(place.primary_category_name, "Jazz and Blues Venue");
    assert_eq!(place.coordinates(), None);
}

#[test]
fn half_a_coordinate_pair_counts_as_missing() {
    let mut record = full_record();
    record.as_object_mut().unwrap().remove("longitude");
    let place = normalize_place(raw(record), 0).unwrap();
    assert_eq!(place.coordinates(), None);
}

#[test]
fn normalize_results_keeps_places_without_coordinates() {
    let response: PlaceSearchResponse = serde_json::from_value(json!({
        "results": [
            { "fsq_place_id": "a", "name": "Mercury Lounge", "categories": [{ "name": "Music Venue" }] },
            { "fsq_place_id": "b", "name": "First Savings", "categories": [{ "name": "Bank" }],
              "latitude": 1.0, "longitude": 2.0 }
        ]
    }))
    .unwrap();

    let places = normalize_results(response);
    let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(places[0].coordinates(), None);
}

#[test]
fn missing_id_gets_positional_stand_in() {
    let mut record = full_record();
    record.as_object_mut().unwrap().remove("fsq_place_id");
    let place = normalize_place(raw(record), 7).unwrap();
    assert_eq!(place.id, "unidentified-7");
}

#[test]
fn normalize_results_filters_and_keeps_order() {
    let mut nameless = full_record();
    nameless["name"] = json!(null);
    let mut second = full_record();
    second["fsq_place_id"] = json!("second");
    second["name"] = json!("Second");

    let response: PlaceSearchResponse = serde_json::from_value(json!({
        "results": [full_record(), null, nameless, second]
    }))
    .unwrap();

    let places = normalize_results(response);
    let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Blue Note", "Second"]);
}

#[test]
fn normalize_results_handles_missing_results_field() {
    let response: PlaceSearchResponse = serde_json::from_value(json!({})).unwrap();
    assert!(normalize_results(response).is_empty());
}
