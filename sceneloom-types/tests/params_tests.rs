use sceneloom_types::{EntityId, Params, ID_KEY};
use serde_json::json;

#[test]
fn with_builds_inline() {
    let p = Params::new()
        .with(ID_KEY, "A")
        .with("name", "crate")
        .with("visible", true)
        .with("scale", 2.5);
    assert_eq!(p.len(), 4);
    assert_eq!(p.get_str("name"), Some("crate"));
    assert_eq!(p.get_bool("visible"), Some(true));
    assert_eq!(p.get_f64("scale"), Some(2.5));
}

#[test]
fn entity_id_reads_the_id_key() {
    let p = Params::new().with(ID_KEY, "A");
    assert_eq!(p.entity_id(), Some(EntityId::new("A")));
}

#[test]
fn entity_id_absent_or_non_string_is_none() {
    assert_eq!(Params::new().entity_id(), None);
    let p = Params::new().with(ID_KEY, 42);
    assert_eq!(p.entity_id(), None);
}

#[test]
fn missing_keys_read_as_none() {
    let p = Params::new();
    assert_eq!(p.get_str("name"), None);
    assert_eq!(p.get_f64("scale"), None);
    assert_eq!(p.get_bool("visible"), None);
    assert_eq!(p.get_u64("width"), None);
    assert!(p.get_array("position").is_none());
}

#[test]
fn wrong_typed_keys_read_as_none() {
    let p = Params::new().with("name", 3.0);
    assert_eq!(p.get_str("name"), None);
    assert_eq!(p.get_f64("name"), Some(3.0));
}

#[test]
fn insert_returns_previous_value() {
    let mut p = Params::new().with("name", "old");
    let prev = p.insert("name", "new");
    assert_eq!(prev, Some(json!("old")));
    assert_eq!(p.get_str("name"), Some("new"));
}

#[test]
fn array_values_round_trip() {
    let p = Params::new().with("position", vec![1.0, 2.0, 3.0]);
    let arr = p.get_array("position").unwrap();
    assert_eq!(arr.len(), 3);
    assert_eq!(arr[1].as_f64(), Some(2.0));
}

#[test]
fn serializes_as_plain_json_object() {
    let p = Params::new().with(ID_KEY, "A").with("intensity", 0.8);
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json, json!({ "id": "A", "intensity": 0.8 }));
    let back: Params = serde_json::from_value(json).unwrap();
    assert_eq!(back, p);
}

#[test]
fn deserializes_from_unknown_extra_fields() {
    let p: Params = serde_json::from_value(json!({
        "id": "A",
        "some_future_field": { "nested": [1, 2] }
    }))
    .unwrap();
    assert_eq!(p.entity_id(), Some(EntityId::new("A")));
    assert!(p.contains_key("some_future_field"));
}

#[test]
fn from_iterator_collects_pairs() {
    let p: Params = [("id".to_string(), json!("A")), ("n".to_string(), json!(1))]
        .into_iter()
        .collect();
    assert_eq!(p.len(), 2);
    assert!(!p.is_empty());
}
