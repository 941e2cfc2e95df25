use serde_json::json;
use todo_core::Item;

#[test]
fn item_new_sets_defaults() {
    let item = Item::new("hello");

    assert_eq!(item.text, "hello");
    assert!(!item.completed);
}

#[test]
fn toggle_twice_restores_original_state() {
    let mut item = Item::new("water plants");
    let original = item.clone();

    assert!(item.toggle());
    assert!(!item.toggle());
    assert_eq!(item, original);
}

#[test]
fn item_serialization_uses_expected_wire_fields() {
    let mut item = Item::new("ship release");
    item.completed = true;

    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(value, json!({"listItem": "ship release", "isCompleted": true}));

    let decoded: Item = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn sequence_serializes_as_compact_array_in_order() {
    let items = vec![Item::new("A"), Item::new("B")];

    let encoded = serde_json::to_string(&items).unwrap();
    assert_eq!(
        encoded,
        r#"[{"listItem":"A","isCompleted":false},{"listItem":"B","isCompleted":false}]"#
    );
}

#[test]
fn deserialize_treats_null_text_as_empty() {
    let item: Item =
        serde_json::from_value(json!({"listItem": null, "isCompleted": false})).unwrap();
    assert_eq!(item.text, "");
    assert!(item.is_blank());
}

#[test]
fn deserialize_ignores_unknown_fields() {
    let item: Item = serde_json::from_value(
        json!({"listItem": "x", "isCompleted": true, "reminderAt": "08:00"}),
    )
    .unwrap();
    assert_eq!(item.text, "x");
    assert!(item.completed);
}

#[test]
fn deserialize_rejects_missing_completion_flag() {
    let err = serde_json::from_value::<Item>(json!({"listItem": "x"})).unwrap_err();
    assert!(err.to_string().contains("isCompleted"), "unexpected error: {err}");
}
