use std::fs;
use tempfile::tempdir;
use todo_core::{CodecError, Item, ItemCodec, JsonFileCodec, StoreConfig};

fn sample_items() -> Vec<Item> {
    let mut done = Item::new("pay rent");
    done.completed = true;
    vec![
        Item::new("Buy milk"),
        done,
        Item::new(""),
        Item::new("émoji ✅ \"quoted\""),
    ]
}

#[test]
fn read_missing_file_returns_empty_sequence() {
    let dir = tempdir().unwrap();
    let codec = JsonFileCodec::new(dir.path().join("TodoList.json"));

    assert!(codec.read().unwrap().is_empty());
}

#[test]
fn write_then_read_preserves_order_and_fields() {
    let dir = tempdir().unwrap();
    let codec = JsonFileCodec::from_config(&StoreConfig::in_dir(dir.path()));
    let items = sample_items();

    codec.write(&items).unwrap();

    assert_eq!(codec.read().unwrap(), items);
}

#[test]
fn write_overwrites_previous_snapshot() {
    let dir = tempdir().unwrap();
    let codec = JsonFileCodec::new(dir.path().join("TodoList.json"));

    codec.write(&sample_items()).unwrap();
    codec.write(&[]).unwrap();

    assert_eq!(fs::read_to_string(codec.path()).unwrap(), "[]");
    assert!(codec.read().unwrap().is_empty());
}

#[test]
fn read_accepts_externally_written_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("TodoList.json");
    fs::write(&path, r#"[{"listItem":"X","isCompleted":true}]"#).unwrap();

    let items = JsonFileCodec::new(&path).read().unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].text, "X");
    assert!(items[0].completed);
}

#[test]
fn read_rejects_non_array_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("TodoList.json");
    fs::write(&path, r#"{"listItem":"X","isCompleted":true}"#).unwrap();

    let err = JsonFileCodec::new(&path).read().unwrap_err();
    assert!(matches!(err, CodecError::Decode { .. }));
    assert!(err.is_decode());
}

#[test]
fn read_rejects_truncated_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("TodoList.json");
    fs::write(&path, r#"[{"listItem":"X","isCom"#).unwrap();

    let err = JsonFileCodec::new(&path).read().unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn write_fails_with_io_error_when_parent_is_a_file() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let codec = JsonFileCodec::new(blocker.join("TodoList.json"));
    let err = codec.write(&sample_items()).unwrap_err();

    assert!(matches!(err, CodecError::Io { .. }));
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
}

#[test]
fn quarantine_moves_file_aside_with_original_bytes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("TodoList.json");
    fs::write(&path, "garbage").unwrap();
    let codec = JsonFileCodec::new(&path);

    let backup = codec.quarantine().unwrap().expect("backup path");

    assert!(!path.exists());
    assert_eq!(fs::read_to_string(backup).unwrap(), "garbage");
}
