//! Integration tests for descriptor loading and build-time rejection.

use std::fs;

use deckbench::parser::load_descriptor;
use deckbench::services::build_deck;
use tempfile::TempDir;

mod fixtures;
use fixtures::full_descriptor;

fn write_descriptor(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write descriptor");
    path
}

#[test]
fn yaml_descriptor_loads_and_builds() {
    let dir = TempDir::new().unwrap();
    let yaml = serde_yml::to_string(&full_descriptor()).unwrap();
    let path = write_descriptor(&dir, "virtual-live.yaml", &yaml);

    let descriptor = load_descriptor(&path).unwrap();
    let deck = build_deck(&descriptor).unwrap();
    assert_eq!(deck.name, "virtual-live");
    assert_eq!(deck.len(), fixtures::full_descriptor_element_count());
}

#[test]
fn json_descriptor_loads_and_builds() {
    let dir = TempDir::new().unwrap();
    let json = serde_json::to_string_pretty(&full_descriptor()).unwrap();
    let path = write_descriptor(&dir, "virtual-live.json", &json);

    let descriptor = load_descriptor(&path).unwrap();
    assert_eq!(descriptor, full_descriptor());
}

#[test]
fn zero_grid_family_rejects_whole_descriptor() {
    let dir = TempDir::new().unwrap();
    let mut bad = full_descriptor();
    bad.families[2].grid = [0, 1];
    let yaml = serde_yml::to_string(&bad).unwrap();
    let path = write_descriptor(&dir, "bad.yaml", &yaml);

    // Rejected at load time; no partially valid deck is ever produced.
    assert!(load_descriptor(&path).is_err());
    assert!(build_deck(&bad).is_err());
}

#[test]
fn unknown_kind_string_cannot_reach_the_builder() {
    let dir = TempDir::new().unwrap();
    let yaml = serde_yml::to_string(&full_descriptor())
        .unwrap()
        .replace("kind: key", "kind: joystick");
    let path = write_descriptor(&dir, "unknown.yaml", &yaml);

    // The kind tag is a closed enum: an unregistered kind fails parsing.
    assert!(load_descriptor(&path).is_err());
}

#[test]
fn background_spec_feeds_primary_grid_geometry() {
    let descriptor = full_descriptor();
    let deck = build_deck(&descriptor).unwrap();

    // The key family declares no spacing/offset of its own, so its first
    // key sits at the background offset.
    let (x, y, _, _) = deck.get(0).unwrap().shape.bounds();
    assert_eq!([x, y], descriptor.background.offset);
}
