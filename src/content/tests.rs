//! Content domain: tests for data files, fallbacks and validation.

use std::path::Path;

use super::data::{CharacterDef, PickupSlotDef, builtin_characters, builtin_pickup_layout};
use super::loader::{SCHEMA_VERSION, load_all_content, parse_data_file};
use super::registry::ContentRegistry;
use super::validation::{validate_characters, validate_pickup_layout};

const CHARACTERS_RON: &str = include_str!("../../assets/data/characters.ron");
const PICKUP_LAYOUT_RON: &str = include_str!("../../assets/data/pickup_layout.ron");

#[test]
fn test_shipped_characters_parse_and_validate() {
    let items = parse_data_file::<CharacterDef>("characters.ron", CHARACTERS_RON).unwrap();
    let mut registry = ContentRegistry::default();
    for def in items {
        registry.characters.insert(def.id, def);
    }
    assert!(validate_characters(&registry).is_empty());

    let prices: Vec<u64> = registry.roster().iter().map(|def| def.price).collect();
    assert_eq!(prices, vec![0, 1000, 2500, 5000]);

    let hp: Vec<i32> = registry.roster().iter().map(|def| def.max_hp).collect();
    assert_eq!(hp, vec![50, 60, 70, 70]);
}

#[test]
fn test_only_fourth_character_revives_and_third_has_magnet() {
    let items = parse_data_file::<CharacterDef>("characters.ron", CHARACTERS_RON).unwrap();
    for def in items {
        assert_eq!(def.revive, def.id == 4, "revive flag for {}", def.id);
        assert_eq!(def.magnet, def.id == 3, "magnet flag for {}", def.id);
    }
}

#[test]
fn test_shipped_pickup_layout_matches_builtin() {
    let items = parse_data_file::<PickupSlotDef>("pickup_layout.ron", PICKUP_LAYOUT_RON).unwrap();
    let builtin = builtin_pickup_layout();
    assert_eq!(items.len(), builtin.len());
    for (loaded, fallback) in items.iter().zip(builtin.iter()) {
        assert_eq!(loaded.slot, fallback.slot);
        assert_eq!(loaded.trail.points, fallback.trail.points);
        assert_eq!(loaded.trail.spacing, fallback.trail.spacing);
    }
}

#[test]
fn test_builtin_content_is_valid() {
    let registry = ContentRegistry::builtin();
    assert!(validate_characters(&registry).is_empty());
    assert!(validate_pickup_layout(&registry).is_empty());
    assert_eq!(builtin_characters().len(), 4);
}

#[test]
fn test_wrong_schema_version_is_rejected() {
    let text = format!("(schema_version: {}, items: [])", SCHEMA_VERSION + 1);
    let err = parse_data_file::<CharacterDef>("characters.ron", &text).unwrap_err();
    assert!(err.to_string().contains("schema_version"));
}

#[test]
fn test_missing_directory_falls_back_to_builtin() {
    let (registry, errors) = load_all_content(Path::new("definitely/not/here"));
    assert_eq!(errors.len(), 2);
    assert_eq!(registry.characters.len(), 4);
    assert_eq!(registry.pickup_layout.len(), 11);
}

#[test]
fn test_validation_flags_paid_starter_and_missing_character() {
    let mut registry = ContentRegistry::builtin();
    if let Some(starter) = registry.characters.get_mut(&1) {
        starter.price = 10;
    }
    registry.characters.remove(&4);

    let errors = validate_characters(&registry);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().any(|e| e.field == "price"));
    assert!(errors.iter().any(|e| e.source_id == "4"));
}

#[test]
fn test_validation_flags_gapped_slots() {
    let mut registry = ContentRegistry::builtin();
    registry.pickup_layout.remove(3);
    let errors = validate_pickup_layout(&registry);
    assert!(errors.iter().any(|e| e.field == "slots"));
    assert!(errors.iter().any(|e| e.field == "slot"));
}
