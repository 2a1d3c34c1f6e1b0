//! Validation for loaded content definitions.

use super::registry::ContentRegistry;
use crate::prefs::CHARACTER_COUNT;
use crate::runner::PICKUP_SLOT_COUNT;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has invalid field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

macro_rules! check {
    ($errors:expr, $cond:expr, $source_type:expr, $source_id:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

pub fn validate_characters(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for id in 1..=CHARACTER_COUNT {
        check!(
            errors,
            registry.characters.contains_key(&id),
            "Character",
            id,
            "id",
            "character {} is missing from the roster",
            id
        );
    }

    for (id, def) in &registry.characters {
        check!(
            errors,
            (1..=CHARACTER_COUNT).contains(id),
            "Character",
            id,
            "id",
            "id must be between 1 and {}",
            CHARACTER_COUNT
        );
        check!(
            errors,
            def.max_hp > 0,
            "Character",
            id,
            "max_hp",
            "must be positive, got {}",
            def.max_hp
        );
        if *id == 1 {
            check!(
                errors,
                def.price == 0,
                "Character",
                id,
                "price",
                "the starter character must be free"
            );
        }
    }

    errors
}

pub fn validate_pickup_layout(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check!(
        errors,
        registry.pickup_layout.len() == PICKUP_SLOT_COUNT,
        "PickupLayout",
        "layout",
        "slots",
        "expected {} slots, got {}",
        PICKUP_SLOT_COUNT,
        registry.pickup_layout.len()
    );

    for (index, slot) in registry.pickup_layout.iter().enumerate() {
        check!(
            errors,
            slot.slot == index,
            "PickupSlot",
            slot.slot,
            "slot",
            "slots must be numbered 0..{} without gaps",
            PICKUP_SLOT_COUNT
        );
        check!(
            errors,
            slot.trail.points.len() >= 2,
            "PickupSlot",
            slot.slot,
            "trail.points",
            "trail needs at least two points"
        );
        check!(
            errors,
            slot.trail.spacing > 0.0,
            "PickupSlot",
            slot.slot,
            "trail.spacing",
            "must be positive"
        );
    }

    errors
}
