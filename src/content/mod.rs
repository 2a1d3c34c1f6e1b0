//! Content domain: character roster and platform pickup layout loaded from
//! RON data files.

mod data;
mod loader;
mod registry;
mod validation;

#[cfg(test)]
mod tests;

pub use data::{CharacterDef, PickupSlotDef, TrailDef};
pub use registry::ContentRegistry;

use bevy::prelude::*;
use std::path::Path;

use crate::content::data::{builtin_characters, builtin_pickup_layout};
use crate::content::loader::load_all_content;
use crate::content::validation::{validate_characters, validate_pickup_layout};

pub const CONTENT_PATH: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CharacterDef>()
            .register_type::<TrailDef>()
            .register_type::<PickupSlotDef>()
            .insert_resource(load_content(Path::new(CONTENT_PATH)));
    }
}

/// Loads and validates content, swapping in built-ins for anything unusable.
pub fn load_content(base_path: &Path) -> ContentRegistry {
    let (mut registry, load_errors) = load_all_content(base_path);
    for e in &load_errors {
        warn!("{}; using built-in data", e);
    }

    let character_errors = validate_characters(&registry);
    if !character_errors.is_empty() {
        for e in &character_errors {
            warn!("{}", e);
        }
        warn!("Character roster invalid; using built-in roster");
        registry.characters = builtin_characters()
            .into_iter()
            .map(|def| (def.id, def))
            .collect();
    }

    let layout_errors = validate_pickup_layout(&registry);
    if !layout_errors.is_empty() {
        for e in &layout_errors {
            warn!("{}", e);
        }
        warn!("Pickup layout invalid; using built-in layout");
        registry.pickup_layout = builtin_pickup_layout();
    }

    info!("{}", registry.summary());
    registry
}
