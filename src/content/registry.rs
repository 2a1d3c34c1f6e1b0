//! ContentRegistry resource providing lookups for all loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for loaded game content.
#[derive(Resource, Debug, Clone, Default)]
pub struct ContentRegistry {
    pub characters: HashMap<u32, CharacterDef>,
    /// Pickup groups indexed by slot number.
    pub pickup_layout: Vec<PickupSlotDef>,
}

impl ContentRegistry {
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for def in builtin_characters() {
            registry.characters.insert(def.id, def);
        }
        registry.pickup_layout = builtin_pickup_layout();
        registry
    }

    pub fn character(&self, id: u32) -> Option<&CharacterDef> {
        self.characters.get(&id)
    }

    /// Characters in id order, for the title screen.
    pub fn roster(&self) -> Vec<&CharacterDef> {
        let mut roster: Vec<_> = self.characters.values().collect();
        roster.sort_by_key(|def| def.id);
        roster
    }

    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded: {} characters, {} pickup slots",
            self.characters.len(),
            self.pickup_layout.len()
        )
    }
}
