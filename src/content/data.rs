//! Data definitions for the RON content files.
//!
//! These structs mirror assets/data/*.ron. `ContentRegistry` owns the
//! loaded values and falls back to the built-ins below when a file is
//! missing or broken.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Characters (characters.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct CharacterDef {
    pub id: u32,
    pub name: String,
    pub max_hp: i32,
    /// Coins needed to unlock. Zero for the starter.
    pub price: u64,
    /// One free revive per run.
    #[serde(default)]
    pub revive: bool,
    /// Pulls nearby pickups in.
    #[serde(default)]
    pub magnet: bool,
    pub color: (f32, f32, f32),
    /// Shown on the start panel before a run.
    #[serde(default)]
    pub lines: Vec<String>,
}

impl CharacterDef {
    pub fn tint(&self) -> Color {
        Color::srgb(self.color.0, self.color.1, self.color.2)
    }
}

// ============================================================================
// Pickup trails (pickup_layout.ron)
// ============================================================================

/// Polyline in platform-local pixels, sampled at a fixed spacing.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct TrailDef {
    pub points: Vec<(f32, f32)>,
    pub spacing: f32,
    #[serde(default)]
    pub start_offset: f32,
    #[serde(default = "default_true")]
    pub include_end_if_fits: bool,
    /// Snap each segment to the nearest 45 degree heading before sampling.
    #[serde(default)]
    pub angle_snap: bool,
}

fn default_true() -> bool {
    true
}

/// One switchable group of pickups on a platform.
#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct PickupSlotDef {
    pub slot: usize,
    pub trail: TrailDef,
}

// ============================================================================
// Built-in fallbacks
// ============================================================================

pub fn builtin_characters() -> Vec<CharacterDef> {
    vec![
        CharacterDef {
            id: 1,
            name: "Berry".to_string(),
            max_hp: 50,
            price: 0,
            revive: false,
            magnet: false,
            color: (0.95, 0.45, 0.55),
            lines: vec!["Let's roll!".to_string()],
        },
        CharacterDef {
            id: 2,
            name: "Lime".to_string(),
            max_hp: 60,
            price: 1000,
            revive: false,
            magnet: false,
            color: (0.55, 0.85, 0.35),
            lines: vec!["Fresh and ready.".to_string()],
        },
        CharacterDef {
            id: 3,
            name: "Grape".to_string(),
            max_hp: 70,
            price: 2500,
            revive: false,
            magnet: true,
            color: (0.6, 0.4, 0.9),
            lines: vec!["Nothing gets away from me.".to_string()],
        },
        CharacterDef {
            id: 4,
            name: "Peach".to_string(),
            max_hp: 70,
            price: 5000,
            revive: true,
            magnet: false,
            color: (1.0, 0.7, 0.45),
            lines: vec!["Once more, with feeling!".to_string()],
        },
    ]
}

/// Default 11-slot layout on a 720px platform whose top sits at y = 20.
pub fn builtin_pickup_layout() -> Vec<PickupSlotDef> {
    let line = |from: (f32, f32), to: (f32, f32)| TrailDef {
        points: vec![from, to],
        spacing: 40.0,
        start_offset: 0.0,
        include_end_if_fits: true,
        angle_snap: true,
    };
    let arc = |center_x: f32, height: f32| TrailDef {
        points: vec![
            (center_x - 80.0, 60.0),
            (center_x - 40.0, 60.0 + height * 0.8),
            (center_x, 60.0 + height),
            (center_x + 40.0, 60.0 + height * 0.8),
            (center_x + 80.0, 60.0),
        ],
        spacing: 45.0,
        start_offset: 0.0,
        include_end_if_fits: true,
        angle_snap: false,
    };

    let trails = [
        line((-345.0, 50.0), (-305.0, 50.0)),
        line((-140.0, 50.0), (-100.0, 50.0)),
        line((-280.0, 50.0), (-200.0, 50.0)),
        arc(-240.0, 120.0),
        line((-40.0, 50.0), (40.0, 50.0)),
        arc(0.0, 120.0),
        arc(0.0, 190.0),
        line((200.0, 50.0), (280.0, 50.0)),
        arc(240.0, 120.0),
        line((100.0, 50.0), (140.0, 50.0)),
        line((305.0, 50.0), (345.0, 50.0)),
    ];

    trails
        .into_iter()
        .enumerate()
        .map(|(slot, trail)| PickupSlotDef { slot, trail })
        .collect()
}
