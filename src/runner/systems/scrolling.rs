//! Runner domain: world scrolling and the looping background.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::runner::components::{BackgroundTile, Scrolling};
use crate::session::{DifficultyRamp, RampTuning, RunSession};

/// Tiles overlap by this much so no seam shows between them.
pub const TILE_OVERLAP: f32 = 0.5;

const FALLBACK_HALF_WIDTH: f32 = 640.0;

pub(crate) fn scroll_world(
    time: Res<Time>,
    ramp: Res<DifficultyRamp>,
    ramp_tuning: Res<RampTuning>,
    session: Res<RunSession>,
    mut query: Query<(&Scrolling, &mut Transform)>,
) {
    if session.health.is_dead() {
        return;
    }
    let dx = ramp.scroll_speed(&ramp_tuning) * time.delta_secs();
    if dx <= 0.0 {
        return;
    }
    for (scrolling, mut transform) in &mut query {
        transform.translation.x -= dx * scrolling.factor;
    }
}

/// Where a tile that left the view re-attaches, if it has left. `rightmost`
/// is the right edge of the furthest sibling on the same layer.
pub fn wrapped_tile_x(x: f32, width: f32, view_left: f32, rightmost: f32) -> Option<f32> {
    if x + width * 0.5 >= view_left {
        return None;
    }
    Some(rightmost + width * 0.5 - TILE_OVERLAP)
}

pub(crate) fn wrap_background(
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<&Transform, (With<Camera2d>, Without<BackgroundTile>)>,
    mut tiles: Query<(&BackgroundTile, &Scrolling, &mut Transform)>,
) {
    let half_width = windows
        .single()
        .map(|window| window.width() * 0.5)
        .unwrap_or(FALLBACK_HALF_WIDTH);
    let camera_x = cameras.single().map(|t| t.translation.x).unwrap_or(0.0);
    let view_left = camera_x - half_width;

    // Layers are told apart by their parallax factor.
    let mut layout: Vec<(f32, f32, f32)> = tiles
        .iter()
        .map(|(tile, scrolling, transform)| (scrolling.factor, transform.translation.x, tile.width))
        .collect();

    for (tile, scrolling, mut transform) in &mut tiles {
        let x = transform.translation.x;
        let rightmost = layout
            .iter()
            .filter(|(factor, _, _)| *factor == scrolling.factor)
            .map(|(_, x, width)| x + width * 0.5)
            .fold(f32::MIN, f32::max);
        let Some(new_x) = wrapped_tile_x(x, tile.width, view_left, rightmost) else {
            continue;
        };
        transform.translation.x = new_x;
        if let Some(entry) = layout
            .iter_mut()
            .find(|(factor, old_x, _)| *factor == scrolling.factor && *old_x == x)
        {
            entry.1 = new_x;
        }
    }
}
