//! Runner domain: the scrolling run world.
//!
//! The player stays at a fixed x while pooled platforms scroll past. Each
//! platform reuse rolls an obstacle pattern and opens the pickup groups
//! that pattern leaves reachable.

mod components;
mod patterns;
mod resources;
mod spawn;
mod systems;
mod trails;

#[cfg(test)]
mod tests;

pub use components::{GameLayer, Player, RunnerState};
pub use patterns::PICKUP_SLOT_COUNT;
pub use resources::{RunnerInput, RunnerTuning};
pub use systems::contacts::OneWayPlatformHooks;

use bevy::prelude::*;

use crate::core::GameState;
use crate::runner::resources::SpawnerState;
use crate::runner::spawn::{cleanup_run_world, spawn_run_world};
use crate::runner::systems::{
    animate_player_visual, apply_gravity, apply_jump, apply_slide, blink_eyes, detect_ground,
    handle_contacts, magnet_pull, pin_player_x, read_input, reset_after_revive, retire_offscreen,
    scroll_world, sync_members, tick_spawner, wrap_background,
};
use crate::session::SessionStart;

pub struct RunnerPlugin;

impl Plugin for RunnerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunnerTuning>()
            .init_resource::<RunnerInput>()
            .init_resource::<SpawnerState>()
            .add_systems(
                OnEnter(GameState::Run),
                spawn_run_world.after(SessionStart),
            )
            .add_systems(OnExit(GameState::Run), cleanup_run_world)
            .add_systems(
                Update,
                (
                    read_input,
                    detect_ground,
                    reset_after_revive,
                    apply_jump,
                    apply_slide,
                    apply_gravity,
                    pin_player_x,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                (
                    scroll_world,
                    tick_spawner,
                    retire_offscreen,
                    magnet_pull,
                    sync_members,
                    handle_contacts,
                    wrap_background,
                )
                    .chain()
                    .after(pin_player_x)
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                (animate_player_visual, blink_eyes).run_if(in_state(GameState::Run)),
            );
    }
}
