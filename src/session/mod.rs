//! Session domain: run state owned by a single manager.
//!
//! Health, revive, pause, difficulty and score live here as plain state
//! machines. The systems in `systems.rs` only translate Bevy messages and
//! clocks into calls on them.

mod events;
mod health;
mod pause;
mod ramp;
mod score;
mod systems;

#[cfg(test)]
mod tests;

pub use events::{
    CollectedEvent, DamageRequest, DeathPresentationEvent, FallDeathRequest,
    ForceResultsRequest, HealRequest, HealedEvent, HealthEvent, ResultsReadyEvent,
};
pub use health::{
    DamageKind, DeathCause, HealthOutcome, HealthPhase, HealthTuning, ReviveStage, RunHealth,
};
pub use pause::PauseControl;
pub use ramp::{DifficultyRamp, RampTuning, lerp, progress01};
pub use score::{Collectible, GameOverFlow, ResultSummary, RunScore};

use bevy::prelude::*;

use crate::core::GameState;
use crate::session::pause::sync_virtual_time;
use crate::session::systems::{
    advance_ramp, apply_health_requests, collect_score, end_session, force_results, start_session,
    tick_game_over, tick_health,
};

/// The run being played: who is running and their health.
#[derive(Resource, Debug, Clone)]
pub struct RunSession {
    pub character_id: u32,
    pub magnet: bool,
    pub health: RunHealth,
}

impl Default for RunSession {
    fn default() -> Self {
        Self {
            character_id: 1,
            magnet: false,
            health: RunHealth::new(50, false),
        }
    }
}

/// Run setup on entering the run scene. Systems that read `RunSession`
/// on enter order themselves after this.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionStart;

/// Whether the player is standing on a platform this frame.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct GroundContact {
    pub grounded: bool,
    /// Set once the player drops into the fall zone.
    pub fell: bool,
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunSession>()
            .init_resource::<GroundContact>()
            .init_resource::<HealthTuning>()
            .init_resource::<RampTuning>()
            .init_resource::<DifficultyRamp>()
            .init_resource::<PauseControl>()
            .init_resource::<RunScore>()
            .init_resource::<GameOverFlow>()
            .add_message::<DamageRequest>()
            .add_message::<HealRequest>()
            .add_message::<FallDeathRequest>()
            .add_message::<CollectedEvent>()
            .add_message::<HealthEvent>()
            .add_message::<HealedEvent>()
            .add_message::<DeathPresentationEvent>()
            .add_message::<ForceResultsRequest>()
            .add_message::<ResultsReadyEvent>()
            .add_systems(OnEnter(GameState::Run), start_session.in_set(SessionStart))
            .add_systems(OnExit(GameState::Run), end_session)
            .add_systems(
                Update,
                (
                    tick_health,
                    apply_health_requests,
                    collect_score,
                    advance_ramp,
                    tick_game_over,
                    force_results,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(PostUpdate, sync_virtual_time);
    }
}
