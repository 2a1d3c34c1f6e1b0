//! Runner domain: player sprite poses, damage blink and eye blinks.

use std::f32::consts::FRAC_PI_2;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use crate::core::easing::ping_pong;
use crate::runner::components::{EyeBlink, Player, PlayerVisual, RunnerState};
use crate::runner::resources::RunnerTuning;
use crate::runner::systems::player::slide_offset;
use crate::session::{DeathPresentationEvent, HealthPhase, ReviveStage, RunSession, lerp};

const BLINK_SPEED: f32 = 16.0;
const EYE_CLOSED: f32 = 0.1;
const EYE_OPEN_MIN: f32 = 1.0;
const EYE_OPEN_MAX: f32 = 3.0;
const DEAD_GREY: Color = Color::srgb(0.55, 0.55, 0.58);

/// Sprite alpha while invincible.
pub fn invincible_alpha(t: f32) -> f32 {
    lerp(0.5, 0.8, ping_pong(t * BLINK_SPEED))
}

pub(crate) fn animate_player_visual(
    real_time: Res<Time<Real>>,
    tuning: Res<RunnerTuning>,
    session: Res<RunSession>,
    mut deaths: MessageReader<DeathPresentationEvent>,
    players: Query<&RunnerState, With<Player>>,
    mut visuals: Query<(&mut PlayerVisual, &mut Sprite, &mut Transform)>,
) {
    let death_requested = deaths.read().count() > 0;
    let Ok(state) = players.single() else {
        return;
    };
    let t = real_time.elapsed_secs();
    let dt = real_time.delta_secs();
    let phase = session.health.phase();

    for (mut visual, mut sprite, mut transform) in &mut visuals {
        if death_requested {
            visual.death_shown = true;
        }

        let (size, offset) = if state.sliding {
            (tuning.slide_size, slide_offset(&tuning))
        } else {
            (tuning.player_size, 0.0)
        };
        sprite.custom_size = Some(size);
        transform.translation.y = offset;

        let (color, lying) = match phase {
            HealthPhase::Dead(_) if visual.death_shown => (DEAD_GREY, true),
            HealthPhase::Reviving {
                stage: ReviveStage::DeathAnimation,
                ..
            } => (DEAD_GREY, true),
            HealthPhase::Reviving {
                stage: ReviveStage::Effect,
                ..
            } => (visual.tint.mix(&Color::WHITE, ping_pong(t * 10.0)), false),
            HealthPhase::Invincible { .. } => {
                (visual.tint.with_alpha(invincible_alpha(t)), false)
            }
            _ => (visual.tint, false),
        };
        sprite.color = color;

        if !matches!(phase, HealthPhase::Dead(_)) {
            visual.death_shown = false;
        }

        let target = if lying {
            Quat::from_rotation_z(FRAC_PI_2)
        } else {
            Quat::IDENTITY
        };
        transform.rotation = transform.rotation.slerp(target, (dt * 10.0).min(1.0));
    }
}

pub(crate) fn blink_eyes(
    real_time: Res<Time<Real>>,
    mut query: Query<(&mut EyeBlink, &mut Visibility)>,
) {
    let dt = real_time.delta_secs();
    let mut rng = rand::rng();

    for (mut eye, mut visibility) in &mut query {
        eye.timer -= dt;
        if eye.timer > 0.0 {
            continue;
        }
        if eye.open {
            eye.open = false;
            eye.timer = EYE_CLOSED;
            *visibility = Visibility::Hidden;
        } else {
            eye.open = true;
            eye.timer = rng.random_range(EYE_OPEN_MIN..EYE_OPEN_MAX);
            *visibility = Visibility::Inherited;
        }
    }
}
