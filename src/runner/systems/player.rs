//! Runner domain: ground checks, jumping, sliding and gravity.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::audio::{Sfx, SfxRequest};
use crate::runner::{GameLayer, Player, RunnerInput, RunnerState, RunnerTuning};
use crate::session::{GroundContact, HealthEvent, HealthOutcome};

const MAX_FALL_SPEED: f32 = 2000.0;

/// Collider for the standing or sliding pose. The slide box keeps its
/// bottom edge on the standing box's bottom edge.
pub fn player_collider(tuning: &RunnerTuning, sliding: bool) -> Collider {
    if !sliding {
        return Collider::rectangle(tuning.player_size.x, tuning.player_size.y);
    }
    Collider::compound(vec![(
        Position::from_xy(0.0, slide_offset(tuning)),
        Rotation::default(),
        Collider::rectangle(tuning.slide_size.x, tuning.slide_size.y),
    )])
}

/// Vertical offset of the slide box centre from the standing centre.
pub fn slide_offset(tuning: &RunnerTuning) -> f32 {
    -(tuning.player_size.y - tuning.slide_size.y) * 0.5
}

pub(crate) fn detect_ground(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    tuning: Res<RunnerTuning>,
    mut contact: ResMut<GroundContact>,
    mut query: Query<(&Transform, &LinearVelocity, &mut RunnerState), With<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, velocity, mut state) in &mut query {
        let was_on_ground = state.on_ground;
        let feet = transform.translation.truncate() - Vec2::new(0.0, tuning.player_size.y * 0.5);
        let inset = tuning.player_size.x * 0.5 - 4.0;

        // Start just inside the feet so a flush contact still hits.
        state.on_ground = [-inset, inset].iter().any(|dx| {
            spatial_query
                .cast_ray(
                    feet + Vec2::new(*dx, 1.0),
                    Dir2::NEG_Y,
                    tuning.ground_ray + 1.0,
                    true,
                    &ground_filter,
                )
                .is_some()
        }) && velocity.y <= 0.0;

        if state.on_ground {
            state.air_time = 0.0;
            state.jumps_used = 0;
            if !was_on_ground {
                debug!("Landed at y={:.1}", transform.translation.y);
            }
        } else {
            state.air_time += time.delta_secs();
            // Walking off a ledge uses up the ground jump once grace runs out.
            if state.jumps_used == 0 && state.air_time > tuning.ground_grace {
                state.jumps_used = 1;
            }
        }

        contact.grounded = state.on_ground;
    }
}

pub(crate) fn apply_jump(
    input: Res<RunnerInput>,
    tuning: Res<RunnerTuning>,
    mut sfx: MessageWriter<SfxRequest>,
    mut query: Query<(&mut RunnerState, &mut LinearVelocity), With<Player>>,
) {
    for (mut state, mut velocity) in &mut query {
        if input.jump_just_pressed && state.jumps_used < tuning.max_jumps {
            velocity.y = tuning.jump_velocity;
            state.jumps_used += 1;
            state.on_ground = false;
            sfx.write(Sfx::Jump.into());
            debug!("Jump {} of {}", state.jumps_used, tuning.max_jumps);
        }

        if input.jump_just_released && velocity.y > 0.0 {
            velocity.y *= tuning.jump_cut;
        }
    }
}

pub(crate) fn apply_slide(
    input: Res<RunnerInput>,
    tuning: Res<RunnerTuning>,
    mut sfx: MessageWriter<SfxRequest>,
    mut query: Query<(&mut RunnerState, &mut Collider), With<Player>>,
) {
    for (mut state, mut collider) in &mut query {
        let wants_slide = input.slide_held && state.on_ground;
        if wants_slide == state.sliding {
            continue;
        }
        state.sliding = wants_slide;
        *collider = player_collider(&tuning, wants_slide);
        if wants_slide {
            sfx.write(Sfx::Slide.into());
        }
    }
}

pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<RunnerTuning>,
    mut query: Query<&mut LinearVelocity, With<Player>>,
) {
    let dt = time.delta_secs();

    for mut velocity in &mut query {
        velocity.y = (velocity.y - tuning.gravity * dt).max(-MAX_FALL_SPEED);
    }
}

/// The world scrolls past the player, who never moves horizontally.
pub(crate) fn pin_player_x(
    tuning: Res<RunnerTuning>,
    mut query: Query<(&mut Transform, &mut LinearVelocity), With<Player>>,
) {
    for (mut transform, mut velocity) in &mut query {
        transform.translation.x = tuning.player_x;
        velocity.x = 0.0;
    }
}

/// A finished revive hands back a standing player with fresh jumps.
pub(crate) fn reset_after_revive(
    tuning: Res<RunnerTuning>,
    mut events: MessageReader<HealthEvent>,
    mut input: ResMut<RunnerInput>,
    mut query: Query<(&mut RunnerState, &mut Collider, &mut LinearVelocity), With<Player>>,
) {
    let revived = events
        .read()
        .any(|event| event.outcome == HealthOutcome::Revived);
    if !revived {
        return;
    }

    *input = RunnerInput::default();
    for (mut state, mut collider, mut velocity) in &mut query {
        if state.sliding {
            *collider = player_collider(&tuning, false);
        }
        state.sliding = false;
        state.jumps_used = 0;
        state.air_time = 0.0;
        velocity.y = velocity.y.max(0.0);
    }
}
