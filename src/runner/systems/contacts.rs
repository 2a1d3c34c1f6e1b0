//! Runner domain: collision handling for hazards and pickups, plus the
//! pickup magnet.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::runner::components::{
    Active, FallZone, HealthPickup, LongObstacle, Obstacle, OneWayPlatform, Pickup, Platform,
    PlatformMember, Player, RunnerState,
};
use crate::runner::resources::RunnerTuning;
use crate::runner::systems::player::slide_offset;
use crate::session::{
    CollectedEvent, DamageKind, DamageRequest, FallDeathRequest, GroundContact, HealRequest,
    HealthTuning, RunSession,
};

/// How far the player's feet may sink below a platform top and still
/// land on it.
const ONE_WAY_TOLERANCE: f32 = 8.0;
/// Minimum upward share of a contact normal that counts as landing.
const ONE_WAY_MIN_UP: f32 = 0.5;

/// Whether a platform contact should push the player. `normal` points from
/// the platform towards the player.
pub fn one_way_contact_allowed(normal: Vec2, feet_y: f32, platform_top: f32) -> bool {
    normal.length_squared() > f32::EPSILON
        && normal.normalize().dot(Vec2::Y) >= ONE_WAY_MIN_UP
        && feet_y >= platform_top - ONE_WAY_TOLERANCE
}

/// Drops platform contacts unless the player is coming down on the top
/// face.
#[derive(SystemParam)]
pub struct OneWayPlatformHooks<'w, 's> {
    platforms: Query<'w, 's, &'static ColliderAabb, With<OneWayPlatform>>,
    players: Query<'w, 's, &'static ColliderAabb, (With<Player>, Without<OneWayPlatform>)>,
}

impl CollisionHooks for OneWayPlatformHooks<'_, '_> {
    fn modify_contacts(&self, contacts: &mut ContactPair, _commands: &mut Commands) -> bool {
        // Manifold normals point from collider1 to collider2.
        let (platform, player, flip) = if self.platforms.contains(contacts.collider1) {
            (contacts.collider1, contacts.collider2, false)
        } else if self.platforms.contains(contacts.collider2) {
            (contacts.collider2, contacts.collider1, true)
        } else {
            return true;
        };
        let (Ok(platform_aabb), Ok(player_aabb)) =
            (self.platforms.get(platform), self.players.get(player))
        else {
            return true;
        };

        contacts.manifolds.iter().all(|manifold| {
            let normal = if flip { -manifold.normal } else { manifold.normal };
            one_way_contact_allowed(normal, player_aabb.min.y, platform_aabb.max.y)
        })
    }
}

pub(crate) fn handle_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    health_tuning: Res<HealthTuning>,
    mut contact: ResMut<GroundContact>,
    players: Query<(), With<Player>>,
    hazards: Query<(), Or<(With<Obstacle>, With<LongObstacle>)>>,
    fall_zones: Query<(), With<FallZone>>,
    mut pickups: Query<
        (&mut Active, &Transform, Option<&Pickup>, Has<HealthPickup>),
        Or<(With<Pickup>, With<HealthPickup>)>,
    >,
    mut damage: MessageWriter<DamageRequest>,
    mut falls: MessageWriter<FallDeathRequest>,
    mut collected: MessageWriter<CollectedEvent>,
    mut heals: MessageWriter<HealRequest>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (player, other) in pairs {
            if !players.contains(player) {
                continue;
            }

            if hazards.contains(other) {
                damage.write(DamageRequest {
                    amount: health_tuning.crash_damage,
                    kind: DamageKind::Crash,
                });
            } else if fall_zones.contains(other) {
                contact.fell = true;
                falls.write(FallDeathRequest);
            } else if let Ok((mut active, transform, pickup, heal)) = pickups.get_mut(other) {
                // Consumed once per platform reuse.
                if !active.0 {
                    continue;
                }
                if let Some(pickup) = pickup {
                    active.0 = false;
                    collected.write(CollectedEvent { item: pickup.item });
                } else if heal {
                    active.0 = false;
                    heals.write(HealRequest {
                        amount: health_tuning.heal_amount,
                        position: transform.translation.truncate(),
                    });
                }
            }
        }
    }
}

/// Displacement for one frame of magnet pull, or `None` when out of range.
/// Closer pickups move faster.
pub fn magnet_step(
    from: Vec2,
    target: Vec2,
    radius: f32,
    speed: f32,
    accel: f32,
    dt: f32,
) -> Option<Vec2> {
    let offset = target - from;
    let distance = offset.length();
    if distance > radius || distance <= f32::EPSILON {
        return None;
    }
    let closeness = 1.0 - distance / radius.max(0.0001);
    let step = ((speed + accel * closeness) * dt).min(distance);
    Some(offset / distance * step)
}

/// Everything the magnet pulls: jellies, coins and heal pickups.
type MagnetTargets = (
    Or<(With<Pickup>, With<HealthPickup>)>,
    Without<Player>,
    Without<Platform>,
);

pub(crate) fn magnet_pull(
    time: Res<Time>,
    tuning: Res<RunnerTuning>,
    session: Res<RunSession>,
    players: Query<(&Transform, &RunnerState), With<Player>>,
    mut pickups: Query<(&mut PlatformMember, &Active, &Transform), MagnetTargets>,
) {
    if !session.magnet || session.health.is_dead() {
        return;
    }
    let Ok((player, state)) = players.single() else {
        return;
    };
    let mut target = player.translation.truncate();
    if state.sliding {
        target.y += slide_offset(&tuning);
    }
    let dt = time.delta_secs();

    for (mut member, active, transform) in &mut pickups {
        if !active.0 {
            continue;
        }
        if let Some(step) = magnet_step(
            transform.translation.truncate(),
            target,
            tuning.magnet_radius,
            tuning.magnet_speed,
            tuning.magnet_accel,
            dt,
        ) {
            member.local += step;
        }
    }
}
