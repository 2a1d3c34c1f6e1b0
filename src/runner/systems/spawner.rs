//! Runner domain: platform reuse and member placement.

use bevy::prelude::*;
use rand::Rng;

use crate::runner::components::{
    Active, HealthPickup, LongObstacle, Obstacle, Pickup, Platform, PlatformMember, Transient,
};
use crate::runner::patterns::{
    ObstacleLayout, ObstaclePattern, PICKUP_SLOT_COUNT, PickupMode, obstacle_layout, pickup_slots,
};
use crate::runner::resources::{RunnerTuning, SpawnerState};
use crate::runner::spawn::pickup_color;
use crate::session::{DifficultyRamp, GameOverFlow, RampTuning};

/// Everything decided for one platform reuse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformPlan {
    pub pattern: ObstaclePattern,
    pub layout: ObstacleLayout,
    pub slots: [bool; PICKUP_SLOT_COUNT],
    pub mode: PickupMode,
    pub heal: bool,
}

impl PlatformPlan {
    pub fn roll<R: Rng>(spawn_count: u32, tuning: &RunnerTuning, rng: &mut R) -> Self {
        let mut pattern = ObstaclePattern::for_spawn(spawn_count, tuning.pattern_span);
        if pattern == ObstaclePattern::Random && rng.random::<f32>() < tuning.long_pattern_chance {
            pattern = ObstaclePattern::Long;
        }
        let layout = obstacle_layout(pattern, spawn_count, rng);
        Self {
            pattern,
            layout,
            slots: pickup_slots(&layout),
            mode: PickupMode::random(rng),
            heal: rng.random::<f32>() < tuning.health_pickup_chance,
        }
    }

    pub fn obstacle_active(&self, index: usize) -> bool {
        self.layout.obstacles.get(index).copied().unwrap_or(false)
    }

    pub fn slot_active(&self, slot: usize) -> bool {
        self.slots.get(slot).copied().unwrap_or(false)
    }
}

type MemberParts<'a> = (
    &'a mut PlatformMember,
    &'a mut Active,
    Option<&'a Obstacle>,
    Has<LongObstacle>,
    Option<&'a mut Pickup>,
    Has<HealthPickup>,
    &'a mut Sprite,
);

pub(crate) fn tick_spawner(
    time: Res<Time>,
    ramp: Res<DifficultyRamp>,
    ramp_tuning: Res<RampTuning>,
    tuning: Res<RunnerTuning>,
    flow: Res<GameOverFlow>,
    mut spawner: ResMut<SpawnerState>,
    mut platforms: Query<(&mut Transform, &mut Active), With<Platform>>,
    mut members: Query<MemberParts, Without<Platform>>,
) {
    if flow.is_over() {
        return;
    }

    spawner.countdown -= time.delta_secs();
    if spawner.countdown > 0.0 {
        return;
    }
    let interval = ramp.spawn_interval(&ramp_tuning);
    spawner.countdown = (spawner.countdown + interval).max(0.0);

    let Some(platform) = spawner.take_next() else {
        return;
    };
    let spawn_count = spawner.spawn_count;
    spawner.spawn_count += 1;
    let plan = PlatformPlan::roll(spawn_count, &tuning, &mut spawner.rng);

    let Ok((mut transform, mut active)) = platforms.get_mut(platform) else {
        warn!("Pooled platform {:?} missing, skipping spawn", platform);
        return;
    };
    transform.translation.x = tuning.spawn_x;
    transform.translation.y = tuning.platform_y;
    active.0 = true;

    let item = plan.mode.collectible();
    for (mut member, mut member_active, obstacle, long, pickup, heal, mut sprite) in &mut members {
        if member.platform != platform {
            continue;
        }
        member.local = member.home;
        member_active.0 = if let Some(obstacle) = obstacle {
            plan.obstacle_active(obstacle.index)
        } else if long {
            plan.layout.long
        } else if let Some(mut pickup) = pickup {
            pickup.item = item;
            sprite.color = pickup_color(item);
            plan.slot_active(pickup.slot)
        } else {
            heal && plan.heal
        };
    }

    debug!(
        "Spawn {}: {:?} obstacles={:?} pickups={:?} heal={}",
        spawn_count, plan.pattern, plan.layout.obstacles, plan.mode, plan.heal
    );
}

/// Places every member relative to its platform, or parks it out of play.
pub(crate) fn sync_members(
    tuning: Res<RunnerTuning>,
    platforms: Query<(&Transform, &Active), With<Platform>>,
    mut members: Query<(&PlatformMember, &Active, &mut Transform, &mut Visibility), Without<Platform>>,
) {
    for (member, active, mut transform, mut visibility) in &mut members {
        let live = active.0
            && platforms
                .get(member.platform)
                .is_ok_and(|(_, platform_active)| platform_active.0);
        let target = match platforms.get(member.platform) {
            Ok((platform, _)) if live => platform.translation.truncate() + member.local,
            _ => Vec2::new(tuning.spawn_x, tuning.park_y),
        };
        transform.translation.x = target.x;
        transform.translation.y = target.y;
        let wanted = if live {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }
}

/// Platforms past the left edge go back to the pool; one-off scenery is
/// despawned.
pub(crate) fn retire_offscreen(
    mut commands: Commands,
    tuning: Res<RunnerTuning>,
    mut platforms: Query<(&mut Transform, &mut Active, &mut Visibility), With<Platform>>,
    transients: Query<(Entity, &Transform), (With<Transient>, Without<Platform>)>,
) {
    for (mut transform, mut active, mut visibility) in &mut platforms {
        if active.0 && transform.translation.x < tuning.despawn_x {
            active.0 = false;
            transform.translation.y = tuning.park_y;
        }
        let wanted = if active.0 {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }

    for (entity, transform) in &transients {
        if transform.translation.x < tuning.despawn_x {
            commands.entity(entity).despawn();
        }
    }
}
