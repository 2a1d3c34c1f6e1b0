//! Runner domain: building and tearing down the run world.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::content::ContentRegistry;
use crate::runner::components::{
    Active, BackgroundTile, EyeBlink, FallZone, HealthPickup, LongObstacle, Obstacle,
    OneWayPlatform, Pickup, Platform, PlatformMember, Player, PlayerVisual, RunWorld, RunnerState, Scrolling, Transient,
    ground_layers, hazard_layers, pickup_layers, player_layers,
};
use crate::runner::patterns::OBSTACLE_COUNT;
use crate::runner::resources::{RunnerInput, RunnerTuning, SpawnerState};
use crate::runner::trails::sample_trail;
use crate::session::{Collectible, RunSession};

const PLATFORM_COLOR: Color = Color::srgb(0.55, 0.36, 0.5);
const OBSTACLE_COLOR: Color = Color::srgb(0.3, 0.22, 0.35);
const HEAL_COLOR: Color = Color::srgb(1.0, 0.45, 0.55);
const START_GROUND_WIDTH: f32 = 1600.0;
const START_GROUND_X: f32 = -200.0;

/// Parallax layers: width of one tile, tiles per layer, scroll factor,
/// height, centre y, colour.
const BACKGROUND_LAYERS: [(f32, usize, f32, f32, f32, Color); 2] = [
    (1280.0, 2, 0.2, 720.0, 0.0, Color::srgb(0.99, 0.9, 0.93)),
    (800.0, 3, 0.5, 220.0, -180.0, Color::srgb(0.93, 0.78, 0.86)),
];

pub(crate) fn spawn_run_world(
    mut commands: Commands,
    tuning: Res<RunnerTuning>,
    registry: Res<ContentRegistry>,
    session: Res<RunSession>,
    mut spawner: ResMut<SpawnerState>,
    mut input: ResMut<RunnerInput>,
) {
    *spawner = SpawnerState::default();
    *input = RunnerInput::default();

    let tint = registry
        .character(session.character_id)
        .map(|def| def.tint())
        .unwrap_or(Color::srgb(0.95, 0.4, 0.55));
    spawn_player(&mut commands, &tuning, tint);
    spawn_start_ground(&mut commands, &tuning);

    let pickup_points: Vec<(usize, Vec<Vec2>)> = registry
        .pickup_layout
        .iter()
        .map(|slot| (slot.slot, sample_trail(&slot.trail)))
        .collect();

    for index in 0..tuning.pool_size {
        let platform = spawn_platform(&mut commands, &tuning, index);
        spawn_platform_members(&mut commands, &tuning, platform, &pickup_points);
        spawner.pool.push(platform);
    }

    commands.spawn((
        RunWorld,
        FallZone,
        Sensor,
        Collider::rectangle(6000.0, 60.0),
        hazard_layers(),
        Transform::from_xyz(0.0, tuning.fall_zone_y, 0.0),
    ));

    spawn_background(&mut commands);

    info!(
        "Run world spawned: {} pooled platforms, {} pickups each",
        spawner.pool.len(),
        pickup_points.iter().map(|(_, p)| p.len()).sum::<usize>()
    );
}

fn spawn_player(commands: &mut Commands, tuning: &RunnerTuning, tint: Color) {
    let ground_top = tuning.platform_y + tuning.platform_size.y * 0.5;
    let y = ground_top + tuning.player_size.y * 0.5 + 1.0;

    commands
        .spawn((
            (RunWorld, Player, RunnerState::default()),
            Transform::from_xyz(tuning.player_x, y, 1.0),
            Visibility::default(),
            (
                RigidBody::Dynamic,
                Collider::rectangle(tuning.player_size.x, tuning.player_size.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                GravityScale(0.0),
                Friction::new(0.0),
                CollisionEventsEnabled,
                player_layers(),
            ),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    PlayerVisual {
                        tint,
                        death_shown: false,
                    },
                    Sprite {
                        color: tint,
                        custom_size: Some(tuning.player_size),
                        ..default()
                    },
                    Transform::default(),
                ))
                .with_children(|visual| {
                    visual.spawn((
                        EyeBlink {
                            timer: 1.0,
                            open: true,
                        },
                        Sprite {
                            color: Color::srgb(0.15, 0.1, 0.15),
                            custom_size: Some(Vec2::new(8.0, 12.0)),
                            ..default()
                        },
                        Transform::from_xyz(10.0, 14.0, 0.1),
                    ));
                });
        });
}

fn spawn_start_ground(commands: &mut Commands, tuning: &RunnerTuning) {
    let size = Vec2::new(START_GROUND_WIDTH, tuning.platform_size.y);
    commands.spawn((
        RunWorld,
        Scrolling::default(),
        Transient,
        Sprite {
            color: PLATFORM_COLOR,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_xyz(START_GROUND_X, tuning.platform_y, 0.0),
        RigidBody::Kinematic,
        Collider::rectangle(size.x, size.y),
        Friction::new(0.0),
        ground_layers(),
        OneWayPlatform,
        ActiveCollisionHooks::MODIFY_CONTACTS,
    ));
}

fn spawn_platform(commands: &mut Commands, tuning: &RunnerTuning, index: usize) -> Entity {
    commands
        .spawn((
            RunWorld,
            Platform { index },
            Active(false),
            Scrolling::default(),
            Sprite {
                color: PLATFORM_COLOR,
                custom_size: Some(tuning.platform_size),
                ..default()
            },
            Transform::from_xyz(tuning.spawn_x, tuning.park_y, 0.0),
            Visibility::Hidden,
            RigidBody::Kinematic,
            Collider::rectangle(tuning.platform_size.x, tuning.platform_size.y),
            Friction::new(0.0),
            ground_layers(),
            OneWayPlatform,
            ActiveCollisionHooks::MODIFY_CONTACTS,
        ))
        .id()
}

/// Obstacles, pickups and the heal pickup for one pooled platform. They
/// start parked and hidden until the spawner activates them.
fn spawn_platform_members(
    commands: &mut Commands,
    tuning: &RunnerTuning,
    platform: Entity,
    pickup_points: &[(usize, Vec<Vec2>)],
) {
    let parked = Transform::from_xyz(tuning.spawn_x, tuning.park_y, 0.5);

    for index in 0..OBSTACLE_COUNT {
        commands.spawn((
            RunWorld,
            Obstacle { index },
            PlatformMember::new(platform, tuning.obstacle_local(index)),
            Active(false),
            Sprite {
                color: OBSTACLE_COLOR,
                custom_size: Some(tuning.obstacle_size),
                ..default()
            },
            parked,
            Visibility::Hidden,
            Sensor,
            Collider::rectangle(tuning.obstacle_size.x, tuning.obstacle_size.y),
            hazard_layers(),
        ));
    }

    commands.spawn((
        RunWorld,
        LongObstacle,
        PlatformMember::new(platform, tuning.long_obstacle_local()),
        Active(false),
        Sprite {
            color: OBSTACLE_COLOR,
            custom_size: Some(tuning.long_obstacle_size),
            ..default()
        },
        parked,
        Visibility::Hidden,
        Sensor,
        Collider::rectangle(tuning.long_obstacle_size.x, tuning.long_obstacle_size.y),
        hazard_layers(),
    ));

    for (slot, points) in pickup_points {
        for point in points {
            commands.spawn((
                RunWorld,
                Pickup {
                    slot: *slot,
                    item: Collectible::Jelly,
                },
                PlatformMember::new(platform, *point),
                Active(false),
                Sprite {
                    color: pickup_color(Collectible::Jelly),
                    custom_size: Some(Vec2::splat(tuning.pickup_radius * 2.0)),
                    ..default()
                },
                parked,
                Visibility::Hidden,
                Sensor,
                Collider::circle(tuning.pickup_radius),
                pickup_layers(),
            ));
        }
    }

    commands.spawn((
        RunWorld,
        HealthPickup,
        PlatformMember::new(platform, tuning.health_pickup_local),
        Active(false),
        Sprite {
            color: HEAL_COLOR,
            custom_size: Some(Vec2::splat(tuning.pickup_radius * 2.5)),
            ..default()
        },
        parked,
        Visibility::Hidden,
        Sensor,
        Collider::circle(tuning.pickup_radius * 1.25),
        pickup_layers(),
    ));
}

fn spawn_background(commands: &mut Commands) {
    for (layer, (width, count, factor, height, y, color)) in BACKGROUND_LAYERS.iter().enumerate() {
        let left = -640.0 + width * 0.5;
        for i in 0..*count {
            commands.spawn((
                RunWorld,
                BackgroundTile { width: *width },
                Scrolling { factor: *factor },
                Sprite {
                    // Alternate shades so the seam between tiles is visible.
                    color: if i % 2 == 0 {
                        *color
                    } else {
                        color.darker(0.03)
                    },
                    custom_size: Some(Vec2::new(*width, *height)),
                    ..default()
                },
                Transform::from_xyz(left + i as f32 * width, *y, -10.0 + layer as f32),
            ));
        }
    }
}

pub fn pickup_color(item: Collectible) -> Color {
    match item {
        Collectible::Jelly => Color::srgb(0.98, 0.5, 0.75),
        Collectible::SilverCoin => Color::srgb(0.8, 0.82, 0.88),
        Collectible::GoldCoin => Color::srgb(1.0, 0.82, 0.25),
    }
}

pub(crate) fn cleanup_run_world(mut commands: Commands, query: Query<Entity, With<RunWorld>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}
