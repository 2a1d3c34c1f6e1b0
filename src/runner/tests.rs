//! Runner domain: tests for patterns, trails, magnet and background wrap.

use std::time::Duration;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::components::{Active, HealthPickup, Pickup, PlatformMember, Player, RunnerState};
use super::patterns::*;
use super::resources::*;
use super::systems::contacts::{magnet_pull, magnet_step, one_way_contact_allowed};
use super::systems::scrolling::wrapped_tile_x;
use super::systems::spawner::PlatformPlan;
use super::systems::visual::invincible_alpha;
use super::trails::*;
use super::{systems, trails};
use crate::content::ContentRegistry;
use crate::session::{Collectible, RampTuning, RunSession};

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn assert_vec_near(a: Vec2, b: Vec2) {
    assert!(a.distance(b) < 1e-3, "{a:?} != {b:?}");
}

// ---- pattern tests ----

#[test]
fn test_patterns_rotate_every_span() {
    assert_eq!(ObstaclePattern::for_spawn(0, 8), ObstaclePattern::Random);
    assert_eq!(ObstaclePattern::for_spawn(7, 8), ObstaclePattern::Random);
    assert_eq!(ObstaclePattern::for_spawn(8, 8), ObstaclePattern::ZigZag);
    assert_eq!(ObstaclePattern::for_spawn(16, 8), ObstaclePattern::Tunnel);
    assert_eq!(ObstaclePattern::for_spawn(24, 8), ObstaclePattern::Random);
}

#[test]
fn test_zero_span_is_treated_as_one() {
    assert_eq!(ObstaclePattern::for_spawn(1, 0), ObstaclePattern::ZigZag);
}

#[test]
fn test_zigzag_lights_only_the_walker() {
    let layout = obstacle_layout(ObstaclePattern::ZigZag, 4, &mut rng());
    assert_eq!(layout.obstacles, [false, true, false]);
    assert!(!layout.long);
}

#[test]
fn test_tunnel_leaves_only_the_walker_open() {
    let layout = obstacle_layout(ObstaclePattern::Tunnel, 5, &mut rng());
    assert_eq!(layout.obstacles, [true, true, false]);
}

#[test]
fn test_long_pattern_uses_outer_obstacles_and_long_block() {
    let layout = obstacle_layout(ObstaclePattern::Long, 3, &mut rng());
    assert_eq!(layout.obstacles, [true, false, true]);
    assert!(layout.long);
}

#[test]
fn test_random_pattern_fills_about_a_third() {
    let mut rng = rng();
    let mut lit = 0;
    let rolls = 3000;
    for step in 0..rolls {
        let layout = obstacle_layout(ObstaclePattern::Random, step, &mut rng);
        lit += layout.obstacles.iter().filter(|on| **on).count();
    }
    let ratio = lit as f32 / (rolls as f32 * OBSTACLE_COUNT as f32);
    assert!((0.28..0.39).contains(&ratio), "ratio {ratio}");
}

#[test]
fn test_pickup_slots_follow_obstacles() {
    let layout = ObstacleLayout {
        obstacles: [true, false, true],
        long: false,
    };
    let slots = pickup_slots(&layout);
    let lit: Vec<usize> = (0..PICKUP_SLOT_COUNT).filter(|i| slots[*i]).collect();
    assert_eq!(lit, vec![0, 1, 3, 4, 8, 9, 10]);
}

#[test]
fn test_pickup_slots_for_clear_platform() {
    let slots = pickup_slots(&ObstacleLayout::default());
    let lit: Vec<usize> = (0..PICKUP_SLOT_COUNT).filter(|i| slots[*i]).collect();
    assert_eq!(lit, vec![0, 1, 2, 4, 7, 9, 10]);
}

#[test]
fn test_long_layout_swaps_middle_groups_for_high_arc() {
    let layout = obstacle_layout(ObstaclePattern::Long, 0, &mut rng());
    let slots = pickup_slots(&layout);
    assert!(!slots[4]);
    assert!(!slots[5]);
    assert!(slots[6]);
    assert!(slots[3] && !slots[2]);
    assert!(slots[8] && !slots[7]);
}

#[test]
fn test_pickup_mode_maps_to_collectible() {
    assert_eq!(PickupMode::Jelly.collectible(), Collectible::Jelly);
    assert_eq!(PickupMode::Silver.collectible(), Collectible::SilverCoin);
    assert_eq!(PickupMode::Gold.collectible(), Collectible::GoldCoin);
}

// ---- spawner tests ----

#[test]
fn test_platform_plan_is_deterministic_for_a_seed() {
    let tuning = RunnerTuning::default();
    let a = PlatformPlan::roll(3, &tuning, &mut rng());
    let b = PlatformPlan::roll(3, &tuning, &mut rng());
    assert_eq!(a, b);
}

#[test]
fn test_platform_plan_heal_chance_extremes() {
    let mut tuning = RunnerTuning {
        health_pickup_chance: 1.0,
        ..default()
    };
    assert!(PlatformPlan::roll(0, &tuning, &mut rng()).heal);
    tuning.health_pickup_chance = 0.0;
    assert!(!PlatformPlan::roll(0, &tuning, &mut rng()).heal);
}

#[test]
fn test_long_pattern_only_replaces_random() {
    let tuning = RunnerTuning {
        long_pattern_chance: 1.0,
        ..default()
    };
    let random_phase = PlatformPlan::roll(0, &tuning, &mut rng());
    assert_eq!(random_phase.pattern, ObstaclePattern::Long);
    assert!(random_phase.layout.long);

    let zigzag_phase = PlatformPlan::roll(tuning.pattern_span, &tuning, &mut rng());
    assert_eq!(zigzag_phase.pattern, ObstaclePattern::ZigZag);
}

#[test]
fn test_spawner_cycles_through_pool() {
    let mut world = World::new();
    let a = world.spawn_empty().id();
    let b = world.spawn_empty().id();

    let mut spawner = SpawnerState::with_seed(1);
    assert_eq!(spawner.take_next(), None);

    spawner.pool = vec![a, b];
    assert_eq!(spawner.take_next(), Some(a));
    assert_eq!(spawner.take_next(), Some(b));
    assert_eq!(spawner.take_next(), Some(a));
}

#[test]
fn test_pool_is_not_reused_while_on_screen() {
    let tuning = RunnerTuning::default();
    let ramp = RampTuning::default();
    let slowest = ramp.scroll_speed * ramp.start_speed_factor;
    let shortest = ramp.spawn_interval_start.min(ramp.spawn_interval_end);
    let travel = tuning.pool_size as f32 * shortest * slowest;
    // Spawn point to fully past the left edge of a 1280 wide view.
    let needed = tuning.spawn_x + 640.0 + tuning.platform_size.x * 0.5;
    assert!(travel >= needed, "travel {travel} < {needed}");
}

#[test]
fn test_single_jump_clears_an_obstacle() {
    let tuning = RunnerTuning::default();
    assert!(tuning.jump_height() > tuning.obstacle_size.y);
    assert!(tuning.jump_height() > tuning.long_obstacle_size.y);
}

// ---- trail tests ----

#[test]
fn test_sampling_includes_end_when_it_fits() {
    let line = [Vec2::ZERO, Vec2::new(80.0, 0.0)];
    let points = sample_polyline(&line, 40.0, 0.0, true);
    assert_eq!(points.len(), 3);
    assert_vec_near(points[2], Vec2::new(80.0, 0.0));

    let points = sample_polyline(&line, 40.0, 0.0, false);
    assert_eq!(points.len(), 2);
}

#[test]
fn test_sampling_honours_start_offset() {
    let line = [Vec2::ZERO, Vec2::new(100.0, 0.0)];
    let points = sample_polyline(&line, 40.0, 10.0, true);
    assert_eq!(points.len(), 3);
    assert_vec_near(points[0], Vec2::new(10.0, 0.0));
    assert_vec_near(points[1], Vec2::new(50.0, 0.0));
    assert_vec_near(points[2], Vec2::new(90.0, 0.0));
}

#[test]
fn test_sampling_walks_around_corners() {
    let path = [Vec2::ZERO, Vec2::new(30.0, 0.0), Vec2::new(30.0, 30.0)];
    let points = sample_polyline(&path, 20.0, 0.0, true);
    assert_eq!(points.len(), 4);
    assert_vec_near(points[1], Vec2::new(20.0, 0.0));
    assert_vec_near(points[2], Vec2::new(30.0, 10.0));
    assert_vec_near(points[3], Vec2::new(30.0, 30.0));
}

#[test]
fn test_degenerate_paths_yield_nothing() {
    assert!(sample_polyline(&[Vec2::ONE], 10.0, 0.0, true).is_empty());
    assert!(sample_polyline(&[Vec2::ONE, Vec2::ONE], 10.0, 0.0, true).is_empty());
    assert!(sample_polyline(&[], 10.0, 0.0, true).is_empty());
}

#[test]
fn test_snap_direction_picks_nearest_heading() {
    let snapped = snap_direction(Vec2::new(1.0, 0.2), &trails::SNAP_ANGLES_DEG);
    assert_vec_near(snapped, Vec2::X);

    let snapped = snap_direction(Vec2::new(1.0, 0.9), &trails::SNAP_ANGLES_DEG);
    assert_vec_near(snapped, Vec2::new(1.0, 1.0).normalize());

    let snapped = snap_direction(Vec2::new(0.1, -1.0), &trails::SNAP_ANGLES_DEG);
    assert_vec_near(snapped, Vec2::NEG_Y);
}

#[test]
fn test_snap_polyline_keeps_segment_lengths() {
    let path = [Vec2::ZERO, Vec2::new(10.0, 1.0)];
    let snapped = snap_polyline(&path, &trails::SNAP_ANGLES_DEG);
    assert_eq!(snapped.len(), 2);
    assert_vec_near(snapped[1], Vec2::new(101.0_f32.sqrt(), 0.0));
}

#[test]
fn test_every_builtin_slot_places_pickups() {
    let registry = ContentRegistry::builtin();
    assert_eq!(registry.pickup_layout.len(), PICKUP_SLOT_COUNT);
    for slot in &registry.pickup_layout {
        let points = sample_trail(&slot.trail);
        assert!(!points.is_empty(), "slot {} is empty", slot.slot);
        // Everything sits above the platform top.
        assert!(points.iter().all(|p| p.y > RunnerTuning::default().platform_size.y * 0.5));
    }
}

// ---- magnet tests ----

#[test]
fn test_magnet_pulls_faster_when_closer() {
    let near = magnet_step(Vec2::ZERO, Vec2::new(100.0, 0.0), 300.0, 700.0, 1100.0, 0.01);
    let far = magnet_step(Vec2::ZERO, Vec2::new(250.0, 0.0), 300.0, 700.0, 1100.0, 0.01);
    let (Some(near), Some(far)) = (near, far) else {
        panic!("both pickups are in range");
    };
    assert!((near.x - 14.333).abs() < 0.01);
    assert!(near.x > far.x);
    assert_eq!(near.y, 0.0);
}

#[test]
fn test_magnet_ignores_pickups_out_of_range() {
    assert_eq!(
        magnet_step(Vec2::ZERO, Vec2::new(400.0, 0.0), 300.0, 700.0, 1100.0, 0.01),
        None
    );
}

#[test]
fn test_magnet_never_overshoots() {
    let step = magnet_step(Vec2::ZERO, Vec2::new(0.0, 50.0), 300.0, 700.0, 1100.0, 1.0);
    assert_eq!(step, Some(Vec2::new(0.0, 50.0)));
}

/// A world with a magnet character standing at the origin, 0.1 s into
/// the frame.
fn magnet_world() -> World {
    let mut world = World::new();
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_millis(100));
    world.insert_resource(time);
    world.insert_resource(RunnerTuning::default());
    world.insert_resource(RunSession {
        magnet: true,
        ..default()
    });
    world.spawn((Player, RunnerState::default(), Transform::default()));
    world
}

#[test]
fn test_magnet_pulls_heal_pickups_like_jellies() {
    let mut world = magnet_world();
    let platform = world.spawn_empty().id();
    let home = Vec2::new(200.0, 0.0);
    let heal = world
        .spawn((
            HealthPickup,
            PlatformMember::new(platform, home),
            Active(true),
            Transform::from_xyz(200.0, 0.0, 0.0),
        ))
        .id();
    let jelly = world
        .spawn((
            Pickup {
                slot: 0,
                item: Collectible::Jelly,
            },
            PlatformMember::new(platform, home),
            Active(true),
            Transform::from_xyz(200.0, 0.0, 0.0),
        ))
        .id();

    world
        .run_system_once(magnet_pull)
        .expect("magnet system should run");

    let heal_local = world.get::<PlatformMember>(heal).expect("heal pickup").local;
    let jelly_local = world.get::<PlatformMember>(jelly).expect("jelly").local;
    assert!(heal_local.x < home.x, "heal pickup was not pulled");
    assert_vec_near(heal_local, jelly_local);
}

#[test]
fn test_magnet_leaves_consumed_heal_pickups() {
    let mut world = magnet_world();
    let platform = world.spawn_empty().id();
    let home = Vec2::new(150.0, 20.0);
    let heal = world
        .spawn((
            HealthPickup,
            PlatformMember::new(platform, home),
            Active(false),
            Transform::from_xyz(150.0, 20.0, 0.0),
        ))
        .id();

    world
        .run_system_once(magnet_pull)
        .expect("magnet system should run");

    let local = world.get::<PlatformMember>(heal).expect("heal pickup").local;
    assert_vec_near(local, home);
}

// ---- one-way platform tests ----

#[test]
fn test_landing_on_platform_top_is_solid() {
    assert!(one_way_contact_allowed(Vec2::Y, 120.0, 120.0));
    // Slightly sunk in after a fast fall still lands.
    assert!(one_way_contact_allowed(Vec2::Y, 114.0, 120.0));
}

#[test]
fn test_platform_side_lets_player_through() {
    // The leading edge of a scrolling platform hits the player from the side.
    assert!(!one_way_contact_allowed(Vec2::NEG_X, 100.0, 120.0));
    assert!(!one_way_contact_allowed(Vec2::new(-1.0, 0.3), 119.0, 120.0));
}

#[test]
fn test_platform_underside_lets_player_through() {
    assert!(!one_way_contact_allowed(Vec2::NEG_Y, 60.0, 120.0));
    // Upward normal but the feet are well below the top.
    assert!(!one_way_contact_allowed(Vec2::Y, 90.0, 120.0));
}

#[test]
fn test_degenerate_normal_is_dropped() {
    assert!(!one_way_contact_allowed(Vec2::ZERO, 200.0, 120.0));
}

// ---- background and visual tests ----

#[test]
fn test_tile_wraps_after_leaving_view() {
    let rightmost = 1280.0;
    assert_eq!(wrapped_tile_x(-1200.0, 1280.0, -640.0, rightmost), None);
    let wrapped = wrapped_tile_x(-1300.0, 1280.0, -640.0, rightmost);
    assert_eq!(wrapped, Some(rightmost + 640.0 - systems::scrolling::TILE_OVERLAP));
}

#[test]
fn test_invincible_blink_stays_in_range() {
    for i in 0..100 {
        let alpha = invincible_alpha(i as f32 * 0.013);
        assert!((0.5..=0.8).contains(&alpha), "alpha {alpha}");
    }
    assert!((invincible_alpha(0.0) - 0.5).abs() < 1e-6);
}
