//! Runner domain: tuning, input and spawner resources.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// World layout and player feel, in pixels.
#[derive(Resource, Debug, Clone)]
pub struct RunnerTuning {
    pub player_x: f32,
    pub player_size: Vec2,
    pub slide_size: Vec2,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_jumps: u8,
    /// Releasing jump while rising multiplies vertical speed by this.
    pub jump_cut: f32,
    pub ground_grace: f32,
    pub ground_ray: f32,

    pub platform_size: Vec2,
    pub platform_y: f32,
    pub spawn_x: f32,
    pub pool_size: usize,
    /// Spawns per pattern before rotating to the next one.
    pub pattern_span: u32,
    /// Chance a Random-phase platform uses the long obstacle instead.
    pub long_pattern_chance: f32,
    pub health_pickup_chance: f32,
    pub obstacle_size: Vec2,
    pub obstacle_x: [f32; 3],
    pub long_obstacle_size: Vec2,
    pub health_pickup_local: Vec2,
    pub pickup_radius: f32,

    pub magnet_radius: f32,
    pub magnet_speed: f32,
    pub magnet_accel: f32,

    pub fall_zone_y: f32,
    /// Members are parked here while inactive.
    pub park_y: f32,
    pub despawn_x: f32,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            player_x: -400.0,
            player_size: Vec2::new(48.0, 64.0),
            slide_size: Vec2::new(62.0, 38.0),
            jump_velocity: 900.0,
            gravity: 2400.0,
            max_jumps: 2,
            jump_cut: 0.5,
            ground_grace: 0.12,
            ground_ray: 4.0,

            platform_size: Vec2::new(720.0, 40.0),
            platform_y: -250.0,
            spawn_x: 1000.0,
            pool_size: 4,
            pattern_span: 8,
            long_pattern_chance: 0.15,
            health_pickup_chance: 0.25,
            obstacle_size: Vec2::new(40.0, 70.0),
            obstacle_x: [-240.0, 0.0, 240.0],
            long_obstacle_size: Vec2::new(200.0, 40.0),
            health_pickup_local: Vec2::new(0.0, 190.0),
            pickup_radius: 14.0,

            magnet_radius: 300.0,
            magnet_speed: 700.0,
            magnet_accel: 1100.0,

            fall_zone_y: -520.0,
            park_y: -2000.0,
            despawn_x: -2400.0,
        }
    }
}

impl RunnerTuning {
    /// Local position of an obstacle standing on the platform top.
    pub fn obstacle_local(&self, index: usize) -> Vec2 {
        let top = self.platform_size.y * 0.5;
        Vec2::new(self.obstacle_x[index], top + self.obstacle_size.y * 0.5)
    }

    pub fn long_obstacle_local(&self) -> Vec2 {
        let top = self.platform_size.y * 0.5;
        Vec2::new(0.0, top + self.long_obstacle_size.y * 0.5)
    }

    /// Height of a single jump from standing.
    pub fn jump_height(&self) -> f32 {
        self.jump_velocity * self.jump_velocity / (2.0 * self.gravity)
    }
}

#[derive(Resource, Debug, Default)]
pub struct RunnerInput {
    pub jump_just_pressed: bool,
    pub jump_just_released: bool,
    pub slide_held: bool,
}

/// Pooled platform rotation.
#[derive(Resource, Debug)]
pub struct SpawnerState {
    pub pool: Vec<Entity>,
    pub next: usize,
    pub spawn_count: u32,
    /// Seconds until the next reuse.
    pub countdown: f32,
    pub rng: ChaCha8Rng,
}

impl Default for SpawnerState {
    fn default() -> Self {
        Self::with_seed(rand::rng().random())
    }
}

impl SpawnerState {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            pool: Vec::new(),
            next: 0,
            spawn_count: 0,
            countdown: 0.0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Next platform to reuse, advancing the cursor.
    pub fn take_next(&mut self) -> Option<Entity> {
        let entity = *self.pool.get(self.next)?;
        self.next = (self.next + 1) % self.pool.len();
        Some(entity)
    }
}
