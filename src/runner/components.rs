//! Runner domain: components and physics layers for the run world.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::session::Collectible;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Platforms the player stands on
    Ground,
    /// Player character
    Player,
    /// Obstacles and the fall zone
    Hazard,
    /// Jellies, coins and heal pickups
    Pickup,
}

/// Everything spawned for a run. Despawned when the run scene exits.
#[derive(Component, Debug)]
pub struct RunWorld;

#[derive(Component, Debug)]
pub struct Player;

#[derive(Component, Debug, Default)]
pub struct RunnerState {
    pub on_ground: bool,
    /// Seconds since the player last touched ground.
    pub air_time: f32,
    pub jumps_used: u8,
    pub sliding: bool,
}

/// Sprite child of the player, offset while sliding.
#[derive(Component, Debug)]
pub struct PlayerVisual {
    pub tint: Color,
    /// Set once the death animation has been triggered.
    pub death_shown: bool,
}

/// Eye sprite that blinks at random intervals.
#[derive(Component, Debug)]
pub struct EyeBlink {
    pub timer: f32,
    pub open: bool,
}

/// Moves left with the run's scroll speed.
#[derive(Component, Debug, Clone, Copy)]
pub struct Scrolling {
    /// Multiplier on the scroll speed, below 1 for parallax layers.
    pub factor: f32,
}

impl Default for Scrolling {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

/// Despawned once it scrolls far enough off the left edge.
#[derive(Component, Debug)]
pub struct Transient;

/// A pooled platform, repositioned each time the spawner reuses it.
#[derive(Component, Debug)]
pub struct Platform {
    pub index: usize,
}

/// Solid only from above: the player passes through its sides and
/// underside.
#[derive(Component, Debug)]
pub struct OneWayPlatform;

/// Anything riding on a pooled platform at a local offset.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlatformMember {
    pub platform: Entity,
    /// Offset restored every time the platform is reused.
    pub home: Vec2,
    /// Current offset. Differs from `home` while a magnet pulls it.
    pub local: Vec2,
}

impl PlatformMember {
    pub fn new(platform: Entity, home: Vec2) -> Self {
        Self {
            platform,
            home,
            local: home,
        }
    }
}

/// Marks a member as live for the current platform reuse.
#[derive(Component, Debug, Default)]
pub struct Active(pub bool);

#[derive(Component, Debug)]
pub struct Obstacle {
    pub index: usize,
}

#[derive(Component, Debug)]
pub struct LongObstacle;

#[derive(Component, Debug)]
pub struct Pickup {
    pub slot: usize,
    pub item: Collectible,
}

#[derive(Component, Debug)]
pub struct HealthPickup;

/// Below the platforms; touching it ends the run.
#[derive(Component, Debug)]
pub struct FallZone;

#[derive(Component, Debug)]
pub struct BackgroundTile {
    pub width: f32,
}

pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(
        GameLayer::Player,
        [GameLayer::Ground, GameLayer::Hazard, GameLayer::Pickup],
    )
}

pub fn ground_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Ground, [GameLayer::Player])
}

pub fn hazard_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player])
}

pub fn pickup_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Pickup, [GameLayer::Player])
}
