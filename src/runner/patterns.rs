//! Runner domain: obstacle patterns and the pickup slots they open.

use rand::Rng;

use crate::session::Collectible;

pub const OBSTACLE_COUNT: usize = 3;
pub const PICKUP_SLOT_COUNT: usize = 11;

/// Slots lit for every pattern: both platform edges.
const ALWAYS_ON_SLOTS: [usize; 4] = [0, 1, 9, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstaclePattern {
    /// Each obstacle independently with a one in three chance.
    Random,
    /// A single obstacle that walks one slot per spawn.
    ZigZag,
    /// Every obstacle except a walking gap.
    Tunnel,
    /// Outer obstacles plus the long middle block.
    Long,
}

impl ObstaclePattern {
    /// Patterns rotate Random, ZigZag, Tunnel every `span` spawns.
    pub fn for_spawn(spawn_count: u32, span: u32) -> Self {
        match (spawn_count / span.max(1)) % 3 {
            0 => ObstaclePattern::Random,
            1 => ObstaclePattern::ZigZag,
            _ => ObstaclePattern::Tunnel,
        }
    }
}

/// Which kind of collectible fills a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupMode {
    Jelly,
    Silver,
    Gold,
}

impl PickupMode {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => PickupMode::Jelly,
            1 => PickupMode::Silver,
            _ => PickupMode::Gold,
        }
    }

    pub fn collectible(self) -> Collectible {
        match self {
            PickupMode::Jelly => Collectible::Jelly,
            PickupMode::Silver => Collectible::SilverCoin,
            PickupMode::Gold => Collectible::GoldCoin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObstacleLayout {
    pub obstacles: [bool; OBSTACLE_COUNT],
    pub long: bool,
}

pub fn obstacle_layout<R: Rng>(pattern: ObstaclePattern, step: u32, rng: &mut R) -> ObstacleLayout {
    let n = OBSTACLE_COUNT;
    let walker = step as usize % n;
    let mut layout = ObstacleLayout::default();

    match pattern {
        ObstaclePattern::Random => {
            for slot in layout.obstacles.iter_mut() {
                *slot = rng.random_range(0..3) == 0;
            }
        }
        ObstaclePattern::ZigZag => {
            for (i, slot) in layout.obstacles.iter_mut().enumerate() {
                *slot = i == walker;
            }
        }
        ObstaclePattern::Tunnel => {
            for (i, slot) in layout.obstacles.iter_mut().enumerate() {
                *slot = i != walker;
            }
        }
        ObstaclePattern::Long => {
            layout.obstacles[0] = true;
            layout.obstacles[2] = true;
            layout.long = true;
        }
    }

    layout
}

/// Pickup groups to light for a layout. Low groups sit where an obstacle
/// would be; the matching high group arcs over it.
pub fn pickup_slots(layout: &ObstacleLayout) -> [bool; PICKUP_SLOT_COUNT] {
    let mut slots = [false; PICKUP_SLOT_COUNT];
    for i in ALWAYS_ON_SLOTS {
        slots[i] = true;
    }

    let [first, middle, last] = layout.obstacles;

    slots[3] = first;
    slots[2] = !first;

    slots[5] = middle;
    slots[4] = !middle;

    if layout.long {
        slots[4] = false;
        slots[5] = false;
        slots[6] = true;
    }

    slots[8] = last;
    slots[7] = !last;

    slots
}
