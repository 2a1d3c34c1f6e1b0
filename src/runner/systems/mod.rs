//! Runner domain: system modules for the run world.

pub(crate) mod contacts;
pub(crate) mod input;
pub(crate) mod player;
pub(crate) mod scrolling;
pub(crate) mod spawner;
pub(crate) mod visual;

pub(crate) use contacts::{handle_contacts, magnet_pull};
pub(crate) use input::read_input;
pub(crate) use player::{
    apply_gravity, apply_jump, apply_slide, detect_ground, pin_player_x, reset_after_revive,
};
pub(crate) use scrolling::{scroll_world, wrap_background};
pub(crate) use spawner::{retire_offscreen, sync_members, tick_spawner};
pub(crate) use visual::{animate_player_visual, blink_eyes};
