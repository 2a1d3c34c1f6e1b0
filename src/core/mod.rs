//! Core domain: game states, scene routing and the splash screen.

pub mod easing;
mod events;
mod state;
mod systems;
mod ui;


pub use events::SceneRequest;
pub use state::{GameState, SCENE_RUN, SCENE_TITLE};

use bevy::prelude::*;

use crate::core::systems::{apply_scene_requests, setup_camera};
use crate::core::ui::splash::{cleanup_splash, spawn_splash, tick_splash};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_message::<SceneRequest>()
            .add_systems(Startup, setup_camera)
            .add_systems(OnEnter(GameState::Splash), spawn_splash)
            .add_systems(OnExit(GameState::Splash), cleanup_splash)
            .add_systems(
                Update,
                tick_splash.run_if(in_state(GameState::Splash)),
            )
            .add_systems(Update, apply_scene_requests);
    }
}
