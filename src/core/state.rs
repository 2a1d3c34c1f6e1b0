//! Core domain: game state definitions and scene names.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum GameState {
    #[default]
    Splash,
    Title,
    Run,
}

pub const SCENE_SPLASH: &str = "Splash";
pub const SCENE_TITLE: &str = "Title";
pub const SCENE_RUN: &str = "Main_2";

impl GameState {
    /// Maps a scene name to the state that hosts it.
    pub fn from_scene(name: &str) -> Option<Self> {
        match name {
            SCENE_SPLASH => Some(GameState::Splash),
            SCENE_TITLE => Some(GameState::Title),
            SCENE_RUN => Some(GameState::Run),
            _ => None,
        }
    }

    pub fn scene_name(&self) -> &'static str {
        match self {
            GameState::Splash => SCENE_SPLASH,
            GameState::Title => SCENE_TITLE,
            GameState::Run => SCENE_RUN,
        }
    }
}
