//! Title domain: character shop and the run start sequence.

mod shop;
mod ui;


use bevy::prelude::*;

use crate::core::GameState;
use crate::title::ui::{
    cleanup_title, enter_title, handle_card_input, handle_start, refresh_title, tick_start,
    tick_tooltip,
};

pub struct TitlePlugin;

impl Plugin for TitlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Title), enter_title)
            .add_systems(OnExit(GameState::Title), cleanup_title)
            .add_systems(
                Update,
                (
                    handle_card_input,
                    handle_start,
                    refresh_title,
                    tick_tooltip,
                    tick_start,
                )
                    .chain()
                    .run_if(in_state(GameState::Title)),
            );
    }
}
