//! Debug domain: developer panel for editing the saved profile.

mod state;
mod systems;
mod ui;

#[cfg(test)]
mod tests;

use bevy::input::InputSystems;
use bevy::prelude::*;

use crate::core::GameState;
use crate::debug::state::DevPanelState;
use crate::debug::systems::{
    close_dev_panel, handle_dev_buttons, toggle_dev_panel, type_coin_amount, update_amount_text,
    update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DevPanelState>()
            .add_systems(OnExit(GameState::Title), close_dev_panel)
            .add_systems(
                PreUpdate,
                type_coin_amount
                    .after(InputSystems)
                    .run_if(in_state(GameState::Title)),
            )
            .add_systems(
                Update,
                (
                    toggle_dev_panel,
                    handle_dev_buttons,
                    update_status_message,
                    update_amount_text,
                )
                    .chain()
                    .run_if(in_state(GameState::Title)),
            );
    }
}
