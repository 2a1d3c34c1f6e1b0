//! UI domain: run HUD, results panel, settings panel and their effects.

mod fx;
mod hud;
mod results;
mod settings;

#[cfg(test)]
mod tests;

pub use fx::format_thousands;
pub use settings::SettingsOpen;

use bevy::prelude::*;

use crate::core::GameState;
use crate::session::SessionStart;
use crate::ui::hud::{
    animate_heal_popups, spawn_heal_popups, spawn_hud, update_danger_flash, update_hp_bar,
    update_low_hp_warning, update_score_text,
};
use crate::ui::results::{animate_results, cleanup_results, handle_check_button, show_results};
use crate::ui::settings::{cleanup_settings, handle_settings_buttons, toggle_settings};

/// Despawned with the run scene.
#[derive(Component)]
pub struct RunUi;

/// While any of these exist, Esc does not open settings.
#[derive(Component)]
pub struct BlocksSettings;

/// Absolute node covering the whole window.
pub(crate) fn full_screen() -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(0.0),
        right: Val::Px(0.0),
        top: Val::Px(0.0),
        bottom: Val::Px(0.0),
        ..default()
    }
}

fn cleanup_run_ui(mut commands: Commands, query: Query<Entity, With<RunUi>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Run), spawn_hud.after(SessionStart))
            .add_systems(
                OnExit(GameState::Run),
                (cleanup_run_ui, cleanup_results, cleanup_settings),
            )
            .add_systems(OnExit(GameState::Title), cleanup_settings)
            .add_systems(
                Update,
                (
                    update_hp_bar,
                    update_score_text,
                    update_low_hp_warning,
                    update_danger_flash,
                    spawn_heal_popups,
                    animate_heal_popups,
                    show_results,
                    animate_results,
                    handle_check_button,
                )
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                Update,
                (toggle_settings, handle_settings_buttons)
                    .chain()
                    .run_if(in_state(GameState::Run).or(in_state(GameState::Title))),
            );
    }
}
