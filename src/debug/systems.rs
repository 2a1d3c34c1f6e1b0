//! Debug domain: hold-to-open input and dev panel actions.

use bevy::prelude::*;

use crate::debug::state::{DevAction, DevPanelState, apply_dev_action};
use crate::debug::ui::{
    DevAmountText, DevButton, DevPanelUi, DevStatusMessage, despawn_dev_panel, spawn_dev_panel,
};
use crate::prefs::PrefStore;

/// Hold Z on the title screen to open the panel; tap Z to close it.
pub(crate) fn toggle_dev_panel(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time<Real>>,
    mut dev_state: ResMut<DevPanelState>,
    existing_ui: Query<Entity, With<DevPanelUi>>,
) {
    if dev_state.visible {
        if keyboard.just_pressed(KeyCode::KeyZ) {
            dev_state.visible = false;
            despawn_dev_panel(&mut commands, &existing_ui);
            info!("[DEBUG] Dev panel closed");
        }
        return;
    }

    let held = keyboard.pressed(KeyCode::KeyZ);
    if dev_state.track_hold(held, time.delta_secs()) {
        dev_state.visible = true;
        spawn_dev_panel(&mut commands);
        info!("[DEBUG] Dev panel opened");
    }
}

const DIGIT_KEYS: [(KeyCode, KeyCode); 10] = [
    (KeyCode::Digit0, KeyCode::Numpad0),
    (KeyCode::Digit1, KeyCode::Numpad1),
    (KeyCode::Digit2, KeyCode::Numpad2),
    (KeyCode::Digit3, KeyCode::Numpad3),
    (KeyCode::Digit4, KeyCode::Numpad4),
    (KeyCode::Digit5, KeyCode::Numpad5),
    (KeyCode::Digit6, KeyCode::Numpad6),
    (KeyCode::Digit7, KeyCode::Numpad7),
    (KeyCode::Digit8, KeyCode::Numpad8),
    (KeyCode::Digit9, KeyCode::Numpad9),
];

/// Types digits into the coin amount field. Keys it handles are consumed
/// so the title screen's number shortcuts stay quiet while the panel is open.
pub(crate) fn type_coin_amount(
    mut keyboard: ResMut<ButtonInput<KeyCode>>,
    mut dev_state: ResMut<DevPanelState>,
) {
    if !dev_state.visible {
        return;
    }
    for (digit, (key, numpad)) in DIGIT_KEYS.into_iter().enumerate() {
        let main = keyboard.clear_just_pressed(key);
        let pad = keyboard.clear_just_pressed(numpad);
        if main || pad {
            dev_state.push_digit(digit as u8);
        }
    }
    if keyboard.clear_just_pressed(KeyCode::Backspace) {
        dev_state.pop_digit();
    }
}

pub(crate) fn update_amount_text(
    dev_state: Res<DevPanelState>,
    mut text_query: Query<&mut Text, With<DevAmountText>>,
) {
    let shown = format!("Amount: {}_", dev_state.amount_input);
    for mut text in &mut text_query {
        if text.0 != shown {
            text.0.clone_from(&shown);
        }
    }
}

pub(crate) fn handle_dev_buttons(
    mut commands: Commands,
    mut dev_state: ResMut<DevPanelState>,
    mut prefs: ResMut<PrefStore>,
    button_query: Query<(&DevButton, &Interaction), Changed<Interaction>>,
    existing_ui: Query<Entity, With<DevPanelUi>>,
) {
    for (button, interaction) in &button_query {
        if *interaction != Interaction::Pressed {
            continue;
        }

        let amount = dev_state.amount();
        match apply_dev_action(&mut prefs, button.action, amount) {
            Some(msg) => {
                info!("[DEBUG] {}", msg);
                dev_state.set_message(msg);
            }
            None if button.action == DevAction::Close => {
                dev_state.visible = false;
                despawn_dev_panel(&mut commands, &existing_ui);
            }
            None => {}
        }
    }
}

/// Update status message timer and mirror it into the panel
pub(crate) fn update_status_message(
    time: Res<Time<Real>>,
    mut dev_state: ResMut<DevPanelState>,
    mut text_query: Query<&mut Text, With<DevStatusMessage>>,
) {
    if let Some((_, ref mut duration)) = dev_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            dev_state.status_message = None;
        }
    }

    let shown = dev_state
        .status_message
        .as_ref()
        .map(|(msg, _)| msg.as_str())
        .unwrap_or("");
    for mut text in &mut text_query {
        if text.0 != shown {
            text.0 = shown.to_string();
        }
    }
}

pub(crate) fn close_dev_panel(
    mut commands: Commands,
    mut dev_state: ResMut<DevPanelState>,
    existing_ui: Query<Entity, With<DevPanelUi>>,
) {
    *dev_state = DevPanelState::default();
    despawn_dev_panel(&mut commands, &existing_ui);
}
