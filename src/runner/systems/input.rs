//! Runner domain: input sampling for jump and slide.

use bevy::prelude::*;

use crate::runner::RunnerInput;
use crate::session::{GameOverFlow, PauseControl, RunSession};

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    session: Res<RunSession>,
    flow: Res<GameOverFlow>,
    pause: Res<PauseControl>,
    mut input: ResMut<RunnerInput>,
) {
    if session.health.blocks_input() || flow.is_over() || pause.is_paused() {
        *input = RunnerInput::default();
        return;
    }

    let jump_keys = [KeyCode::Space, KeyCode::ArrowUp, KeyCode::KeyW];
    input.jump_just_pressed =
        keyboard.any_just_pressed(jump_keys) || mouse.just_pressed(MouseButton::Left);
    input.jump_just_released =
        keyboard.any_just_released(jump_keys) || mouse.just_released(MouseButton::Left);
    input.slide_held = keyboard.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS])
        || mouse.pressed(MouseButton::Right);
}
