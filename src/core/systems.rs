//! Core domain: camera setup and scene routing.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::events::SceneRequest;
use crate::core::state::GameState;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn apply_scene_requests(
    mut requests: MessageReader<SceneRequest>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for request in requests.read() {
        let Some(target) = GameState::from_scene(&request.scene) else {
            warn!("Unknown scene '{}', ignoring load request", request.scene);
            continue;
        };
        info!(
            "Loading scene '{}' (from {:?})",
            target.scene_name(),
            state.get()
        );
        next_state.set(target);
    }
}
