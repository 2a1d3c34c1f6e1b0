//! Core domain: scene transition requests.

use bevy::ecs::message::Message;

/// Ask for a scene by its fixed name.
#[derive(Debug, Clone)]
pub struct SceneRequest {
    pub scene: String,
}

impl SceneRequest {
    pub fn new(scene: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
        }
    }
}

impl Message for SceneRequest {}
