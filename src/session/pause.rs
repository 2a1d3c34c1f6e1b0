//! Session domain: pause flag coupled to the global time scale.

use bevy::prelude::*;

/// Single pause flag. Pausing remembers the running time scale so the
/// matching unpause can put it back.
#[derive(Resource, Debug, Clone)]
pub struct PauseControl {
    paused: bool,
    time_scale: f32,
    previous_scale: f32,
}

impl Default for PauseControl {
    fn default() -> Self {
        Self {
            paused: false,
            time_scale: 1.0,
            previous_scale: 1.0,
        }
    }
}

impl PauseControl {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Returns `false` when already in the requested state.
    pub fn set_paused(&mut self, pause: bool) -> bool {
        if self.paused == pause {
            return false;
        }
        self.paused = pause;
        if pause {
            self.previous_scale = self.time_scale;
            self.time_scale = 0.0;
        } else {
            self.time_scale = if self.previous_scale > 0.0 {
                self.previous_scale
            } else {
                1.0
            };
        }
        true
    }

    /// Changes the running scale. While paused the value is stored for the
    /// next unpause instead.
    pub fn set_time_scale(&mut self, scale: f32) {
        if self.paused {
            self.previous_scale = scale;
        } else {
            self.time_scale = scale.max(0.0);
        }
    }

    /// Back to running at normal speed, regardless of the current state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Mirrors `PauseControl` into the virtual clock so physics and scaled
/// timers freeze with it.
pub(crate) fn sync_virtual_time(pause: Res<PauseControl>, mut time: ResMut<Time<Virtual>>) {
    if !pause.is_changed() {
        return;
    }
    if pause.is_paused() {
        if !time.is_paused() {
            time.pause();
        }
    } else {
        time.set_relative_speed(pause.time_scale());
        if time.is_paused() {
            time.unpause();
        }
    }
}
