//! Session domain: difficulty ramp over elapsed run time.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct RampTuning {
    /// Seconds until the ramp reaches full difficulty.
    pub duration: f32,
    pub spawn_interval_start: f32,
    pub spawn_interval_end: f32,
    /// Full scroll speed in pixels per second.
    pub scroll_speed: f32,
    /// Fraction of `scroll_speed` used at the start of a run.
    pub start_speed_factor: f32,
}

impl Default for RampTuning {
    fn default() -> Self {
        Self {
            duration: 60.0,
            spawn_interval_start: 2.0,
            spawn_interval_end: 2.25,
            scroll_speed: 500.0,
            start_speed_factor: 0.75,
        }
    }
}

/// Elapsed run time. Only advances while the run is live and unpaused.
#[derive(Resource, Debug, Clone, Default)]
pub struct DifficultyRamp {
    elapsed: f32,
}

impl DifficultyRamp {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed += dt;
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn progress(&self, tuning: &RampTuning) -> f32 {
        progress01(self.elapsed, tuning.duration)
    }

    pub fn spawn_interval(&self, tuning: &RampTuning) -> f32 {
        lerp(
            tuning.spawn_interval_start,
            tuning.spawn_interval_end,
            self.progress(tuning),
        )
    }

    pub fn scroll_speed(&self, tuning: &RampTuning) -> f32 {
        lerp(
            tuning.scroll_speed * tuning.start_speed_factor,
            tuning.scroll_speed,
            self.progress(tuning),
        )
    }
}

/// Linear progress through a duration, capped to `[0, 1]`.
pub fn progress01(elapsed: f32, duration: f32) -> f32 {
    (elapsed / duration.max(0.0001)).clamp(0.0, 1.0)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
