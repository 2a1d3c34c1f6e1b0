//! UI domain: number formatting and the timing curves behind HUD effects.

use bevy::prelude::*;

use crate::core::easing::{ping_pong, saw};
use crate::session::{lerp, progress01};

/// Pixels of hp bar per point of max health.
pub const HP_BAR_PX_PER_HP: f32 = 10.0;
/// The hp bar shimmer flips every this many seconds.
pub const TICK_INTERVAL: f32 = 0.1;
pub const TICK_COLOR: Color = Color::srgb(1.0, 0.949, 0.573);
/// Health fraction at or below which the low hp warning runs.
pub const LOW_HP_THRESHOLD: f32 = 0.2;
pub const LOW_HP_PULSE_PERIOD: f32 = 0.9;
pub const LOW_HP_BLINK_PERIOD: f32 = 1.8;
pub const COUNT_UP_SECONDS: f32 = 0.9;
pub const POPUP_RISE: f32 = 50.0;
pub const POPUP_RISE_SECONDS: f32 = 0.5;
pub const POPUP_FADE_SECONDS: f32 = 0.25;

/// `1234567` becomes `"1,234,567"`.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn hp_bar_width(max_hp: i32) -> f32 {
    max_hp.max(0) as f32 * HP_BAR_PX_PER_HP
}

/// Whether the shimmer shows its highlight colour at `t` seconds.
pub fn tick_highlight(t: f32) -> bool {
    (t.max(0.0) / TICK_INTERVAL) as u64 % 2 == 1
}

pub fn is_low_hp(percent: f32) -> bool {
    percent <= LOW_HP_THRESHOLD
}

/// Scale of the low hp icon: a saw from 0 up to a peak that grows as
/// health drops.
pub fn low_hp_pulse_scale(t: f32, percent: f32) -> f32 {
    let danger = (percent / LOW_HP_THRESHOLD).clamp(0.0, 1.0);
    let peak = lerp(2.0, 1.75, danger);
    lerp(0.0, peak, saw(t, LOW_HP_PULSE_PERIOD))
}

/// Opacity of the low hp panel, bouncing once per blink period.
pub fn low_hp_blink_alpha(t: f32) -> f32 {
    ping_pong(t * 2.0 / LOW_HP_BLINK_PERIOD)
}

/// Red overlay after a crash, fading over `duration`.
pub fn danger_flash_alpha(remaining: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 0.0;
    }
    (remaining / duration).clamp(0.0, 1.0) * 0.45
}

/// Value shown partway through a count-up.
pub fn count_up(target: u64, elapsed: f32, duration: f32) -> u64 {
    let t = progress01(elapsed, duration);
    (target as f64 * t as f64).round() as u64
}

/// Heal popup rise offset and opacity at `t` seconds.
pub fn popup_state(t: f32) -> (f32, f32) {
    let rise = POPUP_RISE * progress01(t, POPUP_RISE_SECONDS);
    let alpha = 1.0 - progress01(t - POPUP_RISE_SECONDS, POPUP_FADE_SECONDS);
    (rise, alpha)
}

pub fn popup_finished(t: f32) -> bool {
    t >= POPUP_RISE_SECONDS + POPUP_FADE_SECONDS
}
