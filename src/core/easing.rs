//! Core domain: small curve helpers shared by gameplay and UI effects.

/// Triangle wave between 0 and 1 with a period of 2.
pub fn ping_pong(t: f32) -> f32 {
    let t = t.rem_euclid(2.0);
    if t > 1.0 { 2.0 - t } else { t }
}

/// Rising ramp from 0 to 1 that restarts every `period` seconds.
pub fn saw(t: f32, period: f32) -> f32 {
    let period = period.max(0.0001);
    t.rem_euclid(period) / period
}

/// Overshooting ease for pop-in scales.
pub fn ease_out_back(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let c1 = 1.70158;
    let c3 = c1 + 1.0;
    1.0 + c3 * (t - 1.0).powi(3) + c1 * (t - 1.0).powi(2)
}
