//! UI domain: tests for formatting, HUD effect curves and the results
//! timeline.

use super::fx::*;
use super::results::{results_frame, results_total_seconds, skip_target};
use super::settings::{VOLUME_STEP, volume_label};
use crate::audio::VolumeChannel;
use crate::session::ResultSummary;

fn summary(score: u64, coins: u64, new_record: bool) -> ResultSummary {
    ResultSummary {
        score,
        coins,
        best_score: score,
        new_record,
    }
}

// ---- formatting tests ----

#[test]
fn test_thousands_separators() {
    assert_eq!(format_thousands(0), "0");
    assert_eq!(format_thousands(999), "999");
    assert_eq!(format_thousands(1000), "1,000");
    assert_eq!(format_thousands(12345), "12,345");
    assert_eq!(format_thousands(1234567), "1,234,567");
}

#[test]
fn test_hp_bar_width_scales_with_max_hp() {
    assert_eq!(hp_bar_width(50), 500.0);
    assert_eq!(hp_bar_width(70), 700.0);
    assert_eq!(hp_bar_width(-5), 0.0);
}

#[test]
fn test_volume_label_shows_percent() {
    assert_eq!(volume_label(VolumeChannel::Music, 50), "Music 50%");
    assert_eq!(volume_label(VolumeChannel::Master, 100), "Master 100%");
    assert!((VOLUME_STEP - 0.1).abs() < f32::EPSILON);
}

// ---- hud effect tests ----

#[test]
fn test_tick_highlight_flips_every_interval() {
    assert!(!tick_highlight(0.05));
    assert!(tick_highlight(0.15));
    assert!(!tick_highlight(0.25));
    assert!(tick_highlight(0.35));
}

#[test]
fn test_low_hp_threshold_is_inclusive() {
    assert!(is_low_hp(0.19));
    assert!(is_low_hp(LOW_HP_THRESHOLD));
    // 10 of 50 hp sits exactly on the threshold.
    assert!(is_low_hp(10.0 / 50.0));
    assert!(!is_low_hp(11.0 / 50.0));
    assert!(!is_low_hp(1.0));
}

#[test]
fn test_low_hp_pulse_peaks_higher_when_closer_to_death() {
    let just_before_wrap = LOW_HP_PULSE_PERIOD * 0.999;
    let nearly_dead = low_hp_pulse_scale(just_before_wrap, 0.0);
    let at_threshold = low_hp_pulse_scale(just_before_wrap, LOW_HP_THRESHOLD);
    assert!((nearly_dead - 2.0).abs() < 0.01);
    assert!((at_threshold - 1.75).abs() < 0.01);
    assert!(low_hp_pulse_scale(0.0, 0.1).abs() < 1e-6);
    let halfway = low_hp_pulse_scale(LOW_HP_PULSE_PERIOD * 0.5, 0.0);
    assert!((halfway - 1.0).abs() < 0.01);
}

#[test]
fn test_low_hp_blink_period() {
    assert!(low_hp_blink_alpha(0.0).abs() < 1e-6);
    assert!((low_hp_blink_alpha(LOW_HP_BLINK_PERIOD / 2.0) - 1.0).abs() < 1e-5);
    assert!(low_hp_blink_alpha(LOW_HP_BLINK_PERIOD).abs() < 1e-5);
}

#[test]
fn test_danger_flash_fades_out() {
    assert!(danger_flash_alpha(0.2, 0.2) > danger_flash_alpha(0.1, 0.2));
    assert_eq!(danger_flash_alpha(0.0, 0.2), 0.0);
    assert_eq!(danger_flash_alpha(0.1, 0.0), 0.0);
}

#[test]
fn test_heal_popup_rises_then_fades() {
    let (rise, alpha) = popup_state(0.0);
    assert_eq!(rise, 0.0);
    assert_eq!(alpha, 1.0);

    let (rise, alpha) = popup_state(POPUP_RISE_SECONDS);
    assert!((rise - POPUP_RISE).abs() < 1e-4);
    assert_eq!(alpha, 1.0);

    let (_, alpha) = popup_state(POPUP_RISE_SECONDS + POPUP_FADE_SECONDS / 2.0);
    assert!((alpha - 0.5).abs() < 1e-4);

    assert!(!popup_finished(0.7));
    assert!(popup_finished(0.75));
}

// ---- results tests ----

#[test]
fn test_count_up_reaches_target() {
    assert_eq!(count_up(900, 0.0, COUNT_UP_SECONDS), 0);
    assert_eq!(count_up(900, COUNT_UP_SECONDS / 3.0, COUNT_UP_SECONDS), 300);
    assert_eq!(count_up(900, 5.0, COUNT_UP_SECONDS), 900);
    assert_eq!(count_up(900, -1.0, COUNT_UP_SECONDS), 0);
}

#[test]
fn test_results_count_score_before_coins() {
    let s = summary(1000, 40, false);
    let frame = results_frame(&s, 0.35 + COUNT_UP_SECONDS / 2.0);
    assert!(frame.score > 0 && frame.score < 1000);
    assert_eq!(frame.coins, 0);
    assert!(!frame.done);
}

#[test]
fn test_results_finish_with_full_numbers() {
    let s = summary(1000, 40, true);
    let frame = results_frame(&s, results_total_seconds());
    assert_eq!(frame.score, 1000);
    assert_eq!(frame.coins, 40);
    assert!(frame.show_record);
    assert!(frame.done);
    assert!((frame.title_scale - 1.0).abs() < 1e-4);
}

#[test]
fn test_click_skips_only_the_running_count_up() {
    let s = summary(1000, 40, false);

    // Mid score count: the score finishes, the coins still count.
    let after_first = skip_target(0.35 + COUNT_UP_SECONDS / 2.0);
    let frame = results_frame(&s, after_first);
    assert_eq!(frame.score, 1000);
    assert_eq!(frame.coins, 0);
    assert!(!frame.done);

    // Mid coin count: everything finishes.
    let after_second = skip_target(after_first + COUNT_UP_SECONDS / 2.0);
    let frame = results_frame(&s, after_second);
    assert_eq!(frame.coins, 40);
    assert!(frame.done);
}

#[test]
fn test_click_during_title_pop_is_ignored() {
    assert_eq!(skip_target(0.1), 0.1);
    assert_eq!(skip_target(results_total_seconds()), results_total_seconds());
}

#[test]
fn test_new_record_waits_for_score_count() {
    let s = summary(500, 5, true);
    assert!(!results_frame(&s, 0.5).show_record);
    assert!(!summary(500, 5, false).new_record);
    let no_record = summary(500, 5, false);
    assert!(!results_frame(&no_record, results_total_seconds()).show_record);
}
