//! Audio domain: tests for fades and volume math.

use super::bgm::{BgmVoice, FadeEnd, LevelFade};
use super::*;
use crate::prefs::{KEY_VOL_MUSIC, PrefStore};

fn voice(level: f32) -> BgmVoice {
    BgmVoice {
        track: BgmTrack::Game,
        level,
        fade: None,
        on_fade_end: FadeEnd::Keep,
        paused: false,
    }
}

#[test]
fn test_level_fade_interpolates_and_finishes() {
    let mut fade = LevelFade::new(0.0, 1.0, 0.5);
    let (level, done) = fade.advance(0.25);
    assert!((level - 0.5).abs() < 1e-5);
    assert!(!done);
    let (level, done) = fade.advance(0.3);
    assert_eq!(level, 1.0);
    assert!(done);
}

#[test]
fn test_zero_length_fade_completes_immediately() {
    let mut fade = LevelFade::new(0.8, 0.0, 0.0);
    assert_eq!(fade.advance(0.0), (0.0, true));
}

#[test]
fn test_pause_fade_leaves_voice_paused() {
    let mut v = voice(1.0);
    v.fade_to(0.0, 0.2, FadeEnd::Pause);
    assert!(!v.step(0.1));
    assert!(!v.paused);
    assert!(!v.step(0.2));
    assert!(v.paused);
    assert_eq!(v.level, 0.0);
}

#[test]
fn test_new_fade_replaces_running_fade() {
    let mut v = voice(1.0);
    v.fade_to(0.0, 1.0, FadeEnd::Despawn);
    v.step(0.5);
    assert!((v.level - 0.5).abs() < 1e-5);

    v.fade_to(1.0, 0.5, FadeEnd::Keep);
    assert!(!v.step(0.25));
    assert!((v.level - 0.75).abs() < 1e-5);
    assert!(!v.step(0.5));
    assert_eq!(v.level, 1.0);
}

#[test]
fn test_despawn_fade_reports_completion() {
    let mut v = voice(1.0);
    v.fade_to(0.0, 0.5, FadeEnd::Despawn);
    assert!(!v.step(0.2));
    assert!(v.step(0.4));
}

#[test]
fn test_effective_volumes_multiply_master() {
    let settings = VolumeSettings {
        music: 0.5,
        sfx: 0.8,
        master: 0.5,
    };
    assert!((settings.target_bgm() - 0.25).abs() < 1e-6);
    assert!((settings.effective_sfx() - 0.4).abs() < 1e-6);
}

#[test]
fn test_volume_step_clamps_and_persists() {
    let mut prefs = PrefStore::in_memory();
    let mut settings = VolumeSettings::default();

    settings.step(VolumeChannel::Music, 0.1, &mut prefs);
    assert_eq!(settings.percent(VolumeChannel::Music), 60);
    assert!((prefs.volume(KEY_VOL_MUSIC, 0.0) - 0.6).abs() < 1e-6);

    for _ in 0..10 {
        settings.step(VolumeChannel::Music, 0.1, &mut prefs);
    }
    assert_eq!(settings.music, 1.0);

    for _ in 0..20 {
        settings.step(VolumeChannel::Master, -0.1, &mut prefs);
    }
    assert_eq!(settings.master, 0.0);
    assert_eq!(settings.target_bgm(), 0.0);
}

#[test]
fn test_settings_read_back_from_prefs() {
    let mut prefs = PrefStore::in_memory();
    prefs.set_volume(VolumeChannel::Sfx.key(), 0.3);
    let settings = VolumeSettings::from_prefs(&prefs);
    assert_eq!(settings.music, 0.5);
    assert!((settings.sfx - 0.3).abs() < 1e-6);
    assert_eq!(settings.master, 1.0);
}

#[test]
fn test_only_coin_is_layered() {
    assert_eq!(Sfx::Coin.layers(), 2);
    assert_eq!(Sfx::Jelly.layers(), 1);
}
