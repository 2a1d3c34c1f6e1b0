//! Session domain: tests for health, revive, pause, ramp and results flow.

use super::health::ReviveRequest;
use super::score::GameOverPhase;
use super::systems::{bgm_reaction, consume_heal};
use super::*;
use crate::audio::BgmCommand;

fn tuning() -> HealthTuning {
    HealthTuning::default()
}

/// Runs the revive sequence to completion on real time.
fn finish_revive(health: &mut RunHealth, tuning: &HealthTuning) {
    assert_eq!(health.tick(0.0, 1.3, tuning), HealthOutcome::ReviveEffect);
    assert_eq!(health.tick(0.0, 1.1, tuning), HealthOutcome::Revived);
}

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_crash_damage_grants_invincibility() {
    let t = tuning();
    let mut health = RunHealth::new(50, false);

    let outcome = health.apply_damage(t.crash_damage, DamageKind::Crash, &t);

    assert_eq!(outcome, HealthOutcome::CrashInvincible);
    assert_eq!(health.current(), 40);
    assert!(health.is_invincible());
}

#[test]
fn test_invincibility_blocks_crash_but_not_decay() {
    let t = tuning();
    let mut health = RunHealth::new(50, false);
    health.apply_damage(10, DamageKind::Crash, &t);

    assert_eq!(
        health.apply_damage(10, DamageKind::Crash, &t),
        HealthOutcome::Ignored
    );
    assert_eq!(health.current(), 40);

    assert_eq!(health.tick_decay(1.0, &t), HealthOutcome::Changed);
    assert_eq!(health.current(), 39);
    assert!(health.is_invincible());
}

#[test]
fn test_invincibility_expires_on_scaled_time() {
    let t = tuning();
    let mut health = RunHealth::new(50, false);
    health.apply_damage(10, DamageKind::Crash, &t);

    // Real time alone does not move the window.
    assert_eq!(health.tick(0.0, 10.0, &t), HealthOutcome::Ignored);
    assert!(health.is_invincible());

    assert_eq!(health.tick(2.9, 0.0, &t), HealthOutcome::Ignored);
    assert_eq!(health.tick(0.2, 0.0, &t), HealthOutcome::InvincibilityEnded);
    assert_eq!(health.phase(), HealthPhase::Alive);
}

#[test]
fn test_decay_removes_one_point_per_second() {
    let t = tuning();
    let mut health = RunHealth::new(50, false);

    health.tick_decay(0.4, &t);
    health.tick_decay(0.4, &t);
    assert_eq!(health.current(), 50);
    health.tick_decay(0.4, &t);
    assert_eq!(health.current(), 49);
    health.tick_decay(3.0, &t);
    assert_eq!(health.current(), 46);
}

#[test]
fn test_health_never_leaves_bounds() {
    let t = tuning();
    let mut health = RunHealth::new(60, false);

    health.heal(500);
    assert_eq!(health.current(), 60);

    health.apply_damage(1000, DamageKind::Decay, &t);
    assert_eq!(health.current(), 0);
    assert!(health.is_dead());

    health.heal(15);
    assert_eq!(health.current(), 0);
}

#[test]
fn test_heal_is_capped_and_ignored_at_full() {
    let mut health = RunHealth::new(50, false);
    assert_eq!(health.heal(15), HealthOutcome::Ignored);

    let t = tuning();
    health.apply_damage(5, DamageKind::Decay, &t);
    assert_eq!(health.heal(15), HealthOutcome::Changed);
    assert_eq!(health.current(), 50);
}

#[test]
fn test_lethal_crash_skips_invincibility() {
    let t = tuning();
    let mut health = RunHealth::new(50, false);
    health.apply_damage(45, DamageKind::Decay, &t);

    let outcome = health.apply_damage(10, DamageKind::Crash, &t);

    assert_eq!(outcome, HealthOutcome::Died(DeathCause::Crash));
    assert_eq!(health.current(), 0);
}

#[test]
fn test_dead_is_terminal() {
    let t = tuning();
    let mut health = RunHealth::new(50, false);
    health.apply_damage(50, DamageKind::Decay, &t);
    assert_eq!(health.phase(), HealthPhase::Dead(DeathCause::Decay));

    assert_eq!(
        health.apply_damage(10, DamageKind::Crash, &t),
        HealthOutcome::Ignored
    );
    assert_eq!(health.heal(15), HealthOutcome::Ignored);
    assert_eq!(health.fall_death(), HealthOutcome::Ignored);
    assert_eq!(health.tick_decay(5.0, &t), HealthOutcome::Ignored);
    assert_eq!(health.phase(), HealthPhase::Dead(DeathCause::Decay));
}

#[test]
fn test_zero_health_on_revive_character_waits_for_ground() {
    let t = tuning();
    let mut health = RunHealth::new(70, true);
    health.apply_damage(65, DamageKind::Decay, &t);

    let outcome = health.apply_damage(10, DamageKind::Crash, &t);

    assert_eq!(outcome, HealthOutcome::ReviveQueued);
    assert_eq!(
        health.phase(),
        HealthPhase::AwaitingGroundForRevive(ReviveRequest {
            was_crash: true,
            awaiting_ground: true,
        })
    );
    assert!(!health.revive_used());

    // Airborne: nothing happens.
    assert_eq!(health.ground_contact(false, &t), HealthOutcome::Ignored);
    assert!(health.awaiting_revive());

    assert_eq!(health.ground_contact(true, &t), HealthOutcome::ReviveStarted);
    assert!(health.is_reviving());
    assert!(health.revive_used());
    assert!(health.blocks_input());
}

#[test]
fn test_input_blocked_while_waiting_to_land_for_revive() {
    let t = tuning();
    let mut health = RunHealth::new(70, true);
    health.apply_damage(70, DamageKind::Decay, &t);

    assert!(health.awaiting_revive());
    assert!(health.blocks_input());

    // Still airborne a moment later: jumping must stay locked out.
    health.ground_contact(false, &t);
    assert!(health.blocks_input());
}

#[test]
fn test_revive_restores_partial_health_and_invincibility() {
    let t = tuning();
    let mut health = RunHealth::new(70, true);
    health.apply_damage(70, DamageKind::Decay, &t);
    health.ground_contact(true, &t);

    // Scaled time is frozen during the revive; only real time counts.
    assert_eq!(health.tick(0.0, 0.5, &t), HealthOutcome::Ignored);
    finish_revive(&mut health, &t);

    assert_eq!(health.current(), 20);
    assert!(health.is_invincible());
    assert!(!health.blocks_input());
}

#[test]
fn test_revive_happens_at_most_once() {
    let t = tuning();
    let mut health = RunHealth::new(70, true);
    health.apply_damage(70, DamageKind::Decay, &t);
    health.ground_contact(true, &t);
    finish_revive(&mut health, &t);

    let outcome = health.apply_damage(100, DamageKind::Decay, &t);

    assert_eq!(outcome, HealthOutcome::Died(DeathCause::Decay));
    assert!(health.is_dead());
}

#[test]
fn test_mutations_ignored_while_reviving() {
    let t = tuning();
    let mut health = RunHealth::new(70, true);
    health.apply_damage(70, DamageKind::Decay, &t);

    assert_eq!(health.heal(15), HealthOutcome::Ignored);
    assert_eq!(
        health.apply_damage(10, DamageKind::Crash, &t),
        HealthOutcome::Ignored
    );

    health.ground_contact(true, &t);
    assert_eq!(health.tick_decay(5.0, &t), HealthOutcome::Ignored);
    assert_eq!(health.ground_contact(true, &t), HealthOutcome::Ignored);
    assert_eq!(health.current(), 0);
}

#[test]
fn test_fall_death_bypasses_revive() {
    let mut health = RunHealth::new(70, true);

    let outcome = health.fall_death();

    assert_eq!(outcome, HealthOutcome::Died(DeathCause::Fall));
    assert!(health.fall_death_lock());
    assert!(!health.revive_used());
    assert_eq!(health.current(), 0);
}

#[test]
fn test_fall_while_awaiting_revive_kills() {
    let t = tuning();
    let mut health = RunHealth::new(70, true);
    health.apply_damage(70, DamageKind::Decay, &t);
    assert!(health.awaiting_revive());

    assert_eq!(health.fall_death(), HealthOutcome::Died(DeathCause::Fall));
    assert_eq!(health.ground_contact(true, &t), HealthOutcome::Ignored);
    assert!(health.is_dead());
}

#[test]
fn test_non_revive_character_dies_at_zero() {
    let t = tuning();
    let mut health = RunHealth::new(50, false);
    assert_eq!(
        health.apply_damage(50, DamageKind::Decay, &t),
        HealthOutcome::Died(DeathCause::Decay)
    );
}

#[test]
fn test_revive_stage_durations_have_a_floor() {
    let t = HealthTuning {
        death_animation: 0.0,
        revive_effect: 0.0,
        ..HealthTuning::default()
    };
    let mut health = RunHealth::new(70, true);
    health.apply_damage(70, DamageKind::Decay, &t);
    health.ground_contact(true, &t);

    assert_eq!(health.tick(0.0, 0.01, &t), HealthOutcome::Ignored);
    assert_eq!(health.tick(0.0, 0.05, &t), HealthOutcome::ReviveEffect);
}

// -----------------------------------------------------------------------------
// Pause tests
// -----------------------------------------------------------------------------

#[test]
fn test_pause_is_idempotent() {
    let mut pause = PauseControl::default();
    assert!(pause.set_paused(true));
    assert!(!pause.set_paused(true));
    assert_eq!(pause.time_scale(), 0.0);

    assert!(pause.set_paused(false));
    assert!(!pause.set_paused(false));
    assert_eq!(pause.time_scale(), 1.0);
}

#[test]
fn test_unpause_restores_previous_scale() {
    let mut pause = PauseControl::default();
    pause.set_time_scale(1.5);
    pause.set_paused(true);
    pause.set_paused(true);
    pause.set_paused(false);
    assert_eq!(pause.time_scale(), 1.5);
}

#[test]
fn test_unpause_falls_back_to_normal_speed() {
    let mut pause = PauseControl::default();
    pause.set_time_scale(0.0);
    pause.set_paused(true);
    pause.set_paused(false);
    assert_eq!(pause.time_scale(), 1.0);
}

// -----------------------------------------------------------------------------
// Ramp tests
// -----------------------------------------------------------------------------

#[test]
fn test_ramp_progress_is_bounded_and_monotonic() {
    let tuning = RampTuning::default();
    let mut ramp = DifficultyRamp::default();
    let mut last = ramp.progress(&tuning);
    assert_eq!(last, 0.0);

    for _ in 0..200 {
        ramp.advance(0.5);
        let p = ramp.progress(&tuning);
        assert!(p >= last);
        assert!((0.0..=1.0).contains(&p));
        last = p;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn test_ramp_ignores_negative_time() {
    let mut ramp = DifficultyRamp::default();
    ramp.advance(2.0);
    ramp.advance(-1.0);
    assert_eq!(ramp.elapsed(), 2.0);
}

#[test]
fn test_ramp_scales_speed_and_interval() {
    let tuning = RampTuning::default();
    let mut ramp = DifficultyRamp::default();
    assert_eq!(ramp.scroll_speed(&tuning), 375.0);
    assert_eq!(ramp.spawn_interval(&tuning), tuning.spawn_interval_start);

    ramp.advance(30.0);
    assert!((ramp.scroll_speed(&tuning) - 437.5).abs() < 1e-3);

    ramp.advance(100.0);
    assert_eq!(ramp.scroll_speed(&tuning), 500.0);
    assert_eq!(ramp.spawn_interval(&tuning), tuning.spawn_interval_end);
}

#[test]
fn test_zero_duration_ramp_is_guarded() {
    assert_eq!(progress01(0.0, 0.0), 0.0);
    assert_eq!(progress01(1.0, 0.0), 1.0);
}

// -----------------------------------------------------------------------------
// Score and results flow tests
// -----------------------------------------------------------------------------

#[test]
fn test_collectible_values() {
    let mut score = RunScore::default();
    score.collect(Collectible::Jelly);
    score.collect(Collectible::SilverCoin);
    score.collect(Collectible::GoldCoin);
    assert_eq!(score.score, 111);
    assert_eq!(score.coins, 11);
}

#[test]
fn test_decay_death_in_air_waits_for_ground() {
    let mut flow = GameOverFlow::default();
    assert!(!flow.begin(DeathCause::Decay, false));
    assert_eq!(flow.phase(), GameOverPhase::AwaitingGround);
    assert!(flow.is_over());

    assert!(!flow.tick(10.0));
    assert!(!flow.ground_contact(false));
    assert!(flow.ground_contact(true));
    assert!(!flow.tick(2.0));
    assert!(flow.tick(1.5));
    assert!(flow.showing_results());
}

#[test]
fn test_crash_death_starts_immediately_even_in_air() {
    let mut flow = GameOverFlow::default();
    assert!(flow.begin(DeathCause::Crash, false));
    assert!(matches!(flow.phase(), GameOverPhase::DeathShow { .. }));
}

#[test]
fn test_results_are_finalized_once() {
    let mut flow = GameOverFlow::default();
    flow.begin(DeathCause::Fall, false);
    assert!(flow.tick(3.0));
    assert!(!flow.tick(3.0));
    assert!(!flow.force_results());
    assert!(!flow.begin(DeathCause::Crash, true));
}

#[test]
fn test_forced_results_during_run() {
    let mut flow = GameOverFlow::default();
    assert!(flow.force_results());
    assert!(flow.is_over());
    flow.reset();
    assert_eq!(flow.phase(), GameOverPhase::Running);
}

// -----------------------------------------------------------------------------
// Reaction tests
// -----------------------------------------------------------------------------

#[test]
fn test_death_pauses_game_music_without_fade() {
    assert_eq!(
        bgm_reaction(HealthOutcome::Died(DeathCause::Crash)),
        Some(BgmCommand::Pause { fade: 0.0 })
    );
    assert_eq!(
        bgm_reaction(HealthOutcome::Died(DeathCause::Fall)),
        Some(BgmCommand::Pause { fade: 0.0 })
    );
}

#[test]
fn test_revive_pauses_then_resumes_music() {
    assert_eq!(
        bgm_reaction(HealthOutcome::ReviveStarted),
        Some(BgmCommand::Pause { fade: 0.0 })
    );
    assert!(matches!(
        bgm_reaction(HealthOutcome::Revived),
        Some(BgmCommand::Resume { fade }) if fade > 0.0
    ));
    assert_eq!(bgm_reaction(HealthOutcome::Changed), None);
    assert_eq!(bgm_reaction(HealthOutcome::ReviveQueued), None);
}

#[test]
fn test_heal_pickup_shows_popup_at_full_health() {
    let mut health = RunHealth::new(50, false);
    let request = HealRequest {
        amount: 15,
        position: Vec2::new(120.0, -40.0),
    };

    let (outcome, popup) = consume_heal(&mut health, &request);

    assert_eq!(outcome, HealthOutcome::Ignored);
    assert_eq!(health.current(), 50);
    assert_eq!(popup.amount, 15);
    assert_eq!(popup.position, Vec2::new(120.0, -40.0));
}

#[test]
fn test_heal_pickup_restores_missing_health() {
    let t = tuning();
    let mut health = RunHealth::new(50, false);
    health.apply_damage(20, DamageKind::Decay, &t);
    let request = HealRequest {
        amount: 15,
        position: Vec2::ZERO,
    };

    let (outcome, popup) = consume_heal(&mut health, &request);

    assert_eq!(outcome, HealthOutcome::Changed);
    assert_eq!(health.current(), 45);
    assert_eq!(popup.amount, 15);
}
