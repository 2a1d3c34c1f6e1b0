//! Session domain: the health, invincibility and revive state machine.
//!
//! `RunHealth` owns every health mutation of a run. Systems feed it damage,
//! heals, fall triggers, ground contact and frame time; it answers with a
//! `HealthOutcome` the presentation layer reacts to.

use bevy::prelude::*;

/// Timings and amounts for the health state machine.
#[derive(Resource, Debug, Clone)]
pub struct HealthTuning {
    pub crash_damage: i32,
    /// Health lost per second of scaled time.
    pub decay_per_second: f32,
    pub heal_amount: i32,
    pub crash_invincibility: f32,
    pub revive_invincibility: f32,
    pub revive_health: i32,
    pub death_animation: f32,
    pub revive_effect: f32,
    /// Floor applied to every revive stage duration.
    pub min_stage_duration: f32,
    pub danger_flash: f32,
}

impl Default for HealthTuning {
    fn default() -> Self {
        Self {
            crash_damage: 10,
            decay_per_second: 1.0,
            heal_amount: 15,
            crash_invincibility: 3.0,
            revive_invincibility: 2.5,
            revive_health: 20,
            death_animation: 1.2,
            revive_effect: 1.0,
            min_stage_duration: 0.05,
            danger_flash: 0.2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageKind {
    /// Obstacle hit. Blocked by invincibility.
    Crash,
    /// Time-based drain. Ignores invincibility.
    Decay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Crash,
    Decay,
    Fall,
}

impl From<DamageKind> for DeathCause {
    fn from(kind: DamageKind) -> Self {
        match kind {
            DamageKind::Crash => DeathCause::Crash,
            DamageKind::Decay => DeathCause::Decay,
        }
    }
}

/// A revive waiting to be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviveRequest {
    pub was_crash: bool,
    pub awaiting_ground: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviveStage {
    DeathAnimation,
    Effect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthPhase {
    Alive,
    Invincible { remaining: f32 },
    AwaitingGroundForRevive(ReviveRequest),
    Reviving { stage: ReviveStage, remaining: f32 },
    Dead(DeathCause),
}

/// What a call into `RunHealth` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthOutcome {
    Ignored,
    Changed,
    /// Crash damage landed and opened an invincibility window.
    CrashInvincible,
    InvincibilityEnded,
    ReviveQueued,
    ReviveStarted,
    ReviveEffect,
    Revived,
    Died(DeathCause),
}

#[derive(Debug, Clone)]
pub struct RunHealth {
    current: i32,
    max: i32,
    revive_eligible: bool,
    revive_used: bool,
    fall_death_lock: bool,
    phase: HealthPhase,
    decay_accumulator: f32,
}

impl RunHealth {
    pub fn new(max: i32, revive_eligible: bool) -> Self {
        let max = max.max(1);
        Self {
            current: max,
            max,
            revive_eligible,
            revive_used: false,
            fall_death_lock: false,
            phase: HealthPhase::Alive,
            decay_accumulator: 0.0,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn percent(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    pub fn phase(&self) -> HealthPhase {
        self.phase
    }

    pub fn revive_used(&self) -> bool {
        self.revive_used
    }

    pub fn fall_death_lock(&self) -> bool {
        self.fall_death_lock
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.phase, HealthPhase::Dead(_))
    }

    pub fn is_invincible(&self) -> bool {
        matches!(self.phase, HealthPhase::Invincible { .. })
    }

    pub fn is_reviving(&self) -> bool {
        matches!(self.phase, HealthPhase::Reviving { .. })
    }

    pub fn awaiting_revive(&self) -> bool {
        matches!(self.phase, HealthPhase::AwaitingGroundForRevive(_))
    }

    /// Player input is dropped from the moment a revive is queued, through
    /// the landing wait and the sequence, and after death.
    pub fn blocks_input(&self) -> bool {
        self.awaiting_revive() || self.is_reviving() || self.is_dead()
    }

    /// Health only moves while the run is live.
    fn accepts_mutation(&self) -> bool {
        matches!(
            self.phase,
            HealthPhase::Alive | HealthPhase::Invincible { .. }
        )
    }

    pub fn apply_damage(
        &mut self,
        amount: i32,
        kind: DamageKind,
        tuning: &HealthTuning,
    ) -> HealthOutcome {
        if amount <= 0 || !self.accepts_mutation() {
            return HealthOutcome::Ignored;
        }
        if kind == DamageKind::Crash && self.is_invincible() {
            return HealthOutcome::Ignored;
        }

        let next = self.current - amount;
        if next <= 0 {
            self.current = 0;
            return self.reach_zero(kind);
        }

        self.current = next;
        match kind {
            DamageKind::Crash => {
                self.phase = HealthPhase::Invincible {
                    remaining: tuning.crash_invincibility,
                };
                HealthOutcome::CrashInvincible
            }
            DamageKind::Decay => HealthOutcome::Changed,
        }
    }

    fn reach_zero(&mut self, kind: DamageKind) -> HealthOutcome {
        if self.revive_eligible && !self.revive_used && !self.fall_death_lock {
            self.phase = HealthPhase::AwaitingGroundForRevive(ReviveRequest {
                was_crash: kind == DamageKind::Crash,
                awaiting_ground: true,
            });
            HealthOutcome::ReviveQueued
        } else {
            let cause = DeathCause::from(kind);
            self.phase = HealthPhase::Dead(cause);
            HealthOutcome::Died(cause)
        }
    }

    pub fn heal(&mut self, amount: i32) -> HealthOutcome {
        if amount <= 0 || !self.accepts_mutation() {
            return HealthOutcome::Ignored;
        }
        let next = (self.current + amount).min(self.max);
        if next == self.current {
            return HealthOutcome::Ignored;
        }
        self.current = next;
        HealthOutcome::Changed
    }

    /// Instant death from leaving the play area. Never revivable.
    pub fn fall_death(&mut self) -> HealthOutcome {
        if self.is_dead() {
            return HealthOutcome::Ignored;
        }
        self.fall_death_lock = true;
        self.current = 0;
        self.phase = HealthPhase::Dead(DeathCause::Fall);
        HealthOutcome::Died(DeathCause::Fall)
    }

    /// Dispatches a queued revive once the player stands on something.
    pub fn ground_contact(&mut self, grounded: bool, tuning: &HealthTuning) -> HealthOutcome {
        let HealthPhase::AwaitingGroundForRevive(request) = self.phase else {
            return HealthOutcome::Ignored;
        };
        if request.awaiting_ground && !grounded {
            return HealthOutcome::Ignored;
        }
        self.revive_used = true;
        self.phase = HealthPhase::Reviving {
            stage: ReviveStage::DeathAnimation,
            remaining: tuning.death_animation.max(tuning.min_stage_duration),
        };
        HealthOutcome::ReviveStarted
    }

    /// Advances timers. `scaled_dt` drives invincibility, `real_dt` drives
    /// the revive sequence which plays while the game is paused.
    pub fn tick(&mut self, scaled_dt: f32, real_dt: f32, tuning: &HealthTuning) -> HealthOutcome {
        match self.phase {
            HealthPhase::Invincible { remaining } => {
                let remaining = remaining - scaled_dt;
                if remaining <= 0.0 {
                    self.phase = HealthPhase::Alive;
                    HealthOutcome::InvincibilityEnded
                } else {
                    self.phase = HealthPhase::Invincible { remaining };
                    HealthOutcome::Ignored
                }
            }
            HealthPhase::Reviving { stage, remaining } => {
                let remaining = remaining - real_dt;
                if remaining > 0.0 {
                    self.phase = HealthPhase::Reviving { stage, remaining };
                    return HealthOutcome::Ignored;
                }
                match stage {
                    ReviveStage::DeathAnimation => {
                        self.phase = HealthPhase::Reviving {
                            stage: ReviveStage::Effect,
                            remaining: tuning.revive_effect.max(tuning.min_stage_duration),
                        };
                        HealthOutcome::ReviveEffect
                    }
                    ReviveStage::Effect => {
                        self.current = tuning.revive_health.clamp(1, self.max);
                        self.decay_accumulator = 0.0;
                        self.phase = HealthPhase::Invincible {
                            remaining: tuning.revive_invincibility,
                        };
                        HealthOutcome::Revived
                    }
                }
            }
            _ => HealthOutcome::Ignored,
        }
    }

    /// Drains health over scaled time, one point per whole accumulated unit.
    pub fn tick_decay(&mut self, scaled_dt: f32, tuning: &HealthTuning) -> HealthOutcome {
        if !self.accepts_mutation() {
            return HealthOutcome::Ignored;
        }
        self.decay_accumulator += scaled_dt.max(0.0) * tuning.decay_per_second;

        let mut outcome = HealthOutcome::Ignored;
        while self.decay_accumulator >= 1.0 {
            self.decay_accumulator -= 1.0;
            outcome = self.apply_damage(1, DamageKind::Decay, tuning);
            if outcome != HealthOutcome::Changed {
                self.decay_accumulator = 0.0;
                break;
            }
        }
        outcome
    }
}
