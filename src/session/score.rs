//! Session domain: run score, collected coins and the game-over sequence.

use bevy::prelude::*;

use crate::session::health::DeathCause;

/// Collectible kinds that feed the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collectible {
    Jelly,
    SilverCoin,
    GoldCoin,
}

impl Collectible {
    pub fn score(self) -> u64 {
        match self {
            Collectible::Jelly => 1,
            Collectible::SilverCoin => 10,
            Collectible::GoldCoin => 100,
        }
    }

    pub fn coins(self) -> u64 {
        match self {
            Collectible::Jelly => 0,
            Collectible::SilverCoin => 1,
            Collectible::GoldCoin => 10,
        }
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RunScore {
    pub score: u64,
    pub coins: u64,
}

impl RunScore {
    pub fn collect(&mut self, item: Collectible) {
        self.score += item.score();
        self.coins += item.coins();
    }
}

/// Final numbers of a run, produced once at game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultSummary {
    pub score: u64,
    pub coins: u64,
    pub best_score: u64,
    pub new_record: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameOverPhase {
    Running,
    /// Decay deaths in the air wait for the body to land.
    AwaitingGround,
    DeathShow { remaining: f32 },
    Results,
}

#[derive(Resource, Debug, Clone)]
pub struct GameOverFlow {
    phase: GameOverPhase,
    death_show: f32,
}

impl Default for GameOverFlow {
    fn default() -> Self {
        Self {
            phase: GameOverPhase::Running,
            death_show: 3.0,
        }
    }
}

impl GameOverFlow {
    pub fn phase(&self) -> GameOverPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase != GameOverPhase::Running
    }

    pub fn showing_results(&self) -> bool {
        self.phase == GameOverPhase::Results
    }

    /// Returns `true` when the death animation should start now.
    pub fn begin(&mut self, cause: DeathCause, grounded: bool) -> bool {
        if self.is_over() {
            return false;
        }
        if cause == DeathCause::Decay && !grounded {
            self.phase = GameOverPhase::AwaitingGround;
            false
        } else {
            self.phase = GameOverPhase::DeathShow {
                remaining: self.death_show,
            };
            true
        }
    }

    /// Returns `true` when the death animation should start now.
    pub fn ground_contact(&mut self, grounded: bool) -> bool {
        if self.phase == GameOverPhase::AwaitingGround && grounded {
            self.phase = GameOverPhase::DeathShow {
                remaining: self.death_show,
            };
            return true;
        }
        false
    }

    /// Returns `true` on the frame the results should be shown.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let GameOverPhase::DeathShow { remaining } = self.phase {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.phase = GameOverPhase::Results;
                return true;
            }
            self.phase = GameOverPhase::DeathShow { remaining };
        }
        false
    }

    /// Skips straight to results. Returns `false` if they were already shown.
    pub fn force_results(&mut self) -> bool {
        if self.showing_results() {
            return false;
        }
        self.phase = GameOverPhase::Results;
        true
    }

    pub fn reset(&mut self) {
        self.phase = GameOverPhase::Running;
    }
}
