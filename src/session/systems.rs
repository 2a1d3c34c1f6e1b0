//! Session domain: systems driving the run state machines.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::audio::{BgmCommand, BgmTrack, DEFAULT_CROSSFADE, Sfx, SfxRequest};
use crate::content::ContentRegistry;
use crate::prefs::PrefStore;
use crate::session::events::{
    CollectedEvent, DamageRequest, DeathPresentationEvent, FallDeathRequest, ForceResultsRequest,
    HealRequest, HealedEvent, HealthEvent, ResultsReadyEvent,
};
use crate::session::health::{HealthOutcome, HealthTuning, RunHealth};
use crate::session::pause::PauseControl;
use crate::session::ramp::DifficultyRamp;
use crate::session::score::{Collectible, GameOverFlow, RunScore};
use crate::session::{GroundContact, RunSession};

const RESUME_FADE: f32 = 0.2;

/// Music change owed to a health outcome, if any.
pub(crate) fn bgm_reaction(outcome: HealthOutcome) -> Option<BgmCommand> {
    match outcome {
        HealthOutcome::ReviveStarted | HealthOutcome::Died(_) => {
            Some(BgmCommand::Pause { fade: 0.0 })
        }
        HealthOutcome::Revived => Some(BgmCommand::Resume { fade: RESUME_FADE }),
        _ => None,
    }
}

/// Applies a heal pickup. The popup is owed whenever the pickup is
/// consumed, even when health is already full.
pub(crate) fn consume_heal(
    health: &mut RunHealth,
    request: &HealRequest,
) -> (HealthOutcome, HealedEvent) {
    let outcome = health.heal(request.amount);
    let popup = HealedEvent {
        amount: request.amount,
        position: request.position,
    };
    (outcome, popup)
}

/// Everything that reacts to a `HealthOutcome`.
#[derive(SystemParam)]
pub(crate) struct HealthReactions<'w> {
    events: MessageWriter<'w, HealthEvent>,
    death: MessageWriter<'w, DeathPresentationEvent>,
    bgm: MessageWriter<'w, BgmCommand>,
    sfx: MessageWriter<'w, SfxRequest>,
    pause: ResMut<'w, PauseControl>,
    flow: ResMut<'w, GameOverFlow>,
}

impl HealthReactions<'_> {
    fn react(&mut self, outcome: HealthOutcome, grounded: bool) {
        if outcome == HealthOutcome::Ignored {
            return;
        }
        self.events.write(HealthEvent { outcome });
        if let Some(command) = bgm_reaction(outcome) {
            self.bgm.write(command);
        }

        match outcome {
            HealthOutcome::CrashInvincible => {
                self.sfx.write(Sfx::Crash.into());
            }
            HealthOutcome::ReviveQueued => {
                info!("Health depleted; revive queued until ground contact");
            }
            HealthOutcome::ReviveStarted => {
                info!("Revive started");
                self.pause.set_paused(true);
                self.sfx.write(Sfx::Death.into());
            }
            HealthOutcome::ReviveEffect => {
                self.sfx.write(Sfx::Revive.into());
            }
            HealthOutcome::Revived => {
                info!("Revive finished");
                self.pause.set_paused(false);
            }
            HealthOutcome::Died(cause) => {
                info!("Player died: {:?}", cause);
                self.sfx.write(Sfx::Crash.into());
                if self.flow.begin(cause, grounded) {
                    self.death.write(DeathPresentationEvent);
                }
            }
            HealthOutcome::Changed
            | HealthOutcome::InvincibilityEnded
            | HealthOutcome::Ignored => {}
        }
    }
}

pub(crate) fn start_session(
    prefs: Res<PrefStore>,
    registry: Res<ContentRegistry>,
    mut session: ResMut<RunSession>,
    mut ramp: ResMut<DifficultyRamp>,
    mut pause: ResMut<PauseControl>,
    mut score: ResMut<RunScore>,
    mut flow: ResMut<GameOverFlow>,
    mut contact: ResMut<GroundContact>,
    mut bgm: MessageWriter<BgmCommand>,
) {
    let character_id = prefs.playable_character();
    let (max_hp, revive, magnet) = match registry.character(character_id) {
        Some(def) => (def.max_hp, def.revive, def.magnet),
        None => {
            warn!(
                "Character {} missing from registry, using starter stats",
                character_id
            );
            (50, false, false)
        }
    };

    *session = RunSession {
        character_id,
        magnet,
        health: RunHealth::new(max_hp, revive),
    };
    ramp.reset();
    pause.reset();
    *score = RunScore::default();
    flow.reset();
    *contact = GroundContact::default();

    bgm.write(BgmCommand::Play {
        track: BgmTrack::Game,
        crossfade: DEFAULT_CROSSFADE,
    });

    info!(
        "Run started: character {}, {} hp, revive: {}, magnet: {}",
        character_id, max_hp, revive, magnet
    );
}

pub(crate) fn end_session(mut pause: ResMut<PauseControl>) {
    pause.reset();
}

pub(crate) fn tick_health(
    time: Res<Time>,
    real_time: Res<Time<Real>>,
    tuning: Res<HealthTuning>,
    contact: Res<GroundContact>,
    mut session: ResMut<RunSession>,
    mut reactions: HealthReactions,
) {
    let grounded = contact.grounded;
    let dt = time.delta_secs();

    let outcome = session.health.ground_contact(grounded, &tuning);
    reactions.react(outcome, grounded);

    let outcome = session.health.tick(dt, real_time.delta_secs(), &tuning);
    reactions.react(outcome, grounded);

    if !reactions.flow.is_over() {
        let outcome = session.health.tick_decay(dt, &tuning);
        reactions.react(outcome, grounded);
    }
}

pub(crate) fn apply_health_requests(
    tuning: Res<HealthTuning>,
    contact: Res<GroundContact>,
    mut session: ResMut<RunSession>,
    mut damage: MessageReader<DamageRequest>,
    mut falls: MessageReader<FallDeathRequest>,
    mut heals: MessageReader<HealRequest>,
    mut healed: MessageWriter<HealedEvent>,
    mut reactions: HealthReactions,
) {
    if reactions.flow.is_over() {
        damage.clear();
        falls.clear();
        heals.clear();
        return;
    }
    let grounded = contact.grounded;

    for _ in falls.read() {
        let outcome = session.health.fall_death();
        reactions.react(outcome, grounded);
    }

    for request in damage.read() {
        let outcome = session
            .health
            .apply_damage(request.amount, request.kind, &tuning);
        reactions.react(outcome, grounded);
    }

    for request in heals.read() {
        let (outcome, popup) = consume_heal(&mut session.health, request);
        healed.write(popup);
        reactions.sfx.write(Sfx::Heal.into());
        reactions.react(outcome, grounded);
    }
}

pub(crate) fn collect_score(
    flow: Res<GameOverFlow>,
    mut collected: MessageReader<CollectedEvent>,
    mut score: ResMut<RunScore>,
    mut sfx: MessageWriter<SfxRequest>,
) {
    for event in collected.read() {
        if flow.is_over() {
            continue;
        }
        score.collect(event.item);
        let clip = match event.item {
            Collectible::Jelly => Sfx::Jelly,
            Collectible::SilverCoin | Collectible::GoldCoin => Sfx::Coin,
        };
        sfx.write(clip.into());
    }
}

pub(crate) fn advance_ramp(
    time: Res<Time>,
    flow: Res<GameOverFlow>,
    pause: Res<PauseControl>,
    mut ramp: ResMut<DifficultyRamp>,
) {
    if flow.is_over() || pause.is_paused() {
        return;
    }
    ramp.advance(time.delta_secs());
}

pub(crate) fn tick_game_over(
    time: Res<Time>,
    contact: Res<GroundContact>,
    score: Res<RunScore>,
    mut prefs: ResMut<PrefStore>,
    mut flow: ResMut<GameOverFlow>,
    mut pause: ResMut<PauseControl>,
    mut death: MessageWriter<DeathPresentationEvent>,
    mut results: MessageWriter<ResultsReadyEvent>,
) {
    // Falling out of the world also ends the wait for ground.
    if flow.ground_contact(contact.grounded || contact.fell) {
        death.write(DeathPresentationEvent);
    }
    if flow.tick(time.delta_secs()) {
        finalize_results(&score, &mut prefs, &mut pause, &mut results);
    }
}

pub(crate) fn force_results(
    score: Res<RunScore>,
    mut requests: MessageReader<ForceResultsRequest>,
    mut prefs: ResMut<PrefStore>,
    mut flow: ResMut<GameOverFlow>,
    mut pause: ResMut<PauseControl>,
    mut results: MessageWriter<ResultsReadyEvent>,
) {
    for _ in requests.read() {
        if flow.force_results() {
            finalize_results(&score, &mut prefs, &mut pause, &mut results);
        }
    }
}

fn finalize_results(
    score: &RunScore,
    prefs: &mut PrefStore,
    pause: &mut PauseControl,
    results: &mut MessageWriter<ResultsReadyEvent>,
) {
    let summary = prefs.record_result(score.score, score.coins);
    pause.set_paused(true);
    info!(
        "Run finished: score {}, coins {}, best {}{}",
        summary.score,
        summary.coins,
        summary.best_score,
        if summary.new_record { " (new record)" } else { "" }
    );
    results.write(ResultsReadyEvent { summary });
}
