//! Session domain: messages into and out of the run state machine.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::session::health::{DamageKind, HealthOutcome};
use crate::session::score::{Collectible, ResultSummary};

/// Damage to apply to the player.
#[derive(Debug, Clone, Copy)]
pub struct DamageRequest {
    pub amount: i32,
    pub kind: DamageKind,
}

impl Message for DamageRequest {}

/// Healing from a pickup at a world position.
#[derive(Debug, Clone, Copy)]
pub struct HealRequest {
    pub amount: i32,
    pub position: Vec2,
}

impl Message for HealRequest {}

/// The player dropped out of the play area.
#[derive(Debug, Clone, Copy)]
pub struct FallDeathRequest;

impl Message for FallDeathRequest {}

/// A scoring pickup was consumed.
#[derive(Debug, Clone, Copy)]
pub struct CollectedEvent {
    pub item: Collectible,
}

impl Message for CollectedEvent {}

/// Broadcast of every state machine reaction that changed something.
#[derive(Debug, Clone, Copy)]
pub struct HealthEvent {
    pub outcome: HealthOutcome,
}

impl Message for HealthEvent {}

/// A heal pickup was consumed, for the heal popup.
#[derive(Debug, Clone, Copy)]
pub struct HealedEvent {
    pub amount: i32,
    pub position: Vec2,
}

impl Message for HealedEvent {}

/// The death animation should start playing.
#[derive(Debug, Clone, Copy)]
pub struct DeathPresentationEvent;

impl Message for DeathPresentationEvent {}

/// Skip the rest of the run and show results now.
#[derive(Debug, Clone, Copy)]
pub struct ForceResultsRequest;

impl Message for ForceResultsRequest {}

/// Results were banked and should be displayed.
#[derive(Debug, Clone, Copy)]
pub struct ResultsReadyEvent {
    pub summary: ResultSummary,
}

impl Message for ResultsReadyEvent {}
