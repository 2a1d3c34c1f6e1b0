//! Audio domain: one-shot sound effects.

use bevy::audio::Volume;
use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::audio::AudioAssets;
use crate::audio::volume::VolumeSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Jelly,
    Coin,
    Heal,
    Crash,
    Jump,
    Slide,
    Revive,
    Death,
    Button,
    Purchase,
    Denied,
}

impl Sfx {
    pub const ALL: [Sfx; 11] = [
        Sfx::Jelly,
        Sfx::Coin,
        Sfx::Heal,
        Sfx::Crash,
        Sfx::Jump,
        Sfx::Slide,
        Sfx::Revive,
        Sfx::Death,
        Sfx::Button,
        Sfx::Purchase,
        Sfx::Denied,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Sfx::Jelly => "audio/sfx_jelly.ogg",
            Sfx::Coin => "audio/sfx_coin.ogg",
            Sfx::Heal => "audio/sfx_heal.ogg",
            Sfx::Crash => "audio/sfx_crash.ogg",
            Sfx::Jump => "audio/sfx_jump.ogg",
            Sfx::Slide => "audio/sfx_slide.ogg",
            Sfx::Revive => "audio/sfx_revive.ogg",
            Sfx::Death => "audio/sfx_death.ogg",
            Sfx::Button => "audio/sfx_button.ogg",
            Sfx::Purchase => "audio/sfx_purchase.ogg",
            Sfx::Denied => "audio/sfx_denied.ogg",
        }
    }

    /// Coins are played as two stacked voices so they cut through the music.
    pub fn layers(self) -> usize {
        match self {
            Sfx::Coin => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SfxRequest {
    pub sfx: Sfx,
}

impl Message for SfxRequest {}

impl From<Sfx> for SfxRequest {
    fn from(sfx: Sfx) -> Self {
        Self { sfx }
    }
}

pub(crate) fn play_sfx(
    mut commands: Commands,
    mut requests: MessageReader<SfxRequest>,
    assets: Option<Res<AudioAssets>>,
    volume: Res<VolumeSettings>,
) {
    let Some(assets) = assets else {
        requests.clear();
        return;
    };
    let level = volume.effective_sfx();
    if level <= 0.0 {
        requests.clear();
        return;
    }

    for request in requests.read() {
        let Some(handle) = assets.sfx.get(&request.sfx) else {
            continue;
        };
        for _ in 0..request.sfx.layers() {
            commands.spawn((
                AudioPlayer::new(handle.clone()),
                PlaybackSettings::DESPAWN.with_volume(Volume::Linear(level)),
            ));
        }
    }
}
