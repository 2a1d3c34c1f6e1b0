//! Audio domain: music director, sound effects and volume settings.

mod bgm;
mod sfx;
mod volume;

#[cfg(test)]
mod tests;

pub use bgm::{BgmCommand, BgmState, BgmTrack, DEFAULT_CROSSFADE};
pub use sfx::{Sfx, SfxRequest};
pub use volume::{VolumeChannel, VolumeSettings};

use bevy::prelude::*;
use std::collections::HashMap;

use crate::audio::bgm::{handle_bgm_commands, update_bgm_voices};
use crate::audio::sfx::play_sfx;
use crate::audio::volume::load_volume_settings;

/// Handles to every clip the game plays.
#[derive(Resource, Debug, Default)]
pub struct AudioAssets {
    pub title_bgm: Handle<AudioSource>,
    pub game_bgm: Handle<AudioSource>,
    pub sfx: HashMap<Sfx, Handle<AudioSource>>,
}

impl AudioAssets {
    pub fn bgm(&self, track: BgmTrack) -> Handle<AudioSource> {
        match track {
            BgmTrack::Title => self.title_bgm.clone(),
            BgmTrack::Game => self.game_bgm.clone(),
        }
    }
}

fn load_audio_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    let sfx = Sfx::ALL
        .iter()
        .map(|sfx| (*sfx, asset_server.load(sfx.path())))
        .collect();
    commands.insert_resource(AudioAssets {
        title_bgm: asset_server.load(BgmTrack::Title.path()),
        game_bgm: asset_server.load(BgmTrack::Game.path()),
        sfx,
    });
}

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VolumeSettings>()
            .init_resource::<BgmState>()
            .add_message::<BgmCommand>()
            .add_message::<SfxRequest>()
            .add_systems(Startup, (load_audio_assets, load_volume_settings))
            .add_systems(
                Update,
                (handle_bgm_commands, update_bgm_voices, play_sfx).chain(),
            );
    }
}
