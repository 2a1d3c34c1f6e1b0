//! Audio domain: persisted volume levels.

use bevy::prelude::*;

use crate::prefs::{KEY_VOL_MASTER, KEY_VOL_MUSIC, KEY_VOL_SFX, PrefStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeChannel {
    Music,
    Sfx,
    Master,
}

impl VolumeChannel {
    pub fn key(self) -> &'static str {
        match self {
            VolumeChannel::Music => KEY_VOL_MUSIC,
            VolumeChannel::Sfx => KEY_VOL_SFX,
            VolumeChannel::Master => KEY_VOL_MASTER,
        }
    }

    pub fn default_level(self) -> f32 {
        match self {
            VolumeChannel::Music => 0.5,
            VolumeChannel::Sfx | VolumeChannel::Master => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VolumeChannel::Music => "Music",
            VolumeChannel::Sfx => "Effects",
            VolumeChannel::Master => "Master",
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct VolumeSettings {
    pub music: f32,
    pub sfx: f32,
    pub master: f32,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            music: VolumeChannel::Music.default_level(),
            sfx: VolumeChannel::Sfx.default_level(),
            master: VolumeChannel::Master.default_level(),
        }
    }
}

impl VolumeSettings {
    pub fn from_prefs(prefs: &PrefStore) -> Self {
        let read = |channel: VolumeChannel| prefs.volume(channel.key(), channel.default_level());
        Self {
            music: read(VolumeChannel::Music),
            sfx: read(VolumeChannel::Sfx),
            master: read(VolumeChannel::Master),
        }
    }

    pub fn get(&self, channel: VolumeChannel) -> f32 {
        match channel {
            VolumeChannel::Music => self.music,
            VolumeChannel::Sfx => self.sfx,
            VolumeChannel::Master => self.master,
        }
    }

    /// Sets a channel and writes it through to the pref store.
    pub fn set(&mut self, channel: VolumeChannel, value: f32, prefs: &mut PrefStore) {
        let value = value.clamp(0.0, 1.0);
        match channel {
            VolumeChannel::Music => self.music = value,
            VolumeChannel::Sfx => self.sfx = value,
            VolumeChannel::Master => self.master = value,
        }
        prefs.set_volume(channel.key(), value);
    }

    /// Moves a channel by `delta`, snapping to whole percents.
    pub fn step(&mut self, channel: VolumeChannel, delta: f32, prefs: &mut PrefStore) {
        let next = ((self.get(channel) + delta) * 100.0).round() / 100.0;
        self.set(channel, next, prefs);
    }

    pub fn percent(&self, channel: VolumeChannel) -> u32 {
        (self.get(channel) * 100.0).round() as u32
    }

    pub fn effective_sfx(&self) -> f32 {
        (self.sfx * self.master).clamp(0.0, 1.0)
    }

    pub fn target_bgm(&self) -> f32 {
        (self.music * self.master).clamp(0.0, 1.0)
    }
}

pub(crate) fn load_volume_settings(mut commands: Commands, prefs: Res<PrefStore>) {
    let settings = VolumeSettings::from_prefs(&prefs);
    info!(
        "Volume: music {}%, sfx {}%, master {}%",
        settings.percent(VolumeChannel::Music),
        settings.percent(VolumeChannel::Sfx),
        settings.percent(VolumeChannel::Master)
    );
    commands.insert_resource(settings);
}
