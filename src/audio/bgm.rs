//! Audio domain: background music voices with crossfades and pause fades.

use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::audio::AudioAssets;
use crate::audio::volume::VolumeSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BgmTrack {
    Title,
    Game,
}

impl BgmTrack {
    pub fn path(self) -> &'static str {
        match self {
            BgmTrack::Title => "audio/bgm_title.ogg",
            BgmTrack::Game => "audio/bgm_game.ogg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BgmCommand {
    /// Crossfade to `track` over `crossfade` seconds.
    Play { track: BgmTrack, crossfade: f32 },
    FadeOut { seconds: f32 },
    /// Fade down and pause, keeping the playback position.
    Pause { fade: f32 },
    Resume { fade: f32 },
}

impl Message for BgmCommand {}

pub const DEFAULT_CROSSFADE: f32 = 0.5;

/// Linear fade of a voice level. A new fade replaces the running one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelFade {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub elapsed: f32,
}

impl LevelFade {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Returns the level after `dt` and whether the fade is done.
    pub fn advance(&mut self, dt: f32) -> (f32, bool) {
        self.elapsed += dt.max(0.0);
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return (self.to, true);
        }
        let k = self.elapsed / self.duration;
        (self.from + (self.to - self.from) * k, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeEnd {
    #[default]
    Keep,
    Pause,
    Despawn,
}

/// A playing music source. `level` scales the target music volume.
#[derive(Component, Debug, Clone)]
pub struct BgmVoice {
    pub track: BgmTrack,
    pub level: f32,
    pub fade: Option<LevelFade>,
    pub on_fade_end: FadeEnd,
    pub paused: bool,
}

impl BgmVoice {
    pub fn fade_to(&mut self, to: f32, seconds: f32, on_end: FadeEnd) {
        self.fade = Some(LevelFade::new(self.level, to, seconds));
        self.on_fade_end = on_end;
    }

    /// Steps the fade. Returns `true` when the voice should be despawned.
    pub fn step(&mut self, dt: f32) -> bool {
        let Some(mut fade) = self.fade else {
            return false;
        };
        let (level, done) = fade.advance(dt);
        self.level = level;
        if !done {
            self.fade = Some(fade);
            return false;
        }
        self.fade = None;
        match std::mem::take(&mut self.on_fade_end) {
            FadeEnd::Keep => false,
            FadeEnd::Pause => {
                self.paused = true;
                false
            }
            FadeEnd::Despawn => true,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct BgmState {
    pub current: Option<BgmTrack>,
    pub paused: bool,
}

pub(crate) fn handle_bgm_commands(
    mut commands: Commands,
    mut requests: MessageReader<BgmCommand>,
    mut state: ResMut<BgmState>,
    assets: Option<Res<AudioAssets>>,
    mut voices: Query<&mut BgmVoice>,
) {
    for request in requests.read() {
        match *request {
            BgmCommand::Play { track, crossfade } => {
                if state.current == Some(track) {
                    if state.paused {
                        resume_voices(&mut voices, crossfade);
                        state.paused = false;
                    }
                    continue;
                }
                for mut voice in &mut voices {
                    voice.paused = false;
                    voice.fade_to(0.0, crossfade, FadeEnd::Despawn);
                }
                state.current = Some(track);
                state.paused = false;

                let Some(assets) = assets.as_ref() else {
                    warn!("Audio assets not loaded; cannot play {:?}", track);
                    continue;
                };
                let mut voice = BgmVoice {
                    track,
                    level: 0.0,
                    fade: None,
                    on_fade_end: FadeEnd::Keep,
                    paused: false,
                };
                voice.fade_to(1.0, crossfade, FadeEnd::Keep);
                commands.spawn((
                    voice,
                    AudioPlayer::new(assets.bgm(track)),
                    PlaybackSettings::LOOP.with_volume(Volume::Linear(0.0)),
                ));
                debug!("BGM crossfade to {:?} over {}s", track, crossfade);
            }
            BgmCommand::FadeOut { seconds } => {
                for mut voice in &mut voices {
                    voice.fade_to(0.0, seconds, FadeEnd::Despawn);
                }
                state.current = None;
                state.paused = false;
            }
            BgmCommand::Pause { fade } => {
                if state.paused {
                    continue;
                }
                for mut voice in &mut voices {
                    voice.fade_to(0.0, fade, FadeEnd::Pause);
                }
                state.paused = true;
            }
            BgmCommand::Resume { fade } => {
                if !state.paused {
                    continue;
                }
                resume_voices(&mut voices, fade);
                state.paused = false;
            }
        }
    }
}

fn resume_voices(voices: &mut Query<&mut BgmVoice>, fade: f32) {
    for mut voice in voices.iter_mut() {
        if voice.on_fade_end == FadeEnd::Despawn {
            continue;
        }
        voice.paused = false;
        voice.fade_to(1.0, fade, FadeEnd::Keep);
    }
}

/// Fades run on real time so they keep moving while the game is paused.
pub(crate) fn update_bgm_voices(
    mut commands: Commands,
    time: Res<Time<Real>>,
    volume: Res<VolumeSettings>,
    mut voices: Query<(Entity, &mut BgmVoice, Option<&mut AudioSink>)>,
) {
    let dt = time.delta_secs();
    let target = volume.target_bgm();

    for (entity, mut voice, sink) in &mut voices {
        if voice.step(dt) {
            commands.entity(entity).despawn();
            continue;
        }
        let Some(mut sink) = sink else {
            continue;
        };
        sink.set_volume(Volume::Linear(voice.level * target));
        if voice.paused && !sink.is_paused() {
            sink.pause();
        } else if !voice.paused && sink.is_paused() {
            sink.play();
        }
    }
}
