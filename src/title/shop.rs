//! Title domain: character shop rules, tooltip timing and the start
//! sequence timeline.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::content::CharacterDef;
use crate::prefs::PrefStore;
use crate::session::progress01;

pub const TOOLTIP_HOLD: f32 = 0.7;
pub const TOOLTIP_FADE: f32 = 0.5;
pub const START_MUSIC_FADE: f32 = 0.3;
pub const START_SCREEN_FADE: f32 = 0.25;
pub const START_PANEL_SECONDS: f32 = 4.0;
const FALLBACK_LINE: &str = "Let's go!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected(u32),
    Purchased { id: u32, price: u64 },
    InsufficientCoins { id: u32, price: u64 },
}

impl SelectOutcome {
    pub fn tip(self) -> Option<&'static str> {
        match self {
            SelectOutcome::Selected(_) => None,
            SelectOutcome::Purchased { .. } => Some("Purchase complete!"),
            SelectOutcome::InsufficientCoins { .. } => Some("Not enough coins!"),
        }
    }
}

/// Selects an owned character, or buys and selects a locked one when the
/// wallet covers its price. Every change is persisted immediately.
pub fn select_or_purchase(prefs: &mut PrefStore, def: &CharacterDef) -> SelectOutcome {
    if prefs.is_unlocked(def.id) {
        prefs.set_selected_character(def.id);
        return SelectOutcome::Selected(def.id);
    }
    if !prefs.try_spend_coins(def.price) {
        return SelectOutcome::InsufficientCoins {
            id: def.id,
            price: def.price,
        };
    }
    prefs.set_unlocked(def.id, true);
    prefs.set_selected_character(def.id);
    SelectOutcome::Purchased {
        id: def.id,
        price: def.price,
    }
}

/// Random start panel line for a character.
pub fn pick_line<R: Rng>(def: Option<&CharacterDef>, rng: &mut R) -> String {
    def.and_then(|def| def.lines.choose(rng))
        .cloned()
        .unwrap_or_else(|| FALLBACK_LINE.to_string())
}

/// A short message that holds, then fades.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub message: String,
    pub elapsed: f32,
}

impl Tooltip {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            elapsed: 0.0,
        }
    }

    pub fn alpha(&self) -> f32 {
        1.0 - progress01(self.elapsed - TOOLTIP_HOLD, TOOLTIP_FADE)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= TOOLTIP_HOLD + TOOLTIP_FADE
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartStage {
    /// Title music fading out.
    MusicFade,
    /// Screen fading to the start panel colour, with overlay alpha.
    ScreenFade(f32),
    /// Start panel with the character's line.
    Panel,
    /// Time to load the run.
    Load,
}

/// Where the start sequence is `elapsed` seconds after pressing start.
pub fn start_stage(elapsed: f32) -> StartStage {
    let screen_t = elapsed - START_MUSIC_FADE;
    let panel_t = screen_t - START_SCREEN_FADE;
    if screen_t < 0.0 {
        StartStage::MusicFade
    } else if panel_t < 0.0 {
        StartStage::ScreenFade(progress01(screen_t, START_SCREEN_FADE))
    } else if panel_t < START_PANEL_SECONDS {
        StartStage::Panel
    } else {
        StartStage::Load
    }
}
