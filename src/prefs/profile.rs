//! Prefs domain: typed accessors for the player profile keys.

use super::PrefStore;
use crate::session::ResultSummary;

pub const CHARACTER_COUNT: u32 = 4;

pub const KEY_SELECTED_CHARACTER: &str = "SelectedCharacter";
pub const KEY_BEST_SCORE: &str = "BestScore";
pub const KEY_COINS: &str = "Player_Coins";
/// Older builds banked coins under this key. Still read as a fallback.
pub const KEY_COINS_LEGACY: &str = "CoinsTotal";
pub const KEY_VOL_MUSIC: &str = "VOL_MUSIC";
pub const KEY_VOL_SFX: &str = "VOL_SFX";
pub const KEY_VOL_MASTER: &str = "VOL_MASTER";

pub fn unlock_key(id: u32) -> String {
    format!("Character_{}_IsUnlock", id)
}

pub fn clamp_character_id(id: i64) -> u32 {
    id.clamp(1, CHARACTER_COUNT as i64) as u32
}

impl PrefStore {
    pub fn selected_character(&self) -> u32 {
        clamp_character_id(self.get_int(KEY_SELECTED_CHARACTER, 1))
    }

    pub fn set_selected_character(&mut self, id: u32) {
        self.set_int(KEY_SELECTED_CHARACTER, clamp_character_id(id as i64) as i64);
    }

    /// Character 1 is always playable. Others read the string flag and
    /// fall back to an integer flag.
    pub fn is_unlocked(&self, id: u32) -> bool {
        if id == 1 {
            return true;
        }
        let key = unlock_key(id);
        if let Some(flag) = self.get_string(&key) {
            return flag.trim().eq_ignore_ascii_case("true");
        }
        self.get_int(&key, 0) != 0
    }

    pub fn set_unlocked(&mut self, id: u32, unlocked: bool) {
        let value = if unlocked { "true" } else { "false" };
        self.set_string(&unlock_key(id), value);
    }

    pub fn ensure_default_unlock(&mut self) {
        if self.get_string(&unlock_key(1)) != Some("true") {
            self.set_unlocked(1, true);
        }
    }

    /// Selected id, falling back to 1 if the stored pick is locked.
    pub fn playable_character(&self) -> u32 {
        let id = self.selected_character();
        if self.is_unlocked(id) { id } else { 1 }
    }

    pub fn coins(&self) -> u64 {
        let raw = if self.has_key(KEY_COINS) {
            self.get_int(KEY_COINS, 0)
        } else {
            self.get_int(KEY_COINS_LEGACY, 0)
        };
        raw.max(0) as u64
    }

    /// Writes the balance under both coin keys.
    pub fn set_coins(&mut self, coins: u64) {
        let value = i64::try_from(coins).unwrap_or(i64::MAX);
        self.set_int(KEY_COINS, value);
        self.set_int(KEY_COINS_LEGACY, value);
    }

    pub fn add_coins(&mut self, amount: u64) {
        let total = self.coins().saturating_add(amount);
        self.set_coins(total);
    }

    /// Deducts `amount` if the balance covers it.
    pub fn try_spend_coins(&mut self, amount: u64) -> bool {
        let balance = self.coins();
        if balance < amount {
            return false;
        }
        self.set_coins(balance - amount);
        true
    }

    pub fn best_score(&self) -> u64 {
        self.get_int(KEY_BEST_SCORE, 0).max(0) as u64
    }

    pub fn set_best_score(&mut self, score: u64) {
        self.set_int(KEY_BEST_SCORE, i64::try_from(score).unwrap_or(i64::MAX));
    }

    /// Banks the run: best score replaced only when strictly beaten, run
    /// coins added to the balance.
    pub fn record_result(&mut self, score: u64, coins: u64) -> ResultSummary {
        let previous_best = self.best_score();
        let new_record = score > previous_best;
        if new_record {
            self.set_best_score(score);
        }
        if coins > 0 {
            self.add_coins(coins);
        }
        ResultSummary {
            score,
            coins,
            best_score: previous_best.max(score),
            new_record,
        }
    }

    pub fn reset_unlocks(&mut self) {
        self.set_unlocked(1, true);
        for id in 2..=CHARACTER_COUNT {
            self.set_unlocked(id, false);
        }
        self.set_selected_character(1);
    }

    pub fn volume(&self, key: &str, default: f32) -> f32 {
        self.get_float(key, default).clamp(0.0, 1.0)
    }

    pub fn set_volume(&mut self, key: &str, value: f32) {
        self.set_float(key, value.clamp(0.0, 1.0));
    }
}
