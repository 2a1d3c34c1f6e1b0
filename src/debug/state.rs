//! Debug domain: dev panel state and the profile edits it performs.

use bevy::prelude::*;

use crate::prefs::PrefStore;

/// Seconds Z must be held on the title screen to open the panel.
pub const HOLD_TO_OPEN: f32 = 5.0;
/// Amount the coin field starts with.
pub const DEV_COIN_GRANT: u64 = 1000;
const MESSAGE_SECONDS: f32 = 2.0;
const AMOUNT_MAX_DIGITS: usize = 9;

#[derive(Resource, Debug)]
pub struct DevPanelState {
    pub visible: bool,
    /// Seconds Z has been held continuously.
    pub held: f32,
    /// Set once a hold opened the panel; cleared on release.
    pub hold_consumed: bool,
    /// Message to display temporarily in the panel
    pub status_message: Option<(String, f32)>,
    /// Digits typed into the coin amount field.
    pub amount_input: String,
}

impl Default for DevPanelState {
    fn default() -> Self {
        Self {
            visible: false,
            held: 0.0,
            hold_consumed: false,
            status_message: None,
            amount_input: DEV_COIN_GRANT.to_string(),
        }
    }
}

impl DevPanelState {
    /// Feeds one frame of the Z key. Returns `true` on the frame a hold
    /// reaches the threshold.
    pub fn track_hold(&mut self, held: bool, dt: f32) -> bool {
        if !held {
            self.held = 0.0;
            self.hold_consumed = false;
            return false;
        }
        self.held += dt;
        if self.held >= HOLD_TO_OPEN && !self.hold_consumed {
            self.hold_consumed = true;
            return true;
        }
        false
    }

    pub fn push_digit(&mut self, digit: u8) {
        if digit > 9 || self.amount_input.len() >= AMOUNT_MAX_DIGITS {
            return;
        }
        if self.amount_input == "0" {
            self.amount_input.clear();
        }
        self.amount_input.push(char::from(b'0' + digit));
    }

    pub fn pop_digit(&mut self) {
        self.amount_input.pop();
    }

    /// Coins the add button grants. Zero when the field is empty.
    pub fn amount(&self) -> u64 {
        self.amount_input.parse().unwrap_or(0)
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), MESSAGE_SECONDS));
    }
}

/// Actions that can be triggered from the dev panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevAction {
    AddCoins,
    ResetCoins,
    ResetUnlocks,
    ResetBest,
    Close,
}

impl DevAction {
    pub const ALL: [DevAction; 5] = [
        DevAction::AddCoins,
        DevAction::ResetCoins,
        DevAction::ResetUnlocks,
        DevAction::ResetBest,
        DevAction::Close,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DevAction::AddCoins => "Add Coins",
            DevAction::ResetCoins => "Reset Coins",
            DevAction::ResetUnlocks => "Reset Unlocks",
            DevAction::ResetBest => "Reset Best",
            DevAction::Close => "Close [Z]",
        }
    }
}

/// Applies a profile edit. `amount` feeds the add coins action. Returns
/// the status line to show, or `None` for actions that do not touch the
/// profile.
pub fn apply_dev_action(prefs: &mut PrefStore, action: DevAction, amount: u64) -> Option<String> {
    match action {
        DevAction::AddCoins if amount == 0 => Some("Enter an amount first".to_string()),
        DevAction::AddCoins => {
            prefs.add_coins(amount);
            Some(format!("Coins: {}", prefs.coins()))
        }
        DevAction::ResetCoins => {
            prefs.set_coins(0);
            Some("Coins reset".to_string())
        }
        DevAction::ResetUnlocks => {
            prefs.reset_unlocks();
            Some("Unlocks reset".to_string())
        }
        DevAction::ResetBest => {
            prefs.set_best_score(0);
            Some("Best score reset".to_string())
        }
        DevAction::Close => None,
    }
}
