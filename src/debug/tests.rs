use super::state::{DEV_COIN_GRANT, DevAction, DevPanelState, HOLD_TO_OPEN, apply_dev_action};
use crate::prefs::PrefStore;

// ---- Hold-to-open tests ----

#[test]
fn hold_opens_after_threshold() {
    let mut state = DevPanelState::default();
    let mut opened = false;
    for _ in 0..49 {
        opened |= state.track_hold(true, 0.1);
    }
    assert!(!opened);
    assert!(state.track_hold(true, 0.2));
}

#[test]
fn hold_fires_once_until_released() {
    let mut state = DevPanelState::default();
    assert!(state.track_hold(true, HOLD_TO_OPEN));
    assert!(!state.track_hold(true, 1.0));
    assert!(!state.track_hold(false, 0.1));
    assert!(state.track_hold(true, HOLD_TO_OPEN));
}

#[test]
fn release_resets_hold() {
    let mut state = DevPanelState::default();
    state.track_hold(true, 4.0);
    state.track_hold(false, 0.1);
    assert_eq!(state.held, 0.0);
    assert!(!state.track_hold(true, 4.0));
}

// ---- Dev action tests ----

#[test]
fn add_and_reset_coins() {
    let mut prefs = PrefStore::in_memory();
    prefs.set_coins(25);
    apply_dev_action(&mut prefs, DevAction::AddCoins, DEV_COIN_GRANT);
    assert_eq!(prefs.coins(), 25 + DEV_COIN_GRANT);
    apply_dev_action(&mut prefs, DevAction::ResetCoins, 0);
    assert_eq!(prefs.coins(), 0);
}

#[test]
fn reset_unlocks_keeps_default_character() {
    let mut prefs = PrefStore::in_memory();
    prefs.set_unlocked(3, true);
    prefs.set_selected_character(3);
    apply_dev_action(&mut prefs, DevAction::ResetUnlocks, 0);
    assert!(prefs.is_unlocked(1));
    assert!(!prefs.is_unlocked(3));
    assert_eq!(prefs.selected_character(), 1);
}

#[test]
fn reset_best_score() {
    let mut prefs = PrefStore::in_memory();
    prefs.set_best_score(9000);
    let msg = apply_dev_action(&mut prefs, DevAction::ResetBest, 0);
    assert_eq!(prefs.best_score(), 0);
    assert_eq!(msg.as_deref(), Some("Best score reset"));
}

#[test]
fn close_leaves_profile_alone() {
    let mut prefs = PrefStore::in_memory();
    prefs.set_coins(7);
    assert!(apply_dev_action(&mut prefs, DevAction::Close, 0).is_none());
    assert_eq!(prefs.coins(), 7);
}

#[test]
fn add_coins_uses_typed_amount() {
    let mut prefs = PrefStore::in_memory();
    let mut state = DevPanelState::default();
    state.amount_input.clear();
    for digit in [2, 5, 0] {
        state.push_digit(digit);
    }
    assert_eq!(state.amount(), 250);

    let msg = apply_dev_action(&mut prefs, DevAction::AddCoins, state.amount());
    assert_eq!(prefs.coins(), 250);
    assert_eq!(msg.as_deref(), Some("Coins: 250"));
}

#[test]
fn add_coins_with_empty_amount_changes_nothing() {
    let mut prefs = PrefStore::in_memory();
    prefs.set_coins(40);
    let mut state = DevPanelState::default();
    while !state.amount_input.is_empty() {
        state.pop_digit();
    }
    assert_eq!(state.amount(), 0);
    assert!(apply_dev_action(&mut prefs, DevAction::AddCoins, state.amount()).is_some());
    assert_eq!(prefs.coins(), 40);
}

#[test]
fn amount_field_starts_at_default_grant_and_caps_length() {
    let mut state = DevPanelState::default();
    assert_eq!(state.amount(), DEV_COIN_GRANT);
    for _ in 0..20 {
        state.push_digit(9);
    }
    assert!(state.amount_input.len() <= 9);
    state.push_digit(12);
    assert!(state.amount_input.chars().all(|c| c.is_ascii_digit()));
}
