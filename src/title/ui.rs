//! Title domain: title screen, character cards and the start sequence.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::audio::{BgmCommand, BgmTrack, DEFAULT_CROSSFADE, Sfx, SfxRequest};
use crate::content::{CharacterDef, ContentRegistry};
use crate::core::{SCENE_RUN, SceneRequest};
use crate::prefs::{CHARACTER_COUNT, PrefStore};
use crate::title::shop::{
    START_MUSIC_FADE, SelectOutcome, StartStage, Tooltip, pick_line, select_or_purchase,
    start_stage,
};
use crate::ui::{BlocksSettings, SettingsOpen, format_thousands};

const BG_COLOR: Color = Color::srgb(0.99, 0.88, 0.92);
const PANEL_COLOR: Color = Color::srgb(1.0, 0.96, 0.98);
const TEXT_COLOR: Color = Color::srgb(0.35, 0.15, 0.3);
const MUTED_TEXT: Color = Color::srgb(0.6, 0.45, 0.55);
const SELECTED_BORDER: Color = Color::srgb(0.95, 0.35, 0.6);
const LOCKED_TINT: Color = Color::srgb(0.55, 0.5, 0.55);

/// Marker for the title screen root
#[derive(Component, Debug)]
pub struct TitleUi;

#[derive(Component, Debug)]
pub struct TitleCoinsText;

#[derive(Component, Debug)]
pub struct TitleBestText;

#[derive(Component, Debug)]
pub struct CharacterCard {
    pub id: u32,
}

#[derive(Component, Debug)]
pub struct CardStatusText {
    pub id: u32,
}

#[derive(Component, Debug)]
pub struct StartButton;

#[derive(Component, Debug)]
pub struct TooltipText;

#[derive(Component, Debug)]
pub struct StartFade;

#[derive(Component, Debug)]
pub struct StartPanel;

#[derive(Resource, Debug)]
pub struct ActiveTooltip(pub Tooltip);

/// Running once start has been pressed.
#[derive(Resource, Debug)]
pub struct StartSequence {
    pub elapsed: f32,
    pub line: String,
    pub panel_shown: bool,
    pub load_requested: bool,
}

/// Status line on a character card.
pub fn card_status(prefs: &PrefStore, def: &CharacterDef) -> String {
    if prefs.selected_character() == def.id && prefs.is_unlocked(def.id) {
        "Selected".to_string()
    } else if prefs.is_unlocked(def.id) {
        "Owned".to_string()
    } else {
        format!("{} coins", format_thousands(def.price))
    }
}

fn card_traits(def: &CharacterDef) -> String {
    let mut traits = vec![format!("HP {}", def.max_hp)];
    if def.revive {
        traits.push("Revive".to_string());
    }
    if def.magnet {
        traits.push("Magnet".to_string());
    }
    traits.join(" / ")
}

pub(crate) fn enter_title(
    mut commands: Commands,
    mut prefs: ResMut<PrefStore>,
    registry: Res<ContentRegistry>,
    mut bgm: MessageWriter<BgmCommand>,
) {
    prefs.ensure_default_unlock();
    bgm.write(BgmCommand::Play {
        track: BgmTrack::Title,
        crossfade: DEFAULT_CROSSFADE,
    });

    commands
        .spawn((
            TitleUi,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BG_COLOR),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("JELLY RUNNER"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(SELECTED_BORDER),
                Node {
                    margin: UiRect::bottom(Val::Px(12.0)),
                    ..default()
                },
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    column_gap: Val::Px(32.0),
                    margin: UiRect::bottom(Val::Px(32.0)),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        TitleCoinsText,
                        Text::new(format!("Coins {}", format_thousands(prefs.coins()))),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.75, 0.55, 0.1)),
                    ));
                    row.spawn((
                        TitleBestText,
                        Text::new(format!("Best {}", format_thousands(prefs.best_score()))),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(TEXT_COLOR),
                    ));
                });

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Stretch,
                    column_gap: Val::Px(20.0),
                    ..default()
                })
                .with_children(|cards| {
                    for def in registry.roster() {
                        spawn_character_card(cards, def, &prefs);
                    }
                });

            parent
                .spawn((
                    StartButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(48.0), Val::Px(16.0)),
                        border: UiRect::all(Val::Px(3.0)),
                        margin: UiRect::top(Val::Px(36.0)),
                        ..default()
                    },
                    BackgroundColor(SELECTED_BORDER),
                    BorderColor::all(Color::WHITE),
                ))
                .with_child((
                    Text::new("START"),
                    TextFont {
                        font_size: 30.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));

            parent.spawn((
                TooltipText,
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(TEXT_COLOR.with_alpha(0.0)),
                Node {
                    margin: UiRect::top(Val::Px(16.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new("Press 1-4 or click a card, Enter to start, Esc for settings"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(MUTED_TEXT),
                Node {
                    margin: UiRect::top(Val::Px(8.0)),
                    ..default()
                },
            ));

            parent.spawn((
                StartFade,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    right: Val::Px(0.0),
                    top: Val::Px(0.0),
                    bottom: Val::Px(0.0),
                    ..default()
                },
                BackgroundColor(Color::BLACK.with_alpha(0.0)),
                ZIndex(10),
            ));
        });
}

fn spawn_character_card(parent: &mut ChildSpawnerCommands, def: &CharacterDef, prefs: &PrefStore) {
    let key_hint = format!("[{}]", def.id);
    let unlocked = prefs.is_unlocked(def.id);
    let icon_color = if unlocked { def.tint() } else { LOCKED_TINT };

    parent
        .spawn((
            CharacterCard { id: def.id },
            Button,
            Node {
                width: Val::Px(180.0),
                min_height: Val::Px(220.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(14.0)),
                border: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BorderColor::all(card_border(prefs, def.id)),
            BackgroundColor(PANEL_COLOR),
        ))
        .with_children(|card| {
            card.spawn((
                Text::new(key_hint),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(MUTED_TEXT),
                Node {
                    margin: UiRect::bottom(Val::Px(8.0)),
                    ..default()
                },
            ));

            card.spawn((
                Node {
                    width: Val::Px(72.0),
                    height: Val::Px(72.0),
                    margin: UiRect::bottom(Val::Px(12.0)),
                    ..default()
                },
                BackgroundColor(icon_color),
            ));

            card.spawn((
                Text::new(def.name.clone()),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(TEXT_COLOR),
                TextLayout::new_with_justify(Justify::Center),
            ));

            card.spawn((
                Text::new(card_traits(def)),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(MUTED_TEXT),
                TextLayout::new_with_justify(Justify::Center),
                Node {
                    margin: UiRect::vertical(Val::Px(6.0)),
                    ..default()
                },
            ));

            card.spawn((
                CardStatusText { id: def.id },
                Text::new(card_status(prefs, def)),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(SELECTED_BORDER),
            ));
        });
}

fn card_border(prefs: &PrefStore, id: u32) -> Color {
    if prefs.playable_character() == id {
        SELECTED_BORDER
    } else {
        MUTED_TEXT.with_alpha(0.4)
    }
}

pub(crate) fn refresh_title(
    prefs: Res<PrefStore>,
    registry: Res<ContentRegistry>,
    mut coins_query: Query<&mut Text, (With<TitleCoinsText>, Without<TitleBestText>)>,
    mut best_query: Query<&mut Text, (With<TitleBestText>, Without<TitleCoinsText>)>,
    mut status_query: Query<
        (&CardStatusText, &mut Text),
        (Without<TitleCoinsText>, Without<TitleBestText>),
    >,
    mut cards: Query<(&CharacterCard, &mut BorderColor)>,
) {
    if !prefs.is_changed() {
        return;
    }
    for mut text in &mut coins_query {
        **text = format!("Coins {}", format_thousands(prefs.coins()));
    }
    for mut text in &mut best_query {
        **text = format!("Best {}", format_thousands(prefs.best_score()));
    }
    for (status, mut text) in &mut status_query {
        if let Some(def) = registry.character(status.id) {
            **text = card_status(&prefs, def);
        }
    }
    for (card, mut border) in &mut cards {
        *border = BorderColor::all(card_border(&prefs, card.id));
    }
}

/// Key 1 to 4 for a card, if pressed this frame.
fn pressed_card_key(keyboard: &ButtonInput<KeyCode>) -> Option<u32> {
    let keys = [
        (KeyCode::Digit1, KeyCode::Numpad1),
        (KeyCode::Digit2, KeyCode::Numpad2),
        (KeyCode::Digit3, KeyCode::Numpad3),
        (KeyCode::Digit4, KeyCode::Numpad4),
    ];
    keys.iter()
        .zip(1..=CHARACTER_COUNT)
        .find(|((digit, numpad), _)| keyboard.just_pressed(*digit) || keyboard.just_pressed(*numpad))
        .map(|(_, id)| id)
}

pub(crate) fn handle_card_input(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    cards: Query<(&Interaction, &CharacterCard), Changed<Interaction>>,
    registry: Res<ContentRegistry>,
    start: Option<Res<StartSequence>>,
    settings: Option<Res<SettingsOpen>>,
    mut prefs: ResMut<PrefStore>,
    mut sfx: MessageWriter<SfxRequest>,
) {
    if start.is_some() || settings.is_some() {
        return;
    }

    let clicked = cards
        .iter()
        .find(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, card)| card.id);
    let Some(id) = clicked.or_else(|| pressed_card_key(&keyboard)) else {
        return;
    };
    let Some(def) = registry.character(id) else {
        warn!("Character {} not in roster", id);
        return;
    };

    let outcome = select_or_purchase(&mut prefs, def);
    match outcome {
        SelectOutcome::Selected(id) => {
            sfx.write(Sfx::Button.into());
            info!("Selected character {}", id);
        }
        SelectOutcome::Purchased { id, price } => {
            sfx.write(Sfx::Purchase.into());
            info!("Purchased character {} for {} coins", id, price);
        }
        SelectOutcome::InsufficientCoins { id, price } => {
            sfx.write(Sfx::Denied.into());
            info!(
                "Cannot afford character {} ({} coins, have {})",
                id,
                price,
                prefs.coins()
            );
        }
    }
    if let Some(tip) = outcome.tip() {
        commands.insert_resource(ActiveTooltip(Tooltip::new(tip)));
    }
}

pub(crate) fn tick_tooltip(
    mut commands: Commands,
    real_time: Res<Time<Real>>,
    tooltip: Option<ResMut<ActiveTooltip>>,
    mut text_query: Query<(&mut Text, &mut TextColor), With<TooltipText>>,
) {
    let Some(mut tooltip) = tooltip else {
        return;
    };
    tooltip.0.elapsed += real_time.delta_secs();

    let alpha = tooltip.0.alpha();
    for (mut text, mut color) in &mut text_query {
        if **text != tooltip.0.message {
            **text = tooltip.0.message.clone();
        }
        color.0 = TEXT_COLOR.with_alpha(alpha);
    }
    if tooltip.0.finished() {
        commands.remove_resource::<ActiveTooltip>();
    }
}

pub(crate) fn handle_start(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    buttons: Query<&Interaction, (With<StartButton>, Changed<Interaction>)>,
    registry: Res<ContentRegistry>,
    start: Option<Res<StartSequence>>,
    settings: Option<Res<SettingsOpen>>,
    mut prefs: ResMut<PrefStore>,
    mut bgm: MessageWriter<BgmCommand>,
    mut sfx: MessageWriter<SfxRequest>,
) {
    if start.is_some() || settings.is_some() {
        return;
    }
    let pressed = keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::NumpadEnter)
        || buttons
            .iter()
            .any(|interaction| *interaction == Interaction::Pressed);
    if !pressed {
        return;
    }

    let id = prefs.playable_character();
    prefs.set_selected_character(id);
    let line = pick_line(registry.character(id), &mut rand::rng());

    sfx.write(Sfx::Button.into());
    bgm.write(BgmCommand::FadeOut {
        seconds: START_MUSIC_FADE,
    });
    commands.insert_resource(StartSequence {
        elapsed: 0.0,
        line,
        panel_shown: false,
        load_requested: false,
    });
    info!("Starting run with character {}", id);
}

pub(crate) fn tick_start(
    mut commands: Commands,
    real_time: Res<Time<Real>>,
    sequence: Option<ResMut<StartSequence>>,
    mut fade_query: Query<&mut BackgroundColor, With<StartFade>>,
    mut scenes: MessageWriter<SceneRequest>,
) {
    let Some(mut sequence) = sequence else {
        return;
    };
    sequence.elapsed += real_time.delta_secs();

    match start_stage(sequence.elapsed) {
        StartStage::MusicFade => {}
        StartStage::ScreenFade(alpha) => {
            for mut bg in &mut fade_query {
                bg.0 = Color::BLACK.with_alpha(alpha);
            }
        }
        StartStage::Panel => {
            if !sequence.panel_shown {
                sequence.panel_shown = true;
                for mut bg in &mut fade_query {
                    bg.0 = Color::BLACK;
                }
                spawn_start_panel(&mut commands, &sequence.line);
            }
        }
        StartStage::Load => {
            if !sequence.load_requested {
                sequence.load_requested = true;
                scenes.write(SceneRequest::new(SCENE_RUN));
            }
        }
    }
}

fn spawn_start_panel(commands: &mut Commands, line: &str) {
    commands
        .spawn((
            TitleUi,
            StartPanel,
            BlocksSettings,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.12, 0.05, 0.1)),
            ZIndex(20),
        ))
        .with_child((
            Text::new(format!("\"{}\"", line)),
            TextFont {
                font_size: 32.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 0.85, 0.92)),
        ));
}

pub(crate) fn cleanup_title(mut commands: Commands, query: Query<Entity, With<TitleUi>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<StartSequence>();
    commands.remove_resource::<ActiveTooltip>();
}
