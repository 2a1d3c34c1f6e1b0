//! UI domain: end-of-run results panel.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::audio::{BgmCommand, BgmTrack, DEFAULT_CROSSFADE, Sfx, SfxRequest};
use crate::core::{SCENE_TITLE, SceneRequest};
use crate::core::easing::ease_out_back;
use crate::session::{PauseControl, ResultSummary, ResultsReadyEvent, progress01};
use crate::ui::fx::{COUNT_UP_SECONDS, count_up, format_thousands};
use crate::ui::{BlocksSettings, RunUi, full_screen};

const TITLE_POP_SECONDS: f32 = 0.35;
const TITLE_FONT_SIZE: f32 = 56.0;

#[derive(Component)]
pub struct ResultsPanel;

#[derive(Component)]
pub struct ResultsTitle;

#[derive(Component)]
pub struct ResultsScoreText;

#[derive(Component)]
pub struct ResultsCoinText;

#[derive(Component)]
pub struct NewRecordText;

#[derive(Component)]
pub struct CheckButton;

#[derive(Resource, Debug, Clone, Copy)]
pub struct ResultsAnim {
    pub summary: ResultSummary,
    pub elapsed: f32,
}

/// What the panel shows `elapsed` seconds after opening.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultsFrame {
    pub title_scale: f32,
    pub score: u64,
    pub coins: u64,
    pub show_record: bool,
    pub done: bool,
}

/// Title pops in, then the score counts up, then the coins.
pub fn results_frame(summary: &ResultSummary, elapsed: f32) -> ResultsFrame {
    let title = progress01(elapsed, TITLE_POP_SECONDS);
    let score_t = elapsed - TITLE_POP_SECONDS;
    let coin_t = score_t - COUNT_UP_SECONDS;
    let done = elapsed >= results_total_seconds();
    ResultsFrame {
        title_scale: ease_out_back(title),
        score: count_up(summary.score, score_t, COUNT_UP_SECONDS),
        coins: count_up(summary.coins, coin_t, COUNT_UP_SECONDS),
        show_record: summary.new_record && score_t >= COUNT_UP_SECONDS,
        done,
    }
}

/// Time after which every count-up has finished.
pub fn results_total_seconds() -> f32 {
    TITLE_POP_SECONDS + COUNT_UP_SECONDS * 2.0
}

/// Where a skip click lands: the end of the count-up in progress. The
/// title pop cannot be skipped.
pub fn skip_target(elapsed: f32) -> f32 {
    let score_end = TITLE_POP_SECONDS + COUNT_UP_SECONDS;
    if elapsed < TITLE_POP_SECONDS {
        elapsed
    } else if elapsed < score_end {
        score_end
    } else {
        results_total_seconds()
    }
}

pub(crate) fn show_results(
    mut commands: Commands,
    mut events: MessageReader<ResultsReadyEvent>,
    existing: Query<(), With<ResultsPanel>>,
) {
    let Some(event) = events.read().last() else {
        return;
    };
    if !existing.is_empty() {
        return;
    }
    let summary = event.summary;
    commands.insert_resource(ResultsAnim {
        summary,
        elapsed: 0.0,
    });

    commands
        .spawn((
            RunUi,
            ResultsPanel,
            BlocksSettings,
            Node {
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                ..full_screen()
            },
            BackgroundColor(Color::srgba(0.1, 0.03, 0.08, 0.8)),
            ZIndex(50),
        ))
        .with_children(|parent| {
            parent.spawn((
                ResultsTitle,
                Text::new("RESULTS"),
                TextFont {
                    font_size: 1.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.75, 0.85)),
            ));
            parent.spawn((
                ResultsScoreText,
                Text::new("Score 0"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.95)),
            ));
            parent.spawn((
                NewRecordText,
                Text::new("NEW RECORD!"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.3)),
                Visibility::Hidden,
            ));
            parent.spawn((
                ResultsCoinText,
                Text::new("Coins 0"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.82, 0.25)),
            ));
            parent
                .spawn((
                    CheckButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(40.0), Val::Px(14.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        margin: UiRect::top(Val::Px(24.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.85, 0.35, 0.55)),
                    BorderColor::all(Color::srgb(1.0, 0.8, 0.9)),
                    Visibility::Hidden,
                ))
                .with_child((
                    Text::new("CHECK"),
                    TextFont {
                        font_size: 26.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
        });

    info!(
        "Results shown: score {}, coins {}, best {}, new record: {}",
        summary.score, summary.coins, summary.best_score, summary.new_record
    );
}

pub(crate) fn animate_results(
    real_time: Res<Time<Real>>,
    mouse: Res<ButtonInput<MouseButton>>,
    anim: Option<ResMut<ResultsAnim>>,
    mut title_query: Query<&mut TextFont, With<ResultsTitle>>,
    mut score_query: Query<&mut Text, (With<ResultsScoreText>, Without<ResultsCoinText>)>,
    mut coin_query: Query<&mut Text, (With<ResultsCoinText>, Without<ResultsScoreText>)>,
    mut record_query: Query<&mut Visibility, (With<NewRecordText>, Without<CheckButton>)>,
    mut button_query: Query<&mut Visibility, (With<CheckButton>, Without<NewRecordText>)>,
) {
    let Some(mut anim) = anim else {
        return;
    };
    let total = results_total_seconds();
    if anim.elapsed >= total {
        return;
    }

    if mouse.just_pressed(MouseButton::Left) {
        anim.elapsed = skip_target(anim.elapsed);
    } else {
        anim.elapsed += real_time.delta_secs();
    }

    let frame = results_frame(&anim.summary, anim.elapsed);
    for mut font in &mut title_query {
        font.font_size = TITLE_FONT_SIZE * frame.title_scale.max(0.02);
    }
    for mut text in &mut score_query {
        **text = format!("Score {}", format_thousands(frame.score));
    }
    for mut text in &mut coin_query {
        **text = format!("Coins {}", format_thousands(frame.coins));
    }
    if frame.show_record {
        for mut visibility in &mut record_query {
            visibility.set_if_neq(Visibility::Inherited);
        }
    }
    if frame.done {
        for mut visibility in &mut button_query {
            visibility.set_if_neq(Visibility::Inherited);
        }
    }
}

pub(crate) fn handle_check_button(
    anim: Option<Res<ResultsAnim>>,
    button_query: Query<&Interaction, (With<CheckButton>, Changed<Interaction>)>,
    mut pause: ResMut<PauseControl>,
    mut bgm: MessageWriter<BgmCommand>,
    mut sfx: MessageWriter<SfxRequest>,
    mut scenes: MessageWriter<SceneRequest>,
) {
    let Some(anim) = anim else {
        return;
    };
    if anim.elapsed < results_total_seconds() {
        return;
    }
    if !button_query
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        return;
    }

    sfx.write(Sfx::Button.into());
    bgm.write(BgmCommand::Play {
        track: BgmTrack::Title,
        crossfade: DEFAULT_CROSSFADE,
    });
    pause.set_paused(false);
    scenes.write(SceneRequest::new(SCENE_TITLE));
}

pub(crate) fn cleanup_results(mut commands: Commands) {
    commands.remove_resource::<ResultsAnim>();
}
