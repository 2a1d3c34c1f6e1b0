//! UI domain: in-run HUD with health bar, score and warning effects.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::session::{
    DeathCause, HealedEvent, HealthEvent, HealthOutcome, HealthTuning, RunScore, RunSession,
};
use crate::ui::{RunUi, full_screen};
use crate::ui::fx::{
    TICK_COLOR, danger_flash_alpha, format_thousands, hp_bar_width, is_low_hp,
    low_hp_blink_alpha, low_hp_pulse_scale, popup_finished, popup_state, tick_highlight,
};

const HUD_PADDING: f32 = 16.0;
const HP_BAR_HEIGHT: f32 = 22.0;
const HP_FILL_COLOR: Color = Color::srgb(0.95, 0.35, 0.5);
const LOW_HP_ICON_SIZE: f32 = 24.0;

#[derive(Component)]
pub struct HpBarFrame;

#[derive(Component)]
pub struct HpBarFill;

/// Bright sliver at the leading edge of the fill.
#[derive(Component)]
pub struct HpBarTick;

#[derive(Component)]
pub struct LowHpIcon;

#[derive(Component)]
pub struct LowHpPanel;

#[derive(Component)]
pub struct DangerFlash;

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct CoinText;

/// World-space "+15" text that drifts up and fades.
#[derive(Component)]
pub struct HealPopup {
    pub origin: Vec2,
    pub elapsed: f32,
}

#[derive(Resource, Debug, Default)]
pub struct HudFx {
    pub danger_remaining: f32,
}

pub(crate) fn spawn_hud(mut commands: Commands, session: Res<RunSession>) {
    commands.insert_resource(HudFx::default());

    commands
        .spawn((
            RunUi,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        HpBarFrame,
                        Node {
                            width: Val::Px(hp_bar_width(session.health.max())),
                            height: Val::Px(HP_BAR_HEIGHT),
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgba(0.1, 0.05, 0.1, 0.8)),
                        BorderColor::all(Color::srgb(0.4, 0.25, 0.35)),
                    ))
                    .with_children(|frame| {
                        frame.spawn((
                            HpBarFill,
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                flex_direction: FlexDirection::Row,
                                justify_content: JustifyContent::FlexEnd,
                                ..default()
                            },
                            BackgroundColor(HP_FILL_COLOR),
                        ))
                        .with_child((
                            HpBarTick,
                            Node {
                                width: Val::Px(4.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(HP_FILL_COLOR),
                        ));
                    });

                    row.spawn((
                        LowHpIcon,
                        Node {
                            width: Val::Px(LOW_HP_ICON_SIZE),
                            height: Val::Px(LOW_HP_ICON_SIZE),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.9, 0.15, 0.2)),
                        Visibility::Hidden,
                    ));
                });

            parent.spawn((
                ScoreText,
                Text::new("0"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::srgb(0.35, 0.15, 0.3)),
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(8.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        Node {
                            width: Val::Px(16.0),
                            height: Val::Px(16.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(1.0, 0.82, 0.25)),
                    ));
                    row.spawn((
                        CoinText,
                        Text::new("0"),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.6, 0.45, 0.1)),
                    ));
                });
        });

    commands.spawn((RunUi, LowHpPanel, full_screen(), BackgroundColor(Color::NONE), ZIndex(5)));
    commands.spawn((RunUi, DangerFlash, full_screen(), BackgroundColor(Color::NONE), ZIndex(6)));
}

pub(crate) fn update_hp_bar(
    real_time: Res<Time<Real>>,
    session: Res<RunSession>,
    mut fill_query: Query<&mut Node, (With<HpBarFill>, Without<HpBarFrame>)>,
    mut frame_query: Query<&mut Node, (With<HpBarFrame>, Without<HpBarFill>)>,
    mut tick_query: Query<&mut BackgroundColor, With<HpBarTick>>,
) {
    let health = &session.health;
    for mut node in &mut fill_query {
        node.width = Val::Percent(health.percent() * 100.0);
    }
    for mut node in &mut frame_query {
        let width = Val::Px(hp_bar_width(health.max()));
        if node.width != width {
            node.width = width;
        }
    }

    let color = if tick_highlight(real_time.elapsed_secs()) {
        TICK_COLOR
    } else {
        HP_FILL_COLOR
    };
    for mut bg in &mut tick_query {
        bg.0 = color;
    }
}

pub(crate) fn update_score_text(
    score: Res<RunScore>,
    mut score_query: Query<&mut Text, (With<ScoreText>, Without<CoinText>)>,
    mut coin_query: Query<&mut Text, (With<CoinText>, Without<ScoreText>)>,
) {
    if !score.is_changed() {
        return;
    }
    for mut text in &mut score_query {
        **text = format_thousands(score.score);
    }
    for mut text in &mut coin_query {
        **text = format_thousands(score.coins);
    }
}

pub(crate) fn update_low_hp_warning(
    real_time: Res<Time<Real>>,
    session: Res<RunSession>,
    mut icon_query: Query<(&mut Node, &mut Visibility), With<LowHpIcon>>,
    mut panel_query: Query<&mut BackgroundColor, With<LowHpPanel>>,
) {
    let percent = session.health.percent();
    let warn = is_low_hp(percent) && !session.health.is_dead();
    let t = real_time.elapsed_secs();

    for (mut node, mut visibility) in &mut icon_query {
        if !warn {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        }
        visibility.set_if_neq(Visibility::Inherited);
        let size = LOW_HP_ICON_SIZE * low_hp_pulse_scale(t, percent);
        node.width = Val::Px(size);
        node.height = Val::Px(size);
    }

    let alpha = if warn {
        low_hp_blink_alpha(t) * 0.25
    } else {
        0.0
    };
    for mut bg in &mut panel_query {
        bg.0 = Color::srgba(0.9, 0.1, 0.15, alpha);
    }
}

pub(crate) fn update_danger_flash(
    real_time: Res<Time<Real>>,
    tuning: Res<HealthTuning>,
    mut fx: ResMut<HudFx>,
    mut events: MessageReader<HealthEvent>,
    mut flash_query: Query<&mut BackgroundColor, With<DangerFlash>>,
) {
    let crashed = events.read().any(|event| {
        matches!(
            event.outcome,
            HealthOutcome::CrashInvincible | HealthOutcome::Died(DeathCause::Crash)
        )
    });
    if crashed {
        fx.danger_remaining = tuning.danger_flash;
    }
    fx.danger_remaining = (fx.danger_remaining - real_time.delta_secs()).max(0.0);

    let alpha = danger_flash_alpha(fx.danger_remaining, tuning.danger_flash);
    for mut bg in &mut flash_query {
        bg.0 = Color::srgba(1.0, 0.1, 0.1, alpha);
    }
}

pub(crate) fn spawn_heal_popups(mut commands: Commands, mut events: MessageReader<HealedEvent>) {
    for event in events.read() {
        commands.spawn((
            RunUi,
            HealPopup {
                origin: event.position,
                elapsed: 0.0,
            },
            Text2d::new(format!("+{}", event.amount)),
            TextFont {
                font_size: 28.0,
                ..default()
            },
            TextColor(Color::srgb(0.2, 0.75, 0.35)),
            Transform::from_translation(event.position.extend(20.0)),
        ));
    }
}

pub(crate) fn animate_heal_popups(
    mut commands: Commands,
    real_time: Res<Time<Real>>,
    mut query: Query<(Entity, &mut HealPopup, &mut Transform, &mut TextColor)>,
) {
    for (entity, mut popup, mut transform, mut color) in &mut query {
        popup.elapsed += real_time.delta_secs();
        if popup_finished(popup.elapsed) {
            commands.entity(entity).despawn();
            continue;
        }
        let (rise, alpha) = popup_state(popup.elapsed);
        transform.translation.y = popup.origin.y + rise;
        color.0 = color.0.with_alpha(alpha);
    }
}
