//! UI domain: settings panel with volume controls, reachable from the title
//! screen and during a run.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::audio::{BgmCommand, Sfx, SfxRequest, VolumeChannel, VolumeSettings};
use crate::core::GameState;
use crate::prefs::PrefStore;
use crate::session::{ForceResultsRequest, PauseControl};
use crate::ui::{BlocksSettings, full_screen};

pub const VOLUME_STEP: f32 = 0.1;
const BGM_FADE: f32 = 0.2;
const CHANNELS: [VolumeChannel; 3] = [
    VolumeChannel::Music,
    VolumeChannel::Sfx,
    VolumeChannel::Master,
];

#[derive(Component)]
pub struct SettingsPanel;

#[derive(Component, Debug, Clone, Copy)]
pub enum SettingsButton {
    Volume { channel: VolumeChannel, delta: f32 },
    Close,
    Title,
    Quit,
}

#[derive(Component)]
pub struct VolumeLabel(pub VolumeChannel);

/// Present while the panel is open.
#[derive(Resource, Debug, Default)]
pub struct SettingsOpen {
    /// The panel paused a live run and owes it a resume.
    pub paused_run: bool,
}

pub fn volume_label(channel: VolumeChannel, percent: u32) -> String {
    format!("{} {}%", channel.label(), percent)
}

pub(crate) fn toggle_settings(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    open: Option<Res<SettingsOpen>>,
    volume: Res<VolumeSettings>,
    blockers: Query<(), With<BlocksSettings>>,
    panels: Query<Entity, With<SettingsPanel>>,
    mut pause: ResMut<PauseControl>,
    mut bgm: MessageWriter<BgmCommand>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) || !blockers.is_empty() {
        return;
    }

    if let Some(open) = open {
        close_settings(&mut commands, &panels, &open, &mut pause, &mut bgm);
        return;
    }

    let in_run = *state.get() == GameState::Run;
    let paused_run = in_run && pause.set_paused(true);
    if paused_run {
        bgm.write(BgmCommand::Pause { fade: BGM_FADE });
    }
    commands.insert_resource(SettingsOpen { paused_run });
    spawn_settings_panel(&mut commands, &volume, in_run);
    info!("Settings opened (run paused: {})", paused_run);
}

fn close_settings(
    commands: &mut Commands,
    panels: &Query<Entity, With<SettingsPanel>>,
    open: &SettingsOpen,
    pause: &mut PauseControl,
    bgm: &mut MessageWriter<BgmCommand>,
) {
    for entity in panels {
        commands.entity(entity).despawn();
    }
    if open.paused_run {
        pause.set_paused(false);
        bgm.write(BgmCommand::Resume { fade: BGM_FADE });
    }
    commands.remove_resource::<SettingsOpen>();
}

fn spawn_settings_panel(commands: &mut Commands, volume: &VolumeSettings, in_run: bool) {
    commands
        .spawn((
            SettingsPanel,
            Node {
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..full_screen()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            ZIndex(60),
        ))
        .with_children(|backdrop| {
            backdrop
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(14.0),
                        padding: UiRect::all(Val::Px(28.0)),
                        border: UiRect::all(Val::Px(3.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.98, 0.9, 0.94)),
                    BorderColor::all(Color::srgb(0.85, 0.45, 0.6)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("SETTINGS"),
                        TextFont {
                            font_size: 36.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.55, 0.2, 0.4)),
                    ));

                    for channel in CHANNELS {
                        panel
                            .spawn(Node {
                                flex_direction: FlexDirection::Row,
                                align_items: AlignItems::Center,
                                column_gap: Val::Px(12.0),
                                ..default()
                            })
                            .with_children(|row| {
                                spawn_button(
                                    row,
                                    "-",
                                    SettingsButton::Volume {
                                        channel,
                                        delta: -VOLUME_STEP,
                                    },
                                );
                                row.spawn((
                                    VolumeLabel(channel),
                                    Text::new(volume_label(channel, volume.percent(channel))),
                                    TextFont {
                                        font_size: 22.0,
                                        ..default()
                                    },
                                    TextColor(Color::srgb(0.3, 0.15, 0.25)),
                                    Node {
                                        width: Val::Px(160.0),
                                        ..default()
                                    },
                                ));
                                spawn_button(
                                    row,
                                    "+",
                                    SettingsButton::Volume {
                                        channel,
                                        delta: VOLUME_STEP,
                                    },
                                );
                            });
                    }

                    panel
                        .spawn(Node {
                            flex_direction: FlexDirection::Row,
                            column_gap: Val::Px(12.0),
                            margin: UiRect::top(Val::Px(12.0)),
                            ..default()
                        })
                        .with_children(|row| {
                            spawn_button(row, "Close", SettingsButton::Close);
                            if in_run {
                                spawn_button(row, "Title", SettingsButton::Title);
                            }
                            spawn_button(row, "Quit", SettingsButton::Quit);
                        });
                });
        });
}

fn spawn_button(parent: &mut ChildSpawnerCommands, label: &str, action: SettingsButton) {
    parent
        .spawn((
            action,
            Button,
            Node {
                padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.85, 0.45, 0.6)),
            BorderColor::all(Color::srgb(1.0, 0.85, 0.92)),
        ))
        .with_child((
            Text::new(label),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(Color::WHITE),
        ));
}

pub(crate) fn handle_settings_buttons(
    mut commands: Commands,
    open: Option<Res<SettingsOpen>>,
    buttons: Query<(&Interaction, &SettingsButton), Changed<Interaction>>,
    panels: Query<Entity, With<SettingsPanel>>,
    mut labels: Query<(&VolumeLabel, &mut Text)>,
    mut volume: ResMut<VolumeSettings>,
    mut prefs: ResMut<PrefStore>,
    mut pause: ResMut<PauseControl>,
    mut bgm: MessageWriter<BgmCommand>,
    mut sfx: MessageWriter<SfxRequest>,
    mut force_results: MessageWriter<ForceResultsRequest>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(open) = open else {
        return;
    };

    for (interaction, action) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        sfx.write(Sfx::Button.into());

        match *action {
            SettingsButton::Volume { channel, delta } => {
                volume.step(channel, delta, &mut prefs);
                for (label, mut text) in &mut labels {
                    if label.0 == channel {
                        **text = volume_label(channel, volume.percent(channel));
                    }
                }
            }
            SettingsButton::Close => {
                close_settings(&mut commands, &panels, &open, &mut pause, &mut bgm);
                return;
            }
            SettingsButton::Title => {
                // Leave the run paused; the results panel takes over.
                for entity in &panels {
                    commands.entity(entity).despawn();
                }
                commands.remove_resource::<SettingsOpen>();
                force_results.write(ForceResultsRequest);
                info!("Run abandoned from settings");
                return;
            }
            SettingsButton::Quit => {
                info!("Quit requested from settings");
                exit.write(AppExit::Success);
                return;
            }
        }
    }
}

pub(crate) fn cleanup_settings(
    mut commands: Commands,
    panels: Query<Entity, With<SettingsPanel>>,
) {
    for entity in &panels {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<SettingsOpen>();
}
