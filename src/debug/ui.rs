//! Debug domain: dev panel layout.

use bevy::prelude::*;

use crate::debug::state::DevAction;

/// Marker for the dev panel root
#[derive(Component, Debug)]
pub struct DevPanelUi;

/// Marker for status message text
#[derive(Component, Debug)]
pub struct DevStatusMessage;

/// Shows the typed coin amount
#[derive(Component, Debug)]
pub struct DevAmountText;

/// Dev panel button
#[derive(Component, Debug)]
pub struct DevButton {
    pub action: DevAction,
}

pub(crate) fn spawn_dev_panel(commands: &mut Commands) {
    let bg_color = Color::srgba(0.1, 0.1, 0.15, 0.95);
    let button_color = Color::srgb(0.2, 0.2, 0.28);
    let text_color = Color::srgb(0.9, 0.9, 0.9);
    let title_color = Color::srgb(0.9, 0.7, 0.3);
    let muted_text = Color::srgb(0.6, 0.6, 0.7);

    commands
        .spawn((
            DevPanelUi,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(20.0),
                width: Val::Px(260.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(8.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg_color),
            BorderColor::all(Color::srgb(0.4, 0.35, 0.2)),
            ZIndex(500),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("DEV PANEL"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(title_color),
            ));

            parent.spawn((
                Text::new("Edits apply to the saved profile"),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(muted_text),
            ));

            parent.spawn((
                Text::new("Type digits to set the coin amount"),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(muted_text),
            ));

            parent.spawn((
                DevStatusMessage,
                Text::new(""),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.9, 0.5)),
                Node {
                    min_height: Val::Px(16.0),
                    ..default()
                },
            ));

            parent.spawn((
                DevAmountText,
                Text::new(""),
                TextFont {
                    font_size: 13.0,
                    ..default()
                },
                TextColor(text_color),
            ));

            for action in DevAction::ALL {
                spawn_dev_button(parent, action, button_color, text_color);
            }
        });
}

fn spawn_dev_button(
    parent: &mut ChildSpawnerCommands,
    action: DevAction,
    bg_color: Color,
    text_color: Color,
) {
    parent
        .spawn((
            DevButton { action },
            Button,
            Node {
                padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(bg_color),
            BorderColor::all(Color::srgb(0.35, 0.35, 0.45)),
        ))
        .with_child((
            Text::new(action.label()),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(text_color),
        ));
}

pub(crate) fn despawn_dev_panel(commands: &mut Commands, existing_ui: &Query<Entity, With<DevPanelUi>>) {
    for entity in existing_ui.iter() {
        commands.entity(entity).despawn();
    }
}
