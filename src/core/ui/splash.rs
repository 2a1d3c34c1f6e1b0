//! Core domain: splash screen with a loading indicator.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::events::SceneRequest;
use crate::core::state::SCENE_TITLE;

pub(crate) const DOT_INTERVAL: f32 = 0.5;
pub(crate) const SPLASH_HOLD: f32 = 5.0;
pub(crate) const SPLASH_FADE: f32 = 0.6;

/// Marker for the splash screen root
#[derive(Component, Debug)]
pub struct SplashUI;

#[derive(Component, Debug)]
pub struct SplashLoadingText;

/// Black overlay faded in before leaving the splash.
#[derive(Component, Debug)]
pub struct SplashFade;

#[derive(Resource, Debug, Default)]
pub struct SplashTimer {
    pub elapsed: f32,
    pub requested: bool,
}

/// "Loading" followed by zero to three dots, advancing every half second.
pub fn loading_text(elapsed: f32) -> String {
    let dots = (elapsed.max(0.0) / DOT_INTERVAL) as usize % 4;
    format!("Loading{}", ".".repeat(dots))
}

/// Overlay opacity: clear during the hold, then a linear fade to black.
pub fn splash_fade_alpha(elapsed: f32) -> f32 {
    ((elapsed - SPLASH_HOLD) / SPLASH_FADE).clamp(0.0, 1.0)
}

pub(crate) fn spawn_splash(mut commands: Commands) {
    commands.insert_resource(SplashTimer::default());

    commands
        .spawn((
            SplashUI,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.98, 0.86, 0.9)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("JELLY RUNNER"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.3, 0.5)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent.spawn((
                SplashLoadingText,
                Text::new(loading_text(0.0)),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.45, 0.3, 0.4)),
            ));

            parent.spawn((
                SplashFade,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    right: Val::Px(0.0),
                    top: Val::Px(0.0),
                    bottom: Val::Px(0.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
            ));
        });
}

pub(crate) fn tick_splash(
    time: Res<Time<Real>>,
    mut timer: ResMut<SplashTimer>,
    mut text_query: Query<&mut Text, With<SplashLoadingText>>,
    mut fade_query: Query<&mut BackgroundColor, With<SplashFade>>,
    mut scenes: MessageWriter<SceneRequest>,
) {
    timer.elapsed += time.delta_secs();

    for mut text in &mut text_query {
        let next = loading_text(timer.elapsed);
        if **text != next {
            **text = next;
        }
    }

    let alpha = splash_fade_alpha(timer.elapsed);
    for mut bg in &mut fade_query {
        bg.0 = Color::srgba(0.0, 0.0, 0.0, alpha);
    }

    if alpha >= 1.0 && !timer.requested {
        timer.requested = true;
        scenes.write(SceneRequest::new(SCENE_TITLE));
    }
}

pub(crate) fn cleanup_splash(mut commands: Commands, query: Query<Entity, With<SplashUI>>) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<SplashTimer>();
}
