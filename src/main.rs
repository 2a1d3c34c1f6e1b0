mod audio;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod prefs;
mod runner;
mod session;
mod title;
mod ui;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Jelly Runner".to_string(),
            resolution: WindowResolution::new(1280, 720),
            resizable: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(
        PhysicsPlugins::default().with_collision_hooks::<runner::OneWayPlatformHooks>(),
    )
    .add_plugins((
        core::CorePlugin,
        prefs::PrefsPlugin,
        content::ContentPlugin,
        audio::SoundPlugin,
        session::SessionPlugin,
        runner::RunnerPlugin,
        ui::UiPlugin,
        title::TitlePlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
