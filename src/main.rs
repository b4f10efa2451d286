mod tetris;

use bevy::prelude::*;

use tetris::*;

fn main() {
    let config = GameConfig::default();
    let screen_dims = config.screen_dims();

    App::new()
        .insert_resource(WindowDescriptor {
            width: screen_dims.x,
            height: screen_dims.y,
            title: config.window_title.clone(),
            resizable: false,
            decorations: true,
            ..default()
        })
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(config)
        .add_startup_system(setup_camera)
        .add_plugins(DefaultPlugins)
        .add_plugin(TetrisPlugin)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn_bundle(OrthographicCameraBundle::new_2d());
}
