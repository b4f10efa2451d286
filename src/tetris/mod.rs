mod board;
mod config;
mod game;
mod input;
mod piece;
mod render;
mod run_criteria;

use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

pub use self::config::GameConfig;
use self::game::Game;
use self::input::handle_player_input;
use self::render::{paint_cells, show_game_over, spawn_cell_sprites};
use self::run_criteria::{game_over_pending, game_running};

pub struct TetrisPlugin;
impl Plugin for TetrisPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world
            .get_resource_or_insert_with(GameConfig::default)
            .clone();
        app.insert_resource(Game::new(&config, StdRng::from_entropy()));

        app.add_startup_system(spawn_cell_sprites);

        // player input, then gravity, then drawing, once per frame
        let mut player_input = SystemStage::parallel();
        player_input.add_system_set(
            SystemSet::new()
                .with_run_criteria(game_running)
                .with_system(handle_player_input),
        );

        let mut gravity = SystemStage::parallel();
        gravity.add_system_set(
            SystemSet::new()
                .with_run_criteria(game_running)
                .with_system(apply_gravity),
        );

        let mut render = SystemStage::parallel();
        render.add_system(paint_cells).add_system_set(
            SystemSet::new()
                .with_run_criteria(game_over_pending)
                .with_system(show_game_over),
        );

        app.add_stage_after(CoreStage::Update, "player_input", player_input);
        app.add_stage_after("player_input", "gravity", gravity);
        app.add_stage_after("gravity", "render_board", render);
    }
}

fn apply_gravity(time: Res<Time>, mut game: ResMut<Game>) {
    game.tick(time.delta());
}
