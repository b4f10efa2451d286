use bevy::prelude::*;

use super::{config::GameConfig, game::Game, piece::PieceKind, run_criteria::GameOverOverlay};

#[derive(Component)]
pub struct CellSprite {
    pub(super) row: usize,
    pub(super) col: usize,
}

fn cell_to_translation(config: &GameConfig, row: usize, col: usize) -> Vec3 {
    let screen_dims = config.screen_dims();
    // bevy puts (0, 0) at the window center with y up, row 0 is the top of the board
    let top_left = Vec2::new(-screen_dims.x / 2., screen_dims.y / 2.);
    let half_cell = config.block_size / 2.;
    let x = top_left.x + col as f32 * config.block_size + half_cell;
    let y = top_left.y - row as f32 * config.block_size - half_cell;
    Vec3::new(x, y, 0.)
}

pub fn spawn_cell_sprites(mut commands: Commands, config: Res<GameConfig>) {
    // leave a one unit gap between neighbouring cells
    let side = config.block_size - 1.;

    for row in 0..config.rows {
        for col in 0..config.cols {
            commands
                .spawn_bundle(SpriteBundle {
                    sprite: Sprite {
                        custom_size: Some(Vec2::new(side, side)),
                        ..default()
                    },
                    transform: Transform::from_translation(cell_to_translation(&config, row, col)),
                    visibility: Visibility { is_visible: false },
                    ..default()
                })
                .insert(CellSprite { row, col });
        }
    }
}

// recolor every cell from the board with the falling piece painted over it
pub fn paint_cells(
    game: Res<Game>,
    mut query: Query<(&CellSprite, &mut Sprite, &mut Visibility)>,
) {
    if !game.is_changed() {
        return;
    }

    let frame = game.frame();
    for (cell, mut sprite, mut visibility) in query.iter_mut() {
        match PieceKind::from_cell(frame[cell.row][cell.col]) {
            Some(kind) => {
                sprite.color = kind.color();
                visibility.is_visible = true;
            }
            None => visibility.is_visible = false,
        }
    }
}

fn at_z_pixel(z: f32) -> Transform {
    Transform {
        translation: Vec3::new(0., 0., z),
        ..default()
    }
}

pub fn show_game_over(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    info!("showing game over overlay");

    commands.spawn_bundle(SpriteBundle {
        sprite: Sprite {
            color: Color::rgba(0., 0., 0., 0.6),
            custom_size: Some(config.screen_dims()),
            ..default()
        },
        transform: at_z_pixel(20.),
        ..default()
    });

    commands.spawn_bundle(Text2dBundle {
        text: Text::with_section(
            "Game Over",
            TextStyle {
                font: asset_server.load(config.overlay_font.as_str()),
                font_size: 20.,
                color: Color::WHITE,
            },
            TextAlignment {
                vertical: VerticalAlign::Center,
                horizontal: HorizontalAlign::Center,
            },
        ),
        transform: at_z_pixel(21.),
        ..default()
    });

    commands.insert_resource(GameOverOverlay);
}

#[cfg(test)]
mod test {
    use bevy::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::tetris::{config::GameConfig, game::Game};

    use super::{cell_to_translation, paint_cells, spawn_cell_sprites, CellSprite};

    #[test]
    fn test_cell_to_translation() {
        let config = GameConfig::default();
        assert_eq!(cell_to_translation(&config, 0, 0), Vec3::new(-108., 228., 0.));
        assert_eq!(cell_to_translation(&config, 19, 9), Vec3::new(108., -228., 0.));
    }

    #[test]
    fn test_paint_cells_shows_active_piece() {
        let config = GameConfig::default();
        let game = Game::new(&config, StdRng::seed_from_u64(5));
        let kind = game.current().kind();
        let expected: Vec<_> = game
            .current()
            .cells()
            .map(|loc| (loc.y as usize, loc.x as usize))
            .collect();

        let mut app = App::new();
        app.insert_resource(config)
            .insert_resource(game)
            .add_startup_system(spawn_cell_sprites)
            .add_system(paint_cells);
        app.update();

        let mut query = app
            .world
            .query::<(&CellSprite, &Sprite, &Visibility)>();
        let mut visible = 0;
        for (cell, sprite, visibility) in query.iter(&app.world) {
            let in_piece = expected.contains(&(cell.row, cell.col));
            assert_eq!(visibility.is_visible, in_piece);
            if in_piece {
                assert_eq!(sprite.color, kind.color());
                visible += 1;
            }
        }
        assert_eq!(visible, 4);
        assert_eq!(query.iter(&app.world).count(), 200);
        assert!(expected.iter().all(|&(row, _)| row < 2));
    }
}
