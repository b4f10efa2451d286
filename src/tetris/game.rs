use std::time::Duration;

use bevy::{
    log::{debug, info},
    math::IVec2,
};
use rand::rngs::StdRng;

use super::{
    board::{Board, BoardCell},
    config::GameConfig,
    piece::{create_piece, rotate, Piece},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerCommand {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Everything the running game owns: the settled board, the falling piece and the gravity clock.
pub struct Game {
    board: Board,
    current: Piece,
    drop_counter: Duration,
    drop_interval: Duration,
    status: GameStatus,
    rng: StdRng,
}

impl Game {
    pub fn new(config: &GameConfig, mut rng: StdRng) -> Game {
        let current = create_piece(&mut rng, config.cols);
        info!(
            "starting a {}x{} game, first piece {:?}",
            config.cols,
            config.rows,
            current.kind()
        );

        Game {
            board: Board::new(config.cols, config.rows),
            current,
            drop_counter: Duration::ZERO,
            drop_interval: config.drop_interval,
            status: GameStatus::Running,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn apply_command(&mut self, command: PlayerCommand) {
        if self.is_over() {
            return;
        }

        match command {
            PlayerCommand::MoveLeft => self.player_move(-1),
            PlayerCommand::MoveRight => self.player_move(1),
            PlayerCommand::SoftDrop => self.player_drop(),
            PlayerCommand::Rotate => self.player_rotate(),
        }
    }

    /// Advances the gravity clock by one frame's worth of time.
    pub fn tick(&mut self, delta: Duration) {
        if self.is_over() {
            return;
        }

        self.drop_counter += delta;
        if self.drop_counter > self.drop_interval {
            self.player_drop();
        }
    }

    /// The board with the active piece painted over it, row 0 first.
    pub fn frame(&self) -> Vec<Vec<BoardCell>> {
        let mut frame = self.board.rows().to_vec();
        let value = self.current.kind().cell_value();
        for loc in self.current.cells() {
            if loc.y < 0 || loc.y as usize >= self.board.height() {
                continue;
            }
            if loc.x < 0 || loc.x as usize >= self.board.width() {
                continue;
            }
            frame[loc.y as usize][loc.x as usize] = value;
        }
        frame
    }

    fn player_drop(&mut self) {
        self.current.nudge(IVec2::new(0, 1));
        if self.board.collides(&self.current) {
            self.current.nudge(IVec2::new(0, -1));
            self.land();
        }
        self.drop_counter = Duration::ZERO;
    }

    fn land(&mut self) {
        debug!(
            "{:?} landed at {}",
            self.current.kind(),
            self.current.pos
        );
        self.board.merge(&self.current);

        let cleared = self.board.sweep();
        if cleared > 0 {
            info!("cleared {} row(s)", cleared);
        }

        self.current = create_piece(&mut self.rng, self.board.width());
        debug!("spawned {:?}", self.current.kind());
        if self.board.collides(&self.current) {
            self.status = GameStatus::GameOver;
            info!("game over, {:?} has no room to spawn\n{:?}", self.current.kind(), self.board);
        }
    }

    fn player_move(&mut self, dir: i32) {
        self.current.nudge(IVec2::new(dir, 0));
        if self.board.collides(&self.current) {
            self.current.nudge(IVec2::new(-dir, 0));
        }
    }

    fn player_rotate(&mut self) {
        let rotated = rotate(self.current.shape());
        let previous = self.current.replace_shape(rotated);
        if self.board.collides(&self.current) {
            self.current.replace_shape(previous);
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use bevy::math::IVec2;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::tetris::{
        config::GameConfig,
        piece::{rotate, Piece, PieceKind},
    };

    use super::{Game, GameStatus, PlayerCommand};

    fn new_game() -> Game {
        Game::new(&GameConfig::default(), StdRng::seed_from_u64(1))
    }

    fn with_piece(piece: Piece) -> Game {
        let mut game = new_game();
        game.current = piece;
        game
    }

    #[test]
    fn test_new_game() {
        let game = new_game();
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.current().pos.y, 0);
        assert!(!game.board().collides(game.current()));
        assert!(game.board().rows().iter().flatten().all(|&c| c == 0));
    }

    #[test]
    fn test_move_is_rolled_back_at_walls() {
        let mut game = with_piece(Piece::new(PieceKind::O, IVec2::new(0, 5)));
        game.apply_command(PlayerCommand::MoveLeft);
        assert_eq!(game.current().pos, IVec2::new(0, 5));

        game.apply_command(PlayerCommand::MoveRight);
        assert_eq!(game.current().pos, IVec2::new(1, 5));

        for _ in 0..20 {
            game.apply_command(PlayerCommand::MoveRight);
        }
        assert_eq!(game.current().pos, IVec2::new(8, 5));
    }

    #[test]
    fn test_rotate() {
        let mut game = with_piece(Piece::new(PieceKind::T, IVec2::new(3, 5)));
        let expected = rotate(&PieceKind::T.definition().shape);
        game.apply_command(PlayerCommand::Rotate);
        assert_eq!(game.current().shape(), &expected);
        assert_eq!(game.current().pos, IVec2::new(3, 5));
    }

    #[test]
    fn test_rotate_is_rolled_back_at_walls() {
        // upright I hugging the left wall has nowhere to lie down
        let mut piece = Piece::new(PieceKind::I, IVec2::new(-2, 5));
        piece.replace_shape(rotate(piece.shape()));
        let upright = piece.shape().clone();

        let mut game = with_piece(piece);
        game.apply_command(PlayerCommand::Rotate);
        assert_eq!(game.current().shape(), &upright);
        assert_eq!(game.current().pos, IVec2::new(-2, 5));
    }

    #[test]
    fn test_o_piece_falls_and_lands() {
        let mut game = with_piece(Piece::new(PieceKind::O, IVec2::new(3, 0)));
        assert!(!game.board().collides(game.current()));

        for y in 1..=18 {
            game.apply_command(PlayerCommand::SoftDrop);
            assert_eq!(game.current().pos, IVec2::new(3, y));
        }

        game.apply_command(PlayerCommand::SoftDrop);

        let value = PieceKind::O.cell_value();
        for (x, y) in [(3, 18), (4, 18), (3, 19), (4, 19)] {
            assert_eq!(game.board().cell(IVec2::new(x, y)), value);
        }
        let filled = game.board().rows().iter().flatten().filter(|&&c| c != 0).count();
        assert_eq!(filled, 4);
        assert_eq!(game.current().pos.y, 0);
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn test_completed_row_is_cleared() {
        let mut game = new_game();
        for x in [0, 2, 4, 6] {
            game.board.merge(&Piece::new(PieceKind::O, IVec2::new(x, 18)));
        }
        game.current = Piece::new(PieceKind::O, IVec2::new(8, 17));

        game.apply_command(PlayerCommand::SoftDrop);
        assert_eq!(game.current().pos, IVec2::new(8, 18));
        game.apply_command(PlayerCommand::SoftDrop);

        assert_eq!(game.board().rows().len(), 20);
        assert!(game.board().rows().iter().flatten().all(|&c| c == 0));
    }

    #[test]
    fn test_game_over_when_spawn_is_blocked() {
        let mut game = new_game();
        for y in (0..20).step_by(2) {
            game.board.merge(&Piece::new(PieceKind::O, IVec2::new(3, y)));
            game.board.merge(&Piece::new(PieceKind::O, IVec2::new(5, y)));
        }
        game.current = Piece::new(PieceKind::O, IVec2::new(0, 18));

        game.apply_command(PlayerCommand::SoftDrop);
        assert!(game.is_over());

        // nothing moves once the game has ended
        let piece = game.current().clone();
        game.tick(Duration::from_secs(5));
        game.apply_command(PlayerCommand::SoftDrop);
        game.apply_command(PlayerCommand::MoveLeft);
        game.apply_command(PlayerCommand::Rotate);
        assert_eq!(game.current(), &piece);
        assert_eq!(game.board().cell(IVec2::new(0, 19)), PieceKind::O.cell_value());
    }

    #[test]
    fn test_gravity_tick() {
        let mut game = with_piece(Piece::new(PieceKind::T, IVec2::new(3, 0)));

        game.tick(Duration::from_millis(600));
        game.tick(Duration::from_millis(400));
        assert_eq!(game.current().pos.y, 0);

        game.tick(Duration::from_millis(1));
        assert_eq!(game.current().pos.y, 1);
        assert_eq!(game.drop_counter, Duration::ZERO);
    }

    #[test]
    fn test_soft_drop_resets_gravity_clock() {
        let mut game = with_piece(Piece::new(PieceKind::T, IVec2::new(3, 0)));
        game.tick(Duration::from_millis(900));
        game.apply_command(PlayerCommand::SoftDrop);
        assert_eq!(game.drop_counter, Duration::ZERO);

        game.tick(Duration::from_millis(900));
        assert_eq!(game.current().pos.y, 1);
    }

    #[test]
    fn test_frame_overlays_active_piece() {
        let mut game = with_piece(Piece::new(PieceKind::I, IVec2::new(3, -1)));
        game.board.merge(&Piece::new(PieceKind::O, IVec2::new(0, 18)));

        let frame = game.frame();
        assert_eq!(frame.len(), 20);
        assert_eq!(frame[0][3..7], [1, 1, 1, 1]);
        assert_eq!(frame[19][0], PieceKind::O.cell_value());
        assert!(game.board().rows()[0].iter().all(|&c| c == 0));
    }
}
