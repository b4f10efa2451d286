use std::time::Duration;

use bevy::math::Vec2;

pub const COLS: usize = 10;
pub const ROWS: usize = 20;
pub const BLOCK_SIZE: f32 = 24.;

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub cols: usize,
    pub rows: usize,
    /// Side length of one cell, in window units.
    pub block_size: f32,
    /// Gravity period.
    pub drop_interval: Duration,
    pub window_title: String,
    /// Asset path of the font used for the game over text.
    pub overlay_font: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            cols: COLS,
            rows: ROWS,
            block_size: BLOCK_SIZE,
            drop_interval: Duration::from_millis(1000),
            window_title: "Tetris".to_string(),
            overlay_font: "fonts/FiraSans-Bold.ttf".to_string(),
        }
    }
}

impl GameConfig {
    pub fn screen_dims(&self) -> Vec2 {
        Vec2::new(self.cols as f32, self.rows as f32) * self.block_size
    }
}
