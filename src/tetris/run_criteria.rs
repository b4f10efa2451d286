use bevy::{ecs::schedule::ShouldRun, prelude::*};

use super::game::Game;

/// Marks that the game over overlay has been spawned.
pub struct GameOverOverlay;

pub fn game_running(game: Res<Game>) -> ShouldRun {
    if game.is_over() {
        ShouldRun::No
    } else {
        ShouldRun::Yes
    }
}

pub fn game_over_pending(game: Res<Game>, overlay: Option<Res<GameOverOverlay>>) -> ShouldRun {
    if game.is_over() && overlay.is_none() {
        ShouldRun::Yes
    } else {
        ShouldRun::No
    }
}
