use bevy::{
    input::{keyboard::KeyboardInput, ElementState},
    prelude::*,
};

use super::game::{Game, PlayerCommand};

pub fn command_for_key(key: KeyCode) -> Option<PlayerCommand> {
    match key {
        KeyCode::Left => Some(PlayerCommand::MoveLeft),
        KeyCode::Right => Some(PlayerCommand::MoveRight),
        KeyCode::Down => Some(PlayerCommand::SoftDrop),
        KeyCode::Up => Some(PlayerCommand::Rotate),
        _ => None,
    }
}

// every key-down counts, including the OS auto-repeat of a held key
pub fn handle_player_input(mut key_events: EventReader<KeyboardInput>, mut game: ResMut<Game>) {
    for event in key_events.iter() {
        if event.state != ElementState::Pressed {
            continue;
        }
        if let Some(command) = event.key_code.and_then(command_for_key) {
            game.apply_command(command);
        }
    }
}
