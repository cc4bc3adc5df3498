use macroquad::prelude::*;

use crate::application::Command;

/// Map a key press to a command.
/// Every key not bound to something else advances one generation.
pub fn command_for(key: KeyCode) -> Command {
    match key {
        KeyCode::Q | KeyCode::Escape => Command::Quit,
        KeyCode::R => Command::Reseed,
        KeyCode::C => Command::Clear,
        _ => Command::Advance,
    }
}

/// Command for the key pressed this frame, if any
pub fn poll() -> Option<Command> {
    get_last_key_pressed().map(command_for)
}
