//! Client input mapping with press detection

use macroquad::prelude::*;
use shared::{Command, Direction};

const BOUND_KEYS: usize = 9;

/// Keys bound to commands; WASD and the arrow keys both move
const BINDINGS: [(KeyCode, Command); BOUND_KEYS] = [
    (KeyCode::W, Command::Move(Direction::Up)),
    (KeyCode::Up, Command::Move(Direction::Up)),
    (KeyCode::S, Command::Move(Direction::Down)),
    (KeyCode::Down, Command::Move(Direction::Down)),
    (KeyCode::A, Command::Move(Direction::Left)),
    (KeyCode::Left, Command::Move(Direction::Left)),
    (KeyCode::D, Command::Move(Direction::Right)),
    (KeyCode::Right, Command::Move(Direction::Right)),
    (KeyCode::E, Command::Interact),
];

/// What the user asked for during one frame
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameInput {
    pub commands: Vec<Command>,
    pub quit: bool,
}

/// Turns key presses into game commands
///
/// A command is produced once per press: holding a key down does not
/// repeat it.
pub struct InputManager {
    // Previous frame key states for edge detection
    prev_down: [bool; BOUND_KEYS],
    prev_escape: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            prev_down: [false; BOUND_KEYS],
            prev_escape: false,
        }
    }

    /// Samples the keyboard for this frame
    pub fn update(&mut self) -> FrameInput {
        let down = BINDINGS.map(|(key, _)| is_key_down(key));
        self.apply(down, is_key_down(KeyCode::Escape))
    }

    /// Edge detection over one frame of key states, in `BINDINGS` order
    fn apply(&mut self, down: [bool; BOUND_KEYS], escape: bool) -> FrameInput {
        let commands = BINDINGS
            .iter()
            .zip(down.iter().zip(self.prev_down.iter()))
            .filter(|(_, (now, before))| **now && !**before)
            .map(|((_, command), _)| *command)
            .collect();

        let quit = escape && !self.prev_escape;

        self.prev_down = down;
        self.prev_escape = escape;

        FrameInput { commands, quit }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
