//! # Input Module
//!
//! Turns keyboard state into player intents. The same intents drive both
//! phases; [`GameState::handle_input`](crate::GameState::handle_input) decides
//! what each one means in the current phase.

use crate::game::Direction;
use macroquad::prelude::*;

/// Player intents delivered by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move the falling piece or the player one cell
    Move(Direction),
    /// Rotate the falling piece clockwise
    Rotate,
    /// Drop the falling piece to the bottom
    Drop,
    /// Finish building and start the adventure
    SwitchPhase,
    /// Discard the board and start a new run
    Restart,
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

/// Keyboard bindings, in lookup order.
const KEY_BINDINGS: &[(KeyCode, PlayerInput)] = &[
    (KeyCode::Escape, PlayerInput::Quit),
    (KeyCode::Left, PlayerInput::Move(Direction::West)),
    (KeyCode::Right, PlayerInput::Move(Direction::East)),
    (KeyCode::Down, PlayerInput::Move(Direction::South)),
    (KeyCode::A, PlayerInput::Move(Direction::West)),
    (KeyCode::D, PlayerInput::Move(Direction::East)),
    (KeyCode::S, PlayerInput::Move(Direction::South)),
    (KeyCode::Space, PlayerInput::Drop),
    (KeyCode::Tab, PlayerInput::SwitchPhase),
    (KeyCode::Enter, PlayerInput::SwitchPhase),
    (KeyCode::R, PlayerInput::Restart),
    (KeyCode::F1, PlayerInput::Help),
];

/// Input handler for processing player commands.
pub struct InputHandler {
    /// Whether Up/W rotate the piece in the building phase instead of moving north
    pub rotate_with_up: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use terrablocks::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.rotate_with_up);
    /// ```
    pub fn new() -> Self {
        Self {
            rotate_with_up: true,
        }
    }

    /// Gets the intent for the key pressed this frame, if any.
    ///
    /// `building` selects the meaning of Up/W.
    pub fn get_input(&self, building: bool) -> Option<PlayerInput> {
        if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
            return Some(self.up_intent(building));
        }

        KEY_BINDINGS
            .iter()
            .find(|(key, _)| is_key_pressed(*key))
            .map(|(_, input)| *input)
    }

    /// What pressing Up means in the given phase.
    pub fn up_intent(&self, building: bool) -> PlayerInput {
        if building && self.rotate_with_up {
            PlayerInput::Rotate
        } else {
            PlayerInput::Move(Direction::North)
        }
    }

    /// Help line listing the bindings.
    pub fn help_text(&self) -> &'static str {
        "Arrows/WASD=move, Up=rotate, Space=drop, Tab=start adventure, R=restart, Esc=quit"
    }
}
