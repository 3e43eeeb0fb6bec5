//! # Scene Management System
//!
//! Runs the frame loop: read input, mutate the game state, advance timers,
//! then render. A defeated player switches to the game-over scene until the
//! run is restarted.

use crate::{GameEvent, GameState, InputHandler, MacroquadDisplay, MessageImportance, Phase, PlayerInput};
use log::info;
use macroquad::prelude::*;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Normal gameplay in either phase
    Playing,
    /// The player ran out of health
    GameOver,
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
}

impl SceneManager {
    /// Creates a new scene manager with the given game state.
    pub fn new(game_state: GameState, input_handler: InputHandler) -> Self {
        let mut display = MacroquadDisplay::new(game_state.board.width, game_state.board.height);
        display.add_message("Welcome to Terrablocks!".to_string(), MessageImportance::Info);
        display.add_message(
            "Stack pieces to shape the land, then explore it".to_string(),
            MessageImportance::Info,
        );

        Self {
            current_scene: SceneType::Playing,
            game_state,
            display,
            input_handler,
        }
    }

    /// Runs the main scene loop until the player quits
    pub async fn run(&mut self) {
        loop {
            let exit = match self.current_scene {
                SceneType::Playing => self.update_playing_scene(),
                SceneType::GameOver => self.update_game_over_scene(),
            };
            if exit {
                break;
            }
            next_frame().await;
        }
        info!(
            "Leaving after run {} with score {}",
            self.game_state.run_number, self.game_state.score
        );
    }

    /// Updates the playing scene, returns true if exit is requested
    fn update_playing_scene(&mut self) -> bool {
        let building = self.game_state.phase() == Phase::Building;
        if let Some(input) = self.input_handler.get_input(building) {
            match input {
                PlayerInput::Quit => return true,
                PlayerInput::Help => self.display.show_help = !self.display.show_help,
                _ => {
                    let events = self.game_state.handle_input(input);
                    self.process_events(&events);
                }
            }
        }

        let events = self.game_state.update(get_frame_time() as f64);
        self.process_events(&events);

        self.display
            .render_game(&self.game_state, self.input_handler.help_text());
        false
    }

    /// Updates the game over scene, returns true if exit is requested
    fn update_game_over_scene(&mut self) -> bool {
        self.display
            .render_game(&self.game_state, self.input_handler.help_text());

        let width = screen_width();
        let height = screen_height();
        draw_rectangle(0.0, height / 2.0 - 50.0, width, 100.0, Color::new(0.0, 0.0, 0.0, 0.85));
        draw_text("DEFEATED", width / 2.0 - 80.0, height / 2.0, 40.0, RED);
        draw_text(
            &format!("Score: {}  (R: new run, ESC: quit)", self.game_state.score),
            width / 2.0 - 160.0,
            height / 2.0 + 30.0,
            20.0,
            WHITE,
        );

        if is_key_pressed(KeyCode::Escape) {
            return true;
        }
        if is_key_pressed(KeyCode::R) {
            let events = self.game_state.restart();
            self.process_events(&events);
            self.current_scene = SceneType::Playing;
        }
        false
    }

    /// Shows event messages and switches scene on defeat
    fn process_events(&mut self, events: &[GameEvent]) {
        self.display.add_events(events);
        if events.contains(&GameEvent::PlayerDefeated) {
            self.current_scene = SceneType::GameOver;
        }
    }
}
