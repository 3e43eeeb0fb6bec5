//! # Display Management
//!
//! Window rendering with macroquad: the board as colored cells, a side panel
//! with the phase, score and next piece, and a short message log.

use crate::game::{GameEvent, GameState, MessageImportance, Phase, Position, TerrainType};
use crate::rendering::{render_frame, Renderer};
use macroquad::prelude::*;

/// Color of a terrain cell or entity marker.
pub fn terrain_color(terrain: TerrainType) -> Color {
    match terrain {
        TerrainType::Empty => Color::new(0.08, 0.08, 0.1, 1.0),
        TerrainType::Forest => DARKGREEN,
        TerrainType::Mountain => GRAY,
        TerrainType::Water => BLUE,
        TerrainType::Path => BEIGE,
        TerrainType::Hazard => MAROON,
        TerrainType::Player => YELLOW,
        TerrainType::Enemy => RED,
        TerrainType::Treasure => GOLD,
        TerrainType::SafeHaven => SKYBLUE,
    }
}

fn importance_color(importance: MessageImportance) -> Color {
    match importance {
        MessageImportance::Info => WHITE,
        MessageImportance::Warning => ORANGE,
        MessageImportance::Critical => RED,
    }
}

/// Largest square cell size that fits the board into the map area.
pub fn fit_cell_size(area_width: f32, area_height: f32, board_width: u32, board_height: u32) -> f32 {
    let by_width = area_width / board_width.max(1) as f32;
    let by_height = area_height / board_height.max(1) as f32;
    by_width.min(by_height).floor().max(1.0)
}

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    /// Cell size in pixels
    pub cell_size: f32,
    /// UI panel width in pixels
    pub ui_panel_width: f32,
    /// Message history
    pub messages: Vec<(String, MessageImportance)>,
    /// Maximum number of messages to keep
    pub max_messages: usize,
    /// Whether the help overlay is visible
    pub show_help: bool,
}

impl MacroquadDisplay {
    const MARGIN: f32 = 10.0;
    const MESSAGE_AREA_HEIGHT: f32 = 90.0;

    /// Creates a display laid out for a board of the given size.
    ///
    /// Must be called from inside the macroquad main loop.
    pub fn new(board_width: u32, board_height: u32) -> Self {
        let screen_width = screen_width();
        let screen_height = screen_height();
        let ui_panel_width = 260.0;
        let cell_size = fit_cell_size(
            screen_width - ui_panel_width - Self::MARGIN * 2.0,
            screen_height - Self::MESSAGE_AREA_HEIGHT - Self::MARGIN * 2.0,
            board_width,
            board_height,
        );

        Self {
            screen_width,
            screen_height,
            cell_size,
            ui_panel_width,
            messages: Vec::new(),
            max_messages: 100,
            show_help: false,
        }
    }

    /// Renders the complete game screen.
    pub fn render_game(&mut self, game_state: &GameState, help_text: &str) {
        clear_background(BLACK);

        render_frame(game_state, self);
        self.render_ui(game_state);
        self.render_messages();

        if self.show_help {
            self.render_help(help_text);
        }
    }

    /// Adds the describable events to the message log.
    pub fn add_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(text) = event.describe() {
                let importance = match event {
                    GameEvent::Message { importance, .. } => *importance,
                    GameEvent::Collision { .. } => MessageImportance::Warning,
                    GameEvent::PlayerDefeated => MessageImportance::Critical,
                    _ => MessageImportance::Info,
                };
                self.add_message(text, importance);
            }
        }
    }

    /// Adds a message to the message history.
    pub fn add_message(&mut self, message: String, importance: MessageImportance) {
        self.messages.push((message, importance));

        // Keep only the most recent messages
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    fn cell_origin(&self, position: Position) -> (f32, f32) {
        (
            Self::MARGIN + position.x as f32 * self.cell_size,
            Self::MARGIN + position.y as f32 * self.cell_size,
        )
    }

    fn render_ui(&self, game_state: &GameState) {
        let panel_x = self.screen_width - self.ui_panel_width;
        let mut line_y = 30.0;
        let line_height = 22.0;

        draw_text("TERRABLOCKS", panel_x, line_y, 28.0, WHITE);
        line_y += line_height * 2.0;

        let phase_color = match game_state.phase() {
            Phase::Building => GREEN,
            Phase::Adventure => ORANGE,
        };
        draw_text(
            &format!("{} phase", game_state.phase()),
            panel_x,
            line_y,
            20.0,
            phase_color,
        );
        line_y += line_height;
        draw_text(
            &format!("Score: {}", game_state.score),
            panel_x,
            line_y,
            20.0,
            WHITE,
        );
        line_y += line_height;
        draw_text(
            &format!("Run: {}", game_state.run_number),
            panel_x,
            line_y,
            18.0,
            LIGHTGRAY,
        );
        line_y += line_height * 2.0;

        if let Some(next) = game_state.next_piece() {
            draw_text("Next:", panel_x, line_y, 18.0, WHITE);
            line_y += line_height * 0.5;
            let preview = self.cell_size.min(18.0);
            for (position, terrain) in next.occupied_cells() {
                draw_rectangle(
                    panel_x + position.x as f32 * preview,
                    line_y + position.y as f32 * preview,
                    preview - 1.0,
                    preview - 1.0,
                    terrain_color(terrain),
                );
            }
            line_y += preview * next.height() as f32 + line_height;
        }

        if let Some(adventure) = game_state.adventure() {
            let player = &adventure.player;
            draw_text(
                &format!("Health: {}/{}", player.health, player.max_health),
                panel_x,
                line_y,
                18.0,
                if player.is_alive() { WHITE } else { RED },
            );
            line_y += line_height;
            draw_text(
                &format!("Treasure: {}", player.treasure_collected),
                panel_x,
                line_y,
                18.0,
                GOLD,
            );
            line_y += line_height;
            draw_text(
                &format!("Treasures left: {}", adventure.treasures.len()),
                panel_x,
                line_y,
                18.0,
                WHITE,
            );
            line_y += line_height;
            draw_text(
                &format!("Enemies: {}", adventure.enemies.len()),
                panel_x,
                line_y,
                18.0,
                WHITE,
            );
            line_y += line_height;
        }

        let stats = &game_state.statistics;
        line_y += line_height;
        draw_text(
            &format!("Pieces: {}  Lines: {}", stats.pieces_placed, stats.lines_cleared),
            panel_x,
            line_y,
            16.0,
            LIGHTGRAY,
        );
        line_y += line_height;
        draw_text(
            &format!("Hazard cells: {}", game_state.hazard_count()),
            panel_x,
            line_y,
            16.0,
            LIGHTGRAY,
        );
        line_y += line_height * 2.0;

        draw_text("F1: Help  ESC: Quit", panel_x, line_y, 16.0, GREEN);
    }

    fn render_messages(&self) {
        let message_area_y = self.screen_height - Self::MESSAGE_AREA_HEIGHT + 20.0;
        let message_count = 3;
        let line_height = 18.0;

        draw_rectangle(
            0.0,
            message_area_y - 20.0,
            self.screen_width,
            Self::MESSAGE_AREA_HEIGHT,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        let start_index = self.messages.len().saturating_sub(message_count);
        for (i, (message, importance)) in self.messages.iter().skip(start_index).enumerate() {
            let y = message_area_y + i as f32 * line_height;
            draw_text(message, 10.0, y, 16.0, importance_color(*importance));
        }
    }

    fn render_help(&self, help_text: &str) {
        let height = 60.0;
        let y = self.screen_height / 2.0 - height / 2.0;
        draw_rectangle(0.0, y, self.screen_width, height, Color::new(0.0, 0.0, 0.0, 0.9));
        draw_text(help_text, 20.0, y + 36.0, 18.0, WHITE);
    }
}

impl Renderer for MacroquadDisplay {
    fn draw_cell(&mut self, position: Position, terrain: TerrainType) {
        let (x, y) = self.cell_origin(position);
        draw_rectangle(
            x,
            y,
            self.cell_size - 1.0,
            self.cell_size - 1.0,
            terrain_color(terrain),
        );
    }

    fn draw_entity(&mut self, position: Position, kind: TerrainType) {
        let (x, y) = self.cell_origin(position);
        let half = self.cell_size / 2.0;
        draw_circle(x + half, y + half, half * 0.7, terrain_color(kind));
    }
}
