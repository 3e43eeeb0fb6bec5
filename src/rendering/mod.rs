//! # Rendering Module
//!
//! The game state draws itself through the [`Renderer`] trait once per frame.
//! [`AsciiRenderer`] fills a text buffer for headless runs and tests;
//! [`MacroquadDisplay`] draws colored cells in a window.

pub mod ascii;
pub mod display;

pub use ascii::*;
pub use display::*;

use crate::game::{GameState, Marker, Position, TerrainType};

/// Drawing surface for one frame.
pub trait Renderer {
    /// Draws a board cell, or a cell of the falling piece.
    fn draw_cell(&mut self, position: Position, terrain: TerrainType);

    /// Draws an entity on top of the board. `kind` is one of the marker values.
    fn draw_entity(&mut self, position: Position, kind: TerrainType);
}

/// Draws a full frame: board cells, the falling piece, then entities.
///
/// Piece cells above the board are skipped.
pub fn render_frame<R: Renderer + ?Sized>(game_state: &GameState, renderer: &mut R) {
    let board = &game_state.board;
    for (position, terrain) in board.iter_cells() {
        renderer.draw_cell(position, terrain);
    }

    if let Some(piece) = game_state.current_piece() {
        for (position, terrain) in piece.cells_at(piece.position) {
            if board.is_position_valid(position.x, position.y) {
                renderer.draw_cell(position, terrain);
            }
        }
    }

    if let Some(adventure) = game_state.adventure() {
        for treasure in &adventure.treasures {
            renderer.draw_entity(treasure.position, treasure.marker());
        }
        for enemy in &adventure.enemies {
            renderer.draw_entity(enemy.position, enemy.marker());
        }
        renderer.draw_entity(adventure.player.position, adventure.player.marker());
    }
}
