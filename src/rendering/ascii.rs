//! # ASCII Rendering
//!
//! Text renderer used by the headless mode and by tests.

use crate::game::{Board, GameState, Position, TerrainType};
use crate::rendering::{render_frame, Renderer};

/// Renders a frame into a grid of glyphs.
///
/// # Examples
///
/// ```
/// use terrablocks::{AsciiRenderer, Board, Position, Renderer, TerrainType};
///
/// let board = Board::from_rows(&["f..", "==="]).unwrap();
/// let mut renderer = AsciiRenderer::for_board(&board);
/// renderer.draw_board(&board);
/// renderer.draw_entity(Position::new(1, 1), TerrainType::Player);
/// assert_eq!(renderer.to_string(), "f..\n=@=");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiRenderer {
    rows: Vec<Vec<char>>,
}

impl AsciiRenderer {
    /// Creates a blank buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            rows: vec![vec![TerrainType::Empty.glyph(); width as usize]; height as usize],
        }
    }

    /// Creates a blank buffer sized for `board`.
    pub fn for_board(board: &Board) -> Self {
        Self::new(board.width, board.height)
    }

    /// Renders a complete frame of the game and returns it as text.
    pub fn render(game_state: &GameState) -> String {
        let mut renderer = Self::for_board(&game_state.board);
        render_frame(game_state, &mut renderer);
        renderer.to_string()
    }

    /// Draws every board cell, without entities.
    pub fn draw_board(&mut self, board: &Board) {
        for (position, terrain) in board.iter_cells() {
            self.draw_cell(position, terrain);
        }
    }

    /// The buffer rows as strings.
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }

    fn put(&mut self, position: Position, glyph: char) {
        if position.x < 0 || position.y < 0 {
            return;
        }
        if let Some(slot) = self
            .rows
            .get_mut(position.y as usize)
            .and_then(|row| row.get_mut(position.x as usize))
        {
            *slot = glyph;
        }
    }
}

impl Renderer for AsciiRenderer {
    fn draw_cell(&mut self, position: Position, terrain: TerrainType) {
        self.put(position, terrain.glyph());
    }

    fn draw_entity(&mut self, position: Position, kind: TerrainType) {
        self.put(position, kind.glyph());
    }
}

impl std::fmt::Display for AsciiRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_draws_are_ignored() {
        let mut renderer = AsciiRenderer::new(2, 2);
        renderer.draw_cell(Position::new(-1, 0), TerrainType::Forest);
        renderer.draw_cell(Position::new(2, 1), TerrainType::Forest);
        renderer.draw_entity(Position::new(0, 5), TerrainType::Enemy);
        assert_eq!(renderer.lines(), vec!["..", ".."]);
    }

    #[test]
    fn test_entities_overwrite_cells() {
        let board = Board::from_rows(&["!=H"]).unwrap();
        let mut renderer = AsciiRenderer::for_board(&board);
        renderer.draw_board(&board);
        renderer.draw_entity(Position::new(0, 0), TerrainType::Enemy);
        renderer.draw_entity(Position::new(1, 0), TerrainType::Treasure);
        assert_eq!(renderer.to_string(), "E$H");
    }
}
