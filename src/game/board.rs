//! # Board
//!
//! Grid storage and the terrain passes that run on it.
//!
//! The board is a fixed-size matrix of [`TerrainType`] values. It is mutated only
//! by stamping pieces and by the two passes that follow every placement: rows that
//! fill up become Path, then small sealed pockets of empty cells become Hazard.
//! Nothing here fails: out-of-bounds reads return `None` and out-of-bounds writes
//! are ignored.

use crate::game::{Piece, Position, TerrainType};
use crate::{TerraError, TerraResult};
use serde::{Deserialize, Serialize};

/// What a single committed placement did to the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementReport {
    /// Rows that were complete and converted to Path, ascending
    pub completed_rows: Vec<usize>,
    /// Number of Empty cells reclassified as Hazard
    pub hazards_created: usize,
}

/// Terrain grid shared by both phases of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Width in cells
    pub width: u32,
    /// Height in cells
    pub height: u32,
    /// Cells in row-major order, `cells[y][x]`
    cells: Vec<Vec<TerrainType>>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Examples
    ///
    /// ```
    /// use terrablocks::{Board, TerrainType};
    ///
    /// let board = Board::new(10, 15);
    /// assert_eq!(board.get_cell(9, 14), Some(TerrainType::Empty));
    /// assert_eq!(board.get_cell(10, 0), None);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![TerrainType::Empty; width as usize]; height as usize],
        }
    }

    /// Builds a board from text rows using [`TerrainType::glyph`] characters.
    ///
    /// Every row must have the same length and only known glyphs.
    ///
    /// # Examples
    ///
    /// ```
    /// use terrablocks::{Board, TerrainType};
    ///
    /// let board = Board::from_rows(&["f..", "==="]).unwrap();
    /// assert_eq!(board.get_cell(0, 0), Some(TerrainType::Forest));
    /// assert_eq!(board.get_cell(2, 1), Some(TerrainType::Path));
    /// ```
    pub fn from_rows(rows: &[&str]) -> TerraResult<Self> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut cells = Vec::with_capacity(rows.len());

        for (y, row) in rows.iter().enumerate() {
            let parsed: Vec<TerrainType> = row
                .chars()
                .map(|glyph| {
                    TerrainType::from_glyph(glyph)
                        .filter(|terrain| terrain.is_grid_terrain())
                        .ok_or_else(|| {
                            TerraError::InvalidState(format!(
                                "Unknown terrain glyph '{}' in row {}",
                                glyph, y
                            ))
                        })
                })
                .collect::<TerraResult<_>>()?;

            if parsed.len() != width {
                return Err(TerraError::InvalidState(format!(
                    "Row {} has {} cells, expected {}",
                    y,
                    parsed.len(),
                    width
                )));
            }
            cells.push(parsed);
        }

        Ok(Self {
            width: width as u32,
            height: cells.len() as u32,
            cells,
        })
    }

    /// Checks whether (x, y) lies on the board.
    pub fn is_position_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Reads a cell; `None` outside the board.
    pub fn get_cell(&self, x: i32, y: i32) -> Option<TerrainType> {
        if !self.is_position_valid(x, y) {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Reads the cell at `position`.
    pub fn get(&self, position: Position) -> Option<TerrainType> {
        self.get_cell(position.x, position.y)
    }

    /// Writes a cell. Returns false (and writes nothing) outside the board.
    pub fn set_cell(&mut self, x: i32, y: i32, terrain: TerrainType) -> bool {
        if !self.is_position_valid(x, y) {
            return false;
        }
        self.cells[y as usize][x as usize] = terrain;
        true
    }

    /// Row `y` as a slice, if it exists.
    pub fn row(&self, y: usize) -> Option<&[TerrainType]> {
        self.cells.get(y).map(|row| row.as_slice())
    }

    /// Iterates every cell with its position, row-major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Position, TerrainType)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &terrain)| (Position::new(x as i32, y as i32), terrain))
        })
    }

    /// Positions of every cell holding `terrain`, row-major.
    pub fn positions_of(&self, terrain: TerrainType) -> Vec<Position> {
        self.iter_cells()
            .filter(|&(_, cell)| cell == terrain)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Number of cells holding `terrain`.
    pub fn count(&self, terrain: TerrainType) -> usize {
        self.iter_cells().filter(|&(_, cell)| cell == terrain).count()
    }

    /// Number of Hazard cells.
    pub fn hazard_count(&self) -> usize {
        self.count(TerrainType::Hazard)
    }

    /// Checks whether `piece` fits with its shape origin at `position`.
    ///
    /// Every occupied cell must land on the board and on an Empty cell.
    pub fn is_valid_move(&self, piece: &Piece, position: Position) -> bool {
        piece
            .cells_at(position)
            .all(|(cell, _)| self.get(cell) == Some(TerrainType::Empty))
    }

    /// Stamps `piece` at its own position.
    ///
    /// Returns false and leaves the board untouched if the placement is invalid.
    pub fn place_piece(&mut self, piece: &Piece) -> bool {
        if !self.is_valid_move(piece, piece.position) {
            return false;
        }
        for (cell, terrain) in piece.cells_at(piece.position) {
            self.set_cell(cell.x, cell.y, terrain);
        }
        true
    }

    /// Indices of complete rows (no Empty cell), ascending.
    pub fn check_completed_lines(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(|&cell| cell != TerrainType::Empty))
            .map(|(y, _)| y)
            .collect()
    }

    /// Overwrites every cell of the given rows with Path.
    ///
    /// Indices past the bottom of the board are ignored.
    pub fn convert_completed_lines_to_path(&mut self, rows: &[usize]) {
        for &y in rows {
            if let Some(row) = self.cells.get_mut(y) {
                row.fill(TerrainType::Path);
            }
        }
    }

    /// Reclassifies small sealed pockets of Empty cells as Hazard.
    ///
    /// Uses the default component threshold of
    /// [`HAZARD_MAX_COMPONENT_SIZE`](crate::config::HAZARD_MAX_COMPONENT_SIZE).
    /// Returns the number of cells converted.
    pub fn identify_hazards(&mut self) -> usize {
        self.identify_hazards_with_threshold(crate::config::HAZARD_MAX_COMPONENT_SIZE)
    }

    /// Reclassifies 4-connected Empty components of size `1..=max_size` as Hazard.
    ///
    /// Each cell is visited exactly once. Components are collected with an
    /// explicit stack, pushing neighbors right, left, down, up. Only Empty cells
    /// are ever rewritten.
    pub fn identify_hazards_with_threshold(&mut self, max_size: usize) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut visited = vec![vec![false; width]; height];
        let mut converted = 0;

        for y in 0..height {
            for x in 0..width {
                if visited[y][x] || self.cells[y][x] != TerrainType::Empty {
                    continue;
                }

                let start = Position::new(x as i32, y as i32);
                let component = self.collect_empty_component(start, &mut visited);

                if (1..=max_size).contains(&component.len()) {
                    for pos in &component {
                        self.cells[pos.y as usize][pos.x as usize] = TerrainType::Hazard;
                    }
                    converted += component.len();
                }
            }
        }

        converted
    }

    /// Flood-fills the Empty component containing `start`.
    fn collect_empty_component(&self, start: Position, visited: &mut [Vec<bool>]) -> Vec<Position> {
        let mut component = Vec::new();
        let mut stack = vec![start];
        visited[start.y as usize][start.x as usize] = true;

        while let Some(pos) = stack.pop() {
            component.push(pos);

            for next in pos.cardinal_adjacent_positions() {
                if self.get(next) != Some(TerrainType::Empty) {
                    continue;
                }
                let seen = &mut visited[next.y as usize][next.x as usize];
                if !*seen {
                    *seen = true;
                    stack.push(next);
                }
            }
        }

        component
    }

    /// Commits a piece and runs the post-placement passes, in order:
    /// stamp, detect complete rows, convert them to Path, identify hazards.
    ///
    /// Returns `None` without touching the board if the piece does not fit.
    pub fn commit_piece(&mut self, piece: &Piece, hazard_max_size: usize) -> Option<PlacementReport> {
        if !self.place_piece(piece) {
            return None;
        }

        let completed_rows = self.check_completed_lines();
        if !completed_rows.is_empty() {
            self.convert_completed_lines_to_path(&completed_rows);
        }
        let hazards_created = self.identify_hazards_with_threshold(hazard_max_size);

        Some(PlacementReport {
            completed_rows,
            hazards_created,
        })
    }

    /// Renders the board as text rows of terrain glyphs.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
            .collect()
    }

    /// Serializes the board to pretty JSON.
    pub fn to_json(&self) -> TerraResult<String> {
        serde_json::to_string_pretty(self).map_err(TerraError::from)
    }

    /// Loads a board from JSON, checking the grid matches its dimensions.
    pub fn from_json(json: &str) -> TerraResult<Self> {
        let board: Board = serde_json::from_str(json)?;
        let rows_match = board.cells.len() == board.height as usize
            && board.cells.iter().all(|row| row.len() == board.width as usize);
        if !rows_match {
            return Err(TerraError::InvalidState(format!(
                "Board snapshot does not match its {}x{} dimensions",
                board.width, board.height
            )));
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::PieceKind;

    fn i_piece() -> Piece {
        Piece::from_shape(vec![vec![1, 1, 1, 1]], TerrainType::Forest)
    }

    #[test]
    fn test_bounds() {
        let board = Board::new(10, 15);
        assert!(board.is_position_valid(0, 0));
        assert!(board.is_position_valid(9, 14));
        assert!(!board.is_position_valid(-1, 0));
        assert!(!board.is_position_valid(10, 0));
        assert!(!board.is_position_valid(0, 15));
        assert_eq!(board.get_cell(-1, 3), None);
    }

    #[test]
    fn test_out_of_bounds_write_is_noop() {
        let mut board = Board::new(3, 3);
        let before = board.clone();
        assert!(!board.set_cell(3, 0, TerrainType::Forest));
        assert!(!board.set_cell(0, -1, TerrainType::Forest));
        assert_eq!(board, before);
    }

    #[test]
    fn test_i_piece_placement_validity() {
        let board = Board::new(10, 15);
        let piece = i_piece();
        assert!(board.is_valid_move(&piece, Position::new(3, 0)));
        assert!(board.is_valid_move(&piece, Position::new(6, 0)));
        assert!(!board.is_valid_move(&piece, Position::new(7, 0)));
        assert!(!board.is_valid_move(&piece, Position::new(-1, 0)));
        assert!(!board.is_valid_move(&piece, Position::new(0, 15)));
    }

    #[test]
    fn test_occupied_cell_blocks_move() {
        let mut board = Board::new(10, 15);
        board.set_cell(4, 0, TerrainType::Path);
        assert!(!board.is_valid_move(&i_piece(), Position::new(3, 0)));
        assert!(board.is_valid_move(&i_piece(), Position::new(5, 0)));
    }

    #[test]
    fn test_empty_piece_cells_do_not_collide() {
        let mut board = Board::new(4, 4);
        board.set_cell(0, 0, TerrainType::Mountain);
        // T piece: top-left cell is empty
        let piece = Piece::new(PieceKind::T, TerrainType::Water);
        assert!(board.is_valid_move(&piece, Position::new(0, 0)));
    }

    #[test]
    fn test_place_piece_stamps_terrain() {
        let mut board = Board::new(10, 15);
        let piece = Piece::new(PieceKind::O, TerrainType::Water).at(Position::new(2, 13));
        assert!(board.place_piece(&piece));
        assert_eq!(board.count(TerrainType::Water), 4);
        assert_eq!(board.get_cell(3, 14), Some(TerrainType::Water));
        // Second placement on the same spot is rejected
        assert!(!board.place_piece(&piece));
        assert_eq!(board.count(TerrainType::Water), 4);
    }

    #[test]
    fn test_completed_lines() {
        let mut board = Board::from_rows(&["....", "f^~f", "f.~f", "^^^^"]).unwrap();
        assert_eq!(board.check_completed_lines(), vec![1, 3]);
        board.convert_completed_lines_to_path(&[1, 3, 99]);
        assert_eq!(board.to_rows(), vec!["....", "====", "f.~f", "===="]);
    }

    #[test]
    fn test_no_completed_lines() {
        let board = Board::new(5, 5);
        assert!(board.check_completed_lines().is_empty());
    }

    #[test]
    fn test_three_cell_component_becomes_hazard() {
        let mut board = Board::new(3, 1);
        assert_eq!(board.identify_hazards(), 3);
        assert_eq!(board.to_rows(), vec!["!!!"]);
    }

    #[test]
    fn test_four_cell_component_stays_empty() {
        let mut board = Board::new(4, 1);
        assert_eq!(board.identify_hazards(), 0);
        assert_eq!(board.to_rows(), vec!["...."]);
    }

    #[test]
    fn test_path_row_separates_components() {
        let mut board = Board::new(10, 5);
        let row: Vec<TerrainType> = (0..10)
            .map(|x| TerrainType::PIECE_TERRAINS[x % 3])
            .collect();
        for (x, terrain) in row.iter().enumerate() {
            board.set_cell(x as i32, 2, *terrain);
        }

        assert_eq!(board.check_completed_lines(), vec![2]);
        board.convert_completed_lines_to_path(&[2]);
        assert!(board.row(2).unwrap().iter().all(|&c| c == TerrainType::Path));

        // Two 20-cell regions, neither small enough
        assert_eq!(board.identify_hazards(), 0);
        assert_eq!(board.count(TerrainType::Empty), 40);
    }

    #[test]
    fn test_pockets_under_overhang() {
        let mut board = Board::from_rows(&[
            "......",
            "ff^^ff",
            "f.f..f",
            "ffffff",
        ])
        .unwrap();
        assert_eq!(board.identify_hazards(), 3);
        assert_eq!(board.to_rows(), vec!["......", "ff^^ff", "f!f!!f", "ffffff"]);
    }

    #[test]
    fn test_diagonal_cells_are_separate_components() {
        let mut board = Board::from_rows(&[".f....", "f.ffff"]).unwrap();
        board.identify_hazards();
        assert_eq!(board.get_cell(0, 0), Some(TerrainType::Hazard));
        assert_eq!(board.get_cell(1, 1), Some(TerrainType::Hazard));
        assert_eq!(board.get_cell(2, 0), Some(TerrainType::Empty));
    }

    #[test]
    fn test_identify_hazards_is_idempotent() {
        let mut board = Board::from_rows(&["..f...", "fff.f.", "~.~~~~"]).unwrap();
        board.identify_hazards();
        let once = board.clone();
        assert_eq!(board.identify_hazards(), 0);
        assert_eq!(board, once);
    }

    #[test]
    fn test_custom_threshold() {
        let mut board = Board::new(5, 1);
        assert_eq!(board.identify_hazards_with_threshold(5), 5);
        let mut board = Board::new(5, 1);
        assert_eq!(board.identify_hazards_with_threshold(0), 0);
    }

    #[test]
    fn test_commit_converts_lines_before_hazards() {
        // Bottom row is one cell short; the I piece completes it
        let mut board = Board::from_rows(&[
            "......",
            "f.ffff",
            "ff....",
        ])
        .unwrap();
        let piece = i_piece().at(Position::new(2, 2));
        let report = board.commit_piece(&piece, 3).unwrap();

        assert_eq!(report.completed_rows, vec![2]);
        assert_eq!(report.hazards_created, 0);
        assert_eq!(board.to_rows(), vec!["......", "f.ffff", "======"]);
    }

    #[test]
    fn test_commit_rejects_invalid_piece() {
        let mut board = Board::new(3, 3);
        let before = board.clone();
        assert!(board.commit_piece(&i_piece(), 3).is_none());
        assert_eq!(board, before);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Board::from_rows(&["..", "..."]).is_err());
        assert!(Board::from_rows(&["@."]).is_err());
        assert!(Board::from_rows(&["?."]).is_err());
    }

    #[test]
    fn test_json_snapshot() {
        let mut board = Board::new(4, 2);
        board.set_cell(1, 1, TerrainType::SafeHaven);
        let json = board.to_json().unwrap();
        assert_eq!(Board::from_json(&json).unwrap(), board);

        let broken = json.replace("\"width\": 4", "\"width\": 5");
        assert!(Board::from_json(&broken).is_err());
    }
}
