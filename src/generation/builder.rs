//! # Automatic Building
//!
//! Plays a Building Phase without a player: every piece gets a random rotation
//! and horizontal shift, then drops. Used for headless runs, benchmarks and
//! tests that need a realistic finished board.

use crate::game::{Board, BuildingPhase, Direction};
use crate::generation::PieceGenerator;
use crate::{GenerationConfig, Generator, TerraError, TerraResult};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;

/// Generator that fills a board by dropping random pieces until it tops out.
#[derive(Debug, Clone)]
pub struct AutoBuilder {
    /// Upper bound on dropped pieces
    pub max_pieces: u32,
    /// Source of falling pieces
    pub pieces: PieceGenerator,
}

impl AutoBuilder {
    /// Creates a builder with the full piece set.
    ///
    /// # Examples
    ///
    /// ```
    /// use terrablocks::{generation::utils, AutoBuilder, GenerationConfig, Generator};
    ///
    /// let config = GenerationConfig::new(3).with_size(6, 8);
    /// let mut rng = utils::create_rng(&config);
    /// let board = AutoBuilder::new().generate(&config, &mut rng).unwrap();
    /// assert_eq!(board.width, 6);
    /// ```
    pub fn new() -> Self {
        Self {
            max_pieces: 500,
            pieces: PieceGenerator::new(),
        }
    }

    /// Limits the number of pieces dropped.
    pub fn with_max_pieces(mut self, max_pieces: u32) -> Self {
        self.max_pieces = max_pieces;
        self
    }

    /// Randomly rotates and shifts the falling piece before it drops.
    fn steer(&self, phase: &mut BuildingPhase, board: &Board, rng: &mut StdRng) {
        for _ in 0..rng.gen_range(0..4) {
            phase.try_rotate(board);
        }

        let reach = board.width as i32 / 2;
        let shift = rng.gen_range(-reach..=reach);
        let direction = if shift < 0 {
            Direction::West
        } else {
            Direction::East
        };
        for _ in 0..shift.abs() {
            if !phase.try_move(board, direction) {
                break;
            }
        }
    }
}

impl Default for AutoBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<Board> for AutoBuilder {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> TerraResult<Board> {
        config.validate()?;
        let mut board = Board::new(config.width, config.height);
        let mut phase = BuildingPhase::with_generator(&board, self.pieces.clone(), rng);
        let mut dropped = 0;

        while dropped < self.max_pieces {
            if !phase.is_current_valid(&board) {
                debug!("Piece does not fit the board, stopping");
                break;
            }
            self.steer(&mut phase, &board, rng);
            let landing = phase.hard_drop(&mut board, config, rng);
            dropped += 1;
            if landing.topped_out {
                debug!("Board topped out after {} piece(s)", dropped);
                break;
            }
        }

        self.validate(&board, config)?;
        info!(
            "{} built a {}x{} board from {} piece(s): {} path, {} hazard",
            self.generator_type(),
            board.width,
            board.height,
            dropped,
            board.count(crate::game::TerrainType::Path),
            board.hazard_count()
        );
        Ok(board)
    }

    fn validate(&self, board: &Board, config: &GenerationConfig) -> TerraResult<()> {
        if board.width != config.width || board.height != config.height {
            return Err(TerraError::InvalidState(format!(
                "Built a {}x{} board, expected {}x{}",
                board.width, board.height, config.width, config.height
            )));
        }

        if board.iter_cells().any(|(_, terrain)| !terrain.is_grid_terrain()) {
            return Err(TerraError::InvalidState(
                "Entity marker stored in a board cell".to_string(),
            ));
        }

        // Hazards must already be settled after every placement
        let mut settled = board.clone();
        let pending = settled.identify_hazards_with_threshold(config.hazard_max_component_size);
        if pending > 0 {
            return Err(TerraError::InvalidState(format!(
                "{} small pocket cell(s) were never marked as hazard",
                pending
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "AutoBuilder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TerrainType;
    use crate::generation::utils;

    #[test]
    fn test_builds_valid_board() {
        let config = GenerationConfig::for_testing(77);
        let mut rng = utils::create_rng(&config);
        let builder = AutoBuilder::new();
        let board = builder.generate(&config, &mut rng).unwrap();

        assert!(builder.validate(&board, &config).is_ok());
        assert!(board.count(TerrainType::Empty) < 48);
    }

    #[test]
    fn test_same_seed_same_board() {
        let config = GenerationConfig::for_testing(5);
        let a = AutoBuilder::new()
            .generate(&config, &mut utils::create_rng(&config))
            .unwrap();
        let b = AutoBuilder::new()
            .generate(&config, &mut utils::create_rng(&config))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_board_too_narrow_for_any_piece() {
        let config = GenerationConfig::for_testing(3).with_size(1, 6);
        let mut rng = utils::create_rng(&config);
        let board = AutoBuilder::new().generate(&config, &mut rng).unwrap();
        assert_eq!(board, Board::new(1, 6));
    }

    #[test]
    fn test_piece_limit() {
        let config = GenerationConfig::new(8);
        let mut rng = utils::create_rng(&config);
        let board = AutoBuilder::new()
            .with_max_pieces(1)
            .generate(&config, &mut rng)
            .unwrap();
        let filled = board
            .iter_cells()
            .filter(|(_, terrain)| terrain.is_walkable())
            .count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn test_validate_rejects_wrong_size() {
        let config = GenerationConfig::for_testing(1);
        let board = Board::new(3, 3);
        assert!(AutoBuilder::new().validate(&board, &config).is_err());
    }

    #[test]
    fn test_validate_rejects_unsettled_pocket() {
        let config = GenerationConfig::new(1).with_size(3, 2);
        let board = Board::from_rows(&["f.f", "fff"]).unwrap();
        assert!(AutoBuilder::new().validate(&board, &config).is_err());
    }
}
