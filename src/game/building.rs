//! # Building Phase
//!
//! The falling-piece loop. Every move or rotation is validated against the board
//! before it is applied; a piece that can no longer fall is committed, the
//! post-placement passes run and the next piece spawns. If that next piece does
//! not fit at its spawn position the board is full and the phase is over.

use crate::game::{Board, Direction, Piece, PlacementReport, Position};
use crate::generation::PieceGenerator;
use crate::GenerationConfig;
use log::debug;
use rand::rngs::StdRng;

/// Result of committing a piece to the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landing {
    /// Board cells the piece was stamped on
    pub cells: Vec<Position>,
    /// Line and hazard passes that followed
    pub report: PlacementReport,
    /// The freshly spawned piece did not fit
    pub topped_out: bool,
}

/// State of the Building Phase: the falling piece and the one after it.
#[derive(Debug, Clone)]
pub struct BuildingPhase {
    /// The piece currently falling
    pub current: Piece,
    /// Preview of the next piece
    pub next: Piece,
    /// Milliseconds accumulated towards the next gravity step
    gravity_elapsed_ms: f64,
    generator: PieceGenerator,
}

impl BuildingPhase {
    /// Starts a phase with two fresh pieces, the first at its spawn position.
    pub fn new(board: &Board, rng: &mut StdRng) -> Self {
        Self::with_generator(board, PieceGenerator::new(), rng)
    }

    /// Starts a phase drawing pieces from a specific generator.
    pub fn with_generator(board: &Board, generator: PieceGenerator, rng: &mut StdRng) -> Self {
        let first = generator.next_piece(rng);
        let current = first.clone().at(first.spawn_position(board.width));
        let next = generator.next_piece(rng);

        Self {
            current,
            next,
            gravity_elapsed_ms: 0.0,
            generator,
        }
    }

    /// Whether the current piece fits where it is.
    pub fn is_current_valid(&self, board: &Board) -> bool {
        board.is_valid_move(&self.current, self.current.position)
    }

    /// Moves the current piece one cell. Upward moves are never allowed.
    pub fn try_move(&mut self, board: &Board, direction: Direction) -> bool {
        if direction == Direction::North {
            return false;
        }
        let target = self.current.position.step(direction);
        if !board.is_valid_move(&self.current, target) {
            return false;
        }
        self.current.position = target;
        true
    }

    /// Rotates the current piece clockwise, keeping the old shape if the
    /// rotated one does not fit.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = self.current.rotate();
        if !board.is_valid_move(&rotated, rotated.position) {
            return false;
        }
        self.current = rotated;
        true
    }

    /// Moves the piece down one row, committing it if it cannot fall.
    ///
    /// Returns the landing when the piece was committed.
    pub fn step_down(
        &mut self,
        board: &mut Board,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Option<Landing> {
        if self.try_move(board, Direction::South) {
            return None;
        }
        Some(self.commit(board, config, rng))
    }

    /// Drops the piece as far as it goes and commits it.
    pub fn hard_drop(
        &mut self,
        board: &mut Board,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Landing {
        while self.try_move(board, Direction::South) {}
        self.commit(board, config, rng)
    }

    /// Advances gravity by `dt_ms`, stepping the piece down once per interval.
    ///
    /// Stops at the first landing that tops out the board.
    pub fn tick(
        &mut self,
        dt_ms: f64,
        board: &mut Board,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> Vec<Landing> {
        let interval = config.gravity_interval_ms.max(1) as f64;
        let mut landings = Vec::new();
        self.gravity_elapsed_ms += dt_ms;

        while self.gravity_elapsed_ms >= interval {
            self.gravity_elapsed_ms -= interval;
            if let Some(landing) = self.step_down(board, config, rng) {
                let topped_out = landing.topped_out;
                landings.push(landing);
                if topped_out {
                    break;
                }
            }
        }

        landings
    }

    /// Stamps the current piece, runs the line and hazard passes and spawns the
    /// next piece.
    fn commit(&mut self, board: &mut Board, config: &GenerationConfig, rng: &mut StdRng) -> Landing {
        let cells: Vec<Position> = self
            .current
            .cells_at(self.current.position)
            .map(|(cell, _)| cell)
            .collect();

        // A piece that never fit (only possible at spawn) is not stamped
        let (placed, report) =
            match board.commit_piece(&self.current, config.hazard_max_component_size) {
                Some(report) => (cells, report),
                None => (Vec::new(), PlacementReport::default()),
            };

        debug!(
            "Committed {:?} piece at {:?}: rows {:?}, {} hazard cell(s)",
            self.current.kind, self.current.position, report.completed_rows, report.hazards_created
        );

        let upcoming = std::mem::replace(&mut self.next, self.generator.next_piece(rng));
        self.current = upcoming.clone().at(upcoming.spawn_position(board.width));
        self.gravity_elapsed_ms = 0.0;

        Landing {
            cells: placed,
            report,
            topped_out: !self.is_current_valid(board),
        }
    }
}
