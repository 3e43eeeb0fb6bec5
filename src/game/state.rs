//! # Game State Module
//!
//! Central game state and the two-phase state machine.
//!
//! [`GameState`] owns the board, the RNG and whichever phase is running. The
//! Building Phase ends when the player asks for it or when a fresh piece no
//! longer fits at its spawn position; the Adventure Phase only ends with a
//! restart, which throws the board away and starts over with an empty one.

use crate::game::{
    Adventure, Board, BuildingPhase, Direction, GameEvent, GameStatistics, Landing, Piece,
};
use crate::generation::utils;
use crate::input::PlayerInput;
use crate::{GenerationConfig, TerraResult};
use log::{debug, info};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// Which phase a run is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Building,
    Adventure,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Building => write!(f, "Building"),
            Phase::Adventure => write!(f, "Adventure"),
        }
    }
}

/// Phase-specific state.
#[derive(Debug, Clone)]
pub enum PhaseState {
    Building(BuildingPhase),
    Adventure(Adventure),
}

/// Central game state containing the board and the running phase.
///
/// All mutation happens through the methods below, from a single thread;
/// callers render only after a mutation has returned.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Tunables for this run
    pub config: GenerationConfig,
    /// The terrain grid
    pub board: Board,
    /// The running phase
    pub phase_state: PhaseState,
    /// Current score
    pub score: u64,
    /// Counters for this run
    pub statistics: GameStatistics,
    /// Number of runs started, including the current one
    pub run_number: u32,
    rng: StdRng,
}

impl GameState {
    /// Creates a new game in the Building Phase with an empty board.
    ///
    /// # Examples
    ///
    /// ```
    /// use terrablocks::{GameState, GenerationConfig, Phase};
    ///
    /// let game_state = GameState::new(GenerationConfig::new(12345)).unwrap();
    /// assert_eq!(game_state.phase(), Phase::Building);
    /// assert_eq!(game_state.score, 0);
    /// assert!(game_state.current_piece().is_some());
    /// ```
    ///
    /// A board too narrow for the first piece skips straight to the adventure.
    pub fn new(config: GenerationConfig) -> TerraResult<Self> {
        let mut state = Self::with_empty_board(config)?;
        if state.spawn_blocked() {
            debug!("First piece does not fit, the board is full");
            state.enter_adventure();
        }
        Ok(state)
    }

    /// Builds the initial state without checking the first piece.
    fn with_empty_board(config: GenerationConfig) -> TerraResult<Self> {
        config.validate()?;
        let mut rng = utils::create_rng(&config);
        let board = Board::new(config.width, config.height);
        let building = BuildingPhase::new(&board, &mut rng);

        Ok(Self {
            config,
            board,
            phase_state: PhaseState::Building(building),
            score: 0,
            statistics: GameStatistics::new(),
            run_number: 1,
            rng,
        })
    }

    /// Creates a game that starts its Adventure Phase on a pre-built board.
    ///
    /// The board's dimensions replace the configured ones.
    pub fn new_with_board(mut config: GenerationConfig, board: Board) -> TerraResult<Self> {
        config.width = board.width;
        config.height = board.height;
        let mut state = Self::with_empty_board(config)?;
        state.board = board;
        state.enter_adventure();
        Ok(state)
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        match self.phase_state {
            PhaseState::Building(_) => Phase::Building,
            PhaseState::Adventure(_) => Phase::Adventure,
        }
    }

    /// The falling piece, while building.
    pub fn current_piece(&self) -> Option<&Piece> {
        match &self.phase_state {
            PhaseState::Building(building) => Some(&building.current),
            PhaseState::Adventure(_) => None,
        }
    }

    /// The upcoming piece, while building.
    pub fn next_piece(&self) -> Option<&Piece> {
        match &self.phase_state {
            PhaseState::Building(building) => Some(&building.next),
            PhaseState::Adventure(_) => None,
        }
    }

    /// The adventure, once it has started.
    pub fn adventure(&self) -> Option<&Adventure> {
        match &self.phase_state {
            PhaseState::Adventure(adventure) => Some(adventure),
            PhaseState::Building(_) => None,
        }
    }

    /// Rows that are currently complete.
    pub fn completed_lines(&self) -> Vec<usize> {
        self.board.check_completed_lines()
    }

    /// Number of Hazard cells on the board.
    pub fn hazard_count(&self) -> usize {
        self.board.hazard_count()
    }

    /// Applies a player intent to the current phase.
    ///
    /// `Help` and `Quit` belong to the caller and are ignored here.
    pub fn handle_input(&mut self, input: PlayerInput) -> Vec<GameEvent> {
        match (input, self.phase()) {
            (PlayerInput::Restart, _) => self.restart(),
            (PlayerInput::SwitchPhase, Phase::Building) => self.enter_adventure(),
            (PlayerInput::Move(direction), Phase::Building) => {
                self.move_piece(direction);
                Vec::new()
            }
            (PlayerInput::Rotate, Phase::Building) => {
                self.rotate_piece();
                Vec::new()
            }
            (PlayerInput::Drop, Phase::Building) => self.drop_piece(),
            (PlayerInput::Move(direction), Phase::Adventure) => self.move_player(direction),
            _ => Vec::new(),
        }
    }

    /// Moves the falling piece one cell. Returns false if it did not fit.
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        match &mut self.phase_state {
            PhaseState::Building(building) => building.try_move(&self.board, direction),
            PhaseState::Adventure(_) => false,
        }
    }

    /// Rotates the falling piece. Returns false if the rotation did not fit.
    pub fn rotate_piece(&mut self) -> bool {
        match &mut self.phase_state {
            PhaseState::Building(building) => building.try_rotate(&self.board),
            PhaseState::Adventure(_) => false,
        }
    }

    /// Hard-drops the falling piece and commits it.
    pub fn drop_piece(&mut self) -> Vec<GameEvent> {
        let landing = match &mut self.phase_state {
            PhaseState::Building(building) => {
                building.hard_drop(&mut self.board, &self.config, &mut self.rng)
            }
            PhaseState::Adventure(_) => return Vec::new(),
        };
        self.apply_landings(vec![landing])
    }

    /// Moves the player one cell during the adventure.
    pub fn move_player(&mut self, direction: Direction) -> Vec<GameEvent> {
        let events = match &mut self.phase_state {
            PhaseState::Adventure(adventure) => {
                adventure.move_player(&self.board, direction, &self.config)
            }
            PhaseState::Building(_) => return Vec::new(),
        };
        self.record(&events);
        events
    }

    /// Advances timers by `dt` seconds: gravity while building, scheduled
    /// enemy steps during the adventure.
    pub fn update(&mut self, dt: f64) -> Vec<GameEvent> {
        let dt_ms = dt * 1000.0;
        match &mut self.phase_state {
            PhaseState::Building(building) => {
                let landings = building.tick(dt_ms, &mut self.board, &self.config, &mut self.rng);
                self.apply_landings(landings)
            }
            PhaseState::Adventure(adventure) => {
                let events = adventure.update(dt_ms, &self.board, &self.config, &mut self.rng);
                self.record(&events);
                events
            }
        }
    }

    /// Ends the Building Phase and populates the board for the adventure.
    ///
    /// Does nothing if the adventure is already running.
    pub fn enter_adventure(&mut self) -> Vec<GameEvent> {
        if self.phase() == Phase::Adventure {
            return Vec::new();
        }

        let adventure = Adventure::setup(&mut self.board, &self.config, &mut self.rng);
        self.phase_state = PhaseState::Adventure(adventure);
        info!(
            "Run {} entered the adventure with {} hazard cell(s)",
            self.run_number,
            self.board.hazard_count()
        );

        let events = vec![GameEvent::PhaseChanged {
            from: Phase::Building,
            to: Phase::Adventure,
        }];
        self.record(&events);
        events
    }

    /// Discards the board and every entity and starts a new Building Phase.
    ///
    /// The RNG keeps running, so consecutive runs differ.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        let previous = self.phase();
        self.board = Board::new(self.config.width, self.config.height);
        self.phase_state = PhaseState::Building(BuildingPhase::new(&self.board, &mut self.rng));
        self.score = 0;
        self.statistics = GameStatistics::new();
        self.run_number += 1;
        info!("Starting run {}", self.run_number);

        let mut events = vec![GameEvent::Restarted];
        if previous == Phase::Adventure {
            events.push(GameEvent::PhaseChanged {
                from: Phase::Adventure,
                to: Phase::Building,
            });
        }

        if self.spawn_blocked() {
            debug!("First piece does not fit, the board is full");
            events.push(GameEvent::info("The board is full!"));
            events.extend(self.enter_adventure());
        }
        events
    }

    /// True while building if the falling piece overlaps the board.
    fn spawn_blocked(&self) -> bool {
        match &self.phase_state {
            PhaseState::Building(building) => !building.is_current_valid(&self.board),
            PhaseState::Adventure(_) => false,
        }
    }

    /// Turns landings into events and leaves the Building Phase on top-out.
    fn apply_landings(&mut self, landings: Vec<Landing>) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let mut topped_out = false;

        for landing in landings {
            if !landing.cells.is_empty() {
                events.push(GameEvent::PiecePlaced {
                    cells: landing.cells,
                });
            }
            if !landing.report.completed_rows.is_empty() {
                events.push(GameEvent::LinesCleared {
                    rows: landing.report.completed_rows,
                });
            }
            if landing.report.hazards_created > 0 {
                events.push(GameEvent::HazardsIdentified {
                    count: landing.report.hazards_created,
                });
            }
            topped_out |= landing.topped_out;
        }
        self.record(&events);

        if topped_out {
            debug!("Spawn position blocked, the board is full");
            events.push(GameEvent::info("The board is full!"));
            events.extend(self.enter_adventure());
        }
        events
    }

    /// Folds events into statistics and score.
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            self.statistics.update_from_event(event);
            match event {
                GameEvent::LinesCleared { rows } => {
                    self.score += rows.len() as u64 * self.config.line_clear_score as u64;
                }
                GameEvent::TreasureCollected { value, .. } => self.score += *value as u64,
                GameEvent::SafeHavenReached { bonus, .. } => self.score += *bonus as u64,
                GameEvent::Collision { .. } => {
                    self.score = self
                        .score
                        .saturating_sub(self.config.collision_penalty as u64);
                }
                _ => {}
            }
        }
    }
}
