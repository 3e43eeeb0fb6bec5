//! # Game Module
//!
//! Board storage, pieces, phase logic and the central game state.
//!
//! - [`board`]: the terrain grid and its placement, line and hazard passes
//! - [`piece`]: falling piece shapes and rotation
//! - [`building`]: the falling-piece loop of the Building Phase
//! - [`adventure`]: player, enemies and treasures of the Adventure Phase
//! - [`state`]: the two-phase state machine tying it together

pub mod adventure;
pub mod board;
pub mod building;
pub mod entities;
pub mod events;
pub mod piece;
pub mod state;
pub mod terrain;

pub use adventure::*;
pub use board::*;
pub use building::*;
pub use entities::*;
pub use events::*;
pub use piece::*;
pub use state::*;
pub use terrain::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a grid cell coordinate, (0, 0) at the top-left.
///
/// # Examples
///
/// ```
/// use terrablocks::Position;
///
/// let pos = Position::new(3, 2);
/// assert_eq!(pos.x, 3);
/// assert_eq!(pos.y, 2);
///
/// let neighbors = pos.cardinal_adjacent_positions();
/// assert_eq!(neighbors.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Returns the 4 cardinal neighbors in flood-fill order: right, left, down, up.
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        [
            Position::new(self.x + 1, self.y),
            Position::new(self.x - 1, self.y),
            Position::new(self.x, self.y + 1),
            Position::new(self.x, self.y - 1),
        ]
    }

    /// Returns the position one step away in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Cardinal directions for piece translation and player movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use terrablocks::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}
