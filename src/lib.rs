//! # Terrablocks
//!
//! A falling-block terrain builder followed by a small grid adventure.
//!
//! ## Architecture Overview
//!
//! A run has two phases that share one owned [`Board`]:
//!
//! - **Building Phase**: falling pieces stamp Forest, Mountain and Water into the
//!   grid. Completed rows turn into Path, and small sealed pockets of empty cells
//!   are reclassified as Hazard after every placement.
//! - **Adventure Phase**: the finished grid is frozen. The player spawns on the top
//!   row, every Hazard cell spawns an enemy, and treasures are scattered on Path.
//!
//! The board algorithms live in [`game::board`] and [`game::piece`]. Everything
//! random takes an explicit RNG so runs are reproducible from a seed.
//!
//! Rendering and input are thin adapters around macroquad. The [`Renderer`] trait
//! is the only surface the game state draws through, which lets the same frame be
//! rendered to a window or to an ASCII buffer.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;

/// Core error type for the Terrablocks engine.
///
/// The board itself never fails: out-of-bounds access and invalid moves degrade to
/// `None` or `false`. Errors only come from the edges (config files, snapshots,
/// setup).
#[derive(thiserror::Error, Debug)]
pub enum TerraError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Terrablocks codebase.
pub type TerraResult<T> = Result<T, TerraError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
///
/// These are the defaults behind [`GenerationConfig::new`].
pub mod config {
    /// Default board width in cells
    pub const DEFAULT_BOARD_WIDTH: u32 = 10;

    /// Default board height in cells
    pub const DEFAULT_BOARD_HEIGHT: u32 = 15;

    /// Empty components up to this size become Hazard
    pub const HAZARD_MAX_COMPONENT_SIZE: usize = 3;

    /// Chance for each Path cell to host a treasure
    pub const TREASURE_CHANCE: f64 = 0.3;

    /// Score value of a single treasure
    pub const TREASURE_VALUE: u32 = 10;

    /// Chance for a Path cell in the bottom band to become a SafeHaven
    pub const SAFE_HAVEN_CHANCE: f64 = 0.2;

    /// Number of bottom rows eligible for SafeHaven marking
    pub const SAFE_HAVEN_ROWS: u32 = 3;

    /// Chance that an enemy tries the X axis first
    pub const ENEMY_X_BIAS: f64 = 0.7;

    /// Delay between a player move and the enemy response
    pub const ENEMY_MOVE_DELAY_MS: u64 = 300;

    /// Interval between gravity steps in the building phase
    pub const GRAVITY_INTERVAL_MS: u64 = 800;

    /// Rows at the top of the board used for the fallback player spawn
    pub const SPAWN_FALLBACK_ROWS: u32 = 3;

    /// Random samples tried before the fallback spawn scans deterministically
    pub const SPAWN_FALLBACK_ATTEMPTS: u32 = 100;

    /// Starting player health
    pub const DEFAULT_PLAYER_HEALTH: u32 = 3;
}
