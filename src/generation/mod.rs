//! # Generation Module
//!
//! Policy and procedural generation for both phases of a run.
//!
//! [`GenerationConfig`] holds every tunable of the game: board size, the hazard
//! threshold, spawn probabilities and timings. The [`Generator`] trait is the
//! common interface for random content; [`PieceGenerator`] produces falling
//! pieces and [`AutoBuilder`] plays a whole Building Phase on its own.

pub mod builder;
pub mod pieces;

pub use builder::*;
pub use pieces::*;

use crate::config;
use crate::{TerraError, TerraResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a run.
///
/// The probabilities and thresholds are policy, not derived values; the
/// defaults reproduce the classic behavior. Missing fields in a JSON file fall
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible runs
    pub seed: u64,
    /// Board width in cells
    pub width: u32,
    /// Board height in cells
    pub height: u32,
    /// Empty components of at most this many cells become Hazard
    pub hazard_max_component_size: usize,
    /// Probability (0.0 to 1.0) that a Path cell hosts a treasure
    pub treasure_chance: f64,
    /// Score value of each treasure
    pub treasure_value: u32,
    /// Probability (0.0 to 1.0) that a Path cell in the bottom band becomes a SafeHaven
    pub safe_haven_chance: f64,
    /// Height of the bottom band eligible for SafeHaven marking
    pub safe_haven_rows: u32,
    /// Score bonus for reaching a SafeHaven the first time
    pub safe_haven_bonus: u32,
    /// Probability (0.0 to 1.0) that an enemy tries the X axis first
    pub enemy_x_bias: f64,
    /// Delay between a player move and the enemy response
    pub enemy_move_delay_ms: u64,
    /// Interval between gravity steps in the building phase
    pub gravity_interval_ms: u64,
    /// Top rows sampled when row 0 has no spawn cell
    pub spawn_fallback_rows: u32,
    /// Random samples tried before falling back to a scan
    pub spawn_fallback_attempts: u32,
    /// Starting player health
    pub player_health: u32,
    /// Score per row converted to Path
    pub line_clear_score: u32,
    /// Score lost on every enemy collision
    pub collision_penalty: u32,
}

impl GenerationConfig {
    /// Creates the default configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use terrablocks::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.width, 10);
    /// assert_eq!(config.hazard_max_component_size, 3);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: config::DEFAULT_BOARD_WIDTH,
            height: config::DEFAULT_BOARD_HEIGHT,
            hazard_max_component_size: config::HAZARD_MAX_COMPONENT_SIZE,
            treasure_chance: config::TREASURE_CHANCE,
            treasure_value: config::TREASURE_VALUE,
            safe_haven_chance: config::SAFE_HAVEN_CHANCE,
            safe_haven_rows: config::SAFE_HAVEN_ROWS,
            safe_haven_bonus: 50,
            enemy_x_bias: config::ENEMY_X_BIAS,
            enemy_move_delay_ms: config::ENEMY_MOVE_DELAY_MS,
            gravity_interval_ms: config::GRAVITY_INTERVAL_MS,
            spawn_fallback_rows: config::SPAWN_FALLBACK_ROWS,
            spawn_fallback_attempts: config::SPAWN_FALLBACK_ATTEMPTS,
            player_health: config::DEFAULT_PLAYER_HEALTH,
            line_clear_score: 100,
            collision_penalty: 25,
        }
    }

    /// Creates a configuration for testing: a small board and no delays.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            width: 6,
            height: 8,
            enemy_move_delay_ms: 0,
            gravity_interval_ms: 100,
            ..Self::new(seed)
        }
    }

    /// Returns a copy with different board dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Checks that all values are in range.
    pub fn validate(&self) -> TerraResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TerraError::InvalidConfig(format!(
                "Board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }

        let probabilities = [
            ("treasure_chance", self.treasure_chance),
            ("safe_haven_chance", self.safe_haven_chance),
            ("enemy_x_bias", self.enemy_x_bias),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(TerraError::InvalidConfig(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, value
                )));
            }
        }

        if self.player_health == 0 {
            return Err(TerraError::InvalidConfig(
                "player_health must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> TerraResult<Self> {
        let config: GenerationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to pretty JSON.
    pub fn to_json(&self) -> TerraResult<String> {
        serde_json::to_string_pretty(self).map_err(TerraError::from)
    }

    /// Loads and validates a configuration file.
    pub fn load_from_file(path: impl AsRef<Path>) -> TerraResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Writes the configuration to a file as JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> TerraResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// Generators draw all randomness from the RNG they are handed, so the same
/// seed always produces the same content.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> TerraResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> TerraResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 15);
        assert_eq!(config.treasure_chance, 0.3);
        assert_eq!(config.safe_haven_chance, 0.2);
        assert_eq!(config.enemy_x_bias, 0.7);
        assert_eq!(GenerationConfig::default().seed, 42);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GenerationConfig::new(1);
        config.treasure_chance = 1.5;
        assert!(matches!(config.validate(), Err(TerraError::InvalidConfig(_))));

        let config = GenerationConfig::new(1).with_size(0, 5);
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::new(1);
        config.player_health = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GenerationConfig::from_json(r#"{ "seed": 9, "width": 12 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 15);
        assert_eq!(config.hazard_max_component_size, 3);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        assert!(matches!(
            GenerationConfig::from_json("{ not json"),
            Err(TerraError::Serde(_))
        ));
        assert!(matches!(
            GenerationConfig::from_json(r#"{ "enemy_x_bias": -0.1 }"#),
            Err(TerraError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_utils_rng_is_reproducible() {
        let config = GenerationConfig::new(12345);
        let a: u64 = utils::create_rng(&config).gen();
        let b: u64 = utils::create_rng(&config).gen();
        assert_eq!(a, b);
    }
}
