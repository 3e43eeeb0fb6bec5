//! # Entities
//!
//! The player, enemies and treasures of the Adventure Phase. They are tracked as
//! position lists next to the board, never written into it.

use crate::game::{new_entity_id, EntityId, Position, TerrainType};
use serde::{Deserialize, Serialize};

/// The explorer controlled by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub health: u32,
    pub max_health: u32,
    /// Total value of collected treasures
    pub treasure_collected: u32,
}

impl Player {
    /// Creates a player at full health.
    pub fn new(position: Position, health: u32) -> Self {
        Self {
            position,
            health,
            max_health: health,
            treasure_collected: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Removes one health point. Returns true if the player is still alive.
    pub fn take_hit(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.is_alive()
    }
}

/// An enemy that chases the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Position,
}

impl Enemy {
    pub fn new(position: Position) -> Self {
        Self {
            id: new_entity_id(),
            position,
        }
    }
}

/// A collectible lying on a Path cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasure {
    pub position: Position,
    pub value: u32,
}

impl Treasure {
    pub fn new(position: Position, value: u32) -> Self {
        Self { position, value }
    }
}

/// Marker kind used when drawing an entity.
pub trait Marker {
    fn marker(&self) -> TerrainType;
}

impl Marker for Player {
    fn marker(&self) -> TerrainType {
        TerrainType::Player
    }
}

impl Marker for Enemy {
    fn marker(&self) -> TerrainType {
        TerrainType::Enemy
    }
}

impl Marker for Treasure {
    fn marker(&self) -> TerrainType {
        TerrainType::Treasure
    }
}
