//! # Terrain Types
//!
//! The closed set of values a board cell (or an overlay marker) can take.

use serde::{Deserialize, Serialize};

/// Terrain value of a single grid cell.
///
/// Each variant has a stable numeric code, which is also the value stored in
/// piece shape matrices. `Player`, `Enemy` and `Treasure` are overlay markers:
/// they classify entities for display and are never written into a board.
///
/// # Examples
///
/// ```
/// use terrablocks::TerrainType;
///
/// assert_eq!(TerrainType::from_code(4), Some(TerrainType::Path));
/// assert_eq!(TerrainType::Water.code(), 3);
/// assert!(TerrainType::Path.is_walkable());
/// assert!(!TerrainType::Hazard.is_walkable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainType {
    #[default]
    Empty,
    Forest,
    Mountain,
    Water,
    Path,
    Hazard,
    Player,
    Enemy,
    Treasure,
    SafeHaven,
}

impl TerrainType {
    /// Terrains a falling piece can be made of.
    pub const PIECE_TERRAINS: [TerrainType; 3] =
        [TerrainType::Forest, TerrainType::Mountain, TerrainType::Water];

    /// Returns the numeric code of this terrain.
    pub fn code(self) -> u8 {
        match self {
            TerrainType::Empty => 0,
            TerrainType::Forest => 1,
            TerrainType::Mountain => 2,
            TerrainType::Water => 3,
            TerrainType::Path => 4,
            TerrainType::Hazard => 5,
            TerrainType::Player => 6,
            TerrainType::Enemy => 7,
            TerrainType::Treasure => 8,
            TerrainType::SafeHaven => 9,
        }
    }

    /// Looks up a terrain by its numeric code.
    pub fn from_code(code: u8) -> Option<TerrainType> {
        match code {
            0 => Some(TerrainType::Empty),
            1 => Some(TerrainType::Forest),
            2 => Some(TerrainType::Mountain),
            3 => Some(TerrainType::Water),
            4 => Some(TerrainType::Path),
            5 => Some(TerrainType::Hazard),
            6 => Some(TerrainType::Player),
            7 => Some(TerrainType::Enemy),
            8 => Some(TerrainType::Treasure),
            9 => Some(TerrainType::SafeHaven),
            _ => None,
        }
    }

    /// Whether this value may be stored in a board cell.
    pub fn is_grid_terrain(self) -> bool {
        !self.is_marker()
    }

    /// Whether this is an entity overlay marker.
    pub fn is_marker(self) -> bool {
        matches!(
            self,
            TerrainType::Player | TerrainType::Enemy | TerrainType::Treasure
        )
    }

    /// Whether players and enemies may stand on this terrain.
    pub fn is_walkable(self) -> bool {
        !matches!(self, TerrainType::Empty | TerrainType::Hazard)
    }

    /// Single character used by text renderers.
    pub fn glyph(self) -> char {
        match self {
            TerrainType::Empty => '.',
            TerrainType::Forest => 'f',
            TerrainType::Mountain => '^',
            TerrainType::Water => '~',
            TerrainType::Path => '=',
            TerrainType::Hazard => '!',
            TerrainType::Player => '@',
            TerrainType::Enemy => 'E',
            TerrainType::Treasure => '$',
            TerrainType::SafeHaven => 'H',
        }
    }

    /// Looks up a terrain by its text glyph.
    pub fn from_glyph(glyph: char) -> Option<TerrainType> {
        (0..=9)
            .filter_map(TerrainType::from_code)
            .find(|terrain| terrain.glyph() == glyph)
    }
}

impl std::fmt::Display for TerrainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
