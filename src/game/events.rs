//! # Game Events
//!
//! Everything that happens during a run is reported as a [`GameEvent`]. The
//! state folds events into its statistics and the display turns some of them
//! into messages.

use crate::game::{EntityId, Phase, Position};
use serde::{Deserialize, Serialize};

/// How prominently a message should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageImportance {
    Info,
    Warning,
    Critical,
}

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A piece was stamped into the board
    PiecePlaced { cells: Vec<Position> },
    /// Complete rows were converted to Path
    LinesCleared { rows: Vec<usize> },
    /// Empty pockets were reclassified as Hazard
    HazardsIdentified { count: usize },
    /// The game switched phase
    PhaseChanged { from: Phase, to: Phase },
    /// The board was reset for a new run
    Restarted,
    /// The player stepped onto a new cell
    PlayerMoved { from: Position, to: Position },
    /// An enemy stepped onto a new cell
    EnemyMoved {
        enemy_id: EntityId,
        from: Position,
        to: Position,
    },
    /// The player and an enemy met
    Collision {
        enemy_id: EntityId,
        position: Position,
        health_left: u32,
    },
    /// A treasure was picked up
    TreasureCollected { position: Position, value: u32 },
    /// The player reached a SafeHaven cell for the first time
    SafeHavenReached { position: Position, bonus: u32 },
    /// Every treasure on the board has been collected
    AllTreasuresCollected,
    /// The player ran out of health
    PlayerDefeated,
    /// Free-form message for the display
    Message {
        text: String,
        importance: MessageImportance,
    },
}

impl GameEvent {
    /// Creates an informational message event.
    pub fn info(text: impl Into<String>) -> Self {
        GameEvent::Message {
            text: text.into(),
            importance: MessageImportance::Info,
        }
    }

    /// Text to show for this event, if any.
    pub fn describe(&self) -> Option<String> {
        match self {
            GameEvent::LinesCleared { rows } => {
                Some(format!("{} line(s) turned into path", rows.len()))
            }
            GameEvent::HazardsIdentified { count } => {
                Some(format!("{} cell(s) became hazards", count))
            }
            GameEvent::PhaseChanged { to, .. } => Some(format!("Entering the {} phase", to)),
            GameEvent::Restarted => Some("A fresh board awaits".to_string()),
            GameEvent::Collision { health_left, .. } => {
                Some(format!("An enemy caught you! Health: {}", health_left))
            }
            GameEvent::TreasureCollected { value, .. } => {
                Some(format!("Found treasure worth {}", value))
            }
            GameEvent::SafeHavenReached { bonus, .. } => {
                Some(format!("Safe haven reached (+{})", bonus))
            }
            GameEvent::AllTreasuresCollected => Some("Every treasure collected!".to_string()),
            GameEvent::PlayerDefeated => {
                Some("You have been defeated. Press R to restart".to_string())
            }
            GameEvent::Message { text, .. } => Some(text.clone()),
            GameEvent::PiecePlaced { .. }
            | GameEvent::PlayerMoved { .. }
            | GameEvent::EnemyMoved { .. } => None,
        }
    }
}

/// Counters accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub pieces_placed: u32,
    pub lines_cleared: u32,
    pub hazards_created: u32,
    pub steps_taken: u64,
    pub treasures_collected: u32,
    pub collisions: u32,
    pub safe_havens_reached: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::PiecePlaced { .. } => self.pieces_placed += 1,
            GameEvent::LinesCleared { rows } => self.lines_cleared += rows.len() as u32,
            GameEvent::HazardsIdentified { count } => self.hazards_created += *count as u32,
            GameEvent::PlayerMoved { .. } => self.steps_taken += 1,
            GameEvent::TreasureCollected { .. } => self.treasures_collected += 1,
            GameEvent::Collision { .. } => self.collisions += 1,
            GameEvent::SafeHavenReached { .. } => self.safe_havens_reached += 1,
            _ => {}
        }
    }
}
