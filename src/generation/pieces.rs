//! # Piece Generation
//!
//! Random falling pieces for the Building Phase.

use crate::game::{Piece, PieceKind, TerrainType};
use crate::{GenerationConfig, Generator, TerraError, TerraResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Draws pieces uniformly from the seven templates and three piece terrains.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    /// Kinds to draw from
    pub kinds: Vec<PieceKind>,
    /// Terrains to draw from
    pub terrains: Vec<TerrainType>,
}

impl PieceGenerator {
    pub fn new() -> Self {
        Self {
            kinds: PieceKind::ALL.to_vec(),
            terrains: TerrainType::PIECE_TERRAINS.to_vec(),
        }
    }

    /// Draws the next piece, positioned at the origin.
    pub fn next_piece(&self, rng: &mut StdRng) -> Piece {
        let kind = self.kinds.choose(rng).copied().unwrap_or(PieceKind::O);
        let terrain = self
            .terrains
            .choose(rng)
            .copied()
            .unwrap_or(TerrainType::Forest);
        Piece::new(kind, terrain)
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<Piece> for PieceGenerator {
    fn generate(&self, _config: &GenerationConfig, rng: &mut StdRng) -> TerraResult<Piece> {
        Ok(self.next_piece(rng))
    }

    fn validate(&self, piece: &Piece, config: &GenerationConfig) -> TerraResult<()> {
        if piece.width() as u32 > config.width {
            return Err(TerraError::InvalidState(format!(
                "Piece is {} cells wide but the board only has {}",
                piece.width(),
                config.width
            )));
        }
        if piece.kind.is_none() {
            return Err(TerraError::InvalidState(
                "Piece was not built from a template".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "PieceGenerator"
    }
}
