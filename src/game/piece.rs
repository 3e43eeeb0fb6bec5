//! # Pieces
//!
//! Falling piece shapes, their templates and rotation.

use crate::game::{Position, TerrainType};
use serde::{Deserialize, Serialize};

/// A piece shape: rows of cells, 0 for empty and a terrain code otherwise.
pub type Shape = Vec<Vec<u8>>;

/// The seven classic piece templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All piece kinds, in template order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Returns the template matrix for this kind, using 1 for occupied cells.
    pub fn template(self) -> Shape {
        match self {
            PieceKind::I => vec![vec![1, 1, 1, 1]],
            PieceKind::O => vec![vec![1, 1], vec![1, 1]],
            PieceKind::T => vec![vec![0, 1, 0], vec![1, 1, 1]],
            PieceKind::L => vec![vec![0, 0, 1], vec![1, 1, 1]],
            PieceKind::J => vec![vec![1, 0, 0], vec![1, 1, 1]],
            PieceKind::S => vec![vec![0, 1, 1], vec![1, 1, 0]],
            PieceKind::Z => vec![vec![1, 1, 0], vec![0, 1, 1]],
        }
    }
}

/// Rotates a shape 90° clockwise.
///
/// Column `i` of the input becomes row `i` of the result, read from the
/// bottom row upwards. Four applications give back a rectangular input.
/// Rows shorter than the widest one are padded with empty cells.
///
/// # Examples
///
/// ```
/// use terrablocks::rotate_shape;
///
/// let shape = vec![vec![1, 2, 3], vec![4, 5, 6]];
/// assert_eq!(rotate_shape(&shape), vec![vec![4, 1], vec![5, 2], vec![6, 3]]);
/// ```
pub fn rotate_shape(shape: &[Vec<u8>]) -> Shape {
    let cols = shape.iter().map(|row| row.len()).max().unwrap_or(0);
    (0..cols)
        .map(|i| {
            shape
                .iter()
                .rev()
                .map(|row| row.get(i).copied().unwrap_or(0))
                .collect()
        })
        .collect()
}

/// A falling piece: its shape, position and terrain.
///
/// A piece only lives until it is stamped into the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    /// Cell matrix; nonzero cells hold the terrain code to stamp
    pub shape: Shape,
    /// Board position of the shape's top-left cell
    pub position: Position,
    /// Terrain the piece is made of
    pub terrain: TerrainType,
    /// Template the piece was created from, if any
    pub kind: Option<PieceKind>,
}

impl Piece {
    /// Creates a piece from a template, at the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use terrablocks::{Piece, PieceKind, TerrainType};
    ///
    /// let piece = Piece::new(PieceKind::O, TerrainType::Water);
    /// assert_eq!(piece.width(), 2);
    /// assert_eq!(piece.shape[0][0], TerrainType::Water.code());
    /// ```
    pub fn new(kind: PieceKind, terrain: TerrainType) -> Self {
        let mut piece = Self::from_shape(kind.template(), terrain);
        piece.kind = Some(kind);
        piece
    }

    /// Creates a piece from an arbitrary matrix.
    ///
    /// Every nonzero cell is normalized to `terrain`'s code. Rows are
    /// expected to be equally long; rotating pads short ones with empty cells.
    pub fn from_shape(shape: Shape, terrain: TerrainType) -> Self {
        let code = terrain.code();
        let shape = shape
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| if cell != 0 { code } else { 0 })
                    .collect()
            })
            .collect();

        Self {
            shape,
            position: Position::origin(),
            terrain,
            kind: None,
        }
    }

    /// Returns this piece moved to `position`.
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Number of columns in the shape.
    pub fn width(&self) -> usize {
        self.shape.first().map_or(0, |row| row.len())
    }

    /// Number of rows in the shape.
    pub fn height(&self) -> usize {
        self.shape.len()
    }

    /// Returns a copy rotated 90° clockwise around the shape's own origin.
    ///
    /// No placement check happens here; callers validate the result and keep
    /// the unrotated piece on failure.
    pub fn rotate(&self) -> Piece {
        Piece {
            shape: rotate_shape(&self.shape),
            ..self.clone()
        }
    }

    /// Iterates the occupied cells as (offset, terrain) pairs.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Position, TerrainType)> + '_ {
        self.shape.iter().enumerate().flat_map(move |(dy, row)| {
            row.iter().enumerate().filter_map(move |(dx, &cell)| {
                if cell == 0 {
                    return None;
                }
                let terrain = TerrainType::from_code(cell)
                    .filter(|terrain| terrain.is_grid_terrain())
                    .unwrap_or(self.terrain);
                Some((Position::new(dx as i32, dy as i32), terrain))
            })
        })
    }

    /// Absolute board positions the piece would cover at `origin`.
    pub fn cells_at(&self, origin: Position) -> impl Iterator<Item = (Position, TerrainType)> + '_ {
        self.occupied_cells()
            .map(move |(offset, terrain)| (origin + offset, terrain))
    }

    /// Centered spawn position on a board of the given width.
    pub fn spawn_position(&self, board_width: u32) -> Position {
        let x = (board_width as i32 - self.width() as i32) / 2;
        Position::new(x.max(0), 0)
    }
}
