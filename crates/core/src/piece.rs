//! Piece - one rigid group of cells on the board.
//!
//! A piece is either one of the seven standard kinds, carrying a rotation
//! state and a canonical shape, or a fragment: a remnant left behind by row
//! clearing, with no rotation table. Both share the same anchor/shape model
//! so collision, clearing and settling treat them alike.

use crate::catalog::canonical;
use crate::shape::Shape;
use crate::types::{PieceKind, Rotation, SPAWN_COL, SPAWN_ROW};

/// Stable identity of a piece within one session. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetKind {
    Standard(PieceKind),
    Fragment,
}

impl TetKind {
    pub fn piece_kind(&self) -> Option<PieceKind> {
        match self {
            TetKind::Standard(kind) => Some(*kind),
            TetKind::Fragment => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: TetKind,
    /// Only meaningful for standard pieces.
    pub rotation: Rotation,
    /// Board row of the shape's top-left cell.
    pub row: i8,
    /// Board column of the shape's top-left cell.
    pub col: i8,
    pub shape: Shape,
    /// Rightward kick credit, applied and reset on the next successful rotation.
    pub pivot_offset: u8,
    pub pivot_max: u8,
}

impl Piece {
    /// New standard piece at the spawn anchor in rotation state 0.
    pub fn spawn(id: PieceId, kind: PieceKind) -> Self {
        Self {
            id,
            kind: TetKind::Standard(kind),
            rotation: Rotation::North,
            row: SPAWN_ROW,
            col: SPAWN_COL,
            shape: canonical(kind, Rotation::North),
            pivot_offset: 0,
            pivot_max: kind.pivot_max(),
        }
    }

    /// New fragment piece; fragments never rotate or kick.
    pub fn fragment(id: PieceId, row: i8, col: i8, shape: Shape) -> Self {
        Self {
            id,
            kind: TetKind::Fragment,
            rotation: Rotation::North,
            row,
            col,
            shape,
            pivot_offset: 0,
            pivot_max: 0,
        }
    }

    pub fn is_fragment(&self) -> bool {
        self.kind == TetKind::Fragment
    }

    /// Absolute board cells `(row, col, marker)` at the current anchor.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        self.cells_at(self.row, self.col)
    }

    /// Absolute board cells if the anchor were at `(row, col)`.
    pub fn cells_at(&self, row: i8, col: i8) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c, m)| (row + r as i8, col + c as i8, m))
    }

    /// Board row of the topmost occupied cell.
    pub fn top_row(&self) -> Option<i8> {
        self.cells().map(|(r, _, _)| r).min()
    }

    /// True when any occupied cell sits on one of `rows`.
    pub fn spans_any(&self, rows: &[u8]) -> bool {
        self.cells().any(|(r, _, _)| r >= 0 && rows.contains(&(r as u8)))
    }

    /// Canonical shape of the next clockwise state, if this piece can rotate at all.
    pub fn next_rotation(&self) -> Option<(Rotation, Shape)> {
        let kind = self.kind.piece_kind()?;
        if kind.pivot_max() == 0 {
            return None;
        }
        let next = self.rotation.rotate_cw();
        Some((next, canonical(kind, next)))
    }

    /// Commit a rotation that has already been validated.
    ///
    /// Consumes the kick credit: the anchor moves right by `pivot_offset`,
    /// which then resets to 0.
    pub(crate) fn commit_rotation(&mut self, rotation: Rotation, shape: Shape) {
        self.col += self.pivot_offset as i8;
        self.pivot_offset = 0;
        self.rotation = rotation;
        self.shape = shape;
    }

    /// Grant one unit of kick credit if the piece is in an even state and below its cap.
    pub(crate) fn earn_kick(&mut self) -> bool {
        if self.rotation.is_even() && self.pivot_offset < self.pivot_max {
            self.pivot_offset += 1;
            true
        } else {
            false
        }
    }
}
