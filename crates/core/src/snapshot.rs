//! Read-only view of a session for renderers and loggers.

use arrayvec::ArrayVec;

use crate::catalog::{classify, Outline, ShapeClass};
use crate::collision::RotationPreview;
use crate::piece::{Piece, PieceId, TetKind};
use crate::shape::MAX_SHAPE_DIM;
use crate::types::{PieceKind, Rotation, BOARD_COLS, BOARD_ROWS};

pub type SnapshotCells = ArrayVec<(i8, i8, u8), { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub id: PieceId,
    pub kind: TetKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
    pub pivot_offset: u8,
    pub class: ShapeClass,
    /// Absolute `(row, col, marker)` cells.
    pub cells: SnapshotCells,
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id,
            kind: piece.kind,
            rotation: piece.rotation,
            row: piece.row,
            col: piece.col,
            pivot_offset: piece.pivot_offset,
            class: classify(&piece.shape),
            cells: piece.cells().collect(),
        }
    }
}

/// Rotation ghost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSnapshot {
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
    pub cells: SnapshotCells,
    pub outline: Outline,
}

impl From<&RotationPreview> for PreviewSnapshot {
    fn from(preview: &RotationPreview) -> Self {
        let (row, col) = (preview.row, preview.col);
        Self {
            rotation: preview.rotation,
            row,
            col,
            cells: preview
                .shape
                .cells()
                .map(|(r, c, m)| (row + r as i8, col + c as i8, m))
                .collect(),
            outline: preview.outline.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Resting cells by marker, 0 = empty. The active piece is not included.
    pub board: [[u8; BOARD_COLS as usize]; BOARD_ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    pub preview: Option<PreviewSnapshot>,
    pub next_kind: PieceKind,
    pub score: f64,
    pub paused: bool,
    pub game_over: bool,
    /// A cascade is still being stepped.
    pub settling: bool,
    /// Resting pieces plus the active one.
    pub live_pieces: usize,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_COLS as usize]; BOARD_ROWS as usize];
        self.active = None;
        self.preview = None;
        self.next_kind = PieceKind::I;
        self.score = 0.0;
        self.paused = false;
        self.game_over = false;
        self.settling = false;
        self.live_pieces = 0;
        self.seed = 0;
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }

    /// Resting marker at `(row, col)`, 0 when empty or off the board.
    pub fn cell(&self, row: i8, col: i8) -> u8 {
        if row < 0 || col < 0 {
            return 0;
        }
        self.board
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Stamp resting pieces onto `board`.
    pub(crate) fn fill_board<'a>(&mut self, pieces: impl Iterator<Item = &'a Piece>) {
        self.board = [[0u8; BOARD_COLS as usize]; BOARD_ROWS as usize];
        for piece in pieces {
            for (r, c, m) in piece.cells() {
                if r >= 0 && c >= 0 && (r as u8) < BOARD_ROWS && (c as u8) < BOARD_COLS {
                    self.board[r as usize][c as usize] = m;
                }
            }
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_COLS as usize]; BOARD_ROWS as usize],
            active: None,
            preview: None,
            next_kind: PieceKind::I,
            score: 0.0,
            paused: false,
            game_over: false,
            settling: false,
            live_pieces: 0,
            seed: 0,
        }
    }
}
