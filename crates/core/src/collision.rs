//! Collision tests against the occupancy grid and the board edges.
//!
//! Callers pass a grid that does not contain the piece being tested. Side
//! tests also hand out kick credit: pushing an even-state piece into the
//! right wall, or rightwards into other cells, earns one unit of
//! `pivot_offset` that the next successful rotation spends.

use arrayvec::ArrayVec;

use crate::catalog::{outline, Outline};
use crate::grid::OccupancyGrid;
use crate::piece::Piece;
use crate::shape::{Shape, MAX_SHAPE_DIM};
use crate::types::{Direction, Rotation, BOARD_COLS, BOARD_ROWS};

/// True if `shape` anchored at `(row, col)` would reach past the last row or
/// overlap an occupied cell.
pub fn collides_bottom(shape: &Shape, row: i8, col: i8, grid: &OccupancyGrid) -> bool {
    shape.cells().any(|(r, c, _)| {
        let (r, c) = (row + r as i8, col + c as i8);
        r >= BOARD_ROWS as i8 || grid.occupied(r, c)
    })
}

/// True if `piece` moved to column `col` would leave the board sideways or
/// overlap an occupied cell.
///
/// On a violation the piece may earn kick credit:
/// - right-wall overflow: whenever the piece is in an even state below its cap;
/// - overlap: same, but only when `direction` is [`Direction::Right`].
///
/// At most one unit is granted per call.
pub fn collides_side(
    piece: &mut Piece,
    col: i8,
    direction: Direction,
    grid: &OccupancyGrid,
) -> bool {
    let cells: ArrayVec<(i8, i8), { MAX_SHAPE_DIM * MAX_SHAPE_DIM }> =
        piece.cells_at(piece.row, col).map(|(r, c, _)| (r, c)).collect();

    for (r, c) in cells {
        if c < 0 {
            return true;
        }
        if c >= BOARD_COLS as i8 {
            piece.earn_kick();
            return true;
        }
        if grid.occupied(r, c) {
            // TODO: the overlap grant is gated on direction while the wall grant
            // is not; revisit once play-testing says which rule should win.
            if direction == Direction::Right {
                piece.earn_kick();
            }
            return true;
        }
    }
    false
}

/// True if `shape` anchored at `(row, col)` stays inside the side walls and
/// above the floor without overlapping anything. Rows above the board are
/// allowed.
pub fn shape_fits(shape: &Shape, row: i8, col: i8, grid: &OccupancyGrid) -> bool {
    shape.cells().all(|(r, c, _)| {
        let (r, c) = (row + r as i8, col + c as i8);
        c >= 0 && c < BOARD_COLS as i8 && r < BOARD_ROWS as i8 && !grid.occupied(r, c)
    })
}

/// Rotate `piece` clockwise if the next state fits.
///
/// The candidate must fit both at the current anchor and at the anchor
/// shifted right by the accumulated kick credit, where it is committed.
/// The kicked-column check keeps a rotation from committing onto occupied
/// cells or past the right wall. On failure nothing changes.
pub fn try_rotate(piece: &mut Piece, grid: &OccupancyGrid) -> bool {
    let Some((next, shape)) = piece.next_rotation() else {
        return false;
    };
    let kicked = piece.col + piece.pivot_offset as i8;
    if !shape_fits(&shape, piece.row, piece.col, grid) || !shape_fits(&shape, piece.row, kicked, grid)
    {
        return false;
    }
    piece.commit_rotation(next, shape);
    true
}

/// Where the next rotation would put the piece, for drawing a ghost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPreview {
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
    pub shape: Shape,
    pub outline: Outline,
}

/// Evaluate the next rotation at `col + pivot_offset` without committing.
///
/// `None` when the piece cannot rotate or the kicked position is blocked.
pub fn pivot_preview(piece: &Piece, grid: &OccupancyGrid) -> Option<RotationPreview> {
    let (rotation, shape) = piece.next_rotation()?;
    let col = piece.col + piece.pivot_offset as i8;
    if !shape_fits(&shape, piece.row, col, grid) {
        return None;
    }
    Some(RotationPreview {
        rotation,
        row: piece.row,
        col,
        outline: outline(&shape),
        shape,
    })
}
