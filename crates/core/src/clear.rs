//! Line clearing and fragmentation.
//!
//! Full rows are not shifted away. Instead the cells of every piece lying in
//! a cleared row are zeroed in place, and each piece that lost cells is cut
//! along its now-empty rows:
//!
//! - no non-empty rows left: the piece is removed;
//! - one run of rows left: the piece keeps its id and takes the run's shape;
//! - several runs: the first run stays with the piece, every further run
//!   becomes a new fragment piece appended to the store.
//!
//! Each run is trimmed of empty leading columns (moving its anchor right) and
//! of trailing zeros per row. Gravity is not applied here; see
//! [`crate::settle`].

use crate::grid::GridCache;
use crate::piece::{Piece, PieceId, TetKind};
use crate::scoring::line_clear_score;
use crate::shape::Shape;
use crate::store::PieceStore;

/// Outcome of one clear event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClearReport {
    /// Cleared board rows, top to bottom.
    pub rows: Vec<u8>,
    pub score_delta: f64,
    /// Pieces emptied by the clear and removed from the store.
    pub removed: Vec<PieceId>,
    /// Fragment pieces created by splits, in store order.
    pub fragments: Vec<PieceId>,
}

impl ClearReport {
    /// True when no row was full.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Clear every full row at or below `scan_from` and fragment what they cut.
///
/// Returns an empty report (and touches nothing) when no row is full. The
/// grid cache is invalidated whenever a clear happens.
pub fn clear_lines(store: &mut PieceStore, cache: &mut GridCache, scan_from: usize) -> ClearReport {
    let grid = cache.get(store, None);
    let rows = grid.full_rows_from(scan_from);
    if rows.is_empty() {
        return ClearReport::default();
    }

    let mut removed = Vec::new();
    // (origin row, origin col, run offset, run shape) for runs past the first.
    let mut spill: Vec<(i8, i8, usize, Shape)> = Vec::new();

    for index in 0..store.len() {
        let Some(piece) = store.at_mut(index) else {
            break;
        };
        if !piece.spans_any(&rows) {
            continue;
        }

        let mut mutated = false;
        for &row in &rows {
            let local = row as i8 - piece.row;
            if local >= 0 {
                mutated |= piece.shape.clear_row(local as usize);
            }
        }
        if !mutated {
            continue;
        }

        let (origin_row, origin_col) = (piece.row, piece.col);
        let mut runs = piece.shape.split_runs().into_iter();
        let Some((offset, run)) = runs.next() else {
            removed.push(piece.id);
            continue;
        };

        let (row, col, shape) = place_run(origin_row, origin_col, offset, &run);
        piece.row = row;
        piece.col = col;
        piece.shape = shape;
        piece.kind = TetKind::Fragment;
        piece.pivot_offset = 0;
        piece.pivot_max = 0;

        for (offset, run) in runs {
            spill.push((origin_row, origin_col, offset, run));
        }
    }

    let mut fragments = Vec::with_capacity(spill.len());
    for (origin_row, origin_col, offset, run) in spill {
        let (row, col, shape) = place_run(origin_row, origin_col, offset, &run);
        let id = store.alloc_id();
        store.push(Piece::fragment(id, row, col, shape));
        fragments.push(id);
    }

    store.remove_all(&removed);
    cache.invalidate();

    ClearReport {
        score_delta: line_clear_score(rows.len()),
        rows,
        removed,
        fragments,
    }
}

/// Board anchor and trimmed shape of a run that starts `offset` rows into a
/// piece anchored at `(origin_row, origin_col)`.
fn place_run(origin_row: i8, origin_col: i8, offset: usize, run: &Shape) -> (i8, i8, Shape) {
    let (shape, stripped) = run.trimmed();
    (
        origin_row + offset as i8,
        origin_col + stripped as i8,
        shape,
    )
}
