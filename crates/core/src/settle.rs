//! Settling - gravity for resting pieces after a clear, and the cascade loop.
//!
//! A round walks the store front to back and drops every piece that is not
//! blocked by one row. Moves are applied immediately, so a piece tested later
//! in the round already sees the new position of pieces moved before it and
//! can follow them down in the same round.
//!
//! Rounds repeat until one moves nothing. At that fixed point full rows may
//! have formed again; they are cleared and settling resumes. The cascade ends
//! at a fixed point with no full row.
//!
//! [`Cascade`] exposes this one step at a time so a front end can animate it;
//! [`run_cascade`] runs it to completion. Both end on the same board.

use crate::clear::{clear_lines, ClearReport};
use crate::collision::collides_bottom;
use crate::grid::GridCache;
use crate::store::PieceStore;

/// Run one settle round. Returns how many pieces moved down.
pub fn settle_round(store: &mut PieceStore, cache: &mut GridCache) -> usize {
    let mut moved = 0;
    for index in 0..store.len() {
        let id = store.as_slice()[index].id;
        let grid = cache.get(store, Some(id));
        let Some(piece) = store.at_mut(index) else {
            break;
        };
        if piece.shape.is_empty() {
            continue;
        }
        if collides_bottom(&piece.shape, piece.row + 1, piece.col, &grid) {
            continue;
        }
        piece.row += 1;
        moved += 1;
        cache.invalidate();
    }
    moved
}

/// Settle rounds until nothing moves. Returns the number of rounds that moved something.
pub fn settle_to_fixed_point(store: &mut PieceStore, cache: &mut GridCache) -> usize {
    let mut rounds = 0;
    while settle_round(store, cache) > 0 {
        rounds += 1;
    }
    rounds
}

#[derive(Debug, Clone, PartialEq)]
pub enum CascadeStep {
    /// A settle round moved this many pieces.
    Moved(usize),
    /// Settling reached a fixed point and these rows were full.
    Cleared(ClearReport),
}

/// Step-wise cascade state. Holds no board data; pass the store and cache to [`Cascade::step`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cascade {
    rounds: usize,
    clears: usize,
    done: bool,
}

impl Cascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settle rounds that moved at least one piece so far.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Clear events produced so far.
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Advance by one settle round, or, at a fixed point, by one clear check.
    ///
    /// Returns `None` once a fixed point yields no full row; every later call
    /// also returns `None`.
    pub fn step(&mut self, store: &mut PieceStore, cache: &mut GridCache) -> Option<CascadeStep> {
        if self.done {
            return None;
        }
        let moved = settle_round(store, cache);
        if moved > 0 {
            self.rounds += 1;
            return Some(CascadeStep::Moved(moved));
        }
        let report = clear_lines(store, cache, 0);
        if report.is_empty() {
            self.done = true;
            return None;
        }
        self.clears += 1;
        Some(CascadeStep::Cleared(report))
    }

    /// Borrowing iterator over the remaining steps.
    pub fn iter<'a>(
        &'a mut self,
        store: &'a mut PieceStore,
        cache: &'a mut GridCache,
    ) -> CascadeIter<'a> {
        CascadeIter {
            cascade: self,
            store,
            cache,
        }
    }
}

pub struct CascadeIter<'a> {
    cascade: &'a mut Cascade,
    store: &'a mut PieceStore,
    cache: &'a mut GridCache,
}

impl Iterator for CascadeIter<'_> {
    type Item = CascadeStep;

    fn next(&mut self) -> Option<CascadeStep> {
        self.cascade.step(self.store, self.cache)
    }
}

/// What a complete cascade did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CascadeSummary {
    pub rounds: usize,
    pub clears: Vec<ClearReport>,
}

impl CascadeSummary {
    pub fn score_delta(&self) -> f64 {
        self.clears.iter().map(|c| c.score_delta).sum()
    }
}

/// Run settle/clear cycles until a fixed point without full rows.
pub fn run_cascade(store: &mut PieceStore, cache: &mut GridCache) -> CascadeSummary {
    let mut cascade = Cascade::new();
    let mut summary = CascadeSummary::default();
    for step in cascade.iter(store, cache) {
        match step {
            CascadeStep::Moved(_) => summary.rounds += 1,
            CascadeStep::Cleared(report) => summary.clears.push(report),
        }
    }
    summary
}
