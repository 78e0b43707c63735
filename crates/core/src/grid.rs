//! Occupancy grid - the derived 16x10 surface every collision test reads.
//!
//! The grid is never edited directly. It is rebuilt by OR-ing the cells of
//! every resting piece, optionally skipping one, and cached until the set of
//! resting pieces changes. Flat row-major storage, no allocation.

use crate::piece::PieceId;
use crate::store::PieceStore;
use crate::types::{BOARD_COLS, BOARD_ROWS};

const GRID_SIZE: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupancyGrid {
    cells: [bool; GRID_SIZE],
}

impl OccupancyGrid {
    pub fn new() -> Self {
        Self {
            cells: [false; GRID_SIZE],
        }
    }

    /// Build from every piece in `store`, skipping `excluding` if given.
    pub fn from_store(store: &PieceStore, excluding: Option<PieceId>) -> Self {
        let mut grid = Self::new();
        for piece in store.iter() {
            if Some(piece.id) == excluding {
                continue;
            }
            for (r, c, _) in piece.cells() {
                grid.set(r, c, true);
            }
        }
        grid
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_ROWS as i8 || col < 0 || col >= BOARD_COLS as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_COLS as usize) + (col as usize))
    }

    /// Occupancy at `(row, col)`; anything off the board reads as empty.
    pub fn occupied(&self, row: i8, col: i8) -> bool {
        Self::index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Returns false when `(row, col)` is off the board.
    pub fn set(&mut self, row: i8, col: i8, value: bool) -> bool {
        match Self::index(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_ROWS as usize {
            return false;
        }
        let start = row * BOARD_COLS as usize;
        self.cells[start..start + BOARD_COLS as usize]
            .iter()
            .all(|&c| c)
    }

    /// Full rows from `start` down to the last row, top to bottom.
    pub fn full_rows_from(&self, start: usize) -> Vec<u8> {
        (start..BOARD_ROWS as usize)
            .filter(|&r| self.is_row_full(r))
            .map(|r| r as u8)
            .collect()
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row-major booleans, `BOARD_ROWS * BOARD_COLS` long.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

impl Default for OccupancyGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Cached no-exclusion grid with invalidate-on-write semantics.
#[derive(Debug, Clone)]
pub struct GridCache {
    grid: OccupancyGrid,
    dirty: bool,
}

impl Default for GridCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GridCache {
    pub fn new() -> Self {
        Self {
            grid: OccupancyGrid::new(),
            dirty: true,
        }
    }

    /// Mark the cached grid stale; the next read rebuilds it.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Grid of `store`, optionally without one piece.
    ///
    /// With no exclusion the cached grid is returned, rebuilt first if dirty.
    /// An exclusion always builds a fresh grid and leaves the cache alone.
    pub fn get(&mut self, store: &PieceStore, excluding: Option<PieceId>) -> OccupancyGrid {
        if excluding.is_some() {
            return OccupancyGrid::from_store(store, excluding);
        }
        if self.dirty {
            self.grid = OccupancyGrid::from_store(store, None);
            self.dirty = false;
        }
        self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Piece;
    use crate::shape::Shape;

    fn store_with(cells: &[(i8, i8)]) -> (PieceStore, Vec<PieceId>) {
        let mut store = PieceStore::new();
        let mut ids = Vec::new();
        for &(r, c) in cells {
            let id = store.alloc_id();
            store.push(Piece::fragment(id, r, c, Shape::from_rows(&[&[1]])));
            ids.push(id);
        }
        (store, ids)
    }

    #[test]
    fn test_index_calculation() {
        assert_eq!(OccupancyGrid::index(0, 0), Some(0));
        assert_eq!(OccupancyGrid::index(0, 9), Some(9));
        assert_eq!(OccupancyGrid::index(1, 0), Some(10));
        assert_eq!(OccupancyGrid::index(15, 9), Some(159));
        assert_eq!(OccupancyGrid::index(-1, 0), None);
        assert_eq!(OccupancyGrid::index(16, 0), None);
        assert_eq!(OccupancyGrid::index(0, 10), None);
    }

    #[test]
    fn test_full_rows() {
        let mut grid = OccupancyGrid::new();
        for c in 0..10 {
            grid.set(15, c, true);
            grid.set(13, c, true);
        }
        grid.set(14, 0, true);
        assert_eq!(grid.full_rows_from(0), vec![13, 15]);
        assert_eq!(grid.full_rows_from(14), vec![15]);
    }

    #[test]
    fn test_exclusion_skips_one_piece() {
        let (store, ids) = store_with(&[(15, 0), (15, 1)]);
        let grid = OccupancyGrid::from_store(&store, Some(ids[0]));
        assert!(!grid.occupied(15, 0));
        assert!(grid.occupied(15, 1));
    }

    #[test]
    fn test_cache_rebuilds_only_when_dirty() {
        let (mut store, ids) = store_with(&[(15, 0)]);
        let mut cache = GridCache::new();
        assert!(cache.get(&store, None).occupied(15, 0));
        assert!(!cache.is_dirty());

        // Mutation without invalidation keeps serving the stale grid.
        store.get_mut(ids[0]).unwrap().row = 14;
        assert!(cache.get(&store, None).occupied(15, 0));

        cache.invalidate();
        let grid = cache.get(&store, None);
        assert!(grid.occupied(14, 0));
        assert!(!grid.occupied(15, 0));
    }

    #[test]
    fn test_excluding_read_does_not_poison_cache() {
        let (store, ids) = store_with(&[(15, 0), (15, 1)]);
        let mut cache = GridCache::new();
        let without = cache.get(&store, Some(ids[1]));
        assert_eq!(without.count(), 1);
        assert_eq!(cache.get(&store, None).count(), 2);
    }
}
