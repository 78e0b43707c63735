//! Piece store - the ordered set of resting pieces.
//!
//! Pieces are owned here and addressed by [`PieceId`]. Order is significant:
//! settling visits pieces front to back, and fragments created by a clear
//! are appended. Removal is always a single compaction pass, never an
//! index-shifting splice in the middle of iteration.

use crate::piece::{Piece, PieceId};

#[derive(Debug, Clone, Default)]
pub struct PieceStore {
    pieces: Vec<Piece>,
    next_id: u32,
}

impl PieceStore {
    pub fn new() -> Self {
        Self {
            pieces: Vec::with_capacity(64),
            next_id: 1,
        }
    }

    /// Hand out the next unused id.
    pub fn alloc_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id.max(1));
        self.next_id = id.0.wrapping_add(1);
        id
    }

    /// Append a piece at the end of the order.
    pub fn push(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter()
    }

    pub fn as_slice(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// Piece at position `index` in the current order.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Piece> {
        self.pieces.get_mut(index)
    }

    /// Drop every piece whose id is listed. Returns how many were removed.
    pub fn remove_all(&mut self, ids: &[PieceId]) -> usize {
        if ids.is_empty() {
            return 0;
        }
        let before = self.pieces.len();
        self.pieces.retain(|p| !ids.contains(&p.id));
        before - self.pieces.len()
    }

    /// Remove every piece; ids keep counting up.
    pub fn clear(&mut self) {
        self.pieces.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    fn mono(store: &mut PieceStore, row: i8, col: i8) -> PieceId {
        let id = store.alloc_id();
        store.push(Piece::fragment(id, row, col, Shape::from_rows(&[&[1]])));
        id
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut store = PieceStore::new();
        let a = mono(&mut store, 0, 0);
        let b = mono(&mut store, 0, 1);
        store.remove_all(&[a]);
        let c = mono(&mut store, 0, 2);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_remove_all_keeps_order_of_survivors() {
        let mut store = PieceStore::new();
        let ids: Vec<_> = (0..5).map(|c| mono(&mut store, 0, c)).collect();
        assert_eq!(store.remove_all(&[ids[1], ids[3]]), 2);
        let left: Vec<_> = store.iter().map(|p| p.id).collect();
        assert_eq!(left, vec![ids[0], ids[2], ids[4]]);
    }
}
