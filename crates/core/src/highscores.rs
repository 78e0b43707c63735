//! High-score list handling.
//!
//! Storage is somebody else's problem: the list lives behind [`ScoreStore`],
//! an ordered numeric sequence, highest first, at most [`MAX_SCORES`] long.
//! This module only knows how to merge a finished game into it.

use crate::types::MAX_SCORES;

/// Key-value collaborator holding the persisted list.
pub trait ScoreStore {
    fn get_scores(&self) -> Vec<f64>;
    fn set_scores(&mut self, scores: &[f64]);
}

/// In-process store, for tests and for running without persistence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryScoreStore {
    scores: Vec<f64>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get_scores(&self) -> Vec<f64> {
        self.scores.clone()
    }

    fn set_scores(&mut self, scores: &[f64]) {
        self.scores = scores.to_vec();
    }
}

/// Normalize a raw list: drop non-finite values, sort highest first, cap the length.
pub fn normalize(mut scores: Vec<f64>) -> Vec<f64> {
    scores.retain(|s| s.is_finite());
    scores.sort_by(|a, b| b.total_cmp(a));
    scores.truncate(MAX_SCORES);
    scores
}

/// Merge `score` into the stored list.
///
/// Returns the 0-based rank the score took, or `None` if it did not make the
/// list (in which case the store is not written). Equal scores rank after the
/// ones already present.
pub fn record_score<S: ScoreStore + ?Sized>(store: &mut S, score: f64) -> Option<usize> {
    if !score.is_finite() {
        return None;
    }
    let mut scores = normalize(store.get_scores());
    let rank = scores
        .iter()
        .position(|&s| score > s)
        .unwrap_or(scores.len());
    if rank >= MAX_SCORES {
        return None;
    }
    scores.insert(rank, score);
    scores.truncate(MAX_SCORES);
    store.set_scores(&scores);
    Some(rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_score_takes_top_spot() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(record_score(&mut store, 10_000.0), Some(0));
        assert_eq!(store.get_scores(), vec![10_000.0]);
    }

    #[test]
    fn test_list_stays_sorted_and_capped() {
        let mut store = MemoryScoreStore::new();
        for i in 0..15 {
            record_score(&mut store, (i * 1000) as f64);
        }
        let scores = store.get_scores();
        assert_eq!(scores.len(), MAX_SCORES);
        assert_eq!(scores[0], 14_000.0);
        assert_eq!(scores[9], 5_000.0);
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_score_below_full_list_is_rejected() {
        let mut store = MemoryScoreStore::new();
        store.set_scores(&[100.0; MAX_SCORES]);
        assert_eq!(record_score(&mut store, 50.0), None);
        assert_eq!(record_score(&mut store, 100.0), None);
        assert_eq!(record_score(&mut store, 150.0), Some(0));
    }

    #[test]
    fn test_tied_score_ranks_after_existing() {
        let mut store = MemoryScoreStore::new();
        store.set_scores(&[300.0, 200.0, 100.0]);
        assert_eq!(record_score(&mut store, 200.0), Some(2));
        assert_eq!(store.get_scores(), vec![300.0, 200.0, 200.0, 100.0]);
    }

    #[test]
    fn test_unsorted_or_dirty_input_is_normalized() {
        let mut store = MemoryScoreStore::new();
        store.set_scores(&[5.0, f64::NAN, 20.0, 10.0]);
        assert_eq!(record_score(&mut store, 15.0), Some(1));
        assert_eq!(store.get_scores(), vec![20.0, 15.0, 10.0, 5.0]);
    }

    #[test]
    fn test_non_finite_score_is_ignored() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(record_score(&mut store, f64::INFINITY), None);
        assert!(store.get_scores().is_empty());
    }
}
