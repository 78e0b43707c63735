//! Scoring - one formula, applied per clear event.
//!
//! Clearing `n` rows at once is worth `n^(1 + (n-1)/10) * 10000`: linear for a
//! single row, slightly super-linear for multi-row clears. Each step of a
//! cascade is scored as its own event.

use crate::types::LINE_SCORE_BASE;

/// Points for clearing `rows` rows in one event. Zero rows score nothing.
pub fn line_clear_score(rows: usize) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    let n = rows as f64;
    n.powf(1.0 + (n - 1.0) * 0.1) * LINE_SCORE_BASE
}
