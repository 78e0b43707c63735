//! Shape matrices.
//!
//! A shape is a tiny matrix of cell markers (`0` = empty). Rows are stored
//! independently and may have different lengths once a fragment has been
//! trimmed, so nothing here assumes a rectangle: a row's length is its own.
//! Storage is stack-only (at most 4x4).

use arrayvec::ArrayVec;

/// Largest row count and row length any shape can have.
pub const MAX_SHAPE_DIM: usize = 4;

pub type ShapeRow = ArrayVec<u8, MAX_SHAPE_DIM>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape {
    rows: ArrayVec<ShapeRow, MAX_SHAPE_DIM>,
}

impl Shape {
    /// Build a shape from row slices. Anything beyond 4x4 is ignored.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let rows = rows
            .iter()
            .take(MAX_SHAPE_DIM)
            .map(|r| r.iter().copied().take(MAX_SHAPE_DIM).collect())
            .collect();
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    pub fn row(&self, r: usize) -> &[u8] {
        self.rows.get(r).map(|row| row.as_slice()).unwrap_or(&[])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Occupied cells as `(row, col, marker)`, relative to the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &m)| m != 0)
                .map(move |(c, &m)| (r, c, m))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// True when the row holds no occupied cell (or does not exist).
    pub fn is_row_empty(&self, r: usize) -> bool {
        self.row(r).iter().all(|&m| m == 0)
    }

    /// True when no cell is occupied.
    pub fn is_empty(&self) -> bool {
        (0..self.height()).all(|r| self.is_row_empty(r))
    }

    /// Structural equality: same row count, same row lengths and the same
    /// occupied/empty pattern. Marker values are not compared.
    pub fn same_pattern(&self, other: &Shape) -> bool {
        self.rows.len() == other.rows.len()
            && self.rows.iter().zip(other.rows.iter()).all(|(a, b)| {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(&x, &y)| (x != 0) == (y != 0))
            })
    }

    /// Zero every cell of row `r`, keeping the row in place.
    ///
    /// Returns true if at least one occupied cell was erased.
    pub fn clear_row(&mut self, r: usize) -> bool {
        let Some(row) = self.rows.get_mut(r) else {
            return false;
        };
        let mut erased = false;
        for m in row.iter_mut() {
            if *m != 0 {
                *m = 0;
                erased = true;
            }
        }
        erased
    }

    /// Split into maximal runs of consecutive non-empty rows.
    ///
    /// Each entry is `(index of the run's first row, run shape)`. Empty rows
    /// separating runs, and leading/trailing empty rows, are dropped.
    pub fn split_runs(&self) -> ArrayVec<(usize, Shape), MAX_SHAPE_DIM> {
        let mut out = ArrayVec::new();
        let mut current: Option<(usize, Shape)> = None;

        for (r, row) in self.rows.iter().enumerate() {
            if row.iter().all(|&m| m == 0) {
                if let Some(run) = current.take() {
                    out.push(run);
                }
                continue;
            }
            let (_, run) = current.get_or_insert_with(|| (r, Shape::default()));
            run.rows.push(row.clone());
        }
        if let Some(run) = current.take() {
            out.push(run);
        }
        out
    }

    /// Strip padding from a non-empty shape.
    ///
    /// Leading columns that are empty in every row are removed first; the
    /// returned count says how many, so callers can shift their anchor right by
    /// that much. Then trailing zeros are popped from each row independently.
    /// An empty shape is returned unchanged with a count of 0.
    pub fn trimmed(&self) -> (Shape, usize) {
        if self.is_empty() {
            return (self.clone(), 0);
        }

        let mut out = self.clone();
        let mut stripped = 0;
        while out.rows.iter().all(|row| row.first().map_or(true, |&m| m == 0)) {
            for row in out.rows.iter_mut() {
                if !row.is_empty() {
                    row.remove(0);
                }
            }
            stripped += 1;
        }

        for row in out.rows.iter_mut() {
            while row.last() == Some(&0) {
                row.pop();
            }
        }

        (out, stripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_skip_zero_markers() {
        let shape = Shape::from_rows(&[&[0, 2, 2], &[2, 2, 0]]);
        let cells: Vec<_> = shape.cells().collect();
        assert_eq!(cells, vec![(0, 1, 2), (0, 2, 2), (1, 0, 2), (1, 1, 2)]);
        assert_eq!(shape.width(), 3);
        assert_eq!(shape.height(), 2);
    }

    #[test]
    fn test_same_pattern_ignores_markers_but_not_lengths() {
        let a = Shape::from_rows(&[&[1, 1], &[1]]);
        let b = Shape::from_rows(&[&[5, 5], &[5]]);
        let c = Shape::from_rows(&[&[1, 1], &[1, 0]]);
        assert!(a.same_pattern(&b));
        assert!(!a.same_pattern(&c));
    }

    #[test]
    fn test_split_runs_drops_empty_separators() {
        let mut shape = Shape::from_rows(&[&[1], &[1], &[1], &[1]]);
        assert!(shape.clear_row(2));
        let runs = shape.split_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, 0);
        assert_eq!(runs[0].1.height(), 2);
        assert_eq!(runs[1].0, 3);
        assert_eq!(runs[1].1.height(), 1);
    }

    #[test]
    fn test_split_runs_fully_cleared() {
        let mut shape = Shape::from_rows(&[&[4, 4], &[4, 4]]);
        shape.clear_row(0);
        shape.clear_row(1);
        assert!(shape.is_empty());
        assert!(shape.split_runs().is_empty());
    }

    #[test]
    fn test_clear_row_reports_erasure() {
        let mut shape = Shape::from_rows(&[&[3, 0, 0], &[3, 3, 3]]);
        assert!(shape.clear_row(0));
        assert!(!shape.clear_row(0));
        assert!(!shape.clear_row(7));
    }

    #[test]
    fn test_trim_leading_columns_then_trailing_zeros() {
        let shape = Shape::from_rows(&[&[0, 0, 3], &[0, 3, 3, 0]]);
        let (trimmed, stripped) = shape.trimmed();
        assert_eq!(stripped, 1);
        assert_eq!(trimmed, Shape::from_rows(&[&[0, 3], &[3, 3]]));
    }

    #[test]
    fn test_trim_produces_ragged_rows() {
        let shape = Shape::from_rows(&[&[2, 2], &[2, 0]]);
        let (trimmed, stripped) = shape.trimmed();
        assert_eq!(stripped, 0);
        assert_eq!(trimmed.row(0), &[2, 2]);
        assert_eq!(trimmed.row(1), &[2]);
    }
}
