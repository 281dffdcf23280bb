// selection.rs
//
// Anchor + selected cells + selected rows. The header row is structurally
// unselectable; out-of-bounds addresses are clipped against the document's
// current extent rather than rejected.

use std::collections::{BTreeSet, HashSet};

/// (row, col) into the grid. Row 0 is the header.
pub type CellAddr = (usize, usize);

#[derive(Default)]
pub struct Selection {
    anchor: Option<CellAddr>,
    cells: HashSet<CellAddr>,
    rows: HashSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    pub fn anchor(&self) -> Option<CellAddr> {
        self.anchor
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.rows.is_empty()
    }

    pub fn contains_cell(&self, addr: CellAddr) -> bool {
        self.cells.contains(&addr)
    }

    pub fn contains_row(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.cells.clear();
        self.rows.clear();
    }

    /// Drop any prior selection and select a single cell.
    pub fn select_cell(&mut self, addr: CellAddr) {
        if addr.0 == 0 {
            return;
        }
        self.clear();
        self.anchor = Some(addr);
        self.cells.insert(addr);
    }

    /// Select every column of one row. Row 0 can never be selected.
    pub fn select_row(&mut self, row: usize, col_count: usize) {
        if row == 0 {
            return;
        }
        self.rows.insert(row);
        for c in 0..col_count {
            self.cells.insert((row, c));
        }
        if self.anchor.is_none() {
            self.anchor = Some((row, 0));
        }
    }

    /// Replace the selected cells with exactly the rectangle spanned by the
    /// two corners (either order). Re-extending to the same target
    /// recomputes the same set rather than accumulating. The rectangle is
    /// clipped to data rows and to the document's extent; rows enter the
    /// row set only when the rectangle covers their full width.
    pub fn extend_range(
        &mut self,
        from: CellAddr,
        to: CellAddr,
        row_count: usize,
        col_count: usize,
    ) {
        if row_count <= 1 || col_count == 0 {
            self.clear();
            return;
        }
        let min_row = from.0.min(to.0).max(1).min(row_count - 1);
        let max_row = from.0.max(to.0).max(1).min(row_count - 1);
        let min_col = from.1.min(to.1).min(col_count - 1);
        let max_col = from.1.max(to.1).min(col_count - 1);

        self.cells.clear();
        self.rows.clear();
        for r in min_row..=max_row {
            for c in min_col..=max_col {
                self.cells.insert((r, c));
            }
        }
        if min_col == 0 && max_col == col_count - 1 {
            for r in min_row..=max_row {
                self.rows.insert(r);
            }
        }
        if self.anchor.is_none() {
            self.anchor = Some(from);
        }
    }

    /// The distinct data rows touched by the selection (cells and rows
    /// combined), in ascending order. This is what row deletion operates on.
    pub fn selected_data_rows(&self) -> BTreeSet<usize> {
        let mut out: BTreeSet<usize> = self.rows.iter().copied().filter(|&r| r > 0).collect();
        out.extend(self.cells.iter().map(|&(r, _)| r).filter(|&r| r > 0));
        out
    }
}
