// document.rs
//
// The editable matrix. Row 0 is the header and always equals the schema
// verbatim; data rows are strings. Nothing here fails: out-of-range writes
// grow the matrix instead of being rejected, which is what an interactive
// editor wants (rejecting on edit would break typing flow).

pub type Matrix = Vec<Vec<String>>;

pub struct GridDocument {
    header_schema: Vec<String>,
    cells: Matrix,
}

impl GridDocument {
    /// Build a document from loaded rows. The first loaded row is discarded
    /// in favor of the schema, data rows are kept as-is, and a trailing
    /// empty row is added so the user always has an insertion point.
    pub fn from_loaded(header_schema: Vec<String>, loaded: Matrix) -> Self {
        let mut cells: Matrix = Vec::with_capacity(loaded.len().max(2));
        cells.push(header_schema.clone());
        cells.extend(loaded.into_iter().skip(1));
        let mut doc = GridDocument {
            header_schema,
            cells,
        };
        doc.ensure_trailing_empty_row();
        doc
    }

    pub fn header_schema(&self) -> &[String] {
        &self.header_schema
    }

    pub fn col_count(&self) -> usize {
        self.header_schema.len()
    }

    /// Total rows including the header.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn data_row_count(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    pub fn matrix(&self) -> &Matrix {
        &self.cells
    }

    /// Write a cell. Writes to row 0 only force-restore the schema value,
    /// guarding against a rendering layer echoing an edited header back.
    /// Any other target is grown into existence first.
    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) {
        if row == 0 {
            if col < self.header_schema.len() {
                self.cells[0] = self.header_schema.clone();
            }
            return;
        }
        while self.cells.len() <= row {
            self.cells.push(Vec::new());
        }
        let target = &mut self.cells[row];
        while target.len() <= col {
            target.push(String::new());
        }
        target[col] = value.to_string();
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        self.cells
            .get(row)
            .map(|r| r.iter().all(|c| c.trim().is_empty()))
            .unwrap_or(true)
    }

    /// Append one fully-empty row if the last row has content (or only the
    /// header exists). Called after every commit and after row removal.
    pub fn ensure_trailing_empty_row(&mut self) {
        let last = self.cells.len() - 1;
        if last == 0 || !self.is_row_empty(last) {
            self.cells.push(vec![String::new(); self.header_schema.len()]);
        }
    }

    /// Append a row unconditionally. Tab/Enter at the bottom of the grid
    /// grow immediately and move into the new row.
    pub fn push_empty_row(&mut self) {
        self.cells.push(vec![String::new(); self.header_schema.len()]);
    }

    /// Remove the given data rows. Row 0 is never removed even if passed.
    /// Indices are deleted in descending order so earlier removals do not
    /// shift later ones.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let mut sorted: Vec<usize> = rows
            .iter()
            .copied()
            .filter(|&r| r > 0 && r < self.cells.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        for &row in sorted.iter().rev() {
            self.cells.remove(row);
        }
        self.ensure_trailing_empty_row();
    }

    /// Drop every data row, keeping only the header, then re-establish the
    /// trailing empty row.
    pub fn clear_data(&mut self) {
        self.cells.truncate(1);
        self.ensure_trailing_empty_row();
    }

    /// The only representation ever handed to persistence: row 0 is the
    /// schema, every data row padded or truncated to the schema width.
    pub fn normalize_for_persistence(&self) -> Matrix {
        let width = self.header_schema.len();
        let mut out: Matrix = Vec::with_capacity(self.cells.len());
        out.push(self.header_schema.clone());
        for row in self.cells.iter().skip(1) {
            let mut normalized: Vec<String> = row.iter().take(width).cloned().collect();
            while normalized.len() < width {
                normalized.push(String::new());
            }
            out.push(normalized);
        }
        out
    }
}
