// editor.rs
//
// The keyboard-driven engine. State is the focused cell, its in-progress
// text, and the selection; transitions are discrete key events handed in by
// whatever surface renders the grid. The one strict ordering rule: the cell
// being left is committed before focus moves, otherwise the last keystrokes
// of that cell are lost.

use anyhow::Result;

use crate::confirm::Confirmation;
use crate::document::{GridDocument, Matrix};
use crate::persist::PersistenceBridge;
use crate::profile::GridConfig;
use crate::selection::{CellAddr, Selection};
use crate::tracker::EditTracker;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Left,
    Right,
    Up,
    Down,
}

/// Where the text cursor lands when focus enters a cell.
#[derive(Clone, Copy)]
enum Entry {
    /// Whole text shown as selected; the first typed character replaces it.
    SelectAll,
    Start,
    End,
}

/// A pending destructive operation, waiting on the confirmation service.
pub struct RowRemovalRequest {
    pub rows: Vec<usize>,
    pub prompt: String,
}

pub enum DeleteOutcome {
    /// The in-cell text selection was deleted; no rows involved.
    TextCleared,
    /// Rows are staged for removal pending a yes/no answer.
    Ask(RowRemovalRequest),
    Nothing,
}

pub struct GridEditor {
    config: GridConfig,
    doc: GridDocument,
    selection: Selection,
    tracker: EditTracker,
    focus: CellAddr,
    edit: String,
    cursor: usize, // char index into `edit`
    text_selected: bool,
}

impl GridEditor {
    pub fn new(config: GridConfig, loaded: Matrix) -> Self {
        let doc = GridDocument::from_loaded(config.header_schema.clone(), loaded);
        let tracker = EditTracker::new(doc.matrix());
        let mut editor = GridEditor {
            config,
            doc,
            selection: Selection::new(),
            tracker,
            focus: (1, 0),
            edit: String::new(),
            cursor: 0,
            text_selected: false,
        };
        editor.enter_cell((1, 0), Entry::SelectAll);
        editor
    }

    pub fn doc(&self) -> &GridDocument {
        &self.doc
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn focus(&self) -> CellAddr {
        self.focus
    }

    pub fn edit_text(&self) -> &str {
        &self.edit
    }

    /// Char position of the text cursor within the focused cell.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_text_selected(&self) -> bool {
        self.text_selected
    }

    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    // --- in-cell editing ------------------------------------------------

    pub fn insert_char(&mut self, c: char) {
        if self.text_selected {
            self.edit.clear();
            self.cursor = 0;
            self.text_selected = false;
        }
        let at = byte_index(&self.edit, self.cursor);
        self.edit.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.text_selected {
            self.edit.clear();
            self.cursor = 0;
            self.text_selected = false;
            return;
        }
        if self.cursor > 0 {
            let at = byte_index(&self.edit, self.cursor - 1);
            self.edit.remove(at);
            self.cursor -= 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
        self.text_selected = false;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = char_len(&self.edit);
        self.text_selected = false;
    }

    // --- navigation -----------------------------------------------------

    pub fn arrow(&mut self, dir: Arrow, shift: bool) {
        if shift {
            self.extend_with_arrow(dir);
            return;
        }
        if !self.selection.is_empty() {
            self.selection.clear();
        }
        // Left/Right first defer to the text cursor; only at the text
        // boundary do they become grid moves.
        match dir {
            Arrow::Left => {
                if !self.text_selected && self.cursor > 0 {
                    self.cursor -= 1;
                    return;
                }
            }
            Arrow::Right => {
                if self.text_selected && !self.edit.is_empty() {
                    // collapse the selection to the end, like the caret would
                    self.text_selected = false;
                    self.cursor = char_len(&self.edit);
                    return;
                }
                if self.cursor < char_len(&self.edit) {
                    self.cursor += 1;
                    return;
                }
            }
            Arrow::Up | Arrow::Down => {}
        }

        self.commit_focused();
        if let Some((target, entry)) = self.adjacent(dir) {
            self.enter_cell(target, entry);
        }
    }

    /// Shift+Arrow: anchor if needed, extend the rectangle to the target,
    /// commit, then move focus without collapsing the selection.
    fn extend_with_arrow(&mut self, dir: Arrow) {
        if self.selection.anchor().is_none() {
            self.selection.select_cell(self.focus);
        }
        let anchor = match self.selection.anchor() {
            Some(a) => a,
            None => self.focus,
        };
        let target = match self.adjacent(dir) {
            Some((t, _)) => t,
            None => return,
        };
        self.selection
            .extend_range(anchor, target, self.doc.row_count(), self.doc.col_count());
        self.commit_focused();
        self.focus = target;
        self.edit = self.doc.cell(target.0, target.1).to_string();
        self.cursor = 0;
        self.text_selected = false;
    }

    /// Adjacency for arrows: left/right wrap across row edges, up/down
    /// clamp at the document edges. No growth.
    fn adjacent(&self, dir: Arrow) -> Option<(CellAddr, Entry)> {
        let (row, col) = self.focus;
        let last_col = self.doc.col_count().saturating_sub(1);
        let last_row = self.doc.row_count().saturating_sub(1);
        match dir {
            Arrow::Left => {
                if col > 0 {
                    Some(((row, col - 1), Entry::End))
                } else if row > 1 {
                    Some(((row - 1, last_col), Entry::End))
                } else {
                    None
                }
            }
            Arrow::Right => {
                if col < last_col {
                    Some(((row, col + 1), Entry::Start))
                } else if row < last_row {
                    Some(((row + 1, 0), Entry::Start))
                } else {
                    None
                }
            }
            Arrow::Up => {
                if row > 1 {
                    Some(((row - 1, col), Entry::SelectAll))
                } else {
                    None
                }
            }
            Arrow::Down => {
                if row < last_row {
                    Some(((row + 1, col), Entry::SelectAll))
                } else {
                    None
                }
            }
        }
    }

    /// Tab: next column, wrapping to column 0 of the next row; at the very
    /// end of the grid a row is grown immediately and entered.
    pub fn tab(&mut self) {
        self.commit_focused();
        let (row, col) = self.focus;
        let last_col = self.doc.col_count().saturating_sub(1);
        if col < last_col {
            self.enter_cell((row, col + 1), Entry::SelectAll);
            return;
        }
        if row >= self.doc.row_count() - 1 {
            self.doc.push_empty_row();
        }
        self.enter_cell((row + 1, 0), Entry::SelectAll);
    }

    /// Enter: next row, same column, except in terminator columns which
    /// jump to column 0. Grows a row when at the bottom.
    pub fn enter(&mut self) {
        self.commit_focused();
        let (row, col) = self.focus;
        let target_col = if self.config.is_terminator(col) { 0 } else { col };
        if row >= self.doc.row_count() - 1 {
            self.doc.push_empty_row();
        }
        self.enter_cell((row + 1, target_col), Entry::SelectAll);
    }

    // --- destructive operations ------------------------------------------

    /// Delete key. With a live in-cell text selection the deletion stays in
    /// the cell; otherwise the rows touched by the selection (or, with no
    /// selection, by the focused cell) are staged for removal.
    pub fn delete_request(&mut self) -> DeleteOutcome {
        if self.text_selected && !self.edit.is_empty() {
            self.edit.clear();
            self.cursor = 0;
            self.text_selected = false;
            return DeleteOutcome::TextCleared;
        }
        if self.selection.is_empty() {
            self.selection.select_cell(self.focus);
        }
        let rows: Vec<usize> = self.selection.selected_data_rows().into_iter().collect();
        if rows.is_empty() {
            self.selection.clear();
            return DeleteOutcome::Nothing;
        }
        let prompt = format!("Remove {} selected row(s)?", rows.len());
        DeleteOutcome::Ask(RowRemovalRequest { rows, prompt })
    }

    pub fn apply_removal(&mut self, request: &RowRemovalRequest) {
        self.doc.remove_rows(&request.rows);
        self.selection.clear();
        let row = self.focus.0.min(self.doc.row_count() - 1).max(1);
        let col = self.focus.1.min(self.doc.col_count().saturating_sub(1));
        self.enter_cell((row, col), Entry::SelectAll);
        self.tracker.check_for_edits(self.doc.matrix());
    }

    /// A dismissed confirmation is a no-op apart from dropping the selection.
    pub fn cancel_removal(&mut self) {
        self.selection.clear();
    }

    /// Delete composed with a synchronous confirmation service. Returns
    /// true when rows were actually removed.
    pub fn delete_key(&mut self, confirm: &mut dyn Confirmation) -> bool {
        match self.delete_request() {
            DeleteOutcome::Ask(request) => {
                if confirm.ask(&request.prompt) {
                    self.apply_removal(&request);
                    true
                } else {
                    self.cancel_removal();
                    false
                }
            }
            DeleteOutcome::TextCleared | DeleteOutcome::Nothing => false,
        }
    }

    /// Drop all data rows, keeping the header. Callers confirm first.
    pub fn apply_clear(&mut self) {
        self.doc.clear_data();
        self.selection.clear();
        self.enter_cell((1, 0), Entry::SelectAll);
        self.tracker.check_for_edits(self.doc.matrix());
    }

    // --- pointer input ----------------------------------------------------

    pub fn click_cell(&mut self, row: usize, col: usize) {
        if row == 0 {
            return; // header cells take no focus
        }
        self.commit_focused();
        let row = row.min(self.doc.row_count() - 1).max(1);
        let col = col.min(self.doc.col_count().saturating_sub(1));
        self.selection.select_cell((row, col));
        self.enter_cell((row, col), Entry::SelectAll);
    }

    pub fn click_row(&mut self, row: usize) {
        if row == 0 {
            return;
        }
        self.commit_focused();
        self.text_selected = false;
        let row = row.min(self.doc.row_count() - 1);
        self.selection.clear();
        self.selection.select_row(row, self.doc.col_count());
    }

    // --- persistence ------------------------------------------------------

    /// Commit, normalize, drop fully-empty data rows, hand the result to
    /// the bridge. On success the document adopts the saved shape and the
    /// baseline moves; on failure every edit (and the dirty flag) survives.
    pub fn save(&mut self, bridge: &dyn PersistenceBridge) -> Result<()> {
        self.commit_focused();
        let normalized = self.doc.normalize_for_persistence();
        let filtered: Matrix = normalized
            .into_iter()
            .enumerate()
            .filter(|(i, row)| *i == 0 || row.iter().any(|c| !c.trim().is_empty()))
            .map(|(_, row)| row)
            .collect();
        bridge.save(&filtered)?;

        self.doc = GridDocument::from_loaded(self.config.header_schema.clone(), filtered);
        self.tracker.rebaseline(self.doc.matrix());
        self.selection.clear();
        let row = self.focus.0.min(self.doc.row_count() - 1).max(1);
        let col = self.focus.1.min(self.doc.col_count().saturating_sub(1));
        self.enter_cell((row, col), Entry::SelectAll);
        Ok(())
    }

    // --- internals --------------------------------------------------------

    /// Write the in-progress text into the document: trim, apply the
    /// column's commit-time formatter if any, then recompute dirty. Growth
    /// of the trailing empty row happens here so that committing content
    /// into the last row always leaves a fresh insertion point.
    fn commit_focused(&mut self) {
        let mut value = self.edit.trim().to_string();
        if let Some(format) = self.config.formatter(self.focus.1) {
            value = format(&value);
        }
        self.doc.set_cell(self.focus.0, self.focus.1, &value);
        self.doc.ensure_trailing_empty_row();
        self.edit = value;
        self.cursor = self.cursor.min(char_len(&self.edit));
        self.tracker.check_for_edits(self.doc.matrix());
    }

    fn enter_cell(&mut self, target: CellAddr, entry: Entry) {
        self.focus = target;
        self.edit = self.doc.cell(target.0, target.1).to_string();
        match entry {
            Entry::SelectAll => {
                self.cursor = char_len(&self.edit);
                self.text_selected = !self.edit.is_empty();
            }
            Entry::Start => {
                self.cursor = 0;
                self.text_selected = false;
            }
            Entry::End => {
                self.cursor = char_len(&self.edit);
                self.text_selected = false;
            }
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices()
        .nth(char_pos)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::fakes::{AlwaysConfirm, NeverConfirm};
    use crate::persist::fakes::MemoryBridge;
    use crate::profile::{format_time, GridConfig, GridProfile};

    fn config(cols: &[&str]) -> GridConfig {
        GridConfig {
            header_schema: cols.iter().map(|s| s.to_string()).collect(),
            enter_terminator_columns: Vec::new(),
            column_formatters: Vec::new(),
        }
    }

    fn rows(data: &[&[&str]]) -> Matrix {
        data.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn type_text(editor: &mut GridEditor, text: &str) {
        for c in text.chars() {
            editor.insert_char(c);
        }
    }

    #[test]
    fn scenario_a_time_formats_on_commit_not_per_keystroke() {
        let mut cfg = config(&["ra", "hora"]);
        cfg.column_formatters = vec![(1, format_time as fn(&str) -> String)];
        let mut editor = GridEditor::new(cfg, rows(&[&["ra", "hora"], &["123", ""]]));

        editor.click_cell(1, 1);
        type_text(&mut editor, "930");
        assert_eq!(editor.edit_text(), "930"); // untouched while typing
        editor.arrow(Arrow::Down, false);
        assert_eq!(editor.doc().cell(1, 0), "123");
        assert_eq!(editor.doc().cell(1, 1), "09:30");
    }

    #[test]
    fn commit_happens_before_focus_moves() {
        let cfg = config(&["a", "b"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a", "b"]]));
        type_text(&mut editor, "  first  ");
        editor.tab();
        // the cell we left holds the trimmed text, and focus is elsewhere
        assert_eq!(editor.doc().cell(1, 0), "first");
        assert_eq!(editor.focus(), (1, 1));
    }

    #[test]
    fn scenario_b_shift_arrows_build_a_rectangle() {
        let cfg = config(&["a", "b", "c"]);
        let mut editor = GridEditor::new(
            cfg,
            rows(&[&["a", "b", "c"], &["1", "2", "3"], &["4", "5", "6"]]),
        );
        editor.click_cell(1, 0);
        editor.arrow(Arrow::Down, true);
        editor.arrow(Arrow::Right, true);

        let mut selected = 0;
        for r in 0..editor.doc().row_count() {
            for c in 0..editor.doc().col_count() {
                if editor.selection().contains_cell((r, c)) {
                    assert!((1..=2).contains(&r) && (0..=1).contains(&c));
                    selected += 1;
                }
            }
        }
        assert_eq!(selected, 4);
        assert_eq!(editor.focus(), (2, 1));
    }

    #[test]
    fn plain_arrow_after_selection_clears_it() {
        let cfg = config(&["a", "b"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a", "b"], &["1", "2"], &["3", "4"]]));
        editor.click_cell(1, 0);
        editor.arrow(Arrow::Down, true);
        assert!(!editor.selection().is_empty());
        editor.arrow(Arrow::Up, false);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn scenario_c_delete_selected_row_with_confirmation() {
        let cfg = config(&["a", "b"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a", "b"], &["1", "2"], &["3", "4"]]));
        editor.click_row(1);
        let mut confirm = AlwaysConfirm::default();
        assert!(editor.delete_key(&mut confirm));
        assert_eq!(confirm.prompts, vec!["Remove 1 selected row(s)?"]);
        // header + the surviving data row + trailing empty row
        assert_eq!(editor.doc().row_count(), 3);
        assert_eq!(editor.doc().cell(1, 0), "3");
        assert!(editor.doc().is_row_empty(2));
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn delete_with_no_selection_targets_the_focused_row() {
        let cfg = config(&["a"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a"], &["1"], &["2"]]));
        // focus starts at (1, 0); no explicit selection made
        editor.text_selected = false;
        let mut confirm = AlwaysConfirm::default();
        assert!(editor.delete_key(&mut confirm));
        assert_eq!(editor.doc().cell(1, 0), "2");
    }

    #[test]
    fn rejected_delete_only_clears_the_selection() {
        let cfg = config(&["a"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a"], &["1"], &["2"]]));
        editor.click_row(1);
        let mut confirm = NeverConfirm::default();
        assert!(!editor.delete_key(&mut confirm));
        assert_eq!(confirm.prompts.len(), 1);
        assert_eq!(editor.doc().cell(1, 0), "1");
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn delete_with_live_text_selection_stays_in_the_cell() {
        let cfg = config(&["a"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a"], &["conteudo"]]));
        editor.click_cell(1, 0);
        assert!(editor.is_text_selected());
        match editor.delete_request() {
            DeleteOutcome::TextCleared => {}
            _ => panic!("expected the in-cell deletion"),
        }
        assert_eq!(editor.edit_text(), "");
        // the document is untouched until the empty text commits
        assert_eq!(editor.doc().cell(1, 0), "conteudo");
        editor.enter();
        assert_eq!(editor.doc().cell(1, 0), "");
    }

    #[test]
    fn scenario_d_enter_in_terminator_column_lands_on_column_zero() {
        let mut cfg = config(&["ra", "chave"]);
        cfg.enter_terminator_columns = vec![1];
        let mut editor = GridEditor::new(cfg, rows(&[&["ra", "chave"], &["1", "k"]]));
        editor.click_cell(2, 1); // trailing empty row, terminator column
        let rows_before = editor.doc().row_count();
        editor.enter();
        assert_eq!(editor.doc().row_count(), rows_before + 1);
        assert_eq!(editor.focus(), (3, 0));
    }

    #[test]
    fn enter_outside_terminator_columns_keeps_the_column() {
        let mut cfg = config(&["ra", "chave"]);
        cfg.enter_terminator_columns = vec![1];
        let mut editor = GridEditor::new(cfg, rows(&[&["ra", "chave"], &["1", "k"], &["2", "j"]]));
        editor.click_cell(1, 0);
        editor.enter();
        assert_eq!(editor.focus(), (2, 0));
    }

    #[test]
    fn tab_wraps_to_next_row_and_grows_at_the_end() {
        let cfg = config(&["a", "b"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a", "b"], &["1", "2"]]));
        editor.click_cell(1, 1);
        editor.tab();
        assert_eq!(editor.focus(), (2, 0)); // wrapped into the trailing row
        editor.tab();
        assert_eq!(editor.focus(), (2, 1));
        let rows_before = editor.doc().row_count();
        editor.tab(); // bottom-right corner: grow and move in
        assert_eq!(editor.doc().row_count(), rows_before + 1);
        assert_eq!(editor.focus(), (3, 0));
    }

    #[test]
    fn left_and_right_defer_to_the_text_cursor_inside_the_cell() {
        let cfg = config(&["a", "b"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a", "b"], &["abc", "x"]]));
        editor.click_cell(1, 1);
        editor.arrow(Arrow::Left, false); // text selected: boundary, grid move
        assert_eq!(editor.focus(), (1, 0));
        assert_eq!(editor.cursor(), 3); // entered from the right, caret at end
        editor.arrow(Arrow::Left, false);
        assert_eq!(editor.focus(), (1, 0)); // caret moved, focus did not
        assert_eq!(editor.cursor(), 2);
        editor.arrow(Arrow::Right, false);
        assert_eq!(editor.cursor(), 3);
        editor.arrow(Arrow::Right, false); // now at the end: grid move
        assert_eq!(editor.focus(), (1, 1));
    }

    #[test]
    fn left_edge_wraps_to_previous_rows_last_column() {
        let cfg = config(&["a", "b", "c"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a", "b", "c"], &["1", "2", "3"]]));
        editor.click_cell(2, 0);
        editor.arrow(Arrow::Left, false);
        assert_eq!(editor.focus(), (1, 2));
        // and the top-left corner clamps
        editor.click_cell(1, 0);
        editor.arrow(Arrow::Left, false);
        assert_eq!(editor.focus(), (1, 0));
        editor.arrow(Arrow::Up, false);
        assert_eq!(editor.focus(), (1, 0));
    }

    #[test]
    fn committing_into_the_last_row_leaves_one_trailing_empty_row() {
        let cfg = config(&["a"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a"]]));
        type_text(&mut editor, "data");
        editor.arrow(Arrow::Down, false);
        let doc = editor.doc();
        assert_eq!(doc.cell(1, 0), "data");
        let last = doc.row_count() - 1;
        assert!(doc.is_row_empty(last));
        assert!(!doc.is_row_empty(last - 1));
        assert_eq!(editor.focus(), (last, 0));
    }

    #[test]
    fn save_filters_empty_rows_and_cleans_the_dirty_flag() {
        let cfg = config(&["ra", "cns"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["ra", "cns"], &["1", "2"]]));
        assert!(!editor.is_dirty());
        editor.click_cell(2, 0);
        type_text(&mut editor, "99");
        editor.enter();
        assert!(editor.is_dirty());

        let bridge = MemoryBridge::default();
        editor.save(&bridge).unwrap();
        assert!(!editor.is_dirty());

        let stored = bridge.stored.borrow();
        assert_eq!(stored[0], vec!["ra".to_string(), "cns".to_string()]);
        assert_eq!(stored.len(), 3); // header + two data rows, no empties
        assert_eq!(stored[2], vec!["99".to_string(), "".to_string()]);
        for row in stored.iter() {
            assert_eq!(row.len(), 2);
        }
    }

    #[test]
    fn failed_load_falls_back_to_a_clean_header_only_grid() {
        let bridge = MemoryBridge {
            fail_load: true,
            ..Default::default()
        };
        let loaded = bridge.load().unwrap_or_default();
        let cfg = GridProfile::exames().resolve(&loaded);
        let schema = cfg.header_schema.clone();
        let editor = GridEditor::new(cfg, loaded);
        // header plus the trailing empty row, nothing else, and no dirt
        assert_eq!(editor.doc().row_count(), 2);
        assert_eq!(editor.doc().matrix()[0], schema);
        assert!(editor.doc().is_row_empty(1));
        assert!(!editor.is_dirty());
        assert_eq!(editor.focus(), (1, 0));
    }

    #[test]
    fn loaded_rows_seed_the_document() {
        let bridge = MemoryBridge::with_rows(rows(&[&["ra", "cns"], &["123", "700"]]));
        let loaded = bridge.load().unwrap();
        let editor = GridEditor::new(config(&["ra", "cns"]), loaded);
        assert_eq!(editor.doc().cell(1, 0), "123");
        assert_eq!(editor.doc().cell(1, 1), "700");
        assert!(!editor.is_dirty());
    }

    #[test]
    fn failed_save_keeps_edits_and_dirty_flag() {
        let cfg = config(&["a"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a"], &["1"]]));
        editor.click_cell(1, 0);
        type_text(&mut editor, "edited");
        editor.enter();
        assert!(editor.is_dirty());

        let bridge = MemoryBridge {
            fail_save: true,
            ..Default::default()
        };
        assert!(editor.save(&bridge).is_err());
        assert!(editor.is_dirty());
        assert_eq!(editor.doc().cell(1, 0), "edited");
    }

    #[test]
    fn clear_keeps_header_and_marks_dirty() {
        let cfg = config(&["a", "b"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a", "b"], &["1", "2"]]));
        editor.apply_clear();
        assert!(editor.is_dirty());
        assert_eq!(editor.doc().data_row_count(), 1);
        assert!(editor.doc().is_row_empty(1));
        assert_eq!(editor.focus(), (1, 0));
    }

    #[test]
    fn header_never_changes_under_a_profile() {
        let cfg = GridProfile::exames().resolve(&[]);
        let schema = cfg.header_schema.clone();
        let mut editor = GridEditor::new(cfg, Vec::new());
        editor.click_cell(0, 0); // ignored
        type_text(&mut editor, "tamper");
        editor.enter();
        assert_eq!(editor.doc().matrix()[0], schema);
    }

    #[test]
    fn first_typed_character_replaces_selected_text() {
        let cfg = config(&["a"]);
        let mut editor = GridEditor::new(cfg, rows(&[&["a"], &["velho"]]));
        editor.click_cell(1, 0);
        assert!(editor.is_text_selected());
        type_text(&mut editor, "novo");
        assert_eq!(editor.edit_text(), "novo");
        editor.enter();
        assert_eq!(editor.doc().cell(1, 0), "novo");
    }
}
