// ui.rs
//
// Terminal rendering of the grid, the status lines, and the yes/no dialog.
// The editor knows nothing about any of this; everything here reads the
// editor and writes spans.

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::editor::GridEditor;

/// Uniform cell width; longer values are truncated on screen only.
const CELL_WIDTH: usize = 12;

/// Scroll state plus the geometry of the last draw, kept so mouse
/// coordinates can be mapped back to cells.
pub struct GridView {
    pub scroll_row: usize, // first visible data row, never 0
    pub scroll_col: usize,
    inner: Rect,
    gutter: usize,
    view_rows: usize,
    view_cols: usize,
}

pub enum Hit {
    Cell(usize, usize),
    RowGutter(usize),
}

impl Default for GridView {
    fn default() -> Self {
        GridView::new()
    }
}

impl GridView {
    pub fn new() -> Self {
        GridView {
            scroll_row: 1,
            scroll_col: 0,
            inner: Rect::new(0, 0, 0, 0),
            gutter: 0,
            view_rows: 0,
            view_cols: 0,
        }
    }

    fn ensure_visible(&mut self, focus: (usize, usize)) {
        if self.view_rows == 0 || self.view_cols == 0 {
            return;
        }
        if focus.0 < self.scroll_row {
            self.scroll_row = focus.0.max(1);
        }
        if focus.0 >= self.scroll_row + self.view_rows {
            self.scroll_row = focus.0 - self.view_rows + 1;
        }
        if focus.1 < self.scroll_col {
            self.scroll_col = focus.1;
        }
        if focus.1 >= self.scroll_col + self.view_cols {
            self.scroll_col = focus.1 - self.view_cols + 1;
        }
    }

    /// Map a screen position from a mouse event back onto the grid.
    pub fn hit_test(&self, editor: &GridEditor, x: u16, y: u16) -> Option<Hit> {
        let inner = self.inner;
        if x < inner.x || y < inner.y || x >= inner.x + inner.width || y >= inner.y + inner.height {
            return None;
        }
        if y == inner.y {
            return None; // header line
        }
        let row = self.scroll_row + (y - inner.y - 1) as usize;
        if row >= editor.doc().row_count() {
            return None;
        }
        let x_off = (x - inner.x) as usize;
        if x_off < self.gutter {
            return Some(Hit::RowGutter(row));
        }
        let col = self.scroll_col + (x_off - self.gutter) / (CELL_WIDTH + 2);
        if col >= editor.doc().col_count() {
            return None;
        }
        Some(Hit::Cell(row, col))
    }
}

pub fn draw(
    f: &mut Frame,
    editor: &GridEditor,
    view: &mut GridView,
    title: &str,
    status: &str,
    dialog: Option<&ConfirmDialog>,
) {
    let size = f.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(0),    // grid
                Constraint::Length(1), // inspector
                Constraint::Length(1), // status / footer
            ]
            .as_ref(),
        )
        .split(size);

    let grid_area = layout[0];
    let inspector_area = layout[1];
    let footer_area = layout[2];

    let doc = editor.doc();
    let gutter = doc.row_count().to_string().len() + 1;
    let inner = Rect {
        x: grid_area.x + 1,
        y: grid_area.y + 1,
        width: grid_area.width.saturating_sub(2),
        height: grid_area.height.saturating_sub(2),
    };
    view.inner = inner;
    view.gutter = gutter;
    view.view_rows = (inner.height as usize).saturating_sub(1); // minus header line
    let cell_display = CELL_WIDTH + 2;
    view.view_cols = ((inner.width as usize).saturating_sub(gutter) / cell_display).max(1);
    view.ensure_visible(editor.focus());

    let visible_cols =
        view.scroll_col..(view.scroll_col + view.view_cols).min(doc.col_count());

    let mut lines: Vec<Line> = Vec::new();

    // header row: locked, rendered once at the top regardless of scroll
    let mut header_spans: Vec<Span> = Vec::new();
    header_spans.push(Span::raw(format!("{:width$}", "", width = gutter)));
    for c in visible_cols.clone() {
        let text = format!(" {:^width$} ", clip(doc.cell(0, c)), width = CELL_WIDTH);
        header_spans.push(Span::styled(
            text,
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        ));
    }
    lines.push(Line::from(header_spans));

    let visible_rows =
        view.scroll_row..(view.scroll_row + view.view_rows).min(doc.row_count());
    for r in visible_rows {
        let mut row_spans: Vec<Span> = Vec::new();
        let gutter_style = if editor.selection().contains_row(r) || editor.focus().0 == r {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        row_spans.push(Span::styled(
            format!("{:>width$} ", r, width = gutter - 1),
            gutter_style,
        ));

        for c in visible_cols.clone() {
            let is_focus = (r, c) == editor.focus();
            let raw = if is_focus {
                editor.edit_text()
            } else {
                doc.cell(r, c)
            };
            let text = if is_focus {
                format!("[{:^width$}]", clip(raw), width = CELL_WIDTH)
            } else {
                format!(" {:^width$} ", clip(raw), width = CELL_WIDTH)
            };
            let mut style = Style::default();
            if is_focus {
                style = style.add_modifier(Modifier::REVERSED);
                if editor.is_text_selected() {
                    style = style.add_modifier(Modifier::BOLD);
                }
            } else if editor.selection().contains_cell((r, c)) {
                style = style.bg(Color::DarkGray);
            }
            row_spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(row_spans));
    }

    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), grid_area);

    // inspector line: focused cell, column name, row count, dirty marker
    let (fr, fc) = editor.focus();
    let col_name = doc
        .header_schema()
        .get(fc)
        .map(|s| s.as_str())
        .unwrap_or("");
    let dirty_mark = if editor.is_dirty() { " | MODIFIED" } else { "" };
    let inspector = format!(
        "Cell ({}, {}) [{}] | {} data row(s){}",
        fr,
        fc,
        col_name,
        doc.data_row_count(),
        dirty_mark,
    );
    f.render_widget(Paragraph::new(inspector), inspector_area);

    let footer = if status.is_empty() {
        "Ctrl+S save | Ctrl+L clear | Del remove rows | Esc quit".to_string()
    } else {
        status.to_string()
    };
    f.render_widget(Paragraph::new(footer), footer_area);

    if let Some(dialog) = dialog {
        dialog.draw(f, size);
    } else if !editor.is_text_selected() {
        // place the terminal cursor inside the focused cell
        let (fr, fc) = editor.focus();
        if fr >= view.scroll_row
            && fr < view.scroll_row + view.view_rows
            && fc >= view.scroll_col
            && fc < view.scroll_col + view.view_cols
        {
            let cx = inner.x as usize
                + gutter
                + (fc - view.scroll_col) * cell_display
                + 1
                + editor.cursor().min(CELL_WIDTH);
            let cy = inner.y as usize + 1 + (fr - view.scroll_row);
            f.set_cursor(cx as u16, cy as u16);
        }
    }
}

fn clip(s: &str) -> String {
    s.chars().take(CELL_WIDTH).collect()
}

/// Modal yes/no dialog. Keys: y/Enter confirm, n/Esc dismiss.
pub struct ConfirmDialog {
    prompt: String,
}

impl ConfirmDialog {
    pub fn new(prompt: impl Into<String>) -> Self {
        ConfirmDialog {
            prompt: prompt.into(),
        }
    }

    pub fn handle_key(&self, code: KeyCode) -> Option<bool> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            _ => None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let width = (self.prompt.len() as u16 + 6)
            .max(24)
            .min(area.width.saturating_sub(2));
        let height = 5u16.min(area.height);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };
        f.render_widget(Clear, popup);
        let block = Block::default()
            .title("Confirm")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));
        let body = format!("{}\n\n[Y]es    [N]o", self.prompt);
        f.render_widget(Paragraph::new(body).block(block), popup);
    }
}
