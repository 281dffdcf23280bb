// main.rs
//
// Terminal lifecycle and the event loop: translates key and mouse events
// into the grid editor's discrete transitions, and hosts the blocking
// confirmation dialog for destructive operations.

mod confirm;
mod document;
mod editor;
mod persist;
mod profile;
mod selection;
mod tracker;
mod ui;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use editor::{Arrow, DeleteOutcome, GridEditor};
use persist::{CsvBridge, PersistenceBridge};
use profile::GridProfile;
use ui::{ConfirmDialog, GridView, Hit};

#[derive(Parser)]
#[command(name = "raedit", about = "Keyboard-driven editor for request spreadsheets")]
struct Cli {
    /// CSV file holding the request rows
    file: PathBuf,

    /// Grid profile: header schema, Enter behavior, column formatting
    #[arg(long, value_enum, default_value_t = ProfileArg::Exames)]
    profile: ProfileArg,

    /// Append logs to this file (stdout belongs to the terminal UI)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    Exames,
    Internacoes,
    Pendencias,
}

impl ProfileArg {
    fn profile(self) -> GridProfile {
        match self {
            ProfileArg::Exames => GridProfile::exames(),
            ProfileArg::Internacoes => GridProfile::internacoes(),
            ProfileArg::Pendencias => GridProfile::pendencias(),
        }
    }
}

struct App {
    editor: GridEditor,
    bridge: CsvBridge,
    view: GridView,
    title: String,
    status: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // keep the guard alive for the whole run so buffered logs get flushed
    let _log_guard = cli.log_file.as_ref().map(|path| {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| std::path::Path::new("."));
        let name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        guard
    });

    let profile = cli.profile.profile();
    let bridge = CsvBridge::new(&cli.file);
    let mut status = String::new();
    let loaded = match bridge.load() {
        Ok(rows) => {
            info!(file = %cli.file.display(), rows = rows.len(), "loaded");
            rows
        }
        Err(e) => {
            // recoverable: start with an empty grid and surface the message
            error!(file = %cli.file.display(), cause = %format!("{e:#}"), "load failed");
            status = format!("Error loading data: {e:#}");
            Vec::new()
        }
    };
    let config = profile.resolve(&loaded);
    let editor = GridEditor::new(config, loaded);

    let mut app = App {
        editor,
        bridge,
        view: GridView::new(),
        title: format!("raedit [{}] - {}", profile.name, cli.file.display()),
        status,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::draw(f, &app.editor, &mut app.view, &app.title, &app.status, None)
        })?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let shift = key.modifiers.contains(KeyModifiers::SHIFT);
                match key.code {
                    KeyCode::Char('q') | KeyCode::Char('c')
                        if key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        if try_quit(terminal, app)? {
                            return Ok(());
                        }
                    }
                    KeyCode::Esc => {
                        if try_quit(terminal, app)? {
                            return Ok(());
                        }
                    }
                    KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        save(app);
                    }
                    KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        if ask(terminal, app, "Clear all rows? The header is kept.")? {
                            app.editor.apply_clear();
                            app.status = "Rows cleared (not saved yet)".to_string();
                        }
                    }
                    KeyCode::Delete if key.modifiers.is_empty() => {
                        match app.editor.delete_request() {
                            DeleteOutcome::Ask(request) => {
                                if ask(terminal, app, &request.prompt)? {
                                    app.editor.apply_removal(&request);
                                    info!(rows = request.rows.len(), "rows removed");
                                    app.status =
                                        format!("Removed {} row(s)", request.rows.len());
                                } else {
                                    app.editor.cancel_removal();
                                }
                            }
                            DeleteOutcome::TextCleared | DeleteOutcome::Nothing => {}
                        }
                    }
                    KeyCode::Tab => app.editor.tab(),
                    KeyCode::Enter => app.editor.enter(),
                    KeyCode::Left => app.editor.arrow(Arrow::Left, shift),
                    KeyCode::Right => app.editor.arrow(Arrow::Right, shift),
                    KeyCode::Up => app.editor.arrow(Arrow::Up, shift),
                    KeyCode::Down => app.editor.arrow(Arrow::Down, shift),
                    KeyCode::Backspace => app.editor.backspace(),
                    KeyCode::Home => app.editor.cursor_home(),
                    KeyCode::End => app.editor.cursor_end(),
                    KeyCode::Char(c)
                        if !key
                            .modifiers
                            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                    {
                        app.editor.insert_char(c);
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                    match app.view.hit_test(&app.editor, mouse.column, mouse.row) {
                        Some(Hit::Cell(row, col)) => app.editor.click_cell(row, col),
                        Some(Hit::RowGutter(row)) => app.editor.click_row(row),
                        None => {}
                    }
                }
            }
            _ => {}
        }
    }
}

fn save(app: &mut App) {
    match app.editor.save(&app.bridge) {
        Ok(()) => {
            info!(
                file = %app.bridge.path().display(),
                rows = app.editor.doc().data_row_count(),
                "saved"
            );
            app.status = format!("Saved to {}", app.bridge.path().display());
        }
        Err(e) => {
            // edits and the dirty flag survive; nothing is lost
            error!(cause = %format!("{e:#}"), "save failed");
            app.status = format!("Error saving: {e:#}");
        }
    }
}

/// Quit, walking the unsaved-changes sequence: offer to save first, and if
/// that is declined require a second confirmation to discard the edits.
fn try_quit<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<bool> {
    if !app.editor.is_dirty() {
        return Ok(true);
    }
    if ask(terminal, app, "Save changes before exiting?")? {
        save(app);
        if app.editor.is_dirty() {
            // save failed; stay in the editor with the message on screen
            warn!("quit aborted, save did not go through");
            return Ok(false);
        }
        return Ok(true);
    }
    ask(terminal, app, "Exit without saving?")
}

/// Blocking modal confirmation: the grid stays on screen behind the dialog
/// and only y/n (or Enter/Esc) resolve it.
fn ask<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    prompt: &str,
) -> Result<bool> {
    let dialog = ConfirmDialog::new(prompt);
    loop {
        terminal.draw(|f| {
            ui::draw(
                f,
                &app.editor,
                &mut app.view,
                &app.title,
                &app.status,
                Some(&dialog),
            )
        })?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(answer) = dialog.handle_key(key.code) {
                return Ok(answer);
            }
        }
    }
}
