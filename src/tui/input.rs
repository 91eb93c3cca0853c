use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::error::Result;
use crate::scale::Point;
use crate::state::{AppState, Event};

use super::draw::TypePalette;
use super::layout::cell_to_plot;

const STATUS_TTL: Duration = Duration::from_secs(3);
const HOVER_RADIUS: f64 = 30.0;
const WHEEL_ROWS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Terminal-only state that never affects what is selected.
#[derive(Debug, Clone)]
pub struct UiState {
    pub cursor: Point,
    pub show_help: bool,
    pub status_message: Option<(String, Instant)>,
    pub plot_inner: Rect,
    pub list_inner: Rect,
    pub palette: TypePalette,
    pub missing: Vec<&'static str>,
}

impl UiState {
    pub fn new(app: &AppState) -> Self {
        let plot = app.config().plot;
        Self {
            cursor: Point::new(
                plot.left() + plot.usable_width() / 2.0,
                plot.top() + plot.usable_height() / 2.0,
            ),
            show_help: false,
            status_message: None,
            plot_inner: Rect::default(),
            list_inner: Rect::default(),
            palette: TypePalette::from_commits(app.commits()),
            missing: Vec::new(),
        }
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    pub fn expire_status(&mut self) {
        if self.status_message.as_ref().is_some_and(|(_, at)| at.elapsed() > STATUS_TTL) {
            self.status_message = None;
        }
    }
}

pub fn handle_key(key: KeyEvent, ui: &mut UiState, app: &mut AppState) -> Flow {
    if ui.show_help {
        match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => ui.show_help = false,
            _ => {}
        }
        return Flow::Continue;
    }

    let fast = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') => return Flow::Quit,
        KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::F(1) => ui.show_help = true,
        KeyCode::Left => move_cursor(ui, app, -step_x(app, fast), 0.0),
        KeyCode::Right => move_cursor(ui, app, step_x(app, fast), 0.0),
        KeyCode::Up => move_cursor(ui, app, 0.0, -step_y(app, fast)),
        KeyCode::Down => move_cursor(ui, app, 0.0, step_y(app, fast)),
        KeyCode::Char('b') => {
            if app.is_brushing() {
                app.dispatch(Event::BrushEnded(ui.cursor));
            } else {
                app.dispatch(Event::BrushStarted(ui.cursor));
            }
        }
        KeyCode::Enter => {
            if app.is_brushing() {
                app.dispatch(Event::BrushEnded(ui.cursor));
            } else {
                let near = app.commit_near(ui.cursor, HOVER_RADIUS);
                app.dispatch(Event::Hover(near));
            }
        }
        KeyCode::Esc => {
            if !app.dispatch(Event::BrushCleared) {
                app.dispatch(Event::Hover(None));
            }
        }
        KeyCode::Char(',') => step_progress(app, -1.0),
        KeyCode::Char('.') => step_progress(app, 1.0),
        KeyCode::Char('<') => step_progress(app, -10.0),
        KeyCode::Char('>') => step_progress(app, 10.0),
        KeyCode::Home => {
            app.dispatch(Event::ProgressChanged(0.0));
        }
        KeyCode::End => {
            app.dispatch(Event::ProgressChanged(100.0));
        }
        KeyCode::Char('j') => step_hover(app, 1),
        KeyCode::Char('k') => step_hover(app, -1),
        KeyCode::PageDown => {
            let rows = app.list_window().visible_count() as f64;
            app.dispatch(Event::Scrolled(app.scroll() + rows));
        }
        KeyCode::PageUp => {
            let rows = app.list_window().visible_count() as f64;
            app.dispatch(Event::Scrolled(app.scroll() - rows));
        }
        KeyCode::Char('c') => copy_hovered(ui, app),
        _ => {}
    }
    Flow::Continue
}

pub fn handle_mouse(mouse: MouseEvent, ui: &mut UiState, app: &mut AppState) {
    let on_plot = cell_to_plot(mouse.column, mouse.row, ui.plot_inner, &app.config().plot);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(p) = on_plot {
                ui.cursor = p;
                app.dispatch(Event::BrushStarted(p));
            } else if let Some(idx) = list_row_at(mouse.row, ui, app) {
                app.dispatch(Event::Hover(Some(idx)));
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(p) = on_plot {
                ui.cursor = p;
                app.dispatch(Event::BrushMoved(p));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if app.is_brushing() {
                let p = on_plot.unwrap_or(ui.cursor);
                app.dispatch(Event::BrushEnded(p));
            }
        }
        MouseEventKind::Moved => {
            if let Some(p) = on_plot {
                ui.cursor = p;
                let near = app.commit_near(p, HOVER_RADIUS);
                app.dispatch(Event::Hover(near));
            }
        }
        MouseEventKind::ScrollDown => {
            app.dispatch(Event::Scrolled(app.scroll() + WHEEL_ROWS));
        }
        MouseEventKind::ScrollUp => {
            app.dispatch(Event::Scrolled(app.scroll() - WHEEL_ROWS));
        }
        _ => {}
    }
}

fn step_x(app: &AppState, fast: bool) -> f64 {
    app.config().plot.usable_width() / if fast { 10.0 } else { 50.0 }
}

fn step_y(app: &AppState, fast: bool) -> f64 {
    // one hour, or three
    app.config().plot.usable_height() / 24.0 * if fast { 3.0 } else { 1.0 }
}

fn move_cursor(ui: &mut UiState, app: &mut AppState, dx: f64, dy: f64) {
    let plot = app.config().plot;
    ui.cursor = Point::new(
        (ui.cursor.x + dx).clamp(0.0, plot.width),
        (ui.cursor.y + dy).clamp(0.0, plot.height),
    );
    if app.is_brushing() {
        app.dispatch(Event::BrushMoved(ui.cursor));
    }
}

fn step_progress(app: &mut AppState, delta: f64) {
    let next = app.progress() + delta;
    app.dispatch(Event::ProgressChanged(next));
}

fn step_hover(app: &mut AppState, delta: isize) {
    let len = app.list_len();
    if len == 0 {
        return;
    }
    let next = match app.hovered() {
        Some(i) => i.saturating_add_signed(delta).min(len - 1),
        None if delta < 0 => len - 1,
        None => 0,
    };
    app.dispatch(Event::Hover(Some(next)));
    let offset = app.list_window().offset_showing(next, app.scroll());
    app.dispatch(Event::Scrolled(offset));
}

fn list_row_at(row: u16, ui: &UiState, app: &AppState) -> Option<usize> {
    let inner = ui.list_inner;
    // first inner row is the table header
    let first = inner.y.checked_add(1)?;
    if row < first || row >= inner.y + inner.height {
        return None;
    }
    let idx = app.list_range().start + (row - first) as usize;
    (idx < app.list_len()).then_some(idx)
}

fn copy_hovered(ui: &mut UiState, app: &AppState) {
    let Some(commit) = app.hovered_commit() else {
        ui.set_status("Hover a commit first");
        return;
    };
    let text = commit.url.clone().unwrap_or_else(|| commit.id.clone());
    match copy_to_clipboard(&text) {
        Ok(()) => ui.set_status(format!("Copied: {text}")),
        Err(err) => ui.set_status(format!("Clipboard error: {err}")),
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
