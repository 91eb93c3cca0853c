use std::io;
use std::time::Duration;

use crossterm::event::{poll, read, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::{info, warn};

use crate::cli::CommonArgs;
use crate::commits::load_pipeline;
use crate::scale::PlotArea;
use crate::state::{AppState, Event, ExploreConfig};

use super::input::{handle_key, handle_mouse, Flow, UiState};
use super::layout::AppLayout;
use super::views;

/// Plot units per terminal cell.
const CELL_W: f64 = 10.0;
const CELL_H: f64 = 20.0;

pub fn run(common: &CommonArgs, config: ExploreConfig) -> anyhow::Result<()> {
    let pipeline = load_pipeline(common, true)?;
    let mut app = AppState::new(pipeline, config);
    let mut ui = UiState::new(&app);
    info!(commits = app.commits().len(), types = ui.palette.len(), "explorer ready");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut app, &mut ui);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState, ui: &mut UiState) -> anyhow::Result<()> {
    loop {
        let layout = AppLayout::new(terminal.size()?);
        sync_layout(&layout, app, ui);

        terminal.draw(|f| views::draw(f, &layout, &*app, &*ui))?;

        if poll(Duration::from_millis(200))? {
            match read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(key, ui, app) == Flow::Quit {
                        break;
                    }
                }
                TermEvent::Mouse(mouse) => handle_mouse(mouse, ui, app),
                _ => {}
            }
        }
        ui.expire_status();
    }
    Ok(())
}

/// Feeds terminal geometry back into the explorer state.
pub fn sync_layout(layout: &AppLayout, app: &mut AppState, ui: &mut UiState) {
    let missing = layout.missing();
    if missing != ui.missing {
        for name in &missing {
            warn!(panel = *name, "panel has no room to render");
        }
        ui.missing = missing;
    }

    let inner = layout.plot_inner();
    ui.plot_inner = inner;
    ui.list_inner = layout.list_inner();

    if inner.width > 0 && inner.height > 0 {
        let area = PlotArea::with_size(inner.width as f64 * CELL_W, inner.height as f64 * CELL_H);
        if app.dispatch(Event::Resize(area)) {
            let plot = app.config().plot;
            ui.cursor.x = ui.cursor.x.clamp(0.0, plot.width);
            ui.cursor.y = ui.cursor.y.clamp(0.0, plot.height);
        }
    }
    app.dispatch(Event::ViewportChanged(layout.list_rows()));
}
