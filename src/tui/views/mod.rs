use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph};
use ratatui::Frame;

use crate::state::AppState;

use super::draw::dim_style;
use super::input::UiState;
use super::layout::AppLayout;

mod header;
mod help;
mod list;
mod panel;
mod scatter;

pub use header::draw_header;
pub use help::draw_help_overlay;
pub use list::draw_commit_list;
pub use panel::draw_side_panel;
pub use scatter::draw_scatter;

/// Draws every panel that has room, then the help overlay on top.
pub fn draw(f: &mut Frame, layout: &AppLayout, app: &AppState, ui: &UiState) {
    if !ui.missing.contains(&"header") {
        draw_header(f, layout.header, app);
    }
    if !ui.missing.contains(&"plot") {
        draw_scatter(f, layout.plot, app, ui);
    }
    if !ui.missing.contains(&"side") {
        draw_side_panel(f, layout.side, app, ui);
    }
    if !ui.missing.contains(&"list") {
        draw_commit_list(f, layout.list, app);
    }
    draw_footer(f, layout, ui);

    if ui.show_help {
        draw_help_overlay(f, f.size());
    }
}

fn draw_footer(f: &mut Frame, layout: &AppLayout, ui: &UiState) {
    let line = if let Some((msg, _)) = &ui.status_message {
        Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Green)))
    } else if !ui.missing.is_empty() {
        Line::from(Span::styled(
            format!("Terminal too small for: {}", ui.missing.join(", ")),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from(Span::styled(
            "arrows move · b brush · Enter pick · , . time · j/k commits · c copy · h help · q quit",
            dim_style(),
        ))
    };
    f.render_widget(Paragraph::new(line), layout.footer);
}

pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}
