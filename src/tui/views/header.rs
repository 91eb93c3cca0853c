use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::state::AppState;
use crate::tui::draw::{dim_style, slider_label, title_style};

pub fn draw_header(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let pipeline = app.pipeline();
    let shown = app.visible_commits();
    let loc: usize = shown.iter().map(|c| c.total_lines).sum();
    let mut spans = vec![
        Span::styled("locmap", title_style()),
        Span::raw(format!(
            "  {} of {} commits · {} lines",
            shown.len(),
            pipeline.commits.len(),
            loc
        )),
    ];
    if pipeline.dataset.dropped > 0 {
        spans.push(Span::styled(
            format!(" · {} rows skipped", pipeline.dataset.dropped),
            Style::default().fg(Color::Red),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    let block = Block::default().title("Time").borders(Borders::ALL);
    if !app.config().time_slider {
        let text = Paragraph::new(Span::styled("showing all commits", dim_style())).block(block);
        f.render_widget(text, chunks[1]);
        return;
    }

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio((app.progress() / 100.0).clamp(0.0, 1.0))
        .label(slider_label(app.cutoff()));
    f.render_widget(gauge, chunks[1]);
}
