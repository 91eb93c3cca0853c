use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::commits::Breakdown;
use crate::state::AppState;
use crate::tui::draw::{dim_style, title_style};
use crate::tui::input::UiState;

pub fn draw_side_panel(f: &mut Frame, area: Rect, app: &AppState, ui: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_breakdown(f, chunks[0], app, ui);
    draw_tooltip(f, chunks[1], app);
}

fn draw_breakdown(f: &mut Frame, area: Rect, app: &AppState, ui: &UiState) {
    let mut lines = vec![Line::from(Span::styled(app.selection().label(), title_style())), Line::from("")];

    match app.breakdown() {
        Breakdown::NoSelection => {
            lines.push(Line::from(Span::styled("Brush the plot to see file types", dim_style())));
        }
        Breakdown::Types { total_lines, entries } => {
            for e in &entries {
                lines.push(Line::from(vec![
                    Span::styled("■ ", Style::default().fg(ui.palette.color(&e.kind))),
                    Span::styled(format!("{:<10}", e.kind), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("{:>7} lines ", e.lines)),
                    Span::styled(e.percent(), Style::default().fg(Color::Cyan)),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(format!("{total_lines} lines total"), dim_style())));
        }
    }

    let para = Paragraph::new(lines).block(Block::default().title("Selection").borders(Borders::ALL));
    f.render_widget(para, area);
}

fn draw_tooltip(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default().title("Commit").borders(Borders::ALL);
    let Some(c) = app.hovered_commit() else {
        f.render_widget(Paragraph::new(Span::styled("Hover a dot", dim_style())).block(block), area);
        return;
    };

    let label = |s: &'static str| Span::styled(format!("{s:<8}"), Style::default().fg(Color::Green));
    let lines = vec![
        Line::from(vec![label("Commit"), Span::styled(c.short_id().to_string(), title_style())]),
        Line::from(vec![label("Date"), Span::raw(c.datetime.format("%A, %B %-d, %Y").to_string())]),
        Line::from(vec![label("Time"), Span::raw(c.time.format("%-I:%M %p").to_string())]),
        Line::from(vec![label("Author"), Span::raw(c.author.clone())]),
        Line::from(vec![label("Lines"), Span::raw(c.total_lines.to_string())]),
        Line::from(vec![
            label("Link"),
            Span::styled(c.url.clone().unwrap_or_else(|| "-".to_string()), dim_style()),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}
