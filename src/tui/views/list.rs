use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::state::AppState;
use crate::tui::draw::dim_style;
use crate::util::truncate;

use super::header_cell;

/// Only the rows inside the scroll window are built.
pub fn draw_commit_list(f: &mut Frame, area: Rect, app: &AppState) {
    let range = app.list_range();
    let visible = app.visible_commits().len();
    let commits = app.commits();

    let rows: Vec<Row> = range
        .clone()
        .filter_map(|i| commits.get(i).map(|c| (i, c)))
        .map(|(i, c)| {
            let marker = if app.is_selected(i) { "●" } else { " " };
            let style = if app.hovered() == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else if i >= visible {
                dim_style()
            } else if app.is_selected(i) {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(c.short_id().to_string()),
                Cell::from(c.datetime.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(truncate(&c.author, 24)),
                Cell::from(c.total_lines.to_string()),
            ])
            .style(style)
        })
        .collect();

    let title = format!(
        "Commits {}-{} of {}",
        range.start.saturating_add(1).min(range.end),
        range.end,
        app.list_len()
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Length(10),
            Constraint::Length(17),
            Constraint::Min(12),
            Constraint::Length(7),
        ],
    )
    .header(Row::new(vec![
        header_cell("", Color::Cyan),
        header_cell("Commit", Color::Cyan),
        header_cell("Date", Color::Cyan),
        header_cell("Author", Color::Cyan),
        header_cell("Lines", Color::Cyan),
    ]))
    .block(Block::default().title(title).borders(Borders::ALL));

    f.render_widget(table, area);
}
