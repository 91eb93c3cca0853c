use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::centered_rect;

fn section(title: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        title.to_string(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )])
}

/// Draw the modal help overlay describing the plot, the slider, and shortcuts.
pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let block = Block::default().title("Help").borders(Borders::ALL);
    let help_area = centered_rect(70, 80, area);

    f.render_widget(Clear, help_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "locmap - Help",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        section("Plot:"),
        Line::from("  ←/→/↑/↓     Move the cursor (Shift for bigger steps)"),
        Line::from("  b           Start / finish a brush at the cursor"),
        Line::from("  Enter       Finish the brush, or pick the nearest commit"),
        Line::from("  Esc         Clear the brush (or the picked commit)"),
        Line::from("  Mouse       Drag to brush, hover to inspect"),
        Line::from(""),
        section("Time slider:"),
        Line::from("  , / .       Step back / forward by 1%"),
        Line::from("  < / >       Step back / forward by 10%"),
        Line::from("  Home / End  First commit / all commits"),
        Line::from(""),
        section("Commit list:"),
        Line::from("  j / k       Next / previous commit"),
        Line::from("  PgUp/PgDn   Scroll a page"),
        Line::from("  Wheel       Scroll"),
        Line::from("  c           Copy the commit link"),
        Line::from(""),
        section("General:"),
        Line::from("  h, ?, F1    Toggle this help"),
        Line::from("  q           Quit application"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press 'h' or 'Esc' to close this help",
            Style::default().fg(Color::Gray),
        )]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(help_paragraph, help_area);
}
