use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use crate::scale::{hour_label, PlotArea, PlotScales};
use crate::state::AppState;
use crate::tui::draw::{dim_style, BRUSH_EDGE, HOVER_RING, SELECTED_DOT};
use crate::tui::input::UiState;

const HOUR_TICKS: [u32; 5] = [0, 6, 12, 18, 24];

/// Bubble plot of commit time against hour of day. Canvas y grows upward, plot y downward.
pub fn draw_scatter(f: &mut Frame, area: Rect, app: &AppState, ui: &UiState) {
    let plot = app.config().plot;
    let flip = |y: f64| plot.height - y;
    let title = if app.is_brushing() { "Commits by time of day (brushing)" } else { "Commits by time of day" };
    let block = Block::default().title(title).borders(Borders::ALL);

    let Some(scales) = app.scales() else {
        let canvas = Canvas::default()
            .block(block)
            .x_bounds([0.0, plot.width])
            .y_bounds([0.0, plot.height])
            .paint(move |ctx| {
                ctx.print(plot.width / 2.0 - 60.0, plot.height / 2.0, Span::styled("no commits yet", dim_style()));
            });
        f.render_widget(canvas, area);
        return;
    };

    let visible = app.visible_commits();
    let mut order: Vec<usize> = (0..visible.len()).collect();
    // larger bubbles first so small ones stay on top
    order.sort_by(|a, b| visible[*b].total_lines.cmp(&visible[*a].total_lines));

    let scale_r = plot.width / PlotArea::default().width;
    let by_type = app.config().color_by_type;

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, plot.width])
        .y_bounds([0.0, plot.height])
        .paint(|ctx| {
            draw_axes(ctx, scales, &plot);
            ctx.layer();

            for &i in &order {
                let c = &visible[i];
                let p = scales.project(c);
                let r = app.radius().map_or(6.0, |s| s.radius(c.total_lines)) * scale_r;
                let color = if app.is_selected(i) { SELECTED_DOT } else { ui.palette.commit_color(c, by_type) };
                ctx.draw(&Circle { x: p.x, y: flip(p.y), radius: r, color });
            }

            if let Some(c) = app.hovered_commit() {
                let p = scales.project(c);
                let r = app.radius().map_or(6.0, |s| s.radius(c.total_lines)) * scale_r;
                ctx.draw(&Circle { x: p.x, y: flip(p.y), radius: r + 4.0 * scale_r, color: HOVER_RING });
            }
            ctx.layer();

            let live = app.brush_anchor().map(|a| crate::scale::BrushRect::from_corners(a, ui.cursor));
            if let Some(b) = live.as_ref().or(app.brush()) {
                ctx.draw(&Rectangle {
                    x: b.x0,
                    y: flip(b.y1),
                    width: b.x1 - b.x0,
                    height: b.y1 - b.y0,
                    color: BRUSH_EDGE,
                });
            }
            ctx.print(ui.cursor.x, flip(ui.cursor.y), Span::styled("+", Style::default().fg(Color::White)));
        });
    f.render_widget(canvas, area);
}

fn draw_axes(ctx: &mut ratatui::widgets::canvas::Context<'_>, scales: &PlotScales, plot: &PlotArea) {
    let flip = |y: f64| plot.height - y;
    ctx.draw(&CanvasLine {
        x1: plot.left(),
        y1: flip(plot.bottom()),
        x2: plot.right(),
        y2: flip(plot.bottom()),
        color: Color::DarkGray,
    });
    ctx.draw(&CanvasLine {
        x1: plot.left(),
        y1: flip(plot.bottom()),
        x2: plot.left(),
        y2: flip(plot.top()),
        color: Color::DarkGray,
    });

    for h in HOUR_TICKS {
        let y = scales.y(h as f64);
        ctx.print(0.0, flip(y), Span::styled(hour_label(h), dim_style()));
    }

    let (start, end) = scales.domain();
    let label_y = flip(plot.height - plot.margin.bottom / 2.0);
    ctx.print(plot.left(), label_y, Span::styled(start.format("%b %-d, %Y").to_string(), dim_style()));
    let end_label = end.format("%b %-d, %Y").to_string();
    let end_x = (plot.right() - end_label.len() as f64 * plot.width / 100.0).max(plot.left());
    ctx.print(end_x, label_y, Span::styled(end_label, dim_style()));
}
