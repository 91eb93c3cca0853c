use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::error::{LocError, Result};
use crate::scale::{PlotArea, Point};

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Screen regions of the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub plot: Rect,
    pub side: Rect,
    pub list: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(8),
                Constraint::Length(10),
                Constraint::Length(1),
            ])
            .split(area);
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(rows[1]);

        Self {
            header: rows[0],
            plot: middle[0],
            side: middle[1],
            list: rows[2],
            footer: rows[3],
        }
    }

    /// Plot region inside its border.
    pub fn plot_inner(&self) -> Rect {
        inner(self.plot)
    }

    pub fn list_inner(&self) -> Rect {
        inner(self.list)
    }

    /// Rows available to the commit list below its border and header row.
    pub fn list_rows(&self) -> usize {
        inner(self.list).height.saturating_sub(1) as usize
    }

    /// Panels that have no room to render at this terminal size.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("header", ensure_area(self.header, 20, 3, "header")),
            ("plot", ensure_area(self.plot, 20, 6, "plot")),
            ("side", ensure_area(self.side, 16, 6, "side")),
            ("list", ensure_area(self.list, 20, 4, "list")),
        ]
        .into_iter()
        .filter(|(_, r)| r.is_err())
        .map(|(name, _)| name)
        .collect()
    }
}

pub fn ensure_area(area: Rect, min_width: u16, min_height: u16, name: &str) -> Result<()> {
    if area.width < min_width || area.height < min_height {
        return Err(LocError::MissingContainer(format!(
            "{name} needs {min_width}x{min_height}, have {}x{}",
            area.width, area.height
        )));
    }
    Ok(())
}

fn inner(r: Rect) -> Rect {
    Rect {
        x: r.x.saturating_add(1),
        y: r.y.saturating_add(1),
        width: r.width.saturating_sub(2),
        height: r.height.saturating_sub(2),
    }
}

/// Maps a terminal cell inside `inner` onto plot coordinates.
pub fn cell_to_plot(column: u16, row: u16, inner: Rect, area: &PlotArea) -> Option<Point> {
    if inner.width == 0
        || inner.height == 0
        || column < inner.x
        || row < inner.y
        || column >= inner.x + inner.width
        || row >= inner.y + inner.height
    {
        return None;
    }
    let fx = (column - inner.x) as f64 + 0.5;
    let fy = (row - inner.y) as f64 + 0.5;
    Some(Point::new(
        fx / inner.width as f64 * area.width,
        fy / inner.height as f64 * area.height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_map_into_plot_space() {
        let inner = Rect::new(1, 1, 100, 30);
        let area = PlotArea::default();
        let p = cell_to_plot(1, 1, inner, &area).unwrap();
        assert!(p.x > 0.0 && p.x < 10.0);
        assert!(p.y > 0.0 && p.y < 20.0);
        assert!(cell_to_plot(0, 5, inner, &area).is_none());
        assert!(cell_to_plot(101, 5, inner, &area).is_none());
    }

    #[test]
    fn tiny_terminal_reports_missing_panels() {
        let layout = AppLayout::new(Rect::new(0, 0, 30, 12));
        assert!(!layout.missing().is_empty());
        let roomy = AppLayout::new(Rect::new(0, 0, 160, 50));
        assert!(roomy.missing().is_empty());
    }
}
