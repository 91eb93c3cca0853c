use crate::model::Commit;
use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned brush rectangle in plot coordinates, normalized so that
/// `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BrushRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// The whole drawing surface, margins included.
    pub fn full(area: &PlotArea) -> Self {
        Self::new(0.0, 0.0, area.width, area.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    pub fn is_degenerate(&self) -> bool {
        self.x1 - self.x0 <= f64::EPSILON || self.y1 - self.y0 <= f64::EPSILON
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin {
                top: 10.0,
                right: 10.0,
                bottom: 30.0,
                left: 50.0,
            },
        }
    }
}

impl PlotArea {
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn left(&self) -> f64 {
        self.margin.left
    }

    pub fn right(&self) -> f64 {
        self.width - self.margin.right
    }

    pub fn top(&self) -> f64 {
        self.margin.top
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.margin.bottom
    }

    pub fn usable_width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn usable_height(&self) -> f64 {
        self.bottom() - self.top()
    }
}

/// Linear map between the commit time extent and slider progress 0..=100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    min: DateTime<FixedOffset>,
    max: DateTime<FixedOffset>,
}

impl TimeScale {
    pub fn new(min: DateTime<FixedOffset>, max: DateTime<FixedOffset>) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_commits(commits: &[Commit]) -> Option<Self> {
        let (min, max) = extent(commits)?;
        Some(Self::new(min, max))
    }

    /// Instant for a progress value; progress is clamped to 0..=100.
    pub fn invert(&self, progress: f64) -> DateTime<FixedOffset> {
        let p = if progress.is_nan() { 100.0 } else { progress.clamp(0.0, 100.0) };
        if p >= 100.0 {
            return self.max;
        }
        let span = (self.max - self.min).num_milliseconds();
        let offset = (span as f64 * p / 100.0).round() as i64;
        self.min + Duration::milliseconds(offset)
    }

    pub fn progress_of(&self, instant: DateTime<FixedOffset>) -> f64 {
        let span = (self.max - self.min).num_milliseconds();
        if span == 0 {
            return 100.0;
        }
        let at = (instant - self.min).num_milliseconds();
        (at as f64 / span as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// x: commit time onto the usable width. y: hour of day 0..24, midnight at the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScales {
    x_min: DateTime<FixedOffset>,
    x_max: DateTime<FixedOffset>,
    area: PlotArea,
}

impl PlotScales {
    pub fn new(commits: &[Commit], area: PlotArea) -> Option<Self> {
        let (x_min, x_max) = extent(commits)?;
        Some(Self { x_min, x_max, area })
    }

    pub fn area(&self) -> &PlotArea {
        &self.area
    }

    pub fn domain(&self) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (self.x_min, self.x_max)
    }

    pub fn x(&self, instant: DateTime<FixedOffset>) -> f64 {
        let span = (self.x_max - self.x_min).num_milliseconds();
        let t = if span == 0 {
            0.5
        } else {
            (instant - self.x_min).num_milliseconds() as f64 / span as f64
        };
        self.area.left() + t * self.area.usable_width()
    }

    pub fn y(&self, hour_frac: f64) -> f64 {
        self.area.bottom() - (hour_frac / 24.0) * self.area.usable_height()
    }

    pub fn project(&self, commit: &Commit) -> Point {
        Point::new(self.x(commit.datetime), self.y(commit.hour_frac))
    }
}

/// Square-root scale from commit size onto a dot radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    min: f64,
    max: f64,
    range: (f64, f64),
}

impl RadiusScale {
    pub const DEFAULT_RANGE: (f64, f64) = (6.0, 50.0);

    pub fn new(commits: &[Commit]) -> Option<Self> {
        let min = commits.iter().map(|c| c.total_lines).min()?;
        let max = commits.iter().map(|c| c.total_lines).max()?;
        Some(Self {
            min: (min as f64).sqrt(),
            max: (max as f64).sqrt(),
            range: Self::DEFAULT_RANGE,
        })
    }

    pub fn radius(&self, total_lines: usize) -> f64 {
        let (lo, hi) = self.range;
        let span = self.max - self.min;
        let t = if span == 0.0 {
            0.5
        } else {
            ((total_lines as f64).sqrt() - self.min) / span
        };
        lo + t * (hi - lo)
    }
}

pub fn hour_label(hour: u32) -> String {
    format!("{:02}:00", hour % 24)
}

fn extent(commits: &[Commit]) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let min = commits.iter().map(|c| c.datetime).min()?;
    let max = commits.iter().map(|c| c.datetime).max()?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, h, m, 0)
            .unwrap()
    }

    #[test]
    fn brush_normalizes_corners() {
        let r = BrushRect::new(10.0, 50.0, 0.0, 5.0);
        assert_eq!(r, BrushRect::new(0.0, 5.0, 10.0, 50.0));
        assert!(r.contains(Point::new(0.0, 5.0)));
        assert!(r.contains(Point::new(10.0, 50.0)));
        assert!(!r.contains(Point::new(10.1, 50.0)));
    }

    #[test]
    fn time_scale_inverts_linearly_and_clamps() {
        let s = TimeScale::new(at(0, 0), at(10, 0));
        assert_eq!(s.invert(0.0), at(0, 0));
        assert_eq!(s.invert(50.0), at(5, 0));
        assert_eq!(s.invert(100.0), at(10, 0));
        assert_eq!(s.invert(250.0), at(10, 0));
        assert_eq!(s.invert(-3.0), at(0, 0));
        assert!((s.progress_of(at(2, 30)) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn degenerate_time_scale() {
        let s = TimeScale::new(at(3, 0), at(3, 0));
        assert_eq!(s.invert(10.0), at(3, 0));
        assert_eq!(s.progress_of(at(3, 0)), 100.0);
    }

    #[test]
    fn hour_axis_runs_bottom_to_top() {
        let area = PlotArea::default();
        let scales = PlotScales {
            x_min: at(0, 0),
            x_max: at(1, 0),
            area,
        };
        assert_eq!(scales.y(0.0), area.bottom());
        assert_eq!(scales.y(24.0), area.top());
        assert_eq!(scales.x(at(0, 0)), area.left());
        assert_eq!(scales.x(at(1, 0)), area.right());
    }

    #[test]
    fn labels() {
        assert_eq!(hour_label(6), "06:00");
        assert_eq!(hour_label(24), "00:00");
    }
}
