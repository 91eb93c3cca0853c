use crate::model::Commit;
use crate::scale::TimeScale;
use std::ops::Range;

/// Geometry of a scrolled list whose items share one height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListWindow {
    pub item_height: f64,
    pub viewport_height: f64,
    /// Extra items rendered past the viewport edge.
    pub overscan: usize,
}

impl ListWindow {
    pub fn rows(viewport_rows: usize, overscan: usize) -> Self {
        Self {
            item_height: 1.0,
            viewport_height: viewport_rows as f64,
            overscan,
        }
    }

    pub fn visible_count(&self) -> usize {
        if self.item_height <= 0.0 {
            return 0;
        }
        (self.viewport_height / self.item_height).ceil().max(0.0) as usize
    }

    /// Index range to render for a list of `total` items at `scroll_offset`.
    pub fn visible_range(&self, total: usize, scroll_offset: f64) -> Range<usize> {
        if total == 0 || self.item_height <= 0.0 {
            return 0..0;
        }
        let first = (scroll_offset.max(0.0) / self.item_height).floor() as usize;
        let start = first.min(total.saturating_sub(1));
        let end = (start + self.visible_count() + self.overscan).min(total);
        start..end
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_offset(&self, total: usize) -> f64 {
        let content = total as f64 * self.item_height;
        (content - self.viewport_height).max(0.0)
    }

    /// Offset that brings `index` into view with the least movement.
    pub fn offset_showing(&self, index: usize, current: f64) -> f64 {
        let top = index as f64 * self.item_height;
        let bottom = top + self.item_height;
        if top < current {
            top
        } else if bottom > current + self.viewport_height {
            bottom - self.viewport_height
        } else {
            current
        }
    }
}

/// Slider progress at which every commit up to the first visible one is shown.
pub fn progress_at(commits: &[Commit], scale: &TimeScale, first_visible: usize) -> Option<f64> {
    commits
        .get(first_visible)
        .map(|c| scale.progress_of(c.datetime))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_clamped_to_list() {
        let w = ListWindow {
            item_height: 30.0,
            viewport_height: 350.0,
            overscan: 2,
        };
        assert_eq!(w.visible_count(), 12);
        assert_eq!(w.visible_range(100, 0.0), 0..14);
        assert_eq!(w.visible_range(100, 95.0), 3..17);
        assert_eq!(w.visible_range(10, 0.0), 0..10);
        assert_eq!(w.visible_range(10, 10_000.0), 9..10);
        assert_eq!(w.visible_range(0, 50.0), 0..0);
    }

    #[test]
    fn offsets() {
        let w = ListWindow::rows(5, 0);
        assert_eq!(w.max_offset(3), 0.0);
        assert_eq!(w.max_offset(12), 7.0);
        assert_eq!(w.offset_showing(8, 0.0), 4.0);
        assert_eq!(w.offset_showing(2, 4.0), 2.0);
        assert_eq!(w.offset_showing(5, 4.0), 4.0);
    }
}
