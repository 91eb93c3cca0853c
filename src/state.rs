use crate::commits::{breakdown, filter_by_progress, select_with_scales, Breakdown, Pipeline, Selection};
use crate::model::Commit;
use crate::scale::{BrushRect, PlotArea, PlotScales, Point, RadiusScale};
use crate::window::{progress_at, ListWindow};
use chrono::{DateTime, FixedOffset};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ExploreConfig {
    /// Color dots by each commit's dominant file type.
    pub color_by_type: bool,
    /// When false, progress stays at 100 and every commit is plotted.
    pub time_slider: bool,
    /// Scrolling the commit list moves the time cutoff to the first visible commit.
    pub scroll_drives_time: bool,
    pub plot: PlotArea,
    pub overscan: usize,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            color_by_type: true,
            time_slider: true,
            scroll_drives_time: false,
            plot: PlotArea::default(),
            overscan: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    ProgressChanged(f64),
    BrushStarted(Point),
    BrushMoved(Point),
    BrushEnded(Point),
    BrushCleared,
    Hover(Option<usize>),
    Scrolled(f64),
    ViewportChanged(usize),
    Resize(PlotArea),
}

/// Explorer state over a loaded pipeline. Only [`AppState::dispatch`] mutates it.
pub struct AppState {
    pipeline: Pipeline,
    config: ExploreConfig,
    progress: f64,
    visible_len: usize,
    scales: Option<PlotScales>,
    radius: Option<RadiusScale>,
    brush_anchor: Option<Point>,
    brush: Option<BrushRect>,
    selection: Selection,
    hovered: Option<usize>,
    scroll: f64,
    list: ListWindow,
}

impl AppState {
    pub fn new(pipeline: Pipeline, config: ExploreConfig) -> Self {
        let list = ListWindow::rows(10, config.overscan);
        let mut state = Self {
            pipeline,
            config,
            progress: 100.0,
            visible_len: 0,
            scales: None,
            radius: None,
            brush_anchor: None,
            brush: None,
            selection: Selection::empty(),
            hovered: None,
            scroll: 0.0,
            list,
        };
        state.sync_progress_to_scroll();
        state.refresh_filter();
        state
    }

    /// Applies one event and reports whether anything visible changed.
    pub fn dispatch(&mut self, event: Event) -> bool {
        debug!(?event, "dispatch");
        match event {
            Event::ProgressChanged(p) => {
                if !self.config.time_slider {
                    return false;
                }
                let p = if p.is_nan() { 100.0 } else { p.clamp(0.0, 100.0) };
                if p == self.progress {
                    return false;
                }
                self.progress = p;
                self.refresh_filter();
            }
            Event::BrushStarted(p) => {
                self.brush_anchor = Some(p);
                self.brush = None;
                self.refresh_selection();
            }
            Event::BrushMoved(p) => {
                let Some(anchor) = self.brush_anchor else {
                    return false;
                };
                self.brush = Some(BrushRect::from_corners(anchor, p));
                self.refresh_selection();
            }
            Event::BrushEnded(p) => {
                let Some(anchor) = self.brush_anchor.take() else {
                    return false;
                };
                let rect = BrushRect::from_corners(anchor, p);
                // a click without a drag clears the brush
                self.brush = (!rect.is_degenerate()).then_some(rect);
                self.refresh_selection();
            }
            Event::BrushCleared => {
                if self.brush.is_none() && self.brush_anchor.is_none() {
                    return false;
                }
                self.brush_anchor = None;
                self.brush = None;
                self.refresh_selection();
            }
            Event::Hover(idx) => {
                let idx = idx.filter(|&i| i < self.list_len());
                if idx == self.hovered {
                    return false;
                }
                self.hovered = idx;
            }
            Event::Scrolled(offset) => {
                let max = self.list.max_offset(self.list_len());
                let offset = offset.clamp(0.0, max);
                if offset == self.scroll {
                    return false;
                }
                self.scroll = offset;
                if self.sync_progress_to_scroll() {
                    self.refresh_filter();
                }
            }
            Event::ViewportChanged(rows) => {
                let list = ListWindow::rows(rows, self.config.overscan);
                if list == self.list {
                    return false;
                }
                self.list = list;
                self.scroll = self.scroll.min(self.list.max_offset(self.list_len()));
                if self.sync_progress_to_scroll() {
                    self.refresh_filter();
                }
            }
            Event::Resize(area) => {
                if area == self.config.plot {
                    return false;
                }
                self.config.plot = area;
                // the brush was drawn in the old coordinate space
                self.brush_anchor = None;
                self.brush = None;
                self.refresh_filter();
            }
        }
        true
    }

    fn refresh_filter(&mut self) {
        let commits = &self.pipeline.commits;
        let visible = match self.pipeline.time_scale {
            Some(scale) => filter_by_progress(commits, &scale, self.progress),
            None => &commits[..0],
        };
        self.visible_len = visible.len();
        self.scales = PlotScales::new(visible, self.config.plot);
        self.radius = RadiusScale::new(visible);
        // the scroll-driven list keeps every commit hoverable
        if self.hovered.is_some_and(|i| i >= self.list_len()) {
            self.hovered = None;
        }
        if !self.config.scroll_drives_time {
            self.scroll = self.scroll.min(self.list.max_offset(self.visible_len));
        }
        self.refresh_selection();
    }

    /// In scroll-driven mode, moves progress to the first listed commit.
    fn sync_progress_to_scroll(&mut self) -> bool {
        if !(self.config.scroll_drives_time && self.config.time_slider) {
            return false;
        }
        let Some(scale) = self.pipeline.time_scale else {
            return false;
        };
        let first = self.list_range().start;
        match progress_at(&self.pipeline.commits, &scale, first) {
            Some(p) => {
                self.progress = p;
                true
            }
            None => false,
        }
    }

    fn refresh_selection(&mut self) {
        self.selection = match &self.scales {
            Some(scales) => select_with_scales(&self.pipeline.commits, scales, self.brush.as_ref()),
            None => Selection::empty(),
        };
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn config(&self) -> &ExploreConfig {
        &self.config
    }

    pub fn commits(&self) -> &[Commit] {
        &self.pipeline.commits
    }

    pub fn visible_commits(&self) -> &[Commit] {
        &self.pipeline.commits[..self.visible_len]
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn cutoff(&self) -> Option<DateTime<FixedOffset>> {
        self.pipeline.time_scale.map(|s| s.invert(self.progress))
    }

    pub fn scales(&self) -> Option<&PlotScales> {
        self.scales.as_ref()
    }

    pub fn radius(&self) -> Option<&RadiusScale> {
        self.radius.as_ref()
    }

    pub fn brush(&self) -> Option<&BrushRect> {
        self.brush.as_ref()
    }

    pub fn brush_anchor(&self) -> Option<Point> {
        self.brush_anchor
    }

    pub fn is_brushing(&self) -> bool {
        self.brush_anchor.is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.contains(index)
    }

    pub fn breakdown(&self) -> Breakdown {
        breakdown(self.selection.commits(&self.pipeline.commits))
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hovered_commit(&self) -> Option<&Commit> {
        self.hovered.and_then(|i| self.pipeline.commits.get(i))
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn list_window(&self) -> &ListWindow {
        &self.list
    }

    /// Number of commits the scrolled list shows.
    pub fn list_len(&self) -> usize {
        if self.config.scroll_drives_time {
            self.pipeline.commits.len()
        } else {
            self.visible_len
        }
    }

    pub fn list_range(&self) -> std::ops::Range<usize> {
        self.list.visible_range(self.list_len(), self.scroll)
    }

    /// Closest plotted commit to `p`, if one lies within `max_dist`.
    pub fn commit_near(&self, p: Point, max_dist: f64) -> Option<usize> {
        let scales = self.scales.as_ref()?;
        self.visible_commits()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let q = scales.project(c);
                (i, ((q.x - p.x).powi(2) + (q.y - p.y).powi(2)).sqrt())
            })
            .filter(|(_, d)| *d <= max_dist)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}
