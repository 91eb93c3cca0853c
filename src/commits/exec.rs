use crate::cli::{BrushArgs, CommonArgs, CutoffArgs};
use crate::model::Commit;
use crate::scale::{BrushRect, PlotArea, PlotScales};
use crate::util::parse_cutoff;
use anyhow::Context;
use chrono::{DateTime, FixedOffset};

use super::output::{output_breakdown, output_commits, output_selection, Format};
use super::{breakdown, filter_by_time, load_pipeline, select_with_scales, Pipeline, Selection};

pub fn exec_commits(common: CommonArgs, cutoff: CutoffArgs, format: Format) -> anyhow::Result<()> {
    let pipeline = load_pipeline(&common, format == Format::Table)?;
    let cutoff = resolve_cutoff(&pipeline, &cutoff)?;
    let shown = visible(&pipeline, cutoff);
    output_commits(shown, pipeline.commits.len(), cutoff, &common, format)
}

pub fn exec_select(
    common: CommonArgs,
    cutoff: CutoffArgs,
    brush: BrushArgs,
    format: Format,
) -> anyhow::Result<()> {
    let pipeline = load_pipeline(&common, format == Format::Table)?;
    let cutoff = resolve_cutoff(&pipeline, &cutoff)?;
    let area = PlotArea::with_size(brush.width, brush.height);
    let rect = brush_rect(&brush, &area);
    let selection = selection_for(&pipeline, cutoff, area, rect.as_ref());
    let selected: Vec<&Commit> = selection.commits(&pipeline.commits).collect();
    output_selection(&selected, rect, &common, format)
}

pub fn exec_breakdown(
    common: CommonArgs,
    cutoff: CutoffArgs,
    brush: BrushArgs,
    format: Format,
) -> anyhow::Result<()> {
    let pipeline = load_pipeline(&common, format == Format::Table)?;
    let cutoff = resolve_cutoff(&pipeline, &cutoff)?;
    let area = PlotArea::with_size(brush.width, brush.height);

    // no brush selects nothing, `--all` selects the whole plot
    let rect = brush_rect(&brush, &area);
    let selection = selection_for(&pipeline, cutoff, area, rect.as_ref());
    let result = breakdown(selection.commits(&pipeline.commits));
    output_breakdown(&result, selection.len(), &common, format)
}

fn visible(pipeline: &Pipeline, cutoff: Option<DateTime<FixedOffset>>) -> &[Commit] {
    match cutoff {
        Some(c) => filter_by_time(&pipeline.commits, c),
        None => &pipeline.commits,
    }
}

fn selection_for(
    pipeline: &Pipeline,
    cutoff: Option<DateTime<FixedOffset>>,
    area: PlotArea,
    rect: Option<&BrushRect>,
) -> Selection {
    match PlotScales::new(visible(pipeline, cutoff), area) {
        Some(scales) => select_with_scales(&pipeline.commits, &scales, rect),
        None => Selection::empty(),
    }
}

fn brush_rect(brush: &BrushArgs, area: &PlotArea) -> Option<BrushRect> {
    if brush.all {
        return Some(BrushRect::full(area));
    }
    match (brush.x0, brush.y0, brush.x1, brush.y1) {
        (Some(x0), Some(y0), Some(x1), Some(y1)) => Some(BrushRect::new(x0, y0, x1, y1)),
        _ => None,
    }
}

pub fn resolve_cutoff(
    pipeline: &Pipeline,
    args: &CutoffArgs,
) -> anyhow::Result<Option<DateTime<FixedOffset>>> {
    if let Some(until) = &args.until {
        let offset = pipeline
            .commits
            .last()
            .map(|c| *c.datetime.offset())
            .or_else(|| FixedOffset::east_opt(0))
            .context("No usable timezone offset")?;
        let dt = parse_cutoff(until, offset).context("Failed to parse --until")?;
        return Ok(Some(dt));
    }
    if let Some(progress) = args.progress {
        return Ok(pipeline.time_scale.map(|s| s.invert(progress)));
    }
    Ok(None)
}
