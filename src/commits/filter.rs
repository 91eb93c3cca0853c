use crate::model::Commit;
use crate::scale::TimeScale;
use chrono::{DateTime, FixedOffset};

/// Longest prefix of `commits` at or before `cutoff`.
///
/// `commits` must be sorted ascending by datetime, as [`super::aggregate`]
/// returns them.
pub fn filter_by_time(commits: &[Commit], cutoff: DateTime<FixedOffset>) -> &[Commit] {
    let end = commits.partition_point(|c| c.datetime <= cutoff);
    &commits[..end]
}

pub fn filter_by_progress<'a>(commits: &'a [Commit], scale: &TimeScale, progress: f64) -> &'a [Commit] {
    filter_by_time(commits, scale.invert(progress))
}
