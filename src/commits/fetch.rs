use crate::cli::CommonArgs;
use crate::load::{load_path, LoadOptions};
use crate::model::{Commit, Dataset};
use crate::scale::TimeScale;
use anyhow::Context;
use tracing::info;

use super::aggregate;

/// A loaded line table and the commits derived from it.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub dataset: Dataset,
    pub commits: Vec<Commit>,
    pub time_scale: Option<TimeScale>,
}

impl Pipeline {
    pub fn from_dataset(dataset: Dataset, url_base: Option<&str>) -> Self {
        let commits = aggregate(&dataset.records, url_base);
        let time_scale = TimeScale::from_commits(&commits);
        info!(
            commits = commits.len(),
            lines = dataset.len(),
            "commits aggregated"
        );
        Self {
            dataset,
            commits,
            time_scale,
        }
    }
}

pub fn load_pipeline(common: &CommonArgs, progress: bool) -> anyhow::Result<Pipeline> {
    let opts = LoadOptions {
        strict: common.strict,
        progress,
    };
    let report = load_path(&common.data, &opts)
        .with_context(|| format!("Failed to load line table {}", common.data.display()))?;
    Ok(Pipeline::from_dataset(
        report.into_dataset(),
        common.commit_url.as_deref(),
    ))
}
