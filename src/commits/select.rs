use crate::model::Commit;
use crate::scale::{BrushRect, PlotScales, Point};
use serde::Serialize;

/// Indices of brushed commits, ascending, into the slice they were selected from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    indices: Vec<usize>,
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    pub fn commits<'a>(&'a self, commits: &'a [Commit]) -> impl Iterator<Item = &'a Commit> + 'a {
        self.indices.iter().filter_map(move |&i| commits.get(i))
    }

    /// "No commits selected" or "N commits selected".
    pub fn label(&self) -> String {
        selection_label(self.indices.len())
    }
}

pub fn selection_label(count: usize) -> String {
    match count {
        0 => "No commits selected".to_string(),
        1 => "1 commit selected".to_string(),
        n => format!("{n} commits selected"),
    }
}

/// Commits whose projected point falls inside `rect`, boundary included.
/// No rectangle selects nothing.
pub fn select<F>(commits: &[Commit], project: F, rect: Option<&BrushRect>) -> Selection
where
    F: Fn(&Commit) -> Point,
{
    let Some(rect) = rect else {
        return Selection::empty();
    };
    let indices = commits
        .iter()
        .enumerate()
        .filter(|(_, c)| rect.contains(project(c)))
        .map(|(i, _)| i)
        .collect();
    Selection { indices }
}

pub fn select_with_scales(commits: &[Commit], scales: &PlotScales, rect: Option<&BrushRect>) -> Selection {
    select(commits, |c| scales.project(c), rect)
}
