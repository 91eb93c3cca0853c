use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const SCHEMA_VERSION: u32 = 1;

/// One source line of one file as recorded in the line table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRecord {
    pub file: String,
    pub line: u32,
    pub depth: u32,
    pub length: u32,
    pub commit: String,
    pub author: String,
    /// Civil date at local midnight in the row's timezone.
    pub date: DateTime<FixedOffset>,
    pub time: NaiveTime,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A synthetic commit: every line record that carries the same commit id.
///
/// The backing line records are not part of the serialized form. They are
/// reachable through [`Commit::lines`].
#[derive(Debug, Clone, Serialize)]
pub struct Commit {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub author: String,
    pub date: DateTime<FixedOffset>,
    pub time: NaiveTime,
    pub timezone: String,
    pub datetime: DateTime<FixedOffset>,
    pub hour_frac: f64,
    pub total_lines: usize,
    #[serde(skip)]
    pub(crate) lines: Vec<Arc<LineRecord>>,
}

impl Commit {
    pub fn lines(&self) -> &[Arc<LineRecord>] {
        &self.lines
    }

    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }
}

/// Parsed line table in source row order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Arc<LineRecord>>,
    pub dropped: usize,
}

impl Dataset {
    pub fn new(records: Vec<LineRecord>, dropped: usize) -> Self {
        Self {
            records: records.into_iter().map(Arc::new).collect(),
            dropped,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileSummary {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub lines: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryStats {
    pub total_commits: usize,
    pub total_loc: usize,
    pub files: usize,
    pub max_file_length: u32,
    pub longest_line: u32,
    pub busiest_weekday: Option<String>,
    pub dropped_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitsOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub cutoff: Option<DateTime<FixedOffset>>,
    pub total_commits: usize,
    pub commits: &'a [Commit],
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectionOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub brush: Option<crate::scale::BrushRect>,
    pub selected: Vec<&'a Commit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub selected_commits: usize,
    pub breakdown: crate::commits::Breakdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub data_path: String,
    pub files: Vec<FileSummary>,
}
