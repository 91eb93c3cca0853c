use crate::cli::CommonArgs;
use crate::model::{BreakdownOutput, Commit, CommitsOutput, SelectionOutput, SCHEMA_VERSION};
use crate::scale::BrushRect;
use crate::util::truncate;
use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};
use console::style;

use super::select::selection_label;
use super::Breakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
    Ndjson,
}

impl Format {
    pub fn from_flags(json: bool, ndjson: bool) -> Self {
        if json {
            Format::Json
        } else if ndjson {
            Format::Ndjson
        } else {
            Format::Table
        }
    }
}

pub fn output_commits(
    commits: &[Commit],
    total: usize,
    cutoff: Option<DateTime<FixedOffset>>,
    common: &CommonArgs,
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => {
            let output = CommitsOutput {
                version: SCHEMA_VERSION,
                generated_at: Utc::now(),
                data_path: common.data.to_string_lossy().to_string(),
                cutoff,
                total_commits: total,
                commits,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Ndjson => {
            for c in commits {
                println!("{}", serde_json::to_string(c)?);
            }
        }
        Format::Table => {
            if let Some(c) = cutoff {
                println!("Commits up to {}", style(c.format("%B %-d, %Y %H:%M")).dim());
            }
            commit_table(commits.iter());
            println!("\n{} of {} commits", style(commits.len()).cyan(), total);
        }
    }
    Ok(())
}

pub fn output_selection(
    selected: &[&Commit],
    brush: Option<BrushRect>,
    common: &CommonArgs,
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => {
            let output = SelectionOutput {
                version: SCHEMA_VERSION,
                generated_at: Utc::now(),
                data_path: common.data.to_string_lossy().to_string(),
                brush,
                selected: selected.to_vec(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Ndjson => {
            for c in selected {
                println!("{}", serde_json::to_string(c)?);
            }
        }
        Format::Table => {
            println!("{}", style(selection_label(selected.len())).bold());
            if !selected.is_empty() {
                commit_table(selected.iter().copied());
            }
        }
    }
    Ok(())
}

pub fn output_breakdown(
    breakdown: &Breakdown,
    selected_commits: usize,
    common: &CommonArgs,
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => {
            let output = BreakdownOutput {
                version: SCHEMA_VERSION,
                generated_at: Utc::now(),
                data_path: common.data.to_string_lossy().to_string(),
                selected_commits,
                breakdown: breakdown.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Ndjson => {
            for entry in breakdown.entries() {
                println!("{}", serde_json::to_string(entry)?);
            }
        }
        Format::Table => match breakdown {
            Breakdown::NoSelection => {
                println!("{}", style("No commits selected").dim());
            }
            Breakdown::Types { total_lines, entries } => {
                println!(
                    "{:<16} {:>8} {:>8}",
                    style("Type").bold(),
                    style("Lines").bold(),
                    style("Share").bold()
                );
                println!("{}", "─".repeat(34));
                for e in entries {
                    println!("{:<16} {:>8} {:>8}", e.kind, e.lines, e.percent());
                }
                println!(
                    "\n{} lines across {} commits",
                    style(total_lines).cyan(),
                    selected_commits
                );
            }
        },
    }
    Ok(())
}

fn commit_table<'a>(commits: impl Iterator<Item = &'a Commit>) {
    println!(
        "{:<10} {:<20} {:<24} {:>6} {:>7}",
        style("Commit").bold(),
        style("Date").bold(),
        style("Author").bold(),
        style("Hour").bold(),
        style("Lines").bold()
    );
    println!("{}", "─".repeat(71));
    for c in commits {
        println!(
            "{:<10} {:<20} {:<24} {:>6.2} {:>7}",
            c.short_id(),
            c.datetime.format("%Y-%m-%d %H:%M"),
            truncate(&c.author, 24),
            c.hour_frac,
            c.total_lines
        );
    }
}
