use crate::cli::CommonArgs;
use crate::commits::load_pipeline;
use crate::model::{Commit, Dataset, FileSummary, FilesOutput, StatsOutput, SummaryStats, SCHEMA_VERSION};
use chrono::{Datelike, Utc, Weekday};
use console::style;
use std::collections::{HashMap, HashSet};

pub fn summarize(dataset: &Dataset, commits: &[Commit]) -> SummaryStats {
    let mut files: HashSet<&str> = HashSet::new();
    let mut weekdays: Vec<(Weekday, usize)> = Vec::new();

    for rec in &dataset.records {
        files.insert(rec.file.as_str());
        let day = rec.datetime.weekday();
        match weekdays.iter_mut().find(|(d, _)| *d == day) {
            Some(entry) => entry.1 += 1,
            None => weekdays.push((day, 1)),
        }
    }

    let busiest = weekdays
        .iter()
        .map(|(_, n)| *n)
        .max()
        .and_then(|max| weekdays.iter().find(|(_, n)| *n == max))
        .map(|(d, _)| weekday_name(*d).to_string());

    SummaryStats {
        total_commits: commits.len(),
        total_loc: dataset.len(),
        files: files.len(),
        max_file_length: dataset.records.iter().map(|r| r.length).max().unwrap_or(0),
        longest_line: dataset.records.iter().map(|r| r.line).max().unwrap_or(0),
        busiest_weekday: busiest,
        dropped_rows: dataset.dropped,
    }
}

/// Per-file line counts, largest first. Equal counts keep first-seen order.
pub fn file_summaries(dataset: &Dataset) -> Vec<FileSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut files: Vec<FileSummary> = Vec::new();
    for rec in &dataset.records {
        match index.get(rec.file.as_str()) {
            Some(&i) => files[i].lines += 1,
            None => {
                index.insert(rec.file.as_str(), files.len());
                files.push(FileSummary {
                    path: rec.file.clone(),
                    kind: rec.kind.clone(),
                    lines: 1,
                });
            }
        }
    }
    files.sort_by(|a, b| b.lines.cmp(&a.lines));
    files
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn exec(common: CommonArgs, json: bool) -> anyhow::Result<()> {
    let pipeline = load_pipeline(&common, !json)?;
    let stats = summarize(&pipeline.dataset, &pipeline.commits);

    if json {
        let output = StatsOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            data_path: common.data.to_string_lossy().to_string(),
            stats,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style("Summary").bold());
    println!("{}", "─".repeat(40));
    println!("{:<22} {}", "Total Commits", style(stats.total_commits).cyan());
    println!("{:<22} {}", "Total LOC", style(stats.total_loc).cyan());
    println!("{:<22} {}", "Number of Files", style(stats.files).cyan());
    println!("{:<22} {}", "Max File Length", style(stats.max_file_length).cyan());
    println!("{:<22} {}", "Longest Line Length", style(stats.longest_line).cyan());
    println!(
        "{:<22} {}",
        "Day with most work",
        style(stats.busiest_weekday.as_deref().unwrap_or("-")).yellow()
    );
    if stats.dropped_rows > 0 {
        println!("{:<22} {}", "Dropped rows", style(stats.dropped_rows).red());
    }
    Ok(())
}

pub fn exec_files(common: CommonArgs, json: bool, limit: usize) -> anyhow::Result<()> {
    let pipeline = load_pipeline(&common, !json)?;
    let mut files = file_summaries(&pipeline.dataset);

    if json {
        files.truncate(limit);
        let output = FilesOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            data_path: common.data.to_string_lossy().to_string(),
            files,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{:<50} {:>10} {:>8}",
        style("File").bold(),
        style("Type").bold(),
        style("Lines").bold()
    );
    println!("{}", "─".repeat(70));
    for f in files.iter().take(limit) {
        println!("{:<50} {:>10} {:>8}", f.path, f.kind, f.lines);
    }
    if files.len() > limit {
        println!("\n... and {} more files", files.len() - limit);
    }
    Ok(())
}
