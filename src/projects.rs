use crate::error::{LocError, Result};
use chrono::{DateTime, Utc};
use console::style;
use serde::{Deserialize, Deserializer, Serialize};
use std::f64::consts::TAU;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(deserialize_with = "year_string")]
    pub year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProjectsFile {
    List(Vec<Project>),
    Wrapped { records: Vec<Project> },
}

fn year_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }
    Ok(match Year::deserialize(d)? {
        Year::Text(s) => s,
        Year::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub year: String,
    pub count: usize,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub query: Option<String>,
    pub year: Option<String>,
    pub projects: Vec<&'a Project>,
    pub slices: Vec<PieSlice>,
}

pub fn parse_projects(json: &str) -> Result<Vec<Project>> {
    Ok(match serde_json::from_str::<ProjectsFile>(json)? {
        ProjectsFile::List(list) => list,
        ProjectsFile::Wrapped { records } => records,
    })
}

pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| LocError::DataLoad(format!("cannot read {}: {e}", path.display())))?;
    parse_projects(&text)
}

/// Case-insensitive match of `query` against every field of each project.
pub fn search<'a>(projects: &'a [Project], query: &str) -> Vec<&'a Project> {
    let q = query.trim().to_lowercase();
    projects
        .iter()
        .filter(|p| {
            q.is_empty()
                || [p.title.as_str(), p.year.as_str(), p.description.as_str()]
                    .iter()
                    .chain(p.image.as_deref().iter())
                    .any(|field| field.to_lowercase().contains(&q))
        })
        .collect()
}

pub fn latest(projects: &[Project], n: usize) -> &[Project] {
    &projects[..n.min(projects.len())]
}

/// One slice per year, ordered by year, angles in radians from 0 to 2π.
pub fn pie_by_year(projects: &[&Project]) -> Vec<PieSlice> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for p in projects {
        match counts.iter_mut().find(|(y, _)| *y == p.year) {
            Some(entry) => entry.1 += 1,
            None => counts.push((p.year.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| a.0.cmp(&b.0));

    let total = projects.len();
    let mut angle = 0.0;
    counts
        .into_iter()
        .map(|(year, count)| {
            let fraction = if total == 0 { 0.0 } else { count as f64 / total as f64 };
            let start = angle;
            angle += fraction * TAU;
            PieSlice {
                year,
                count,
                fraction,
                start_angle: start,
                end_angle: angle,
            }
        })
        .collect()
}

pub fn title_line(count: usize) -> String {
    format!("Projects ⌈{count}⌋")
}

pub fn exec(
    file: PathBuf,
    query: Option<String>,
    year: Option<String>,
    latest_n: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let projects = match load_projects(&file) {
        Ok(p) => p,
        Err(e) => {
            warn!("error loading projects: {e}");
            println!("No projects available at the moment.");
            return Ok(());
        }
    };

    let base = match latest_n {
        Some(n) => latest(&projects, n),
        None => &projects[..],
    };
    let matched = search(base, query.as_deref().unwrap_or(""));
    // slices reflect the search, the listing also honors the selected year
    let slices = pie_by_year(&matched);
    let listed: Vec<&Project> = match &year {
        Some(y) => matched.iter().copied().filter(|p| &p.year == y).collect(),
        None => matched.clone(),
    };

    if json {
        let output = ProjectsOutput {
            version: crate::model::SCHEMA_VERSION,
            generated_at: Utc::now(),
            source: file.to_string_lossy().to_string(),
            query,
            year,
            projects: listed,
            slices,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if listed.is_empty() {
        println!("No projects available at the moment.");
        return Ok(());
    }

    println!("{}", style(title_line(listed.len())).bold());
    println!("{}", "─".repeat(50));
    for p in &listed {
        println!("{} {}", style(&p.title).cyan().bold(), style(format!("c. {}", p.year)).dim());
        if !p.description.is_empty() {
            println!("  {}", p.description);
        }
    }

    println!("\n{}", style("By year").bold());
    for s in &slices {
        let marker = if year.as_deref() == Some(s.year.as_str()) { "◄" } else { "" };
        println!(
            "  {:<8} {:>3} {:>6} {}",
            s.year,
            s.count,
            crate::commits::format_percent(s.fraction),
            marker
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"records": [
        {"title": "Lab 1", "year": 2024, "description": "Static site", "image": "a.png"},
        {"title": "Commit Viz", "year": "2025", "description": "Scatterplot of commits"},
        {"title": "Pie", "year": 2024, "description": "d3 arcs"}
    ]}"#;

    #[test]
    fn reads_wrapped_and_plain_lists() {
        let wrapped = parse_projects(SAMPLE).unwrap();
        assert_eq!(wrapped.len(), 3);
        assert_eq!(wrapped[0].year, "2024");
        let plain = parse_projects(r#"[{"title": "x", "year": "2023"}]"#).unwrap();
        assert_eq!(plain[0].description, "");
    }

    #[test]
    fn search_is_case_insensitive_over_all_fields() {
        let projects = parse_projects(SAMPLE).unwrap();
        let hits = search(&projects, "SCATTER");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Commit Viz");
        assert_eq!(search(&projects, "2024").len(), 2);
        assert_eq!(search(&projects, "").len(), 3);
    }

    #[test]
    fn pie_slices_cover_the_circle() {
        let projects = parse_projects(SAMPLE).unwrap();
        let all: Vec<&Project> = projects.iter().collect();
        let slices = pie_by_year(&all);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].year, "2024");
        assert_eq!(slices[0].count, 2);
        assert_eq!(slices[0].start_angle, 0.0);
        assert!((slices[1].end_angle - TAU).abs() < 1e-9);
        assert!(pie_by_year(&[]).is_empty());
    }

    #[test]
    fn latest_and_title() {
        let projects = parse_projects(SAMPLE).unwrap();
        assert_eq!(latest(&projects, 2).len(), 2);
        assert_eq!(latest(&projects, 10).len(), 3);
        assert_eq!(title_line(3), "Projects ⌈3⌋");
    }
}
