use crate::model::{Commit, LineRecord};
use chrono::Timelike;
use std::collections::HashMap;
use std::sync::Arc;

/// Groups line records into commits, ascending by datetime.
///
/// Groups keep first-seen order before the stable sort, so commits sharing
/// an instant stay in row order. The first record of a group supplies the
/// commit's author and timestamps; the remaining records are assumed to agree.
pub fn aggregate(records: &[Arc<LineRecord>], url_base: Option<&str>) -> Vec<Commit> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<Arc<LineRecord>>> = Vec::new();

    for record in records {
        let slot = *index.entry(record.commit.as_str()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(Arc::clone(record));
    }

    let mut commits: Vec<Commit> = groups
        .into_iter()
        .filter_map(|lines| {
            let first = Arc::clone(lines.first()?);
            Some(Commit {
                url: url_base.map(|base| commit_url(base, &first.commit)),
                id: first.commit.clone(),
                author: first.author.clone(),
                date: first.date,
                time: first.time,
                timezone: first.timezone.clone(),
                datetime: first.datetime,
                hour_frac: first.datetime.hour() as f64 + first.datetime.minute() as f64 / 60.0,
                total_lines: lines.len(),
                lines,
            })
        })
        .collect();

    commits.sort_by(|a, b| a.datetime.cmp(&b.datetime));
    commits
}

pub fn commit_url(base: &str, id: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{id}")
    } else {
        format!("{base}/{id}")
    }
}
