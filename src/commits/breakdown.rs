use crate::model::Commit;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    #[serde(rename = "type")]
    pub kind: String,
    pub lines: usize,
    pub fraction: f64,
}

impl TypeShare {
    pub fn percent(&self) -> String {
        format_percent(self.fraction)
    }
}

/// Per-type line counts of a selection.
///
/// `NoSelection` is distinct from a selection that produced no entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Breakdown {
    NoSelection,
    Types {
        total_lines: usize,
        entries: Vec<TypeShare>,
    },
}

impl Breakdown {
    pub fn entries(&self) -> &[TypeShare] {
        match self {
            Breakdown::NoSelection => &[],
            Breakdown::Types { entries, .. } => entries,
        }
    }

    pub fn is_selection(&self) -> bool {
        matches!(self, Breakdown::Types { .. })
    }
}

pub fn breakdown<'a, I>(selected: I) -> Breakdown
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut any = false;
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for commit in selected {
        any = true;
        for line in commit.lines() {
            match slots.get(&line.kind) {
                Some(&i) => order[i].1 += 1,
                None => {
                    slots.insert(line.kind.clone(), order.len());
                    order.push((line.kind.clone(), 1));
                }
            }
        }
    }

    if !any {
        return Breakdown::NoSelection;
    }

    let total_lines: usize = order.iter().map(|(_, n)| n).sum();
    let entries = order
        .into_iter()
        .map(|(kind, lines)| TypeShare {
            fraction: if total_lines == 0 {
                0.0
            } else {
                lines as f64 / total_lines as f64
            },
            kind,
            lines,
        })
        .collect();

    Breakdown::Types {
        total_lines,
        entries,
    }
}

/// The type holding the most lines in a commit; earlier types win ties.
pub fn dominant_type(commit: &Commit) -> Option<&str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for line in commit.lines() {
        match counts.iter_mut().find(|(k, _)| *k == line.kind) {
            Some(entry) => entry.1 += 1,
            None => counts.push((line.kind.as_str(), 1)),
        }
    }
    let max = counts.iter().map(|(_, n)| *n).max()?;
    counts.into_iter().find(|(_, n)| *n == max).map(|(k, _)| k)
}

/// Percentage with one decimal and trailing zeros dropped: `66.7%`, `50%`.
pub fn format_percent(fraction: f64) -> String {
    let s = format!("{:.1}", fraction * 100.0);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{s}%")
}
