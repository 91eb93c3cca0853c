use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use ratatui::style::{Color, Modifier, Style};

use crate::commits::dominant_type;
use crate::model::Commit;

const PALETTE: [Color; 10] = [
    Color::Rgb(78, 121, 167),
    Color::Rgb(242, 142, 44),
    Color::Rgb(225, 87, 89),
    Color::Rgb(118, 183, 178),
    Color::Rgb(89, 161, 79),
    Color::Rgb(237, 201, 73),
    Color::Rgb(175, 122, 161),
    Color::Rgb(255, 157, 167),
    Color::Rgb(156, 117, 95),
    Color::Rgb(186, 176, 171),
];

pub const PLAIN_DOT: Color = Color::Rgb(78, 121, 167);
pub const SELECTED_DOT: Color = Color::Rgb(255, 107, 107);
pub const HOVER_RING: Color = Color::Yellow;
pub const BRUSH_EDGE: Color = Color::Gray;

/// Ordinal color scale over file types, assigned in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TypePalette {
    colors: HashMap<String, Color>,
    order: Vec<String>,
}

impl TypePalette {
    pub fn from_commits(commits: &[Commit]) -> Self {
        let mut palette = Self::default();
        for commit in commits {
            for line in commit.lines() {
                palette.assign(&line.kind);
            }
        }
        palette
    }

    fn assign(&mut self, kind: &str) -> Color {
        if let Some(color) = self.colors.get(kind) {
            return *color;
        }
        let color = PALETTE[self.order.len() % PALETTE.len()];
        self.order.push(kind.to_string());
        self.colors.insert(kind.to_string(), color);
        color
    }

    pub fn color(&self, kind: &str) -> Color {
        self.colors.get(kind).copied().unwrap_or(Color::Gray)
    }

    pub fn commit_color(&self, commit: &Commit, by_type: bool) -> Color {
        if !by_type {
            return PLAIN_DOT;
        }
        dominant_type(commit).map_or(PLAIN_DOT, |kind| self.color(kind))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

pub fn slider_label(cutoff: Option<DateTime<FixedOffset>>) -> String {
    match cutoff {
        Some(c) => c.format("%B %-d, %Y %-I:%M %p").to_string(),
        None => "no commits".to_string(),
    }
}

pub fn title_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

pub fn dim_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_stable_per_type() {
        let mut p = TypePalette::default();
        let js = p.assign("js");
        let css = p.assign("css");
        assert_ne!(js, css);
        assert_eq!(p.assign("js"), js);
        assert_eq!(p.color("js"), js);
        assert_eq!(p.color("zig"), Color::Gray);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn slider_label_formats_cutoff() {
        let dt = DateTime::parse_from_rfc3339("2024-03-05T14:07:00+01:00").unwrap();
        assert_eq!(slider_label(Some(dt)), "March 5, 2024 2:07 PM");
        assert_eq!(slider_label(None), "no commits");
    }
}
