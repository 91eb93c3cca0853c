use crate::error::{LocError, Result};
use crate::load::parse_datetime;
use chrono::{DateTime, FixedOffset, Utc};
use std::time::SystemTime;

/// Parses a cutoff: RFC 3339, `YYYY-MM-DD[THH:MM[:SS]]`, or a relative
/// duration such as `2 weeks ago`. Naive inputs are read in `offset`.
pub fn parse_cutoff(input: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    if let Some(dt) = parse_datetime(input, Some(offset)) {
        return Ok(dt);
    }

    let trimmed = input.trim();
    let relative = trimmed.strip_suffix("ago").unwrap_or(trimmed);
    let compact: String = relative.split_whitespace().collect();
    let duration = humantime::parse_duration(&compact)
        .map_err(|e| LocError::InvalidDate(format!("'{input}': {e}")))?;
    let target = SystemTime::now()
        .checked_sub(duration)
        .ok_or_else(|| LocError::InvalidDate(format!("Duration overflow for '{input}'")))?;
    Ok(DateTime::<Utc>::from(target).with_timezone(&offset))
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn absolute_cutoffs() {
        assert_eq!(
            parse_cutoff("2024-01-01T23:59", utc()).unwrap().to_rfc3339(),
            "2024-01-01T23:59:00+00:00"
        );
        assert_eq!(
            parse_cutoff("2024-01-02", utc()).unwrap().to_rfc3339(),
            "2024-01-02T00:00:00+00:00"
        );
        assert_eq!(
            parse_cutoff("2024-01-02T08:00:00-05:00", utc()).unwrap().to_rfc3339(),
            "2024-01-02T08:00:00-05:00"
        );
    }

    #[test]
    fn relative_cutoff_is_in_the_past() {
        let dt = parse_cutoff("2 weeks ago", utc()).unwrap();
        assert!(dt < Utc::now());
    }

    #[test]
    fn garbage_cutoff() {
        assert!(matches!(parse_cutoff("whenever", utc()), Err(LocError::InvalidDate(_))));
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate("abcdef", 10), "abcdef");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
    }
}
