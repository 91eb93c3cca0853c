use crate::error::{LocError, Result};
use crate::model::{Dataset, LineRecord};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// One table row as read from the source, before any typing.
pub type RawRow = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Fail the whole load on the first malformed row.
    pub strict: bool,
    pub progress: bool,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<LineRecord>,
    pub errors: Vec<LocError>,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.errors.len()
    }

    pub fn into_dataset(self) -> Dataset {
        let dropped = self.errors.len();
        Dataset::new(self.records, dropped)
    }
}

pub fn load_path(path: &Path, opts: &LoadOptions) -> Result<LoadReport> {
    let file = File::open(path)
        .map_err(|e| LocError::DataLoad(format!("cannot open {}: {e}", path.display())))?;
    let report = read_rows(file, opts)?;
    info!(
        path = %path.display(),
        rows = report.records.len(),
        dropped = report.dropped(),
        "line table loaded"
    );
    Ok(report)
}

pub fn read_rows<R: Read>(reader: R, opts: &LoadOptions) -> Result<LoadReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let pb = if opts.progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} {pos} rows")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading line table...");
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut report = LoadReport::default();
    for (idx, result) in rdr.records().enumerate() {
        pb.inc(1);
        // header occupies line 1
        let fallback_row = idx + 2;
        let parsed = match result {
            Ok(record) => {
                let row_number = record
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_row);
                let raw: RawRow = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                parse_row(row_number, &raw)
            }
            Err(e) => Err(LocError::malformed(fallback_row, e.to_string())),
        };

        match parsed {
            Ok(line) => report.records.push(line),
            Err(e) => {
                if opts.strict {
                    pb.finish_and_clear();
                    return Err(e);
                }
                warn!("dropping row: {e}");
                report.errors.push(e);
            }
        }
    }
    pb.finish_and_clear();

    if report.records.is_empty() {
        return Err(LocError::DataLoad(if report.errors.is_empty() {
            "line table has no rows".to_string()
        } else {
            format!("line table has no valid rows ({} malformed)", report.errors.len())
        }));
    }

    debug!(rows = report.records.len(), "rows parsed");
    Ok(report)
}

pub fn parse_row(row: usize, raw: &RawRow) -> Result<LineRecord> {
    let commit = required(raw, row, "commit")?.to_string();
    let file = required(raw, row, "file")?.to_string();

    let line = parse_positive(row, "line", required(raw, row, "line")?)?;
    let depth = match field(raw, "depth") {
        Some(v) => parse_int(row, "depth", v)?,
        None => 0,
    };
    let length = match field(raw, "length") {
        Some(v) => parse_positive(row, "length", v)?,
        None => line.max(1),
    };

    let row_offset = match field(raw, "timezone") {
        Some(tz) => Some(
            parse_offset(tz)
                .ok_or_else(|| LocError::malformed(row, format!("invalid timezone '{tz}'")))?,
        ),
        None => None,
    };

    let dt_raw = required(raw, row, "datetime")?;
    let datetime = parse_datetime(dt_raw, row_offset)
        .ok_or_else(|| LocError::malformed(row, format!("invalid datetime '{dt_raw}'")))?;
    let offset = row_offset.unwrap_or_else(|| *datetime.offset());

    let date = match field(raw, "date") {
        Some(d) => parse_civil_date(d, offset)
            .ok_or_else(|| LocError::malformed(row, format!("invalid date '{d}'")))?,
        None => midnight(datetime.date_naive(), offset)
            .ok_or_else(|| LocError::malformed(row, "date out of range"))?,
    };

    let time = match field(raw, "time") {
        Some(t) => parse_time(t)
            .ok_or_else(|| LocError::malformed(row, format!("invalid time '{t}'")))?,
        None => datetime.time().with_nanosecond(0).unwrap_or(datetime.time()),
    };

    let kind = field(raw, "type")
        .map(|t| t.to_string())
        .unwrap_or_else(|| type_from_path(&file));

    Ok(LineRecord {
        author: field(raw, "author").unwrap_or("").to_string(),
        timezone: format_offset(offset),
        file,
        line,
        depth,
        length,
        commit,
        date,
        time,
        datetime,
        kind,
    })
}

fn field<'a>(raw: &'a RawRow, name: &str) -> Option<&'a str> {
    raw.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn required<'a>(raw: &'a RawRow, row: usize, name: &str) -> Result<&'a str> {
    field(raw, name).ok_or_else(|| LocError::malformed(row, format!("missing field '{name}'")))
}

fn parse_int(row: usize, name: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| LocError::malformed(row, format!("field '{name}' is not an integer: '{value}'")))
}

fn parse_positive(row: usize, name: &str, value: &str) -> Result<u32> {
    match parse_int(row, name, value)? {
        0 => Err(LocError::malformed(row, format!("field '{name}' must be at least 1"))),
        n => Ok(n),
    }
}

/// Parses `±HH:MM`, `±HHMM`, `±HH` or `Z`.
pub fn parse_offset(input: &str) -> Option<FixedOffset> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hh, mm) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if mm >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hh * 3600 + mm * 60))
}

pub fn format_offset(offset: FixedOffset) -> String {
    let secs = offset.local_minus_utc();
    let sign = if secs < 0 { '-' } else { '+' };
    let abs = secs.abs();
    format!("{sign}{:02}:{:02}", abs / 3600, (abs % 3600) / 60)
}

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
];

/// Parses an instant. Inputs without an offset are read in `fallback`, or UTC.
pub fn parse_datetime(input: &str, fallback: Option<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z") {
        return Some(dt);
    }
    let offset = fallback.or_else(|| FixedOffset::east_opt(0))?;
    for fmt in NAIVE_FORMATS {
        if fmt == "%Y-%m-%d" {
            if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
                return midnight(d, offset);
            }
        } else if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive.and_local_timezone(offset).single();
        }
    }
    None
}

fn parse_civil_date(input: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let d = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    midnight(d, offset)
}

fn midnight(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    date.and_hms_opt(0, 0, 0)?.and_local_timezone(offset).single()
}

/// Parses `HH:MM[:SS]`, tolerating a trailing offset such as `-08:00`.
fn parse_time(input: &str) -> Option<NaiveTime> {
    let s = input.trim().trim_end_matches(['Z', 'z']);
    let s = match s.find(['+', '-']) {
        Some(i) if i > 0 => &s[..i],
        _ => s,
    };
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

fn type_from_path(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_offset("-08:00").unwrap().local_minus_utc(), -8 * 3600);
        assert_eq!(parse_offset("+0530").unwrap().local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(parse_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_offset("08:00").is_none());
        assert!(parse_offset("+08:75").is_none());
        assert_eq!(format_offset(FixedOffset::west_opt(8 * 3600).unwrap()), "-08:00");
    }

    #[test]
    fn full_row_with_offsets() {
        let r = raw(&[
            ("commit", "abc"),
            ("file", "src/index.js"),
            ("line", "3"),
            ("depth", "2"),
            ("length", "40"),
            ("type", "js"),
            ("author", "Ada"),
            ("date", "2024-02-05"),
            ("time", "23:14:35-08:00"),
            ("timezone", "-08:00"),
            ("datetime", "2024-02-05T23:14:35-08:00"),
        ]);
        let rec = parse_row(2, &r).unwrap();
        assert_eq!(rec.line, 3);
        assert_eq!(rec.depth, 2);
        assert_eq!(rec.length, 40);
        assert_eq!(rec.time, NaiveTime::from_hms_opt(23, 14, 35).unwrap());
        assert_eq!(rec.date.to_rfc3339(), "2024-02-05T00:00:00-08:00");
        assert_eq!(rec.datetime.to_rfc3339(), "2024-02-05T23:14:35-08:00");
        assert_eq!(rec.timezone, "-08:00");
    }

    #[test]
    fn sparse_row_falls_back() {
        let r = raw(&[
            ("commit", "a1"),
            ("file", "x.CSS"),
            ("line", "1"),
            ("datetime", "2024-01-01T10:00"),
        ]);
        let rec = parse_row(2, &r).unwrap();
        assert_eq!(rec.depth, 0);
        assert_eq!(rec.length, 1);
        assert_eq!(rec.kind, "css");
        assert_eq!(rec.timezone, "+00:00");
        assert_eq!(rec.time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
    }

    #[test]
    fn naive_datetime_uses_row_timezone() {
        let r = raw(&[
            ("commit", "a1"),
            ("file", "x.js"),
            ("line", "1"),
            ("timezone", "+02:00"),
            ("datetime", "2024-01-01 10:00:00"),
        ]);
        let rec = parse_row(2, &r).unwrap();
        assert_eq!(rec.datetime.to_rfc3339(), "2024-01-01T10:00:00+02:00");
    }

    #[test]
    fn bad_fields_are_malformed() {
        for (name, value) in [
            ("line", "one"),
            ("line", "0"),
            ("length", "0"),
            ("depth", "-1"),
            ("datetime", "yesterday"),
        ] {
            let mut r = raw(&[
                ("commit", "a1"),
                ("file", "x.js"),
                ("line", "1"),
                ("datetime", "2024-01-01T10:00"),
            ]);
            r.insert(name.to_string(), value.to_string());
            match parse_row(7, &r) {
                Err(LocError::MalformedRow { row, .. }) => assert_eq!(row, 7),
                other => panic!("expected malformed row for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn read_rows_counts_drops() {
        let csv = "commit,file,line,type,datetime\n\
                   a1,x.js,1,js,2024-01-01T10:00\n\
                   a1,x.js,nope,js,2024-01-01T10:00\n\
                   b2,y.css,1,css,2024-01-02T09:30\n";
        let report = read_rows(csv.as_bytes(), &LoadOptions::default()).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.dropped(), 1);
        match &report.errors[0] {
            LocError::MalformedRow { row, .. } => assert_eq!(*row, 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn strict_mode_fails_fast() {
        let csv = "commit,file,line,datetime\na1,x.js,zz,2024-01-01T10:00\nb2,y.js,1,2024-01-01T10:00\n";
        let opts = LoadOptions {
            strict: true,
            ..LoadOptions::default()
        };
        assert!(matches!(
            read_rows(csv.as_bytes(), &opts),
            Err(LocError::MalformedRow { .. })
        ));
    }

    #[test]
    fn empty_table_is_a_load_error() {
        let csv = "commit,file,line,datetime\n";
        assert!(matches!(
            read_rows(csv.as_bytes(), &LoadOptions::default()),
            Err(LocError::DataLoad(_))
        ));
    }
}
