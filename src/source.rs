//! Reading bill rows from tracker exports.
//!
//! Rows that cannot be deserialized are logged and counted, never fatal. I/O
//! failures are.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::{BillRecord, BillRow};

/// Input file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    #[default]
    Csv,
    Jsonl,
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "jsonl" | "ndjson" => Ok(InputFormat::Jsonl),
            other => Err(Error::Config(format!(
                "Invalid input format '{}'. Allowed values are: csv, jsonl",
                other
            ))),
        }
    }
}

impl InputFormat {
    /// Guess from the file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("ndjson") => InputFormat::Jsonl,
            _ => InputFormat::Csv,
        }
    }
}

/// Normalized records plus the number of rows that were dropped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedBills {
    pub records: Vec<BillRecord>,
    pub skipped_rows: usize,
}

impl From<Vec<BillRecord>> for LoadedBills {
    fn from(records: Vec<BillRecord>) -> Self {
        Self {
            records,
            skipped_rows: 0,
        }
    }
}

/// Read CSV with a header row. Unknown columns are ignored and missing ones
/// read as empty.
pub fn read_csv<R: Read>(reader: R) -> Result<LoadedBills> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut loaded = LoadedBills::default();
    for (index, row) in csv_reader.deserialize::<BillRow>().enumerate() {
        match row {
            Ok(row) => loaded.records.push(row.into()),
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                // header is line 1
                warn!(line = index + 2, error = %e, "skipping unreadable CSV row");
                loaded.skipped_rows += 1;
            }
        }
    }

    debug!(rows = loaded.records.len(), skipped = loaded.skipped_rows, "read CSV input");
    Ok(loaded)
}

/// Read one JSON object per line; blank lines are ignored
pub fn read_jsonl<R: BufRead>(reader: R) -> Result<LoadedBills> {
    let mut loaded = LoadedBills::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<BillRow>(&line) {
            Ok(row) => loaded.records.push(row.into()),
            Err(e) => {
                warn!(line = index + 1, error = %e, "skipping unreadable JSON line");
                loaded.skipped_rows += 1;
            }
        }
    }

    debug!(rows = loaded.records.len(), skipped = loaded.skipped_rows, "read JSON-lines input");
    Ok(loaded)
}

/// Load a bill file in the given format
pub fn load_bills<P: AsRef<Path>>(path: P, format: InputFormat) -> Result<LoadedBills> {
    let file = File::open(path.as_ref())?;
    match format {
        InputFormat::Csv => read_csv(file),
        InputFormat::Jsonl => read_jsonl(BufReader::new(file)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_csv_with_extra_and_missing_columns() {
        let data = "\
State,Name,Description,Themes,Status,Intro Date,Sponsor
CA,Child Online Safety Act,requires parental consent,\"Children, Online Safety\",Passed,05/03/2024,Smith
,Untitled,,,Introduced,,
";
        let loaded = read_csv(data.as_bytes()).unwrap();
        assert_eq!(loaded.skipped_rows, 0);
        assert_eq!(loaded.records.len(), 2);

        let first = &loaded.records[0];
        assert_eq!(first.themes, "Children, Online Safety");
        assert_eq!(first.intro_date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(first.status_date, None);

        assert_eq!(loaded.records[1].state, "Unknown");
        assert_eq!(loaded.records[1].description, "");
    }

    #[test]
    fn test_jsonl_skips_bad_lines() {
        let data = r#"{"State":"NY","Name":"SAFE for Kids Act","Status":"Passed"}

not json at all
{"State":"TX","Description":null}
"#;
        let loaded = read_jsonl(data.as_bytes()).unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.skipped_rows, 1);
        assert_eq!(loaded.records[0].name, "SAFE for Kids Act");
        assert_eq!(loaded.records[1].description, "");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<InputFormat>().unwrap(), InputFormat::Csv);
        assert_eq!("jsonl".parse::<InputFormat>().unwrap(), InputFormat::Jsonl);
        assert!("xlsx".parse::<InputFormat>().is_err());
        assert_eq!(InputFormat::from_path(Path::new("bills.jsonl")), InputFormat::Jsonl);
        assert_eq!(InputFormat::from_path(Path::new("bills.csv")), InputFormat::Csv);
    }
}
