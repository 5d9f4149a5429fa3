use crate::types::{BadgeError, BadgeRecord, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    line1: Option<String>,
    #[serde(default)]
    line2: Option<String>,
    #[serde(default)]
    line3: Option<String>,
}

/// Load badge records from a CSV file with a `line1,line2,line3` header.
///
/// `line1` is required on every data row; `line2`/`line3` are optional
/// and an empty string counts as absent.
pub async fn load_from_csv(path: impl AsRef<Path>) -> Result<Vec<BadgeRecord>> {
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;

    // CSV parsing is CPU-bound, spawn blocking
    let records = tokio::task::spawn_blocking(move || parse_records(&contents)).await??;

    Ok(records)
}

fn parse_records(contents: &str) -> Result<Vec<BadgeRecord>> {
    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let mut records = Vec::new();

    for (index, row) in reader.deserialize::<RawRow>().enumerate() {
        let row = row?;
        // 1-based file line, accounting for the header row
        let file_row = index + 2;

        let line1 = clean(row.line1).ok_or(BadgeError::MissingLine1 { row: file_row })?;
        records.push(BadgeRecord {
            line1,
            line2: clean(row.line2),
            line3: clean(row.line3),
        });
    }

    Ok(records)
}

fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_partial_rows() {
        let records = parse_records(
            "line1,line2,line3\nAda Lovelace,Analyst,Room 4\nGrace Hopper,,\n",
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line2.as_deref(), Some("Analyst"));
        assert_eq!(records[1].line1, "Grace Hopper");
        assert_eq!(records[1].line2, None);
        assert_eq!(records[1].line3, None);
    }

    #[test]
    fn whitespace_only_fields_count_as_absent() {
        let records = parse_records("line1,line2,line3\nAda,  ,\n").unwrap();
        assert_eq!(records[0].line2, None);
    }

    #[test]
    fn missing_line1_reports_the_file_row() {
        let err = parse_records("line1,line2,line3\nAda,Analyst,\n,Orphan,\n").unwrap_err();
        match err {
            BadgeError::MissingLine1 { row } => assert_eq!(row, 3),
            other => panic!("expected MissingLine1, got {other:?}"),
        }
    }

    #[test]
    fn header_without_optional_columns_still_parses() {
        let records = parse_records("line1\nAda\nGrace\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].line1, "Grace");
        assert_eq!(records[1].line3, None);
    }
}
