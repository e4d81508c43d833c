//! Table ingestion from uploaded bytes
//!
//! CSV input is decoded as UTF-8 first and re-read as Latin-1 when that fails.

use crate::error::{AnalysisError, Result};
use crate::types::Table;
use std::path::Path;
use tracing::{debug, warn};

/// Build a table from raw CSV bytes
pub fn from_csv_bytes(bytes: &[u8]) -> Result<Table> {
    if bytes.is_empty() {
        return Err(AnalysisError::EmptyUpload);
    }

    let content = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(e) => {
            warn!("Input is not valid UTF-8 ({}), decoding as latin1", e);
            decode_latin1(bytes)
        }
    };

    parse_csv(content.trim_start_matches('\u{feff}'))
}

/// Read a CSV file from disk
pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Table> {
    let bytes = std::fs::read(path.as_ref())?;
    debug!("Read {} bytes from {}", bytes.len(), path.as_ref().display());
    from_csv_bytes(&bytes)
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn parse_csv(content: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AnalysisError::Parse(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(AnalysisError::Parse("missing header row".to_string()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| AnalysisError::Parse(e.to_string()))?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(AnalysisError::Parse(format!(
                "line {}: expected {} fields, saw {}",
                line,
                headers.len(),
                record.len()
            )));
        }

        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();
        row.resize(headers.len(), None);
        rows.push(row);
    }

    debug!("Parsed table with {} columns and {} rows", headers.len(), rows.len());
    Ok(Table::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_csv() {
        let table = from_csv_bytes(b"id,review\n1,Great stuff\n2,\n").unwrap();
        assert_eq!(table.headers, vec!["id", "review"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 1), Some("Great stuff"));
        assert_eq!(table.cell(1, 1), None);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = from_csv_bytes(b"id,review,date\n1,ok\n").unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.cell(0, 2), None);
    }

    #[test]
    fn test_whitespace_cell_is_text() {
        let table = from_csv_bytes(b"id,review\n1,   \n").unwrap();
        assert_eq!(table.cell(0, 1), Some("   "));
    }

    #[test]
    fn test_overlong_row_rejected() {
        let err = from_csv_bytes(b"id,review\n1,fine\n2,too,many\n").unwrap_err();
        match err {
            AnalysisError::Parse(msg) => {
                assert!(msg.contains("line 3"));
                assert!(msg.contains("expected 2 fields, saw 3"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_latin1_fallback() {
        let bytes = b"comment\ncaf\xe9 was lovely\n";
        let table = from_csv_bytes(bytes).unwrap();
        assert_eq!(table.cell(0, 0), Some("café was lovely"));
    }

    #[test]
    fn test_bom_stripped() {
        let table = from_csv_bytes("\u{feff}text\nhello\n".as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["text"]);
    }

    #[test]
    fn test_empty_upload() {
        assert!(matches!(from_csv_bytes(b""), Err(AnalysisError::EmptyUpload)));
    }

    #[test]
    fn test_quoted_cells() {
        let table = from_csv_bytes(b"review\n\"Loved it, would buy again\"\n").unwrap();
        assert_eq!(table.cell(0, 0), Some("Loved it, would buy again"));
    }
}
