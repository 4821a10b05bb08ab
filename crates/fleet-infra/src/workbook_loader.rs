//! Loader for uploaded operating-record files
//!
//! Spreadsheets (xlsx, xlsm, xlsb, xls, ods) are read through calamine and
//! only the first worksheet is used. CSV files are accepted too; bytes that
//! are not valid UTF-8 are decoded as CP932 (Shift-JIS).

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader};
use encoding_rs::SHIFT_JIS;
use fleet_domain::model::{Cell, RawRow};
use fleet_types::{Error, LoaderError, Result};
use tracing::{debug, info, warn};

/// Input formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Spreadsheet,
    Csv,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> std::result::Result<Self, LoaderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(InputFormat::Spreadsheet),
            "csv" => Ok(InputFormat::Csv),
            _ => Err(LoaderError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read a file asynchronously and return every row of its first sheet
pub async fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let format = InputFormat::from_path(path)?;
    let bytes = tokio::fs::read(path).await?;
    info!(path = %path.display(), bytes = bytes.len(), "read upload");
    let rows = decode_rows(bytes, format)?;
    Ok(rows)
}

/// Decode raw file bytes into sheet rows
pub fn decode_rows(bytes: Vec<u8>, format: InputFormat) -> std::result::Result<Vec<RawRow>, LoaderError> {
    let rows = match format {
        InputFormat::Spreadsheet => rows_from_workbook(bytes)?,
        InputFormat::Csv => rows_from_csv(&bytes)?,
    };
    debug!(rows = rows.len(), "decoded sheet rows");
    Ok(rows)
}

fn rows_from_workbook(bytes: Vec<u8>) -> std::result::Result<Vec<RawRow>, LoaderError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| LoaderError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoaderError::NoSheets)?
        .map_err(|e| LoaderError::Workbook(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect())
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        other => Cell::Text(other.to_string()),
    }
}

fn rows_from_csv(bytes: &[u8]) -> std::result::Result<Vec<RawRow>, LoaderError> {
    let text = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, had_errors) = SHIFT_JIS.decode(bytes);
            if had_errors {
                warn!("some characters could not be decoded from CP932");
            }
            decoded.into_owned()
        }
    };
    let text = text.trim_start_matches('\u{feff}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LoaderError::Csv(e.to_string()))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::text(field)
                    }
                })
                .collect(),
        );
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use tempfile::tempdir;

    #[test]
    fn test_input_format_from_path() {
        assert_eq!(
            InputFormat::from_path(Path::new("fleet.XLSX")).unwrap(),
            InputFormat::Spreadsheet
        );
        assert_eq!(InputFormat::from_path(Path::new("a.csv")).unwrap(), InputFormat::Csv);
        assert!(matches!(
            InputFormat::from_path(Path::new("notes.txt")),
            Err(LoaderError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_csv_rows() {
        let rows = decode_rows(
            b"Vehicle,Distance,Diesel,Tickets\nV1,100,10,50\nV2,,0\n".to_vec(),
            InputFormat::Csv,
        )
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec![Cell::text("V1"), Cell::text("100"), Cell::text("10"), Cell::text("50")]);
        assert_eq!(rows[2], vec![Cell::text("V2"), Cell::Empty, Cell::text("0")]);
    }

    #[test]
    fn test_csv_shift_jis() {
        let (encoded, _, _) = SHIFT_JIS.encode("車両番号,距離\n熊本 1122,100\n");
        let rows = decode_rows(encoded.into_owned(), InputFormat::Csv).unwrap();
        assert_eq!(rows[0][0], Cell::text("車両番号"));
        assert_eq!(rows[1][0], Cell::text("熊本 1122"));
    }

    #[tokio::test]
    async fn test_load_first_sheet_of_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fleet.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Vehicle No").unwrap();
        sheet.write_string(0, 1, "Distance").unwrap();
        sheet.write_string(1, 0, "V1").unwrap();
        sheet.write_number(1, 1, 100.0).unwrap();
        sheet.write_number(1, 2, 10.0).unwrap();
        sheet.write_number(1, 3, 50.0).unwrap();
        let other = workbook.add_worksheet();
        other.write_string(0, 0, "ignored").unwrap();
        workbook.save(&path).unwrap();

        let rows = load_rows(&path).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Cell::text("Vehicle No"));
        assert_eq!(
            rows[1],
            vec![Cell::text("V1"), Cell::Number(100.0), Cell::Number(10.0), Cell::Number(50.0)]
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let result = load_rows(Path::new("/nonexistent/fleet.xlsx")).await;
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
