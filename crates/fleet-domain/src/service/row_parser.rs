//! Turns raw sheet rows into vehicle records
//!
//! Column order is fixed: vehicle no, distance (km), diesel consumed (L),
//! ticket sales. The first row is a header and is always dropped.

use fleet_types::LoaderError;
use tracing::debug;

use crate::model::{Cell, Fleet, RawRow, Vehicle};

const COLUMN_NAMES: [&str; 4] = ["Vehicle No", "Distance", "Diesel Consumed", "Ticket Sales"];

/// How malformed numeric fields are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Unparseable numbers become NaN and flow through every calculation
    #[default]
    Lenient,
    /// The first unparseable number aborts the parse
    Strict,
}

/// Parse every data row (header skipped) into a fresh fleet
pub fn parse_rows(rows: &[RawRow], mode: ParseMode) -> Result<Fleet, LoaderError> {
    let mut vehicles = Vec::with_capacity(rows.len().saturating_sub(1));
    for (idx, row) in rows.iter().enumerate().skip(1) {
        if mode == ParseMode::Strict {
            // sheet rows are 1-based
            validate_row(row, idx + 1)?;
        }
        vehicles.push(parse_row(row));
    }
    debug!(vehicles = vehicles.len(), "parsed fleet rows");
    Ok(Fleet::from_vehicles(vehicles))
}

/// Build one vehicle from positional cells; never fails
pub fn parse_row(row: &RawRow) -> Vehicle {
    let cell = |i: usize| row.get(i).unwrap_or(&Cell::Empty);
    Vehicle::new(
        vehicle_no(cell(0)),
        cell_number(cell(1)),
        cell_number(cell(2)),
        cell_number(cell(3)),
    )
}

fn vehicle_no(cell: &Cell) -> String {
    cell.to_string()
}

fn cell_number(cell: &Cell) -> f64 {
    match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => parse_leading_float(s),
        Cell::Empty | Cell::Bool(_) => f64::NAN,
    }
}

fn validate_row(row: &RawRow, row_num: usize) -> Result<(), LoaderError> {
    for (col, name) in COLUMN_NAMES.iter().enumerate().skip(1) {
        let cell = row.get(col).unwrap_or(&Cell::Empty);
        let ok = match cell {
            Cell::Number(n) => !n.is_nan(),
            Cell::Text(s) => s.trim().parse::<f64>().is_ok_and(|n| !n.is_nan()),
            Cell::Empty | Cell::Bool(_) => false,
        };
        if !ok {
            return Err(LoaderError::InvalidNumber {
                row: row_num,
                column: name.to_string(),
                value: cell.to_string(),
            });
        }
    }
    Ok(())
}

/// Longest numeric prefix of `text`, or NaN when there is none
///
/// `"12.5km"` reads as 12.5, `"  7"` as 7, `"abc"` and `""` as NaN.
pub fn parse_leading_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if mantissa_digits > 0 || frac_end > frac_start {
            mantissa_digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Efficiency;

    fn header() -> RawRow {
        vec![
            Cell::text("Vehicle No"),
            Cell::text("Distance"),
            Cell::text("Diesel"),
            Cell::text("Tickets"),
        ]
    }

    fn row(no: &str, distance: f64, fuel: f64, sales: f64) -> RawRow {
        vec![Cell::text(no), Cell::Number(distance), Cell::Number(fuel), Cell::Number(sales)]
    }

    #[test]
    fn test_header_is_discarded() {
        let fleet = parse_rows(&[header()], ParseMode::Lenient).unwrap();
        assert!(fleet.is_empty());
        let fleet = parse_rows(&[], ParseMode::Lenient).unwrap();
        assert!(fleet.is_empty());
    }

    #[test]
    fn test_example_fleet() {
        let rows = vec![
            header(),
            row("V1", 100.0, 10.0, 50.0),
            row("V2", 150.0, 0.0, 80.0),
            row("V3", 200.0, 25.0, 120.0),
        ];
        let fleet = parse_rows(&rows, ParseMode::Lenient).unwrap();
        let effs: Vec<Efficiency> = fleet.iter().map(|v| v.efficiency).collect();
        assert_eq!(
            effs,
            vec![Efficiency::Measured(10.0), Efficiency::NoFuel, Efficiency::Measured(8.0)]
        );
        let ids: Vec<&str> = fleet.iter().map(|v| v.vehicle_no.as_str()).collect();
        assert_eq!(ids, vec!["V1", "V2", "V3"]);
    }

    #[test]
    fn test_numeric_vehicle_no_and_text_numbers() {
        let rows = vec![
            header(),
            vec![Cell::Number(101.0), Cell::text("120"), Cell::text(" 12.5L"), Cell::text("30")],
        ];
        let fleet = parse_rows(&rows, ParseMode::Lenient).unwrap();
        let v = &fleet.vehicles()[0];
        assert_eq!(v.vehicle_no, "101");
        assert_eq!(v.distance, 120.0);
        assert_eq!(v.diesel_consumed, 12.5);
        assert_eq!(v.efficiency, Efficiency::Measured(9.6));
    }

    #[test]
    fn test_large_numeric_vehicle_no_uses_exponent_form() {
        let rows = vec![header(), vec![Cell::Number(1e21), Cell::Number(1.0), Cell::Number(1.0), Cell::Number(1.0)]];
        let fleet = parse_rows(&rows, ParseMode::Lenient).unwrap();
        assert_eq!(fleet.vehicles()[0].vehicle_no, "1e+21");
    }

    #[test]
    fn test_malformed_row_is_kept_with_nan() {
        let rows = vec![
            header(),
            vec![Cell::text("V9"), Cell::text("far"), Cell::Number(5.0)],
        ];
        let fleet = parse_rows(&rows, ParseMode::Lenient).unwrap();
        assert_eq!(fleet.len(), 1);
        let v = &fleet.vehicles()[0];
        assert!(v.distance.is_nan());
        assert!(v.ticket_sales.is_nan());
        assert!(v.efficiency.value().is_nan());
    }

    #[test]
    fn test_strict_mode_reports_row_and_column() {
        let rows = vec![
            header(),
            row("V1", 100.0, 10.0, 50.0),
            vec![Cell::text("V2"), Cell::Number(1.0), Cell::text("n/a"), Cell::Number(2.0)],
        ];
        let err = parse_rows(&rows, ParseMode::Strict).unwrap_err();
        match err {
            LoaderError::InvalidNumber { row, column, value } => {
                assert_eq!(row, 3);
                assert_eq!(column, "Diesel Consumed");
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_leading_float() {
        assert_eq!(parse_leading_float("42"), 42.0);
        assert_eq!(parse_leading_float("  -3.5e2xyz"), -350.0);
        assert_eq!(parse_leading_float(".5"), 0.5);
        assert_eq!(parse_leading_float("5."), 5.0);
        assert_eq!(parse_leading_float("7e"), 7.0);
        assert_eq!(parse_leading_float("Infinity"), f64::INFINITY);
        assert!(parse_leading_float("").is_nan());
        assert!(parse_leading_float("abc").is_nan());
        assert!(parse_leading_float("-.").is_nan());
    }
}
