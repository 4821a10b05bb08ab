//! CSV export of the vehicle table and fleet aggregates
//!
//! Fields are joined with commas as-is; embedded commas or quotes in a
//! vehicle identifier are not escaped.

use std::path::{Path, PathBuf};

use fleet_domain::model::Fleet;
use fleet_domain::service::report::{format_fixed2, format_number};
use fleet_domain::service::{summarize, FleetSummary};
use fleet_types::Result;
use tracing::info;

pub const CSV_FILE_NAME: &str = "vehicle_analysis.csv";

const HEADER: [&str; 5] = [
    "Vehicle No",
    "Distance (km)",
    "Diesel Consumed (L)",
    "Efficiency (km/l)",
    "Ticket Sales ($)",
];

/// Header, one row per vehicle, a blank separator, then five summary rows
pub fn csv_rows(fleet: &Fleet, summary: &FleetSummary) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(fleet.len() + 7);
    rows.push(HEADER.iter().map(|h| h.to_string()).collect());
    for vehicle in fleet {
        rows.push(vec![
            vehicle.vehicle_no.clone(),
            format_number(vehicle.distance),
            format_number(vehicle.diesel_consumed),
            vehicle.efficiency.to_string(),
            format_number(vehicle.ticket_sales),
        ]);
    }
    rows.push(Vec::new());
    rows.push(vec!["Total Diesel Consumed:".to_string(), format_fixed2(summary.total_fuel)]);
    rows.push(vec!["Total Ticket Sales:".to_string(), format_fixed2(summary.total_ticket_sales)]);
    rows.push(vec!["Average Efficiency:".to_string(), format_fixed2(summary.average_efficiency)]);
    rows.push(vec![
        "Best Vehicle:".to_string(),
        summary.best.vehicle_no.clone(),
        "Efficiency:".to_string(),
        summary.best.efficiency.to_string(),
    ]);
    rows.push(vec![
        "Worst Vehicle:".to_string(),
        summary.worst.vehicle_no.clone(),
        "Efficiency:".to_string(),
        summary.worst.efficiency.to_string(),
    ]);
    rows
}

pub fn build_csv_content(fleet: &Fleet, summary: &FleetSummary) -> String {
    csv_rows(fleet, summary)
        .iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `vehicle_analysis.csv` into `output_dir`
pub fn export_csv(fleet: &Fleet, output_dir: &Path) -> Result<PathBuf> {
    let summary = summarize(fleet)?;
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(CSV_FILE_NAME);
    std::fs::write(&path, build_csv_content(fleet, &summary))?;
    info!(path = %path.display(), vehicles = fleet.len(), "wrote CSV export");
    Ok(path)
}
