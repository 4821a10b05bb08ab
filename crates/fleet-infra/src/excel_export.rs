//! Excel export functionality

use std::path::{Path, PathBuf};

use chrono::Local;
use fleet_domain::model::Fleet;
use fleet_domain::service::report::format_fixed2;
use fleet_domain::service::{summarize, FleetSummary};
use fleet_types::{Error, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

pub const EXCEL_FILE_NAME: &str = "vehicle_analysis.xlsx";

fn excel_err(e: XlsxError) -> Error {
    Error::Excel(e.to_string())
}

/// Export the fleet to `vehicle_analysis.xlsx` in `output_dir`
pub fn export_to_excel(fleet: &Fleet, output_dir: &Path) -> Result<PathBuf> {
    let summary = summarize(fleet)?;
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, fleet, &summary)?;

    let vehicles_sheet = workbook.add_worksheet();
    write_vehicles_sheet(vehicles_sheet, fleet)?;

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(EXCEL_FILE_NAME);
    workbook.save(&path).map_err(excel_err)?;
    info!(path = %path.display(), "wrote Excel export");
    Ok(path)
}

/// Excel has no NaN or infinity, so those are written as text
fn write_value(sheet: &mut Worksheet, row: u32, col: u16, value: f64) -> Result<()> {
    if value.is_finite() {
        sheet.write_number(row, col, value).map_err(excel_err)?;
    } else {
        sheet
            .write_string(row, col, format_fixed2(value))
            .map_err(excel_err)?;
    }
    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, fleet: &Fleet, summary: &FleetSummary) -> Result<()> {
    sheet.set_name("Summary").map_err(excel_err)?;
    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Vehicle Efficiency Analysis", &header_format)
        .map_err(excel_err)?;
    sheet.write_string(2, 0, "Generated:").map_err(excel_err)?;
    sheet
        .write_string(2, 1, Local::now().format("%Y-%m-%d %H:%M:%S").to_string())
        .map_err(excel_err)?;
    sheet.write_string(3, 0, "Vehicles:").map_err(excel_err)?;
    sheet.write_number(3, 1, fleet.len() as f64).map_err(excel_err)?;

    sheet.write_string(5, 0, "Total Diesel Consumed (L):").map_err(excel_err)?;
    write_value(sheet, 5, 1, summary.total_fuel)?;
    sheet.write_string(6, 0, "Total Ticket Sales ($):").map_err(excel_err)?;
    write_value(sheet, 6, 1, summary.total_ticket_sales)?;
    sheet.write_string(7, 0, "Average Efficiency (km/l):").map_err(excel_err)?;
    write_value(sheet, 7, 1, summary.average_efficiency)?;

    sheet.write_string(8, 0, "Best Vehicle:").map_err(excel_err)?;
    sheet.write_string(8, 1, &summary.best.vehicle_no).map_err(excel_err)?;
    write_value(sheet, 8, 2, summary.best.efficiency.value())?;
    sheet.write_string(9, 0, "Worst Vehicle:").map_err(excel_err)?;
    sheet.write_string(9, 1, &summary.worst.vehicle_no).map_err(excel_err)?;
    write_value(sheet, 9, 2, summary.worst.efficiency.value())?;

    sheet.set_column_width(0, 28).map_err(excel_err)?;
    sheet.set_column_width(1, 20).map_err(excel_err)?;
    Ok(())
}

fn write_vehicles_sheet(sheet: &mut Worksheet, fleet: &Fleet) -> Result<()> {
    sheet.set_name("Vehicles").map_err(excel_err)?;
    let header_format = Format::new().set_bold();

    let headers = [
        "Vehicle No",
        "Distance (km)",
        "Diesel Consumed (L)",
        "Efficiency (km/l)",
        "Ticket Sales ($)",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(excel_err)?;
    }

    for (idx, vehicle) in fleet.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &vehicle.vehicle_no).map_err(excel_err)?;
        write_value(sheet, row, 1, vehicle.distance)?;
        write_value(sheet, row, 2, vehicle.diesel_consumed)?;
        write_value(sheet, row, 3, vehicle.efficiency.value())?;
        write_value(sheet, row, 4, vehicle.ticket_sales)?;
    }

    for col in 0..headers.len() as u16 {
        sheet.set_column_width(col, 20).map_err(excel_err)?;
    }
    Ok(())
}
