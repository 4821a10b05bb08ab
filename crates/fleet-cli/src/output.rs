//! Output formatting module

use fleet_domain::model::Fleet;
use fleet_domain::service::report::{summary_lines, vehicle_line};
use fleet_domain::service::{generate_fleet_report, FleetSummary};
use fleet_infra::chart_renderer::ChartPaths;
use fleet_types::{OutputFormat, Result};
use serde::Serialize;

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    vehicles: &'a Fleet,
    summary: &'a FleetSummary,
}

pub fn print_vehicles(fleet: &Fleet) {
    if fleet.is_empty() {
        println!("(no vehicles loaded)");
        return;
    }
    for vehicle in fleet {
        println!("{}", vehicle_line(vehicle));
    }
}

pub fn print_summary(summary: &FleetSummary) {
    for line in summary_lines(summary) {
        println!("{}", line);
    }
}

pub fn print_charts(charts: &ChartPaths) {
    println!("Efficiency chart:   {}", charts.efficiency.display());
    println!("Ticket sales chart: {}", charts.ticket_sales.display());
}

pub fn output_analysis(output_format: OutputFormat, fleet: &Fleet, summary: &FleetSummary) -> Result<()> {
    match output_format {
        OutputFormat::Json => {
            let content = serde_json::to_string_pretty(&AnalysisOutput {
                vehicles: fleet,
                summary,
            })?;
            println!("{}", content);
        }
        OutputFormat::Table => {
            println!("{}", generate_fleet_report(fleet, summary));
        }
    }
    Ok(())
}
