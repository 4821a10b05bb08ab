//! Domain services

pub mod aggregates;
pub mod report;
pub mod row_parser;

pub use aggregates::{
    average_efficiency, best_vehicle, summarize, total_fuel, total_ticket_sales, worst_vehicle,
    FleetSummary,
};
pub use report::generate_fleet_report;
pub use row_parser::{parse_row, parse_rows, ParseMode};
