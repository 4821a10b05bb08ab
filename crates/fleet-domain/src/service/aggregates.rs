//! Fleet-wide aggregate calculators
//!
//! Each query walks the whole fleet again; nothing is cached. Sentinel
//! efficiencies take part like any other value.

use fleet_types::{Error, Result};
use serde::Serialize;

use crate::model::{Fleet, Vehicle};

/// Everything the summary display, CSV export and email need
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
    pub total_fuel: f64,
    pub total_ticket_sales: f64,
    pub average_efficiency: f64,
    pub best: Vehicle,
    pub worst: Vehicle,
}

pub fn total_fuel(fleet: &Fleet) -> f64 {
    fleet.iter().map(|v| v.diesel_consumed).sum()
}

pub fn total_ticket_sales(fleet: &Fleet) -> f64 {
    fleet.iter().map(|v| v.ticket_sales).sum()
}

pub fn average_efficiency(fleet: &Fleet) -> Option<f64> {
    if fleet.is_empty() {
        return None;
    }
    let total: f64 = fleet.iter().map(|v| v.efficiency.value()).sum();
    Some(total / fleet.len() as f64)
}

/// Highest efficiency; the earliest vehicle wins ties
pub fn best_vehicle(fleet: &Fleet) -> Option<&Vehicle> {
    extreme(fleet, |candidate, current| candidate > current)
}

/// Lowest efficiency; the earliest vehicle wins ties
pub fn worst_vehicle(fleet: &Fleet) -> Option<&Vehicle> {
    extreme(fleet, |candidate, current| candidate < current)
}

fn extreme(fleet: &Fleet, replaces: impl Fn(f64, f64) -> bool) -> Option<&Vehicle> {
    let mut iter = fleet.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |current, vehicle| {
        if replaces(vehicle.efficiency.value(), current.efficiency.value()) {
            vehicle
        } else {
            current
        }
    }))
}

/// Compute all five aggregates; an empty fleet has nothing to analyze
pub fn summarize(fleet: &Fleet) -> Result<FleetSummary> {
    let (Some(average), Some(best), Some(worst)) = (
        average_efficiency(fleet),
        best_vehicle(fleet),
        worst_vehicle(fleet),
    ) else {
        return Err(Error::NoVehicles);
    };

    Ok(FleetSummary {
        total_fuel: total_fuel(fleet),
        total_ticket_sales: total_ticket_sales(fleet),
        average_efficiency: average,
        best: best.clone(),
        worst: worst.clone(),
    })
}
