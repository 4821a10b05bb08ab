//! Text rendering of vehicles and fleet aggregates

use crate::gateway::EmailMessage;
use crate::model::{Fleet, Vehicle};
use crate::service::FleetSummary;

pub const EMAIL_SUBJECT: &str = "Vehicle Efficiency Analysis Results";

/// Values at or above this magnitude switch to exponent notation
const EXPONENT_UPPER: f64 = 1e21;
/// Values below this magnitude switch to exponent notation
const EXPONENT_LOWER: f64 = 1e-6;

/// Fixed two-decimal form used for every aggregate.
///
/// Rounds to the nearest hundredth; an exact tie goes to the larger
/// magnitude (`10.125` -> `10.13`).
pub fn format_fixed2(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        infinity(value)
    } else if value == 0.0 {
        "0.00".to_string()
    } else if value.abs() >= EXPONENT_UPPER {
        format_number(value)
    } else if let Some(cents) = tie_cents(value.abs()) {
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, cents / 100, cents % 100)
    } else {
        format!("{:.2}", value)
    }
}

/// Hundredths of `magnitude` rounded up, when it sits exactly halfway
/// between two hundredths.
///
/// A binary fraction can only end in a third decimal `5` when it is an
/// odd multiple of 1/8, and scaling by 8 is exact.
fn tie_cents(magnitude: f64) -> Option<u64> {
    let eighths = magnitude * 8.0;
    if eighths.fract() != 0.0 || eighths.rem_euclid(2.0) != 1.0 {
        return None;
    }
    // odd multiples of 1/8 stay below 2^53 eighths
    let eighths = eighths as u64;
    Some((eighths * 25 + 1) / 2)
}

/// Shortest form for raw figures (`100`, `12.5`, `1e-7`, `1e+21`)
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        infinity(value)
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= EXPONENT_UPPER || value.abs() < EXPONENT_LOWER {
        let exp = format!("{:e}", value);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
            _ => exp,
        }
    } else {
        format!("{}", value)
    }
}

fn infinity(value: f64) -> String {
    if value > 0.0 {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

pub fn vehicle_line(vehicle: &Vehicle) -> String {
    format!(
        "Vehicle No: {}, Distance: {} km, Diesel Consumed: {} L, Efficiency: {} km/l, Ticket Sales: ${}",
        vehicle.vehicle_no,
        format_number(vehicle.distance),
        format_number(vehicle.diesel_consumed),
        vehicle.efficiency,
        format_number(vehicle.ticket_sales)
    )
}

pub fn best_vehicle_line(summary: &FleetSummary) -> String {
    format!(
        "Best Vehicle: {} with Efficiency of {} km/l",
        summary.best.vehicle_no, summary.best.efficiency
    )
}

pub fn worst_vehicle_line(summary: &FleetSummary) -> String {
    format!(
        "Worst Vehicle: {} with Efficiency of {} km/l",
        summary.worst.vehicle_no, summary.worst.efficiency
    )
}

/// The five aggregate lines, in display order
pub fn summary_lines(summary: &FleetSummary) -> Vec<String> {
    vec![
        format!("Total Diesel Consumed: {} liters", format_fixed2(summary.total_fuel)),
        format!("Total Ticket Sales: ${}", format_fixed2(summary.total_ticket_sales)),
        format!("Average Efficiency: {} km/l", format_fixed2(summary.average_efficiency)),
        best_vehicle_line(summary),
        worst_vehicle_line(summary),
    ]
}

pub fn analysis_email(to_email: &str, summary: &FleetSummary) -> EmailMessage {
    EmailMessage {
        to_email: to_email.to_string(),
        subject: EMAIL_SUBJECT.to_string(),
        message: format!("{}\n{}", best_vehicle_line(summary), worst_vehicle_line(summary)),
    }
}

pub fn generate_fleet_report(fleet: &Fleet, summary: &FleetSummary) -> String {
    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("            Vehicle Efficiency Report             \n");
    report.push_str("==================================================\n\n");

    report.push_str(&format!("[Vehicles] ({})\n", fleet.len()));
    report.push_str("-".repeat(50).as_str());
    report.push('\n');
    for vehicle in fleet {
        report.push_str(&vehicle_line(vehicle));
        report.push('\n');
    }
    report.push('\n');

    report.push_str("[Summary]\n");
    report.push_str("-".repeat(50).as_str());
    report.push('\n');
    for line in summary_lines(summary) {
        report.push_str("  ");
        report.push_str(&line);
        report.push('\n');
    }
    report.push('\n');
    report.push_str("==================================================\n");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::summarize;

    fn example_fleet() -> Fleet {
        Fleet::from_vehicles(vec![
            Vehicle::new("V1", 100.0, 10.0, 50.0),
            Vehicle::new("V2", 150.0, 0.0, 80.0),
            Vehicle::new("V3", 200.0, 25.0, 120.0),
        ])
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_fixed2(6.0), "6.00");
        assert_eq!(format_fixed2(-0.0), "0.00");
        assert_eq!(format_fixed2(f64::NAN), "NaN");
        assert_eq!(format_fixed2(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_fixed2_ties_round_up() {
        assert_eq!(format_fixed2(10.125), "10.13");
        assert_eq!(format_fixed2(0.125), "0.13");
        assert_eq!(format_fixed2(0.625), "0.63");
        assert_eq!(format_fixed2(-0.125), "-0.13");
        assert_eq!(format_fixed2(2.5), "2.50");
        // 1.115 is stored just below the tie
        assert_eq!(format_fixed2(1.115), "1.11");
        assert_eq!(format_fixed2(1.005), "1.00");
    }

    #[test]
    fn test_tie_totals_in_summary() {
        let fleet = Fleet::from_vehicles(vec![Vehicle::new("A", 10.0, 1.0, 10.125)]);
        let summary = summarize(&fleet).unwrap();
        assert_eq!(summary_lines(&summary)[1], "Total Ticket Sales: $10.13");

        let fleet = Fleet::from_vehicles(vec![
            Vehicle::new("A", 1.0, 4.0, 0.0),
            Vehicle::new("B", 5.0, 0.0, 0.0),
        ]);
        let summary = summarize(&fleet).unwrap();
        assert_eq!(summary_lines(&summary)[2], "Average Efficiency: 0.13 km/l");
    }

    #[test]
    fn test_number_exponent_thresholds() {
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e21), "1.5e+21");
        assert_eq!(format_number(-2e-7), "-2e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_fixed2(1e21), "1e+21");
    }

    #[test]
    fn test_vehicle_line() {
        let line = vehicle_line(&Vehicle::new("V1", 100.0, 10.0, 50.0));
        assert_eq!(
            line,
            "Vehicle No: V1, Distance: 100 km, Diesel Consumed: 10 L, Efficiency: 10.00 km/l, Ticket Sales: $50"
        );
    }

    #[test]
    fn test_summary_lines() {
        let summary = summarize(&example_fleet()).unwrap();
        assert_eq!(
            summary_lines(&summary),
            vec![
                "Total Diesel Consumed: 35.00 liters",
                "Total Ticket Sales: $250.00",
                "Average Efficiency: 6.00 km/l",
                "Best Vehicle: V1 with Efficiency of 10.00 km/l",
                "Worst Vehicle: V2 with Efficiency of 0 km/l",
            ]
        );
    }

    #[test]
    fn test_analysis_email() {
        let summary = summarize(&example_fleet()).unwrap();
        let email = analysis_email("ops@example.com", &summary);
        assert_eq!(email.to_email, "ops@example.com");
        assert_eq!(email.subject, EMAIL_SUBJECT);
        assert_eq!(
            email.message,
            "Best Vehicle: V1 with Efficiency of 10.00 km/l\nWorst Vehicle: V2 with Efficiency of 0 km/l"
        );
    }

    #[test]
    fn test_generate_report() {
        let fleet = example_fleet();
        let summary = summarize(&fleet).unwrap();
        let report = generate_fleet_report(&fleet, &summary);
        assert!(report.contains("Vehicle Efficiency Report"));
        assert!(report.contains("[Vehicles] (3)"));
        assert!(report.contains("Average Efficiency: 6.00 km/l"));
    }
}
