//! Vehicle record type definitions

use serde::{Serialize, Serializer};

use crate::service::report::format_fixed2;

/// Distance per litre of diesel, already rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Efficiency {
    /// distance / diesel_consumed for a vehicle that burned fuel (may be NaN)
    Measured(f64),
    /// Zero sentinel used when no positive fuel figure is available
    NoFuel,
}

impl Efficiency {
    /// Numeric form used by every aggregate; the sentinel counts as 0
    pub fn value(&self) -> f64 {
        match self {
            Efficiency::Measured(v) => *v,
            Efficiency::NoFuel => 0.0,
        }
    }
}

impl std::fmt::Display for Efficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Efficiency::Measured(v) => write!(f, "{}", format_fixed2(*v)),
            Efficiency::NoFuel => write!(f, "0"),
        }
    }
}

impl Serialize for Efficiency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value())
    }
}

/// One vehicle's operating record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    /// Identifier exactly as it appeared in the sheet
    pub vehicle_no: String,
    /// km
    pub distance: f64,
    /// L
    pub diesel_consumed: f64,
    pub ticket_sales: f64,
    pub efficiency: Efficiency,
}

impl Vehicle {
    /// Build a record, deriving efficiency from distance and fuel
    pub fn new(vehicle_no: impl Into<String>, distance: f64, diesel_consumed: f64, ticket_sales: f64) -> Self {
        Self {
            vehicle_no: vehicle_no.into(),
            distance,
            diesel_consumed,
            ticket_sales,
            efficiency: compute_efficiency(distance, diesel_consumed),
        }
    }
}

/// `NaN > 0.0` is false, so malformed fuel lands on the sentinel as well
pub fn compute_efficiency(distance: f64, diesel_consumed: f64) -> Efficiency {
    if diesel_consumed > 0.0 {
        Efficiency::Measured(round2(distance / diesel_consumed))
    } else {
        Efficiency::NoFuel
    }
}

/// Round through the two-decimal text form so the stored figure is the
/// one that gets displayed
fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format_fixed2(value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efficiency_rounds_to_two_decimals() {
        let v = Vehicle::new("V1", 100.0, 3.0, 0.0);
        assert_eq!(v.efficiency, Efficiency::Measured(33.33));
        assert_eq!(v.efficiency.to_string(), "33.33");
    }

    #[test]
    fn test_efficiency_uses_stored_quotient() {
        // 223 / 200 is stored just below 1.115
        let v = Vehicle::new("V7", 223.0, 200.0, 0.0);
        assert_eq!(v.efficiency, Efficiency::Measured(1.11));
        assert_eq!(v.efficiency.to_string(), "1.11");

        let v = Vehicle::new("V8", 81.0, 8.0, 0.0);
        assert_eq!(v.efficiency, Efficiency::Measured(10.13));
    }

    #[test]
    fn test_zero_fuel_is_sentinel() {
        let v = Vehicle::new("V2", 150.0, 0.0, 80.0);
        assert_eq!(v.efficiency, Efficiency::NoFuel);
        assert_eq!(v.efficiency.value(), 0.0);
        assert_eq!(v.efficiency.to_string(), "0");
    }

    #[test]
    fn test_negative_and_nan_fuel_are_sentinel() {
        assert_eq!(compute_efficiency(10.0, -5.0), Efficiency::NoFuel);
        assert_eq!(compute_efficiency(10.0, f64::NAN), Efficiency::NoFuel);
    }

    #[test]
    fn test_nan_distance_propagates() {
        let eff = compute_efficiency(f64::NAN, 4.0);
        assert!(eff.value().is_nan());
        assert_eq!(eff.to_string(), "NaN");
    }

    #[test]
    fn test_serializes_as_number() {
        let v = Vehicle::new("V1", 100.0, 10.0, 50.0);
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["efficiency"], serde_json::json!(10.0));
        assert_eq!(json["vehicle_no"], "V1");
    }
}
