//! Ordered collection of the vehicles loaded from one upload

use serde::Serialize;

use super::Vehicle;

/// Vehicles in input row order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}
