use serde::{Deserialize, Serialize};

use crate::error::{unknown_vehicle_error, Error};

pub const DEFAULT_VEHICLE_TYPE: &str = "sedan";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleOption {
    pub id: String,
    pub name: String,
    pub capacity: u32,
    pub base_price: f64,
    pub price_per_km: f64,
}

impl VehicleOption {
    pub fn new(id: &str, name: &str, capacity: u32, base_price: f64, price_per_km: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
            base_price,
            price_per_km,
        }
    }

    pub fn fits(&self, passenger_count: u32) -> bool {
        passenger_count <= self.capacity
    }
}

/// Read-only, ordered table of the vehicles a ride can be booked with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleCatalog {
    options: Vec<VehicleOption>,
}

impl VehicleCatalog {
    pub fn new(options: Vec<VehicleOption>) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &[VehicleOption] {
        &self.options
    }

    pub fn find(&self, id: &str) -> Result<&VehicleOption, Error> {
        self.options
            .iter()
            .find(|option| option.id == id)
            .ok_or_else(|| unknown_vehicle_error(id))
    }
}

impl Default for VehicleCatalog {
    fn default() -> Self {
        Self::new(vec![
            VehicleOption::new("bike", "Bike", 1, 5.0, 1.5),
            VehicleOption::new("sedan", "Sedan Car", 4, 10.0, 2.0),
            VehicleOption::new("suv", "SUV", 6, 15.0, 2.5),
            VehicleOption::new("minivan", "Mini Van", 8, 20.0, 3.0),
            VehicleOption::new("bus", "Bus", 20, 50.0, 4.0),
        ])
    }
}
