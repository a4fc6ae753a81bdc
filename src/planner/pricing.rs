use crate::entities::{round2, VehicleCatalog, VehicleOption};
use crate::error::Error;

/// Fare increase for every passenger after the first.
pub const SURGE_PER_EXTRA_PASSENGER: f64 = 0.05;

pub fn surge_factor(passenger_count: u32) -> f64 {
    1.0 + SURGE_PER_EXTRA_PASSENGER * passenger_count.saturating_sub(1) as f64
}

/// `(base + km * per_km) * surge`, rounded to cents.
pub fn fare(vehicle: &VehicleOption, distance_km: f64, passenger_count: u32) -> f64 {
    let linear = vehicle.base_price + distance_km * vehicle.price_per_km;

    round2(linear * surge_factor(passenger_count))
}

pub fn compute_price(
    catalog: &VehicleCatalog,
    distance_km: f64,
    vehicle_type: &str,
    passenger_count: u32,
) -> Result<f64, Error> {
    let vehicle = catalog.find(vehicle_type)?;

    Ok(fare(vehicle, distance_km, passenger_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn sedan_single_passenger() {
        let price = compute_price(&VehicleCatalog::default(), 10.0, "sedan", 1).unwrap();

        assert_eq!(price, 30.0);
    }

    #[test]
    fn sedan_three_passengers_adds_ten_percent() {
        let price = compute_price(&VehicleCatalog::default(), 10.0, "sedan", 3).unwrap();

        assert_eq!(price, 33.0);
    }

    #[test]
    fn zero_distance_costs_the_base_price() {
        let price = compute_price(&VehicleCatalog::default(), 0.0, "bus", 1).unwrap();

        assert_eq!(price, 50.0);
    }

    #[test]
    fn unknown_vehicle_is_not_coerced() {
        let err = compute_price(&VehicleCatalog::default(), 10.0, "rickshaw", 1).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn price_never_drops_as_distance_or_passengers_grow() {
        let catalog = VehicleCatalog::default();

        for vehicle in catalog.options() {
            let mut previous = 0.0;
            for step in 0..200 {
                let price = fare(vehicle, step as f64 * 0.37, 1);
                assert!(price >= previous);
                previous = price;
            }

            let mut previous = 0.0;
            for passengers in 1..=vehicle.capacity {
                let price = fare(vehicle, 12.5, passengers);
                assert!(price >= previous);
                previous = price;
            }
        }
    }
}
