use chrono::NaiveDate;

use crate::entities::{RideRequest, StopKind, VehicleCatalog};
use crate::error::{capacity_error, validation_error, Error};
use crate::planner::route::{compute_route, ComputedRoute};

/// Checks a request in submission order and stops at the first violation.
/// On success hands back the route the checks were run against.
pub fn validate(
    request: &RideRequest,
    catalog: &VehicleCatalog,
    today: NaiveDate,
) -> Result<ComputedRoute, Error> {
    if request.count(StopKind::Pickup) == 0 || request.count(StopKind::Dropoff) == 0 {
        return Err(validation_error(
            "You need at least one pickup and one drop-off location",
        ));
    }

    if let Some(index) = request.stops().iter().position(|stop| !stop.is_resolved()) {
        let label = request.label(index).unwrap_or_default();
        return Err(validation_error(format!(
            "All stops must have valid locations ({} is not resolved)",
            label
        )));
    }

    let (date, vehicle_type) = match (
        request.scheduled_date(),
        request.scheduled_time(),
        request.vehicle_type(),
    ) {
        (Some(date), Some(_), Some(vehicle_type)) => (date, vehicle_type),
        _ => {
            return Err(validation_error(
                "Please fill in all required fields (date, time, vehicle type)",
            ))
        }
    };

    if date < today {
        return Err(validation_error("Date must not be in the past"));
    }

    let vehicle = catalog.find(vehicle_type)?;

    if !vehicle.fits(request.passenger_count()) {
        return Err(capacity_error(&vehicle.name, vehicle.capacity));
    }

    match compute_route(request.stops()) {
        Some(route) if route.sequence.len() >= 2 => Ok(route),
        _ => Err(validation_error("Failed to create a valid route sequence")),
    }
}
