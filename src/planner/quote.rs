use crate::entities::{Quote, QuoteRequest, RoutePlan, VehicleCatalog};
use crate::error::{capacity_error, validation_error, Error};
use crate::planner::{compute_price, compute_route};

/// Prices already-resolved stops without a booking session. Returns
/// `Ok(None)` when the stops do not make a route.
pub fn quote(catalog: &VehicleCatalog, request: QuoteRequest) -> Result<Option<Quote>, Error> {
    if request.passenger_count == 0 {
        return Err(validation_error("Number of passengers must be positive"));
    }

    if request.stops.iter().any(|stop| !stop.coordinates.is_finite()) {
        return Err(validation_error("One or more locations are invalid"));
    }

    let vehicle = catalog.find(&request.vehicle_type)?;

    if !vehicle.fits(request.passenger_count) {
        return Err(capacity_error(&vehicle.name, vehicle.capacity));
    }

    let route = match compute_route(&request.to_stops()) {
        Some(route) => route,
        None => return Ok(None),
    };

    let price = compute_price(
        catalog,
        route.distance_km,
        &request.vehicle_type,
        request.passenger_count,
    )?;

    let plan = RoutePlan::new(route.sequence, route.distance_km, price);

    Ok(Some(Quote::new(
        plan,
        request.vehicle_type,
        request.passenger_count,
    )))
}
