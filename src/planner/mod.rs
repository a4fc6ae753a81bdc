mod pricing;
mod quote;
mod route;
mod validation;

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveTime};
use futures::future::join_all;
use uuid::Uuid;

pub use pricing::{compute_price, fare, surge_factor, SURGE_PER_EXTRA_PASSENGER};
pub use quote::quote;
pub use route::{compute_route, path_length_km, ComputedRoute};
pub use validation::validate;

use crate::{
    api::{DynGeocoder, RideSubmission},
    auth::User,
    entities::{
        round2, Coordinates, RidePayload, RideRequest, RoutePlan, StopKind, SubmissionReceipt,
        VehicleCatalog, Waypoint,
    },
    error::{validation_error, Error},
};

/// A geocode lookup that has been started for one stop. The stop is found
/// again by id when the answer comes back, so the list may change meanwhile.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingResolution {
    pub stop_id: Uuid,
    pub address: String,
}

#[derive(Debug)]
pub struct ResolutionOutcome {
    pub stop_id: Uuid,
    pub result: Result<(), Error>,
}

/// Owns one booking session's request and keeps its distance and price in
/// step with every edit.
pub struct RoutePlanner {
    request: RideRequest,
    catalog: Arc<VehicleCatalog>,
    geocoder: DynGeocoder,
}

impl RoutePlanner {
    pub fn new(catalog: Arc<VehicleCatalog>, geocoder: DynGeocoder) -> Self {
        Self {
            request: RideRequest::new(),
            catalog,
            geocoder,
        }
    }

    pub fn request(&self) -> &RideRequest {
        &self.request
    }

    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    pub fn label(&self, index: usize) -> Option<String> {
        self.request.label(index)
    }

    #[tracing::instrument(skip(self))]
    pub fn add_stop(&mut self, kind: StopKind) -> usize {
        self.request.push_stop(kind)
    }

    #[tracing::instrument(skip(self))]
    pub fn remove_stop(&mut self, index: usize) -> Result<(), Error> {
        let removed = self.request.take_stop(index)?;

        tracing::info!("removed stop {}", removed.id);

        self.recompute();
        Ok(())
    }

    /// Edits the address text; any earlier fix is dropped with it.
    #[tracing::instrument(skip(self))]
    pub fn set_address(&mut self, index: usize, address: String) -> Result<(), Error> {
        let stop = self
            .request
            .stops
            .get_mut(index)
            .ok_or_else(|| validation_error(format!("no stop at index {}", index)))?;

        stop.address = address;
        stop.coordinates = None;

        self.recompute();
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn begin_resolve(&self, index: usize, address: &str) -> Result<PendingResolution, Error> {
        let address = address.trim();

        if address.is_empty() {
            return Err(validation_error("Please enter an address first"));
        }

        let stop = self
            .request
            .stop(index)
            .ok_or_else(|| validation_error(format!("no stop at index {}", index)))?;

        Ok(PendingResolution {
            stop_id: stop.id,
            address: address.into(),
        })
    }

    /// Stores a geocode answer on its stop. Answers for stops that no longer
    /// exist are dropped and yield `Ok(false)`.
    #[tracing::instrument(skip(self, result))]
    pub fn apply_resolution(
        &mut self,
        pending: PendingResolution,
        result: Result<Coordinates, Error>,
    ) -> Result<bool, Error> {
        let stop = match self.request.stop_mut_by_id(pending.stop_id) {
            Some(stop) => stop,
            None => {
                tracing::warn!("stop {} is gone, ignoring geocode answer", pending.stop_id);
                return Ok(false);
            }
        };

        let coordinates = match result {
            Ok(coordinates) => coordinates,
            Err(err) => {
                tracing::warn!("could not resolve {:?}: {}", pending.address, err);
                return Err(err);
            }
        };

        stop.resolve(pending.address, coordinates);

        self.recompute();
        Ok(true)
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve_stop(&mut self, index: usize, address: &str) -> Result<(), Error> {
        let pending = self.begin_resolve(index, address)?;
        let result = self.geocoder.geocode(&pending.address).await;

        self.apply_resolution(pending, result).map(|_| ())
    }

    /// Looks up every unresolved stop that has an address, all at once.
    #[tracing::instrument(skip(self))]
    pub async fn resolve_pending(&mut self) -> Vec<ResolutionOutcome> {
        let pending: Vec<PendingResolution> = self
            .request
            .stops()
            .iter()
            .filter(|stop| !stop.is_resolved() && !stop.address.trim().is_empty())
            .map(|stop| PendingResolution {
                stop_id: stop.id,
                address: stop.address.trim().into(),
            })
            .collect();

        let geocoder = self.geocoder.clone();
        let lookups = pending.iter().map(|p| geocoder.geocode(&p.address));
        let results = join_all(lookups).await;

        pending
            .into_iter()
            .zip(results)
            .map(|(pending, result)| {
                let stop_id = pending.stop_id;
                let result = self.apply_resolution(pending, result).map(|_| ());

                ResolutionOutcome { stop_id, result }
            })
            .collect()
    }

    pub fn compute_route(&self) -> Option<ComputedRoute> {
        compute_route(self.request.stops())
    }

    pub fn compute_price(
        &self,
        distance_km: f64,
        vehicle_type: &str,
        passenger_count: u32,
    ) -> Result<f64, Error> {
        compute_price(&self.catalog, distance_km, vehicle_type, passenger_count)
    }

    pub fn set_scheduled_date(&mut self, date: NaiveDate) {
        self.request.scheduled_date = Some(date);
    }

    pub fn set_scheduled_time(&mut self, time: NaiveTime) {
        self.request.scheduled_time = Some(time);
    }

    #[tracing::instrument(skip(self))]
    pub fn set_passenger_count(&mut self, passenger_count: u32) -> Result<(), Error> {
        if passenger_count == 0 {
            return Err(validation_error("Number of passengers must be positive"));
        }

        self.request.passenger_count = passenger_count;

        self.recompute();
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn set_vehicle_type(&mut self, vehicle_type: &str) -> Result<(), Error> {
        self.catalog.find(vehicle_type)?;
        self.request.vehicle_type = Some(vehicle_type.into());

        self.recompute();
        Ok(())
    }

    pub fn validate_for_submission(&self) -> Result<(), Error> {
        validate(&self.request, &self.catalog, Local::now().date_naive()).map(|_| ())
    }

    #[tracing::instrument(skip(self))]
    pub fn build_route_plan(&self) -> Result<RoutePlan, Error> {
        let route = validate(&self.request, &self.catalog, Local::now().date_naive())?;
        self.plan_for(route)
    }

    /// The wire form of the current request, ready for the ride store.
    pub fn build_payload(&self) -> Result<RidePayload, Error> {
        let plan = self.build_route_plan()?;

        let waypoints = |kind: StopKind| -> Vec<Waypoint> {
            self.request
                .stops()
                .iter()
                .filter(|stop| stop.kind == kind)
                .filter_map(|stop| {
                    stop.coordinates
                        .map(|coordinates| Waypoint::new(coordinates, stop.address.clone()))
                })
                .collect()
        };

        // every field below was checked by the validation inside build_route_plan
        let (date, time, vehicle_type) = match (
            self.request.scheduled_date(),
            self.request.scheduled_time(),
            self.request.vehicle_type(),
        ) {
            (Some(date), Some(time), Some(vehicle_type)) => (date, time, vehicle_type),
            _ => return Err(validation_error("incomplete request")),
        };

        Ok(RidePayload {
            pickups: waypoints(StopKind::Pickup),
            dropoffs: waypoints(StopKind::Dropoff),
            route_sequence: plan.sequence().to_vec(),
            scheduled_date: date,
            scheduled_time: time.format("%H:%M").to_string(),
            passenger_count: self.request.passenger_count(),
            vehicle_type: vehicle_type.into(),
            price: plan.price(),
            distance: plan.display_distance_km(),
        })
    }

    /// Sends the request once. Nothing guards against a retried submission
    /// creating a second ride.
    #[tracing::instrument(skip(self, submitter))]
    pub async fn submit(
        &mut self,
        user: User,
        submitter: &(dyn RideSubmission + Send + Sync),
    ) -> Result<SubmissionReceipt, Error> {
        let payload = self.build_payload()?;
        let receipt = submitter.submit_ride(user, payload).await?;

        tracing::info!("ride {} submitted", receipt.ride_id);

        self.reset();
        Ok(receipt)
    }

    pub fn reset(&mut self) {
        self.request = RideRequest::new();
    }

    fn plan_for(&self, route: ComputedRoute) -> Result<RoutePlan, Error> {
        let vehicle_type = self
            .request
            .vehicle_type()
            .ok_or_else(|| validation_error("Please select a vehicle type"))?;
        let price = self.compute_price(
            route.distance_km,
            vehicle_type,
            self.request.passenger_count(),
        )?;

        Ok(RoutePlan::new(route.sequence, route.distance_km, price))
    }

    fn recompute(&mut self) {
        let route = match self.compute_route() {
            Some(route) => route,
            None => {
                self.request.distance_km = None;
                self.request.price = None;
                return;
            }
        };

        self.request.distance_km = Some(round2(route.distance_km));
        self.request.price = match self.plan_for(route) {
            Ok(plan) => Some(plan.price()),
            Err(err) => {
                tracing::warn!("could not price route: {}", err);
                None
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Geocoder;
    use crate::error::{address_not_found_error, lookup_failed_error, ErrorKind};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct FixedGeocoder(HashMap<&'static str, Coordinates>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, address: &str) -> Result<Coordinates, Error> {
            if address == "offline" {
                return Err(lookup_failed_error());
            }

            self.0
                .get(address)
                .copied()
                .ok_or_else(address_not_found_error)
        }
    }

    fn planner() -> RoutePlanner {
        let geocoder = FixedGeocoder(HashMap::from([
            ("A", Coordinates::new(0.0, 0.0)),
            ("B", Coordinates::new(0.0, 1.0)),
            ("C", Coordinates::new(0.0, 2.0)),
        ]));

        RoutePlanner::new(Arc::new(VehicleCatalog::default()), Arc::new(geocoder))
    }

    #[test]
    fn resolving_both_ends_prices_the_ride() {
        let mut planner = planner();

        tokio_test::block_on(planner.resolve_stop(0, "A")).unwrap();
        assert_eq!(planner.request().distance_km(), None);

        tokio_test::block_on(planner.resolve_stop(1, "B")).unwrap();

        assert_eq!(planner.request().distance_km(), Some(111.19));
        // 10 + 111.1949 * 2
        assert_eq!(planner.request().price(), Some(232.39));
    }

    #[test]
    fn failed_lookups_leave_the_stop_alone() {
        let mut planner = planner();

        let err = tokio_test::block_on(planner.resolve_stop(0, "nowhere")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AddressNotFound);

        let err = tokio_test::block_on(planner.resolve_stop(0, "offline")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LookupFailed);

        assert!(!planner.request().stops()[0].is_resolved());
    }

    #[test]
    fn blank_address_is_not_looked_up() {
        let mut planner = planner();

        let err = tokio_test::block_on(planner.resolve_stop(0, "   ")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn stale_answer_for_removed_stop_is_ignored() {
        let mut planner = planner();
        let extra = planner.add_stop(StopKind::Dropoff);

        let pending = planner.begin_resolve(extra, "C").unwrap();
        planner.remove_stop(extra).unwrap();

        let applied = planner
            .apply_resolution(pending, Ok(Coordinates::new(0.0, 2.0)))
            .unwrap();

        assert!(!applied);
        assert!(planner.request().stops().iter().all(|s| !s.is_resolved()));
    }

    #[test]
    fn answers_follow_their_stop_when_the_list_shifts() {
        let mut planner = planner();
        planner.add_stop(StopKind::Dropoff);

        let pending = planner.begin_resolve(2, "C").unwrap();
        planner.remove_stop(1).unwrap();

        planner
            .apply_resolution(pending, Ok(Coordinates::new(0.0, 2.0)))
            .unwrap();

        assert!(planner.request().stops()[1].is_resolved());
        assert_eq!(planner.request().stops()[1].address, "C");
    }

    #[test]
    fn resolve_pending_looks_up_every_typed_address() {
        let mut planner = planner();
        planner.add_stop(StopKind::Dropoff);
        planner.set_address(0, "A".into()).unwrap();
        planner.set_address(1, "B".into()).unwrap();
        planner.set_address(2, "nowhere".into()).unwrap();

        let outcomes = tokio_test::block_on(planner.resolve_pending());

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes.iter().filter(|o| o.result.is_ok()).count(), 2);
        assert!(planner.request().price().is_some());
    }

    #[test]
    fn editing_an_address_clears_its_fix() {
        let mut planner = planner();
        tokio_test::block_on(planner.resolve_stop(0, "A")).unwrap();
        tokio_test::block_on(planner.resolve_stop(1, "B")).unwrap();

        planner.set_address(1, "somewhere else".into()).unwrap();

        assert!(!planner.request().stops()[1].is_resolved());
        assert_eq!(planner.request().price(), None);
    }

    #[test]
    fn passenger_and_vehicle_changes_reprice() {
        let mut planner = planner();
        tokio_test::block_on(planner.resolve_stop(0, "A")).unwrap();
        tokio_test::block_on(planner.resolve_stop(1, "B")).unwrap();
        let single = planner.request().price().unwrap();

        planner.set_passenger_count(3).unwrap();
        assert!(planner.request().price().unwrap() > single);

        planner.set_vehicle_type("bike").unwrap();
        assert_eq!(planner.request().vehicle_type(), Some("bike"));

        assert!(planner.set_vehicle_type("zeppelin").is_err());
        assert_eq!(planner.request().vehicle_type(), Some("bike"));

        assert!(planner.set_passenger_count(0).is_err());
    }

    #[test]
    fn remove_stop_keeps_one_of_each_kind() {
        let mut planner = planner();
        let kinds = |planner: &RoutePlanner| -> Vec<StopKind> {
            planner.request().stops().iter().map(|s| s.kind).collect()
        };

        assert_eq!(
            planner.remove_stop(0).unwrap_err().message,
            "minimum stops required"
        );

        // P D P D D
        planner.add_stop(StopKind::Pickup);
        planner.add_stop(StopKind::Dropoff);
        planner.add_stop(StopKind::Dropoff);

        // last stop
        planner.remove_stop(4).unwrap();
        assert_eq!(
            kinds(&planner),
            vec![StopKind::Pickup, StopKind::Dropoff, StopKind::Pickup, StopKind::Dropoff]
        );

        // middle stop
        planner.remove_stop(1).unwrap();
        assert_eq!(
            kinds(&planner),
            vec![StopKind::Pickup, StopKind::Pickup, StopKind::Dropoff]
        );

        // P D D: the only pickup among several drop-offs is refilled
        planner.remove_stop(0).unwrap();
        planner.add_stop(StopKind::Dropoff);
        planner.remove_stop(0).unwrap();
        assert_eq!(
            kinds(&planner),
            vec![StopKind::Dropoff, StopKind::Dropoff, StopKind::Pickup]
        );

        planner.remove_stop(0).unwrap();
        assert_eq!(kinds(&planner), vec![StopKind::Dropoff, StopKind::Pickup]);

        assert!(planner.remove_stop(1).is_err());
        assert!(planner.remove_stop(7).is_err());
        assert_eq!(planner.request().count(StopKind::Pickup), 1);
        assert_eq!(planner.request().count(StopKind::Dropoff), 1);
    }
}
