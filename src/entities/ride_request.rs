use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Stop, StopKind, DEFAULT_VEHICLE_TYPE};
use crate::error::{validation_error, Error};

/// An in-progress booking. Always holds at least one pickup and one drop-off.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub(crate) stops: Vec<Stop>,
    pub(crate) scheduled_date: Option<NaiveDate>,
    pub(crate) scheduled_time: Option<NaiveTime>,
    pub(crate) passenger_count: u32,
    pub(crate) vehicle_type: Option<String>,
    pub(crate) distance_km: Option<f64>,
    pub(crate) price: Option<f64>,
}

impl Default for RideRequest {
    fn default() -> Self {
        Self {
            stops: vec![Stop::new(StopKind::Pickup), Stop::new(StopKind::Dropoff)],
            scheduled_date: None,
            scheduled_time: None,
            passenger_count: 1,
            vehicle_type: Some(DEFAULT_VEHICLE_TYPE.into()),
            distance_km: None,
            price: None,
        }
    }
}

impl RideRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop(&self, index: usize) -> Option<&Stop> {
        self.stops.get(index)
    }

    pub fn scheduled_date(&self) -> Option<NaiveDate> {
        self.scheduled_date
    }

    pub fn scheduled_time(&self) -> Option<NaiveTime> {
        self.scheduled_time
    }

    pub fn passenger_count(&self) -> u32 {
        self.passenger_count
    }

    pub fn vehicle_type(&self) -> Option<&str> {
        self.vehicle_type.as_deref()
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn count(&self, kind: StopKind) -> usize {
        self.stops.iter().filter(|stop| stop.kind == kind).count()
    }

    pub(crate) fn stop_mut_by_id(&mut self, stop_id: Uuid) -> Option<&mut Stop> {
        self.stops.iter_mut().find(|stop| stop.id == stop_id)
    }

    pub(crate) fn push_stop(&mut self, kind: StopKind) -> usize {
        self.stops.push(Stop::new(kind));
        self.stops.len() - 1
    }

    /// Removes the stop at `index`, refilling any kind that drops to zero with
    /// a fresh unresolved stop.
    pub(crate) fn take_stop(&mut self, index: usize) -> Result<Stop, Error> {
        if self.stops.len() <= 2 {
            return Err(validation_error("minimum stops required"));
        }

        if index >= self.stops.len() {
            return Err(validation_error(format!("no stop at index {}", index)));
        }

        let removed = self.stops.remove(index);

        for kind in [StopKind::Pickup, StopKind::Dropoff] {
            if self.count(kind) == 0 {
                self.stops.push(Stop::new(kind));
            }
        }

        Ok(removed)
    }

    /// "Pickup 2", "Drop-off 1": numbered per kind in list order.
    pub fn label(&self, index: usize) -> Option<String> {
        let stop = self.stops.get(index)?;
        let number = self.stops[..=index]
            .iter()
            .filter(|other| other.kind == stop.kind)
            .count();

        Some(format!("{} {}", stop.kind.name(), number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_one_stop_of_each_kind() {
        let request = RideRequest::new();

        assert_eq!(request.count(StopKind::Pickup), 1);
        assert_eq!(request.count(StopKind::Dropoff), 1);
        assert_eq!(request.passenger_count(), 1);
        assert_eq!(request.vehicle_type(), Some("sedan"));
    }

    #[test]
    fn labels_are_numbered_per_kind() {
        let mut request = RideRequest::new();
        request.push_stop(StopKind::Pickup);
        request.push_stop(StopKind::Dropoff);

        assert_eq!(request.label(0).as_deref(), Some("Pickup 1"));
        assert_eq!(request.label(1).as_deref(), Some("Drop-off 1"));
        assert_eq!(request.label(2).as_deref(), Some("Pickup 2"));
        assert_eq!(request.label(3).as_deref(), Some("Drop-off 2"));
        assert_eq!(request.label(4), None);
    }

    #[test]
    fn refuses_to_drop_below_two_stops() {
        let mut request = RideRequest::new();

        assert!(request.take_stop(0).is_err());
        assert_eq!(request.stops().len(), 2);
    }

    #[test]
    fn refills_a_kind_that_would_vanish() {
        let mut request = RideRequest::new();
        request.push_stop(StopKind::Dropoff);

        let removed = request.take_stop(0).unwrap();

        assert_eq!(removed.kind, StopKind::Pickup);
        assert_eq!(request.count(StopKind::Pickup), 1);
        assert_eq!(request.count(StopKind::Dropoff), 2);
        assert_eq!(request.stops().last().map(|s| s.kind), Some(StopKind::Pickup));
    }
}
