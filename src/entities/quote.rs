use serde::{Deserialize, Serialize};

use crate::entities::{Coordinates, RoutePlan, Stop, StopKind};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteStop {
    pub kind: StopKind,
    pub address: String,
    pub coordinates: Coordinates,
}

/// Resolved stops priced without opening a booking session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub stops: Vec<QuoteStop>,
    pub vehicle_type: String,
    pub passenger_count: u32,
}

impl QuoteRequest {
    pub fn to_stops(&self) -> Vec<Stop> {
        self.stops
            .iter()
            .map(|stop| Stop::resolved(stop.kind, stop.address.clone(), stop.coordinates))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub plan: RoutePlan,
    pub vehicle_type: String,
    pub passenger_count: u32,
}

impl Quote {
    pub fn new(plan: RoutePlan, vehicle_type: String, passenger_count: u32) -> Self {
        Self {
            plan,
            vehicle_type,
            passenger_count,
        }
    }
}
