use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, GeoPoint};
use crate::error::{invalid_invocation_error, validation_error, Error};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub location: GeoPoint,
    pub address: String,
}

impl Waypoint {
    pub fn new(coordinates: Coordinates, address: String) -> Self {
        Self {
            location: coordinates.into(),
            address,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        (&self.location).into()
    }
}

/// What a booking session hands to the ride store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RidePayload {
    pub pickups: Vec<Waypoint>,
    pub dropoffs: Vec<Waypoint>,
    /// Visiting order as indices into the session's stop list, where pickups
    /// and drop-offs are interleaved as entered. These are not positions in
    /// `pickups` or `dropoffs`.
    pub route_sequence: Vec<usize>,
    pub scheduled_date: NaiveDate,
    /// "HH:MM"
    pub scheduled_time: String,
    pub passenger_count: u32,
    pub vehicle_type: String,
    pub price: f64,
    pub distance: f64,
}

impl RidePayload {
    /// Structural checks the store applies before accepting a payload.
    pub fn validate(&self) -> Result<(), Error> {
        if self.pickups.is_empty() || self.dropoffs.is_empty() {
            return Err(validation_error(
                "You need at least one pickup and one drop-off location",
            ));
        }

        let invalid_waypoint = |waypoint: &Waypoint| {
            waypoint.address.trim().is_empty()
                || waypoint.location.kind != "Point"
                || !waypoint.coordinates().is_finite()
        };

        if self.pickups.iter().any(invalid_waypoint) {
            return Err(validation_error("One or more pickup locations are invalid"));
        }

        if self.dropoffs.iter().any(invalid_waypoint) {
            return Err(validation_error(
                "One or more drop-off locations are invalid",
            ));
        }

        let stop_count = self.pickups.len() + self.dropoffs.len();
        let mut seen = vec![false; stop_count];

        if self.route_sequence.len() < 2 {
            return Err(validation_error("Route sequence needs at least two stops"));
        }

        for &index in self.route_sequence.iter() {
            if index >= stop_count || seen[index] {
                return Err(validation_error("Route sequence is invalid"));
            }
            seen[index] = true;
        }

        if chrono::NaiveTime::parse_from_str(&self.scheduled_time, "%H:%M").is_err() {
            return Err(validation_error("Time must be formatted as HH:MM"));
        }

        if self.passenger_count == 0 {
            return Err(validation_error("Number of passengers must be positive"));
        }

        if !(self.price.is_finite() && self.price >= 0.0)
            || !(self.distance.is_finite() && self.distance >= 0.0)
        {
            return Err(validation_error("Price and distance must be non-negative"));
        }

        Ok(())
    }
}

/// Returned by the ride store; displayed as-is by the session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub message: String,
    pub ride_id: Uuid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: Status,
    #[serde(flatten)]
    pub payload: RidePayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Status {
    Pending,
    Confirmed { driver_id: Uuid },
    Cancelled,
    Completed,
}

impl Status {
    pub fn name(&self) -> String {
        match self {
            Self::Pending => "pending".into(),
            Self::Confirmed { driver_id: _ } => "confirmed".into(),
            Self::Cancelled => "cancelled".into(),
            Self::Completed => "completed".into(),
        }
    }
}

impl Ride {
    pub fn new(user_id: Uuid, payload: RidePayload) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            status: Status::Pending,
            payload,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, Status::Pending)
    }

    pub fn driver_id(&self) -> Option<Uuid> {
        match self.status {
            Status::Confirmed { driver_id } => Some(driver_id),
            _ => None,
        }
    }

    #[tracing::instrument(skip(self), fields(ride_id = %self.id))]
    pub fn accept(&mut self, driver_id: Uuid) -> Result<(), Error> {
        match self.status {
            Status::Pending => {
                self.status = Status::Confirmed { driver_id };
                self.touch();
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    #[tracing::instrument(skip(self), fields(ride_id = %self.id))]
    pub fn cancel(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Pending | Status::Confirmed { driver_id: _ } => {
                self.status = Status::Cancelled;
                self.touch();
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    #[tracing::instrument(skip(self), fields(ride_id = %self.id))]
    pub fn complete(&mut self) -> Result<(), Error> {
        match self.status {
            Status::Confirmed { driver_id: _ } => {
                self.status = Status::Completed;
                self.touch();
                Ok(())
            }
            _ => Err(invalid_invocation_error()),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
