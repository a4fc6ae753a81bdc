use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Pickup,
    Dropoff,
}

impl StopKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pickup => "Pickup",
            Self::Dropoff => "Drop-off",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: Uuid,
    pub kind: StopKind,
    pub address: String,
    pub coordinates: Option<Coordinates>,
}

impl Stop {
    pub fn new(kind: StopKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            address: String::new(),
            coordinates: None,
        }
    }

    pub fn resolved(kind: StopKind, address: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            address: address.into(),
            coordinates: Some(coordinates),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinates.is_some()
    }

    pub fn resolve(&mut self, address: String, coordinates: Coordinates) {
        self.address = address;
        self.coordinates = Some(coordinates);
    }
}
