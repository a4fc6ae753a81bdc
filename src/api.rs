use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::User;
use crate::entities::{
    Coordinates, Quote, QuoteRequest, Ride, RidePayload, SubmissionReceipt, VehicleOption,
};
use crate::error::Error;

/// Address to coordinates. Implementations report an empty answer as
/// `address not found` and anything else that goes wrong as `lookup failed`.
#[async_trait]
pub trait Geocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates, Error>;
}

pub type DynGeocoder = Arc<dyn Geocoder + Send + Sync>;

#[async_trait]
pub trait RideSubmission {
    async fn submit_ride(&self, user: User, payload: RidePayload)
        -> Result<SubmissionReceipt, Error>;
}

#[async_trait]
pub trait RideAPI: RideSubmission {
    async fn find_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;
    async fn list_rides(&self, user: User) -> Result<Vec<Ride>, Error>;
    async fn accept_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;
    async fn cancel_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;
    async fn complete_ride(&self, user: User, id: Uuid) -> Result<Ride, Error>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn create_quote(&self, request: QuoteRequest) -> Result<Option<Quote>, Error>;
    fn list_vehicles(&self) -> Vec<VehicleOption>;
}

#[async_trait]
pub trait GeocodeAPI {
    async fn geocode_address(&self, user: User, address: String) -> Result<Coordinates, Error>;
}

pub trait API: RideAPI + QuoteAPI + GeocodeAPI {}
