use super::Engine;

use async_trait::async_trait;

use crate::{
    api::GeocodeAPI,
    auth::User,
    entities::Coordinates,
    error::{validation_error, Error},
};

#[async_trait]
impl GeocodeAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn geocode_address(&self, user: User, address: String) -> Result<Coordinates, Error> {
        let address = address.trim();

        if address.is_empty() {
            return Err(validation_error("Please enter an address first"));
        }

        tracing::debug!("geocode lookup for user {}", user.id);

        self.geocoder.geocode(address).await
    }
}
