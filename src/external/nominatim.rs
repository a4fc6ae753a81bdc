use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    api::Geocoder,
    entities::Coordinates,
    error::{address_not_found_error, lookup_failed_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}

impl Place {
    pub fn coordinates(&self) -> Result<Coordinates, Error> {
        let longitude: f64 = self.lon.parse().map_err(|_| lookup_failed_error())?;
        let latitude: f64 = self.lat.parse().map_err(|_| lookup_failed_error())?;

        Ok(Coordinates::new(longitude, latitude))
    }
}

/// OpenStreetMap Nominatim search, first match only.
#[derive(Clone, Debug)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    api_base: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(api_base: String, user_agent: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            user_agent,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn search(&self, address: &str) -> Result<Vec<Place>, Error> {
        let url = format!("https://{}/search", self.api_base);

        let res = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|err| {
                tracing::warn!("nominatim request failed: {}", err);
                lookup_failed_error()
            })?;

        let status_code = res.status().as_u16();

        if status_code != 200 {
            tracing::warn!("nominatim responded with {}", status_code);
            return Err(lookup_failed_error());
        }

        let places: Vec<Place> = res.json().await.map_err(|_| lookup_failed_error())?;

        Ok(places)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[tracing::instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<Coordinates, Error> {
        let places = self.search(address).await?;

        places
            .first()
            .ok_or_else(address_not_found_error)?
            .coordinates()
    }
}
