use axum::extract::{Extension, Json, Query};
use serde::{Deserialize, Serialize};

use crate::api::GeocodeAPI;
use crate::auth::User;
use crate::entities::Coordinates;
use crate::error::Error;
use crate::server::DynAPI;

#[derive(Serialize, Deserialize)]
pub struct FindParams {
    address: String,
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    user: User,
    Query(params): Query<FindParams>,
) -> Result<Json<Coordinates>, Error> {
    let coordinates = api.geocode_address(user, params.address).await?;

    Ok(coordinates.into())
}
