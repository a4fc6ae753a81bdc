use axum::extract::{Extension, Json};

use crate::api::QuoteAPI;
use crate::entities::VehicleOption;
use crate::server::DynAPI;

pub async fn list(Extension(api): Extension<DynAPI>) -> Json<Vec<VehicleOption>> {
    api.list_vehicles().into()
}
