use axum::extract::{Extension, Json};

use crate::api::QuoteAPI;
use crate::entities::{Quote, QuoteRequest};
use crate::error::Error;
use crate::server::DynAPI;

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<Option<Quote>>, Error> {
    let quote = api.create_quote(request).await?;

    Ok(quote.into())
}
