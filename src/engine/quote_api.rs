use super::Engine;

use async_trait::async_trait;

use crate::{
    api::QuoteAPI,
    entities::{Quote, QuoteRequest, VehicleOption},
    error::Error,
    planner,
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_quote(&self, request: QuoteRequest) -> Result<Option<Quote>, Error> {
        planner::quote(&self.catalog, request)
    }

    fn list_vehicles(&self) -> Vec<VehicleOption> {
        self.catalog.options().to_vec()
    }
}
