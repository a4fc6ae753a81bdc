mod geocode_api;
mod helpers;
mod quote_api;
mod ride_api;

use std::sync::Arc;

use sqlx::{Executor, Pool, Postgres};

use crate::{
    api::{DynGeocoder, API},
    entities::VehicleCatalog,
    error::Error,
};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
    catalog: Arc<VehicleCatalog>,
    geocoder: DynGeocoder,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(
        pool: Pool<Database>,
        catalog: Arc<VehicleCatalog>,
        geocoder: DynGeocoder,
    ) -> Result<Self, Error> {
        // ride service
        pool.execute("CREATE TABLE IF NOT EXISTS rides (id UUID PRIMARY KEY, user_id UUID NOT NULL, status VARCHAR NOT NULL, created_at TIMESTAMPTZ NOT NULL, data JSONB NOT NULL)")
            .await?;
        pool.execute("CREATE INDEX IF NOT EXISTS rides_user_id_idx ON rides (user_id, created_at DESC)")
            .await?;

        Ok(Self {
            pool,
            catalog,
            geocoder,
        })
    }
}

impl API for Engine {}
