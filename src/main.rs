use std::sync::Arc;

use ridebook::config::Config;
use ridebook::db::PgPool;
use ridebook::engine::Engine;
use ridebook::entities::VehicleCatalog;
use ridebook::error::Error;
use ridebook::external::nominatim::NominatimGeocoder;
use ridebook::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let PgPool(pool) = PgPool::new(&config.database_url, config.database_max_connections).await?;

    let geocoder = NominatimGeocoder::new(
        config.nominatim_api_base.clone(),
        config.nominatim_user_agent.clone(),
    );

    let engine = Engine::new(pool, Arc::new(VehicleCatalog::default()), Arc::new(geocoder)).await?;

    serve(engine, config.listen_addr).await
}
