use std::env;
use std::net::SocketAddr;

use crate::error::{invalid_input_error, Error};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_NOMINATIM_API_BASE: &str = "nominatim.openstreetmap.org";
const DEFAULT_NOMINATIM_USER_AGENT: &str = "RideBookingApp/1.0";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub listen_addr: SocketAddr,
    pub nominatim_api_base: String,
    pub nominatim_user_agent: String,
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let database_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(value) => value.parse().map_err(|_| invalid_input_error())?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let listen_addr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.into())
            .parse()
            .map_err(|_| invalid_input_error())?;

        Ok(Self {
            database_url,
            database_max_connections,
            listen_addr,
            nominatim_api_base: env::var("NOMINATIM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_API_BASE.into()),
            nominatim_user_agent: env::var("NOMINATIM_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_NOMINATIM_USER_AGENT.into()),
        })
    }
}
