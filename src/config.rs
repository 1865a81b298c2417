use std::{env, net::SocketAddr};

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://carsharing.db";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub max_connections: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse().map_err(|err| {
                AppError::Config(format!("invalid DATABASE_MAX_CONNECTIONS: {err}"))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            listen_addr,
            max_connections,
        })
    }

    /// Config for a database at `database_url` with every other knob at its default.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}
