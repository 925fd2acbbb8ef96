//! Configuration for Products API

use core_config::{app_info, env_list, server::ServerConfig, AppInfo, FromEnv};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    /// Present when `DATABASE_URL` is set; products are kept in memory otherwise
    pub postgres: Option<PostgresConfig>,
    /// `CORS_ALLOWED_ORIGIN`, comma-separated. Empty disables CORS.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let postgres = match std::env::var_os("DATABASE_URL") {
            Some(_) => Some(PostgresConfig::from_env()?),
            None => None,
        };

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            postgres,
            cors_allowed_origins: env_list("CORS_ALLOWED_ORIGIN"),
        })
    }
}
