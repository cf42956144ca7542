use std::env;
use std::time::Duration;

use crate::lookup::DEFAULT_CATALOG_URL;

const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE: &str = "bookshelf.db";
const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 6000;

/// Runtime configuration, all of it supplied through the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub database_path: String,
    pub catalog_endpoint: String,
    pub lookup_timeout: Duration,
}

impl ServerConfig {
    /// Reads configuration from the environment. `BOOKSHELF_BIND` wins over
    /// `PORT`; `PORT` alone rewrites the port on the default bind address.
    pub fn from_env() -> Self {
        let bind_addr = env::var("BOOKSHELF_BIND").unwrap_or_else(|_| {
            match env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
                Some(port) => format!("0.0.0.0:{port}"),
                None => DEFAULT_BIND.to_string(),
            }
        });
        Self {
            bind_addr,
            database_path: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE.to_string()),
            catalog_endpoint: env::var("BOOKSHELF_CATALOG_URL")
                .unwrap_or_else(|_| DEFAULT_CATALOG_URL.to_string()),
            lookup_timeout: env_duration_ms("BOOKSHELF_LOOKUP_TIMEOUT_MS", DEFAULT_LOOKUP_TIMEOUT_MS),
        }
    }
}

fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    let ms = env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}
