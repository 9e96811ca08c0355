//! Runtime settings loaded via OrthoConfig.
//!
//! Sources, lowest to highest precedence: defaults, config file,
//! `EXPENSES_*` environment variables, CLI flags.

use std::net::SocketAddr;

use expense_tracker::domain::TokenTtl;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_TOKEN_TTL_HOURS: u32 = 120;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";

#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXPENSES")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL; in-memory storage is used when absent.
    pub database_url: Option<String>,
    /// Lifetime of issued bearer tokens; zero falls back to the default.
    #[ortho_config(default = DEFAULT_TOKEN_TTL_HOURS)]
    pub token_ttl_hours: u32,
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
    /// Comma-separated browser origins allowed to call the API with credentials.
    pub cors_origins: Option<String>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn token_ttl(&self) -> TokenTtl {
        match self.token_ttl_hours {
            0 => TokenTtl::hours(DEFAULT_TOKEN_TTL_HOURS),
            hours => TokenTtl::hours(hours),
        }
    }

    pub fn db_max_connections(&self) -> u32 {
        match self.db_max_connections {
            0 => DEFAULT_DB_MAX_CONNECTIONS,
            size => size,
        }
    }

    pub fn cors_origins(&self) -> Vec<String> {
        let origins: Vec<String> = self
            .cors_origins
            .as_deref()
            .unwrap_or(DEFAULT_CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.is_empty() {
            vec![DEFAULT_CORS_ORIGINS.to_owned()]
        } else {
            origins
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}
