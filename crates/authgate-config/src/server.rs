//! Process-level settings: where to listen and which database to use.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
//! - `HOST`: bind host (default: `0.0.0.0`)
//! - `PORT`: bind port (default: 3000)
//! - `RUN_MIGRATIONS`: apply pending migrations at startup (default: true)

use anyhow::Result;

use crate::env::{optional, parsed_or, process_env, required};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(process_env)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: optional(&lookup, "HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed_or(&lookup, "PORT", 3000)?,
            database_url: required(&lookup, "DATABASE_URL")?,
            database_max_connections: parsed_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            run_migrations: parsed_or(&lookup, "RUN_MIGRATIONS", true)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
