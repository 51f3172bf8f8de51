use std::{env, path::PathBuf};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind: String,
    pub static_dir: PathBuf,
    pub font_dir: PathBuf,
    pub font_name: String,
    pub venue_name: String,
    pub admin_username: String,
    pub admin_password: String,
    pub pool_size: u32,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        let pool_size = var_or("DB_POOL_SIZE", "8")
            .parse::<u32>()
            .context("DB_POOL_SIZE must be a positive integer")?;

        Ok(Self {
            database_url: var_or("DATABASE_URL", "rota.db"),
            bind: var_or("BIND_ADDR", "127.0.0.1:8080"),
            static_dir: var_or("STATIC_DIR", "./static").into(),
            font_dir: var_or("FONT_DIR", "./fonts").into(),
            font_name: var_or("FONT_NAME", "LiberationSans"),
            venue_name: var_or("VENUE_NAME", "Bowls"),
            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: var_or("ADMIN_PASSWORD", "changeme"),
            pool_size: pool_size.max(1),
        })
    }
}
