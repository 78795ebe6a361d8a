//! Configuration models loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings of the REST service.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// HMAC secret used to sign admin tokens.
    pub secret: String,
    pub admin_email: String,
    /// Argon2 PHC string of the admin password.
    pub admin_password_hash: String,
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

#[derive(Clone, Debug, Deserialize)]
/// Settings of the terminal dashboard.
pub struct DashboardConfig {
    pub api_url: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_token_ttl_minutes() -> i64 {
    720
}

fn default_poll_interval_secs() -> u64 {
    60
}
