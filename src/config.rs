use std::net::SocketAddr;
use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    /// When disabled, booking reads are unscoped for any authenticated
    /// caller and deletes are admin-only.
    pub owner_scoped_bookings: bool,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")?,
            host: env_or("APP_HOST", "0.0.0.0"),
            port: env_parse("APP_PORT", 8080),
            jwt: JwtConfig {
                secret: std::env::var("JWT_SECRET")?,
                issuer: env_or("JWT_ISSUER", "tablebook"),
                audience: env_or("JWT_AUDIENCE", "tablebook-users"),
                ttl_minutes: env_parse("JWT_TTL_MINUTES", 60),
                refresh_ttl_minutes: env_parse("JWT_REFRESH_TTL_MINUTES", 60 * 24 * 14),
            },
            owner_scoped_bookings: env_parse("BOOKING_OWNER_SCOPING", true),
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
