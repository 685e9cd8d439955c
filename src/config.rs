use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => database_url_from_parts(
                &std::env::var("DB_HOST").context("DATABASE_URL or DB_HOST is required")?,
                &std::env::var("DB_PORT").unwrap_or_else(|_| "5432".into()),
                &std::env::var("DB_USER").context("DB_USER is required")?,
                &std::env::var("DB_NAME").context("DB_NAME is required")?,
                std::env::var("DB_PASSWORD").ok().as_deref(),
            ),
        };

        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET is required")?;
        anyhow::ensure!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let jwt = JwtConfig {
            secret,
            ttl_minutes: parse_ttl_minutes(std::env::var("JWT_TTL_MINUTES").ok().as_deref())?,
        };

        let port = std::env::var("APP_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);

        Ok(Self {
            database_url,
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port,
            jwt,
        })
    }
}

/// Longest accepted token lifetime: 30 days.
const MAX_TTL_MINUTES: i64 = 30 * 24 * 60;

/// `JWT_TTL_MINUTES`, defaulting to an hour.
pub fn parse_ttl_minutes(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(60);
    };
    let ttl = raw
        .parse::<i64>()
        .with_context(|| format!("JWT_TTL_MINUTES is not an integer: {raw}"))?;
    anyhow::ensure!(
        (1..=MAX_TTL_MINUTES).contains(&ttl),
        "JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {ttl}"
    );
    Ok(ttl)
}

/// Builds a postgres URL from the discrete `DB_*` variables.
pub fn database_url_from_parts(
    host: &str,
    port: &str,
    user: &str,
    name: &str,
    password: Option<&str>,
) -> String {
    match password.filter(|p| !p.is_empty()) {
        Some(password) => format!("postgres://{user}:{password}@{host}:{port}/{name}"),
        None => format!("postgres://{user}@{host}:{port}/{name}?sslmode=disable"),
    }
}
