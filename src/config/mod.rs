use std::env;

pub mod cors;
pub mod security;

pub use cors::cors_layer;
pub use security::SecurityHeadersLayer;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24 * 7;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";
const DEV_JWT_SECRET: &str = "development-secret-do-not-use-in-production";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub allowed_origins: Vec<String>,
    pub hsts_enabled: bool,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/gather".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using the development default");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl_hours = env::var("JWT_TTL_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_HOURS);

        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let hsts_enabled = env::var("RUST_ENV")
            .map(|value| value.to_lowercase() == "production")
            .unwrap_or(false);

        Self {
            database_url,
            port,
            jwt_secret,
            token_ttl_hours,
            allowed_origins,
            hsts_enabled,
            smtp: SmtpConfig::from_env(),
        }
    }
}

impl SmtpConfig {
    /// Present only when the full credential set is configured; otherwise the
    /// server falls back to logging notifications instead of sending them.
    fn from_env() -> Option<Self> {
        let host = env::var("SMTP_HOST").ok()?;
        let username = env::var("SMTP_USERNAME").ok()?;
        let password = env::var("SMTP_PASSWORD").ok()?;

        let port = env::var("SMTP_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(587);
        let from_address =
            env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@gather.events".to_string());

        Some(Self {
            host,
            port,
            username,
            password,
            from_address,
        })
    }
}
