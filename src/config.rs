/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings the token verifier needs. Kept apart from `Config` so the auth
/// service can be built in tests without touching the environment.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub issuer: String,
    pub audience: String,
    pub jwks_url: Url,
    pub jwks_fetch_timeout: Duration,
    pub jwks_min_refresh_interval: Duration,
    pub leeway_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub database_max_connections: u32,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth: AuthSettings,

    pub reset_database: bool,
    pub excited: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth_issuer =
            std::env::var("AUTH_ISSUER").map_err(|_| ConfigError::Missing("AUTH_ISSUER"))?;

        let auth_audience =
            std::env::var("AUTH_AUDIENCE").map_err(|_| ConfigError::Missing("AUTH_AUDIENCE"))?;

        let jwks_url = match std::env::var("AUTH_JWKS_URL") {
            Ok(raw) => Url::parse(&raw).map_err(|_| ConfigError::Invalid("AUTH_JWKS_URL"))?,
            Err(_) => default_jwks_url(&auth_issuer)?,
        };

        let jwks_fetch_timeout_seconds = std::env::var("JWKS_FETCH_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5);

        let jwks_min_refresh_seconds = std::env::var("JWKS_MIN_REFRESH_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let access_token_leeway_seconds = std::env::var("ACCESS_TOKEN_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        Ok(Self {
            addr,
            database_url: normalize_database_url(database_url),
            database_max_connections,
            app_env,
            cors_allowed_origins,
            auth: AuthSettings {
                issuer: auth_issuer,
                audience: auth_audience,
                jwks_url,
                jwks_fetch_timeout: Duration::from_secs(jwks_fetch_timeout_seconds),
                jwks_min_refresh_interval: Duration::from_secs(jwks_min_refresh_seconds),
                leeway_seconds: access_token_leeway_seconds,
            },
            reset_database: env_flag("RESET_DATABASE"),
            excited: env_flag("EXCITED"),
        })
    }
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

// Hosting providers still hand out `postgres://` URLs.
fn normalize_database_url(url: String) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{rest}"),
        None => url,
    }
}

/// `https://tenant.auth0.com/` -> `https://tenant.auth0.com/.well-known/jwks.json`
pub fn default_jwks_url(issuer: &str) -> Result<Url, ConfigError> {
    let mut base = Url::parse(issuer).map_err(|_| ConfigError::Invalid("AUTH_ISSUER"))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(".well-known/jwks.json")
        .map_err(|_| ConfigError::Invalid("AUTH_ISSUER"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwks_url_is_derived_from_issuer() {
        let url = default_jwks_url("https://tenant.auth0.com/").unwrap();
        assert_eq!(url.as_str(), "https://tenant.auth0.com/.well-known/jwks.json");

        let url = default_jwks_url("https://idp.example.com/realms/casting").unwrap();
        assert_eq!(
            url.as_str(),
            "https://idp.example.com/realms/casting/.well-known/jwks.json"
        );
    }

    #[test]
    fn issuer_must_be_a_url() {
        assert!(matches!(
            default_jwks_url("not a url"),
            Err(ConfigError::Invalid("AUTH_ISSUER"))
        ));
    }

    #[test]
    fn postgres_scheme_is_normalized() {
        assert_eq!(
            normalize_database_url("postgres://u:p@db/casting".to_string()),
            "postgresql://u:p@db/casting"
        );
        assert_eq!(
            normalize_database_url("postgresql://u:p@db/casting".to_string()),
            "postgresql://u:p@db/casting"
        );
    }
}
