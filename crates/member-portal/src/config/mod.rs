use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the portal service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub upstream: UpstreamConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let base_url = env::var("PORTAL_UPSTREAM_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUpstreamUrl(base_url));
        }

        let timeout_secs = env::var("PORTAL_UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidUpstreamTimeout)?;

        let page_size = env::var("PORTAL_DASHBOARD_PAGE_SIZE")
            .unwrap_or_else(|_| DEFAULT_DASHBOARD_PAGE_SIZE.to_string())
            .parse::<usize>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or(ConfigError::InvalidPageSize)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            upstream: UpstreamConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            dashboard: DashboardConfig { page_size },
        })
    }
}

const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:3001";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;
const DEFAULT_DASHBOARD_PAGE_SIZE: usize = 5;

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the membership REST backend the portal talks to.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy)]
pub struct DashboardConfig {
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_DASHBOARD_PAGE_SIZE,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidUpstreamUrl(String),
    InvalidUpstreamTimeout,
    InvalidPageSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidUpstreamUrl(value) => write!(
                f,
                "PORTAL_UPSTREAM_URL must be an http(s) URL, found '{}'",
                value
            ),
            ConfigError::InvalidUpstreamTimeout => write!(
                f,
                "PORTAL_UPSTREAM_TIMEOUT_SECS must be a positive number of seconds"
            ),
            ConfigError::InvalidPageSize => {
                write!(f, "PORTAL_DASHBOARD_PAGE_SIZE must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
