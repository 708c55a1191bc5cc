use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use relay_client::{Url, DEFAULT_COUNTRIES_URL, DEFAULT_POSTS_URL};
use relay_retry::{ExponentialBackoff, DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CSV_PATH: &str = "countries.csv";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error(transparent)]
    Retry(#[from] relay_retry::Error),
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
    pub countries_url: Url,
    pub posts_url: Url,
    pub csv_path: PathBuf,
    pub retry_policy: ExponentialBackoff,
    pub http_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the settings from any variable source; unset variables take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;
        let host = parse_or(&lookup, "RELAY_BIND_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;

        let log_filter = lookup("RELAY_LOG").unwrap_or_else(|| "info".to_string());

        let countries_url = parse_or_else(&lookup, "RELAY_COUNTRIES_URL", DEFAULT_COUNTRIES_URL)?;
        let posts_url = parse_or_else(&lookup, "RELAY_POSTS_URL", DEFAULT_POSTS_URL)?;

        let csv_path = lookup("RELAY_CSV_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));

        let max_attempts = parse_or(&lookup, "RELAY_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        let base_delay_ms = parse_or(
            &lookup,
            "RELAY_BASE_DELAY_MS",
            DEFAULT_BASE_DELAY.as_millis() as u64,
        )?;
        let retry_policy =
            ExponentialBackoff::new(max_attempts, Duration::from_millis(base_delay_ms))?;

        let http_timeout_secs = parse_or(
            &lookup,
            "RELAY_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT.as_secs(),
        )?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            log_filter,
            countries_url,
            posts_url,
            csv_path,
            retry_policy,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, SettingsError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| SettingsError::Invalid {
            name,
            reason: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}

fn parse_or_else<F, T>(lookup: &F, name: &'static str, default: &str) -> Result<T, SettingsError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|e: T::Err| SettingsError::Invalid {
        name,
        reason: format!("{raw:?}: {e}"),
    })
}
