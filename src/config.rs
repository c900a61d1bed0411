use std::env;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_PAGE_SIZE: usize = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub bind_addr: SocketAddr,
    pub page_size: NonZeroUsize,
    pub request_timeout: Duration,
    pub notification_ttl: Duration,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `new_from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::Config("API_BASE_URL is not set".to_string()))?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is invalid: {}", e)))?;

        let page_size = match lookup("PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<NonZeroUsize>()
                .map_err(|_| {
                    AppError::Config(format!(
                        "PAGE_SIZE must be a positive integer, got {:?}",
                        raw
                    ))
                })?,
            None => NonZeroUsize::new(DEFAULT_PAGE_SIZE).ok_or_else(|| {
                AppError::Config("default page size must be positive".to_string())
            })?,
        };

        let request_timeout = Duration::from_secs(seconds(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        let notification_ttl = Duration::from_secs(seconds(
            &lookup,
            "NOTIFICATION_TTL_SECS",
            DEFAULT_NOTIFICATION_TTL_SECS,
        )?);

        Ok(Self {
            api_base_url,
            bind_addr,
            page_size,
            request_timeout,
            notification_ttl,
        })
    }
}

fn seconds<F>(lookup: &F, key: &str, default: u64) -> Result<u64, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| {
                AppError::Config(format!(
                    "{} must be a number of seconds, got {:?}",
                    key, raw
                ))
            }),
        None => Ok(default),
    }
}
