//! Service configuration, read from environment variables.
//!
//! | Variable                   | Default        |
//! |----------------------------|----------------|
//! | `RECORDS_BIND_ADDR`        | `0.0.0.0:3000` |
//! | `RECORDS_MAX_PAGE_SIZE`    | unset (no cap) |
//! | `RECORDS_MAX_UPLOAD_BYTES` | `10485760`     |
//! | `RECORDS_CSV_DELIMITER`    | `,`            |
//! | `RECORDS_LOG_FORMAT`       | `pretty`       |
//! | `RECORDS_UPLOAD_DIR`       | system temp    |

use std::path::PathBuf;

use thiserror::Error;

use crate::telemetry::LogFormat;

const BIND_ADDR_ENV: &str = "RECORDS_BIND_ADDR";
const MAX_PAGE_SIZE_ENV: &str = "RECORDS_MAX_PAGE_SIZE";
const MAX_UPLOAD_BYTES_ENV: &str = "RECORDS_MAX_UPLOAD_BYTES";
const CSV_DELIMITER_ENV: &str = "RECORDS_CSV_DELIMITER";
const LOG_FORMAT_ENV: &str = "RECORDS_LOG_FORMAT";
const UPLOAD_DIR_ENV: &str = "RECORDS_UPLOAD_DIR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {key}={value:?}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

/// Runtime settings for the records service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: String,
    /// Upper bound applied to every page. `None` returns the whole
    /// remainder when a query asks for no limit.
    pub max_page_size: Option<usize>,
    pub max_upload_bytes: usize,
    pub csv_delimiter: u8,
    pub log_format: LogFormat,
    /// Where uploads are staged while they are ingested.
    pub upload_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_page_size: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            csv_delimiter: b',',
            log_format: LogFormat::default(),
            upload_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = get(BIND_ADDR_ENV).unwrap_or(defaults.bind_addr);

        let max_page_size = get(MAX_PAGE_SIZE_ENV)
            .map(|v| parse_positive(MAX_PAGE_SIZE_ENV, &v))
            .transpose()?;

        let max_upload_bytes = get(MAX_UPLOAD_BYTES_ENV)
            .map(|v| parse_positive(MAX_UPLOAD_BYTES_ENV, &v))
            .transpose()?
            .unwrap_or(defaults.max_upload_bytes);

        let csv_delimiter = match get(CSV_DELIMITER_ENV) {
            Some(v) => parse_delimiter(&v)?,
            None => defaults.csv_delimiter,
        };

        let log_format = match get(LOG_FORMAT_ENV) {
            Some(v) => v.parse::<LogFormat>().map_err(|reason| ConfigError {
                key: LOG_FORMAT_ENV,
                value: v.clone(),
                reason,
            })?,
            None => defaults.log_format,
        };

        let upload_dir = get(UPLOAD_DIR_ENV).map(PathBuf::from);

        Ok(Self {
            bind_addr,
            max_page_size,
            max_upload_bytes,
            csv_delimiter,
            log_format,
            upload_dir,
        })
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError {
            key,
            value: value.to_string(),
            reason: "expected a positive integer".into(),
        }),
    }
}

fn parse_delimiter(value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [b'\\', b't'] => Ok(b'\t'),
        [byte] => Ok(*byte),
        _ => Err(ConfigError {
            key: CSV_DELIMITER_ENV,
            value: value.to_string(),
            reason: "expected a single ASCII character or \\t".into(),
        }),
    }
}
