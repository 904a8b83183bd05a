
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgSslMode;
use thiserror::Error;

const HOST_KEYS: &[&str] = &["DB_HOST", "PGHOST", "POSTGRES_HOST"];
const PORT_KEYS: &[&str] = &["DB_PORT", "PGPORT", "POSTGRES_PORT"];
const NAME_KEYS: &[&str] = &["DB_NAME", "PGDATABASE", "POSTGRES_DB"];
const USER_KEYS: &[&str] = &["DB_USER", "PGUSER", "POSTGRES_USER"];
const PASSWORD_KEYS: &[&str] = &["DB_PASSWORD", "PGPASSWORD", "POSTGRES_PASSWORD"];
const SSL_MODE_KEYS: &[&str] = &["DB_SSLMODE", "PGSSLMODE"];
const BATCH_SIZE_KEYS: &[&str] = &["BATCH_SIZE"];
const SLEEP_KEYS: &[&str] = &["SLEEP_SECONDS", "CYCLE_INTERVAL_SECONDS"];
const CONNECT_TIMEOUT_KEYS: &[&str] = &["DB_CONNECT_TIMEOUT", "PGCONNECT_TIMEOUT"];
const MAX_CYCLES_KEYS: &[&str] = &["MAX_CYCLES"];
const SEED_KEYS: &[&str] = &["GENERATOR_SEED"];
const LOG_LEVEL_KEYS: &[&str] = &["LOG_LEVEL"];
const LOG_FILE_KEYS: &[&str] = &["LOG_FILE"];

const DEFAULT_BATCH_SIZE: usize = 10;
const DEFAULT_SLEEP_SECONDS: u64 = 15;
const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting, expected one of: {}", keys.join(", "))]
    Missing { keys: Vec<&'static str> },
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone)]
pub struct Settings {
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_user: String,
    pub db_password: String,
    pub ssl_mode: Option<PgSslMode>,
    pub batch_size: usize,
    pub sleep_interval: Duration,
    pub connect_timeout: Duration,
    pub max_cycles: Option<u64>,
    pub seed: Option<u64>,
}

// password stays out of logs
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("ssl_mode", &self.ssl_mode)
            .field("batch_size", &self.batch_size)
            .field("sleep_interval", &self.sleep_interval)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_cycles", &self.max_cycles)
            .field("seed", &self.seed)
            .finish()
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = Source { lookup };

        Ok(Self {
            db_host: source.required(HOST_KEYS)?.1,
            db_port: source.required_parsed(PORT_KEYS)?,
            db_name: source.required(NAME_KEYS)?.1,
            db_user: source.required(USER_KEYS)?.1,
            db_password: source.required(PASSWORD_KEYS)?.1,
            ssl_mode: source.optional_parsed(SSL_MODE_KEYS)?,
            batch_size: source
                .optional_parsed(BATCH_SIZE_KEYS)?
                .unwrap_or(DEFAULT_BATCH_SIZE),
            sleep_interval: Duration::from_secs(
                source
                    .optional_parsed(SLEEP_KEYS)?
                    .unwrap_or(DEFAULT_SLEEP_SECONDS),
            ),
            connect_timeout: Duration::from_secs(
                source
                    .optional_parsed(CONNECT_TIMEOUT_KEYS)?
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECONDS),
            ),
            max_cycles: source.optional_parsed(MAX_CYCLES_KEYS)?,
            seed: source.optional_parsed(SEED_KEYS)?,
        })
    }

    /// `host:port/db`, safe to log.
    pub fn target(&self) -> String {
        format!("{}:{}/{}", self.db_host, self.db_port, self.db_name)
    }
}

/// Logging settings are read before anything else and never fail.
#[derive(Debug, Clone)]
pub struct LogSettings {
    pub level: String,
    pub file: String,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = Source { lookup };
        Self {
            level: source
                .first(LOG_LEVEL_KEYS)
                .map(|(_, value)| value.to_lowercase())
                .unwrap_or_else(|| "info".to_string()),
            file: source
                .first(LOG_FILE_KEYS)
                .map(|(_, value)| value)
                .unwrap_or_else(|| "generator.log".to_string()),
        }
    }
}

struct Source<F> {
    lookup: F,
}

impl<F> Source<F>
where
    F: Fn(&str) -> Option<String>,
{
    // first non-empty value in priority order
    fn first(&self, keys: &[&'static str]) -> Option<(&'static str, String)> {
        keys.iter().find_map(|key| {
            (self.lookup)(*key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(|value| (*key, value))
        })
    }

    fn required(&self, keys: &[&'static str]) -> Result<(&'static str, String), ConfigError> {
        self.first(keys).ok_or_else(|| ConfigError::Missing {
            keys: keys.to_vec(),
        })
    }

    fn required_parsed<T>(&self, keys: &[&'static str]) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let (key, value) = self.required(keys)?;
        parse(key, value)
    }

    fn optional_parsed<T>(&self, keys: &[&'static str]) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.first(keys)
            .map(|(key, value)| parse(key, value))
            .transpose()
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse::<T>().map_err(|err| ConfigError::Invalid {
        key,
        reason: err.to_string(),
        value,
    })
}
