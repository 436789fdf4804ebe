//! Configuration schema types
//!
//! The configuration file uses a fixed vocabulary of sections and keys. Each
//! vocabulary is an enum here, so names are checked once while the file is
//! parsed and never compared as free-form strings afterwards.

use crate::config::SecretString;
use crate::domain::{AttributeSchema, CycleTimeError, Result, StageSchema};
use base64::{engine::general_purpose, Engine as _};
use secrecy::ExposeSecret;
use std::fmt;
use std::str::FromStr;

/// Top-level configuration sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Connection,
    Criteria,
    Workflow,
    Attributes,
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Connection" => Ok(Self::Connection),
            "Criteria" => Ok(Self::Criteria),
            "Workflow" => Ok(Self::Workflow),
            "Attributes" => Ok(Self::Attributes),
            other => Err(format!("Unexpected section {other}")),
        }
    }
}

/// Keys accepted in the `Connection` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionKey {
    Domain,
    Username,
    Password,
}

impl FromStr for ConnectionKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Domain" => Ok(Self::Domain),
            "Username" => Ok(Self::Username),
            "Password" => Ok(Self::Password),
            other => Err(format!("Unexpected property {other}")),
        }
    }
}

/// Keys accepted in the `Criteria` section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaKey {
    Scopes,
    Timeboxes,
    Themes,
}

impl FromStr for CriteriaKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Scopes" => Ok(Self::Scopes),
            "Timeboxes" => Ok(Self::Timeboxes),
            "Themes" => Ok(Self::Themes),
            other => Err(format!("Unexpected property {other}")),
        }
    }
}

/// Main cycletime configuration
#[derive(Debug, Clone)]
pub struct CycleTimeConfig {
    pub connection: ConnectionConfig,
    pub criteria: CriteriaConfig,
    pub stages: StageSchema,
    pub attributes: AttributeSchema,
}

impl CycleTimeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid value
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.connection.validate()?;
        if self.stages.is_empty() {
            return Err("Workflow must define at least one stage".to_string());
        }
        Ok(())
    }
}

/// Feed connection settings
#[derive(Debug, Clone, Default)]
pub struct ConnectionConfig {
    /// Base URL of the tracker instance, without a trailing slash
    pub domain: String,

    pub username: String,

    /// Optional in the file; required before the first request
    pub password: Option<SecretString>,
}

impl ConnectionConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.domain.is_empty() {
            return Err("Config file has no property \"Domain\"".to_string());
        }

        let parsed = url::Url::parse(&self.domain)
            .map_err(|e| format!("Domain {} is not a valid URL: {e}", self.domain))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err("Domain must start with http:// or https://".to_string());
        }

        if self.username.is_empty() {
            return Err("Config file has no property \"Username\"".to_string());
        }

        Ok(())
    }

    /// Whether a non-empty password is available
    pub fn has_password(&self) -> bool {
        self.password
            .as_ref()
            .map(|p| !p.expose_secret().is_empty())
            .unwrap_or(false)
    }

    /// Builds the HTTP basic `Authorization` header value
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no password is set
    pub fn authorization(&self) -> Result<String> {
        let password = self
            .password
            .as_ref()
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or_else(|| CycleTimeError::Configuration("Missing password".to_string()))?;

        let credentials = format!("{}:{}", self.username, password.expose_secret().as_ref());
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        Ok(format!("Basic {encoded}"))
    }
}

/// Filter criteria; empty lists do not filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaConfig {
    /// Project names
    pub scopes: Vec<String>,
    /// Sprint names
    pub timeboxes: Vec<String>,
    /// Portfolio item names matched anywhere up the parent hierarchy
    pub themes: Vec<String>,
}

/// Fetch and retry parameters for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Rows requested per page
    pub batch_size: usize,

    /// Attempts per window before the run fails
    pub max_tries: u32,

    /// Base retry delay; attempt `n` waits `n * (retry_delay_secs + 1)` seconds
    pub retry_delay_secs: u64,

    /// HTTP request timeout
    pub timeout_secs: u64,
}

impl FetchConfig {
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch size must be at least 1".to_string());
        }
        if self.max_tries == 0 {
            return Err("max tries must be at least 1".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout must be at least 1 second".to_string());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_tries: default_max_tries(),
            retry_delay_secs: default_retry_delay_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log file rotation schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogRotation {
    #[default]
    Daily,
    Hourly,
    Never,
}

impl FromStr for LogRotation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "hourly" => Ok(Self::Hourly),
            "never" => Ok(Self::Never),
            other => Err(format!(
                "Invalid log rotation '{other}'. Must be one of: daily, hourly, never"
            )),
        }
    }
}

impl fmt::Display for LogRotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogRotation::Daily => write!(f, "daily"),
            LogRotation::Hourly => write!(f, "hourly"),
            LogRotation::Never => write!(f, "never"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Write JSON logs to files in `local_path`
    pub local_enabled: bool,
    pub local_path: String,
    pub local_rotation: LogRotation,
}

impl LoggingConfig {
    /// File logging into `dir`
    pub fn with_directory(dir: impl Into<String>, rotation: LogRotation) -> Self {
        Self {
            local_enabled: true,
            local_path: dir.into(),
            local_rotation: rotation,
        }
    }
}

pub fn default_batch_size() -> usize {
    1000
}

pub fn default_max_tries() -> u32 {
    5
}

pub fn default_retry_delay_secs() -> u64 {
    5
}

pub fn default_timeout_secs() -> u64 {
    60
}
