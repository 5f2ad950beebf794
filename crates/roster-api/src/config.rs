//! Runtime configuration.
//!
//! Layered with the `config` crate, lowest precedence first: built-in
//! defaults, an optional TOML file, then `ROSTER_*` environment variables
//! (`ROSTER_ENV`, `ROSTER_HOST`, `ROSTER_PORT`, `ROSTER_DATABASE_URL`,
//! `ROSTER_LOG_LEVEL`). The result is validated before the server starts.

use std::{fmt, path::Path};

use roster_store_sqlite::Location;
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub const ENV_PREFIX: &str = "ROSTER";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to load configuration: {0}")]
  Load(#[from] config::ConfigError),

  #[error("invalid configuration: {0}")]
  Invalid(String),
}

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Deployment environment; controls how much error detail reaches clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnv {
  #[default]
  Development,
  Test,
  Production,
}

impl RuntimeEnv {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Development => "development",
      Self::Test => "test",
      Self::Production => "production",
    }
  }
}

impl fmt::Display for RuntimeEnv {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
  Trace,
  Debug,
  #[default]
  Info,
  Warn,
  Error,
  Off,
}

impl From<LogLevel> for LevelFilter {
  fn from(l: LogLevel) -> Self {
    match l {
      LogLevel::Trace => LevelFilter::TRACE,
      LogLevel::Debug => LevelFilter::DEBUG,
      LogLevel::Info => LevelFilter::INFO,
      LogLevel::Warn => LevelFilter::WARN,
      LogLevel::Error => LevelFilter::ERROR,
      LogLevel::Off => LevelFilter::OFF,
    }
  }
}

// ─── ServerConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub env:          RuntimeEnv,
  pub host:         String,
  pub port:         u16,
  /// `sqlite://<path>`, `sqlite::memory:` or a bare path.
  pub database_url: String,
  pub log_level:    LogLevel,
}

impl ServerConfig {
  /// Load from defaults, `file` (if given) and the process environment.
  pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
    Self::from_sources(file, config::Environment::with_prefix(ENV_PREFIX))
  }

  /// Load with an explicit environment source; tests inject variables
  /// through [`config::Environment::source`].
  pub fn from_sources(
    file: Option<&Path>,
    env: config::Environment,
  ) -> Result<Self, ConfigError> {
    let mut builder = config::Config::builder()
      .set_default("env", RuntimeEnv::default().as_str())?
      .set_default("host", "0.0.0.0")?
      .set_default("port", 3000)?
      .set_default("log_level", "info")?;

    if let Some(path) = file {
      builder = builder.add_source(config::File::from(path).required(true));
    }

    let cfg: ServerConfig = builder
      .add_source(env.try_parsing(true))
      .build()?
      .try_deserialize()?;

    cfg.validate()?;
    Ok(cfg)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    if self.port == 0 {
      return Err(ConfigError::Invalid("port must be positive".into()));
    }
    if self.host.trim().is_empty() {
      return Err(ConfigError::Invalid("host must not be empty".into()));
    }
    Location::parse(&self.database_url)
      .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(())
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
