//! CLI configuration (env-driven, overridable by flags).

use anyhow::{bail, Context, Result};

use crate::output::OutputFormat;

/// Which generator backs freshly minted IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// UUIDv7 / UUIDv4.
    #[default]
    Uuid,
    /// Monotonic ULID / UUIDv4.
    Ulid,
}

impl SourceKind {
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uuid" => Ok(Self::Uuid),
            "ulid" => Ok(Self::Ulid),
            other => bail!("unknown ID source '{other}' (expected 'uuid' or 'ulid')"),
        }
    }
}

/// idctl configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON.
    pub log_json: bool,

    /// Output format for command results.
    pub format: OutputFormat,

    /// Generator used by `idctl new`.
    pub source: SourceKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_json: false,
            format: OutputFormat::default(),
            source: SourceKind::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let log_level = lookup("IDCTL_LOG_LEVEL").unwrap_or(defaults.log_level);

        let log_json = lookup("IDCTL_LOG_JSON")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.log_json);

        let format = lookup("IDCTL_FORMAT")
            .map(|v| OutputFormat::parse(&v))
            .transpose()
            .context("IDCTL_FORMAT must be 'text' or 'json'.")?
            .unwrap_or(defaults.format);

        let source = lookup("IDCTL_SOURCE")
            .map(|v| SourceKind::parse(&v))
            .transpose()
            .context("IDCTL_SOURCE must be 'uuid' or 'ulid'.")?
            .unwrap_or(defaults.source);

        Ok(Self {
            log_level,
            log_json,
            format,
            source,
        })
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, format: Option<&str>, source: Option<&str>) -> Result<Self> {
        if let Some(format) = format {
            self.format = OutputFormat::parse(format)?;
        }
        if let Some(source) = source {
            self.source = SourceKind::parse(source)?;
        }
        Ok(self)
    }
}
