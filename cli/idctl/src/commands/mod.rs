//! CLI commands.

mod codec;
mod inspect;
mod kinds;
mod new;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kindid::{AnyId, UlidSource, UuidSource, ValueSource};
use serde::Serialize;

use crate::config::{Config, SourceKind};
use crate::output::OutputFormat;

/// idctl - Mint and inspect typed, prefixed identifiers.
#[derive(Debug, Parser)]
#[command(name = "idctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (text or json).
    #[arg(long, global = true, env = "IDCTL_FORMAT")]
    format: Option<String>,

    /// Generator for new IDs (uuid or ulid).
    #[arg(long, global = true, env = "IDCTL_SOURCE")]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Mint new identifiers of a registered kind.
    New(new::NewCommand),

    /// Parse an identifier and show its parts.
    Parse(inspect::ParseCommand),

    /// List registered identifier kinds.
    Kinds,

    /// Encode a 128-bit integer as base 36.
    Encode(codec::EncodeCommand),

    /// Decode a base-36 payload to its integer value.
    Decode(codec::DecodeCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Apply flag overrides to `config`.
    pub fn resolve_config(&self, config: Config) -> Result<Config> {
        config.with_overrides(self.format.as_deref(), self.source.as_deref())
    }

    /// Run the CLI command.
    pub fn run(self, config: Config) -> Result<()> {
        let ctx = CommandContext {
            format: config.format,
            source: config.source,
        };

        match self.command {
            Commands::New(cmd) => cmd.run(&ctx),
            Commands::Parse(cmd) => cmd.run(&ctx),
            Commands::Kinds => kinds::run(&ctx),
            Commands::Encode(cmd) => cmd.run(&ctx),
            Commands::Decode(cmd) => cmd.run(&ctx),
            Commands::Version => {
                println!("idctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
    pub source: SourceKind,
}

impl CommandContext {
    /// Build the configured value source.
    pub fn value_source(&self) -> Box<dyn ValueSource> {
        match self.source {
            SourceKind::Uuid => Box::new(UuidSource),
            SourceKind::Ulid => Box::new(UlidSource::new()),
        }
    }
}

/// Serializable view of one identifier.
#[derive(Debug, Serialize)]
pub struct IdView {
    pub id: String,
    pub kind: String,
    pub ordered: bool,
    pub payload: String,
    pub value: String,
    pub timestamp_ms: Option<u64>,
}

impl From<&AnyId> for IdView {
    fn from(id: &AnyId) -> Self {
        Self {
            id: id.to_string(),
            kind: id.prefix().to_string(),
            ordered: id.kind().ordered(),
            payload: id.payload().to_string(),
            value: id.value().to_string(),
            timestamp_ms: id.timestamp_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use kindid::Registry;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from(["idctl", "--format", "json", "new", "acct", "-n", "3"])
            .unwrap();
        let config = cli.resolve_config(Config::default()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::New(_)));
    }

    #[test]
    fn test_global_flags_read_env() {
        let cmd = Cli::command();
        let env_of = |id: &str| {
            cmd.get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .and_then(|env| env.to_str())
                .map(str::to_string)
        };
        assert_eq!(env_of("format").as_deref(), Some("IDCTL_FORMAT"));
        assert_eq!(env_of("source").as_deref(), Some("IDCTL_SOURCE"));
    }

    #[test]
    fn test_id_view() {
        let registry = Registry::new();
        let kind = registry.register("acct", true).unwrap();
        let id = AnyId::parse_as("acct_10", &kind).unwrap();

        let view = IdView::from(&id);
        assert_eq!(view.id, "acct_10");
        assert_eq!(view.kind, "acct");
        assert_eq!(view.payload, "10");
        assert_eq!(view.value, "36");
        assert_eq!(view.timestamp_ms, Some(0));
    }
}
