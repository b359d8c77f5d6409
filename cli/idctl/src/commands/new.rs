//! Mint new identifiers.

use anyhow::{Context, Result};
use clap::Args;
use kindid::{AnyId, IdError, Registry};
use tracing::debug;

use crate::output::{print_single, OutputFormat};

use super::{CommandContext, IdView};

/// Mint new identifiers of a registered kind.
#[derive(Debug, Args)]
pub struct NewCommand {
    /// Kind prefix (e.g. acct, ses, meet).
    prefix: String,

    /// Number of identifiers to mint.
    #[arg(short = 'n', long, default_value_t = 1)]
    count: usize,
}

impl NewCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let kind = Registry::global()
            .lookup_by_prefix(&self.prefix)
            .ok_or_else(|| IdError::UnboundKind {
                prefix: self.prefix.clone(),
            })
            .with_context(|| {
                format!(
                    "Cannot mint '{}' IDs; run `idctl kinds` to list known prefixes",
                    self.prefix
                )
            })?;

        debug!(prefix = %kind, count = self.count, source = ?ctx.source, "Minting identifiers");

        let source = ctx.value_source();
        let ids: Vec<AnyId> = (0..self.count)
            .map(|_| AnyId::generate(&kind, source.as_ref()))
            .collect();

        match ctx.format {
            OutputFormat::Text => {
                for id in &ids {
                    println!("{id}");
                }
            }
            OutputFormat::Json => {
                let views: Vec<IdView> = ids.iter().map(IdView::from).collect();
                print_single(&views);
            }
        }

        Ok(())
    }
}
