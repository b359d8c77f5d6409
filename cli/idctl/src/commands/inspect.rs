//! Parse and inspect identifiers.

use anyhow::Result;
use clap::Args;
use kindid::parse_any;

use crate::output::{print_single, OutputFormat};

use super::{CommandContext, IdView};

/// Parse an identifier and show its parts.
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Identifier in canonical form (e.g. acct_3h1p4st4l6hh54rjtj9rqn4x).
    id: String,
}

impl ParseCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let id = parse_any(&self.id)?;
        let view = IdView::from(&id);

        match ctx.format {
            OutputFormat::Json => print_single(&view),
            OutputFormat::Text => {
                println!("id: {}", view.id);
                println!("kind: {}", view.kind);
                println!("ordered: {}", view.ordered);
                println!("payload: {}", view.payload);
                println!("value: {}", view.value);
                match view.timestamp_ms {
                    Some(ts) => println!("timestamp_ms: {ts}"),
                    None => println!("timestamp_ms: -"),
                }
            }
        }

        Ok(())
    }
}
