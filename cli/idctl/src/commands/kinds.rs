//! List registered kinds.

use anyhow::Result;
use kindid::Registry;
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_output;

use super::CommandContext;

#[derive(Debug, Serialize, Tabled)]
struct KindRow {
    prefix: String,
    ordered: bool,
}

pub fn run(ctx: &CommandContext) -> Result<()> {
    let rows: Vec<KindRow> = Registry::global()
        .kinds()
        .into_iter()
        .map(|kind| KindRow {
            prefix: kind.prefix().to_string(),
            ordered: kind.ordered(),
        })
        .collect();

    print_output(&rows, ctx.format);
    Ok(())
}
