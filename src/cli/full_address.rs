use address_registry::{query, query::Resolved, RecordSource};
use anyhow::Context;
use clap::Parser;
use tracing::instrument;

use super::{terminal::Colorize, OutputFormat};

/// Command arguments for `addr task2`.
#[derive(Debug, Parser)]
pub struct FullAddress {
    /// The object type to resolve, e.g. "street"
    key: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl FullAddress {
    #[instrument(skip(source))]
    pub fn run(&self, source: &impl RecordSource) -> anyhow::Result<()> {
        let resolved =
            query::full_addresses(source, &self.key).context("failed to load address registry")?;

        if resolved.is_empty() {
            tracing::info!("no active, current objects of type '{}'", self.key);
        }

        print!("{}", render(&resolved, self.output)?);
        Ok(())
    }
}

fn render(resolved: &[Resolved], output: OutputFormat) -> anyhow::Result<String> {
    Ok(match output {
        OutputFormat::Text => resolved
            .iter()
            .map(|entry| match &entry.address {
                Ok(address) => format!("{address}\n"),
                Err(e) => format!("{}\n", format!("object {}: {e}", entry.object_id).warning()),
            })
            .collect(),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(resolved)?),
    })
}
