use address_registry::{
    domain::{parse_object_ids, parse_target_date},
    query, AddressRecord, RecordSource,
};
use anyhow::Context;
use clap::Parser;
use tracing::instrument;

use super::OutputFormat;

/// Command arguments for `addr task1`.
#[derive(Debug, Parser)]
pub struct ValidOn {
    /// The date to check validity on, e.g. 2010-01-01
    date: String,

    /// Comma-separated object ids, e.g. "1422396, 1450759"
    object_ids: String,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl ValidOn {
    #[instrument(skip(source))]
    pub fn run(&self, source: &impl RecordSource) -> anyhow::Result<()> {
        let ids = parse_object_ids(&self.object_ids)?;
        let date = parse_target_date(&self.date)?;

        let records =
            query::date_range(source, date, &ids).context("failed to load address registry")?;

        print!("{}", render(&records, self.output)?);
        Ok(())
    }
}

fn render(records: &[AddressRecord], output: OutputFormat) -> anyhow::Result<String> {
    Ok(match output {
        OutputFormat::Text => records.iter().map(|r| format!("{r}\n")).collect(),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(records)?),
    })
}
