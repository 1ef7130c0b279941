use std::path::PathBuf;

mod full_address;
mod terminal;
mod valid_on;

use address_registry::{Config, XmlSource};
use clap::{ArgAction, CommandFactory, ValueEnum};
use full_address::FullAddress;
use terminal::Colorize;
use valid_on::ValidOn;

#[derive(Debug, clap::Parser)]
#[command(name = "addr", version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The directory registry paths are resolved against
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    /// The address objects file (overrides the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    addresses: Option<PathBuf>,

    /// The hierarchy file (overrides the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    hierarchy: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let Some(command) = self.command.as_ref() else {
            Self::command().print_help()?;
            println!();
            return Ok(());
        };

        let source = self.source();
        tracing::debug!(
            addresses = %source.addresses().display(),
            hierarchy = %source.hierarchy().display(),
            "using registry files"
        );
        command.run(&source)
    }

    /// Builds the record source from the config file and the path overrides.
    fn source(&self) -> XmlSource {
        let mut config = Config::load_or_default(&self.root);
        if let Some(addresses) = &self.addresses {
            config.addresses.clone_from(addresses);
        }
        if let Some(hierarchy) = &self.hierarchy {
            config.hierarchy.clone_from(hierarchy);
        }
        XmlSource::from_config(&self.root, &config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries query results only
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// List address objects valid on a date
    ///
    /// Prints `<id>: <type> <name>` for each object in the id list whose
    /// validity interval contains the date.
    #[command(name = "task1", visible_alias = "valid-on")]
    ValidOn(ValidOn),

    /// Print full hierarchical addresses for objects of a type
    ///
    /// Only active, current objects are resolved.
    #[command(name = "task2", visible_alias = "full-address")]
    FullAddress(FullAddress),
}

impl Command {
    fn run(&self, source: &XmlSource) -> anyhow::Result<()> {
        match self {
            Self::ValidOn(command) => command.run(source)?,
            Self::FullAddress(command) => command.run(source)?,
        }
        Ok(())
    }
}

/// Output formats shared by the query commands.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One line per result
    #[default]
    Text,
    /// A JSON array
    Json,
}

/// Prints a top-level failure as a single line on standard output.
pub fn report_error(error: &anyhow::Error) {
    println!("{}", error_line(error).error());
}

fn error_line(error: &anyhow::Error) -> String {
    format!("An error occurred: {error:#}")
}
