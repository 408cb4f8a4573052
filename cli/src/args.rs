use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

/// Connection settings come from the `HYDRA_DB_*` environment variables.
#[derive(Parser, Debug)]
#[command(author, version, about = "Explore parsed open-data resources in the Hydra database")]
pub(crate) struct Args {
    #[arg(long, value_enum, env = "HYDRA_LOG_LEVEL", default_value = "warn", global = true)]
    pub(crate) log_level: LogLevel,
    /// Also append log lines to this file
    #[arg(long, global = true)]
    pub(crate) log: Option<PathBuf>,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Page through the rows behind a resource id
    Resource {
        resource_id: String,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Page through a table directly (`table` or `schema.table`)
    Table {
        table_reference: String,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Print the table a resource id resolves to
    Resolve { resource_id: String },
}

#[derive(clap::Args, Debug, Clone, Copy)]
pub(crate) struct WindowArgs {
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(i64).range(1..))]
    pub(crate) limit: i64,
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..))]
    pub(crate) offset: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resource_command_with_defaults() {
        let args = Args::try_parse_from(["hydra-explore", "resource", "abc-123"]).unwrap();
        match args.command {
            Command::Resource { resource_id, window } => {
                assert_eq!(resource_id, "abc-123");
                assert_eq!((window.limit, window.offset), (100, 0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_limit() {
        let parsed = Args::try_parse_from(["hydra-explore", "table", "t", "--limit", "0"]);
        assert!(parsed.is_err());
    }
}
