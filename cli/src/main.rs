mod args;
mod logging;

use clap::Parser;
use hydra_explorer::prelude::*;
use serde::Serialize;
use tracing::Level;

use crate::args::{Args, Command};
use crate::logging::LogWriter;

#[derive(Serialize)]
struct Resolution<'a> {
    resource_id: &'a str,
    table_name: Option<String>,
}

async fn run(command: Command) -> Result<String, Box<dyn std::error::Error>> {
    let db = HydraDb::from_env()?;
    tracing::debug!(config = ?db.config(), "loaded configuration");

    let output = match command {
        Command::Resource {
            resource_id,
            window,
        } => {
            let window = PageWindow::new(window.limit, window.offset)?;
            to_json(&db.explore_resource(&resource_id, window, None).await?)?
        }
        Command::Table {
            table_reference,
            window,
        } => {
            let window = PageWindow::new(window.limit, window.offset)?;
            to_json(&db.explore_table(&table_reference, window, None).await?)?
        }
        Command::Resolve { resource_id } => {
            let table_name = db.resolve_table(&resource_id, None).await?;
            to_json(&Resolution {
                resource_id: &resource_id,
                table_name,
            })?
        }
    };
    Ok(output)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

fn exit_code(err: &(dyn std::error::Error + 'static)) -> i32 {
    match err.downcast_ref::<HydraDbError>() {
        Some(db_err) if db_err.is_connection_error() => 2,
        _ => 1,
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let writer = LogWriter::new(args.log.as_deref()).unwrap_or_else(|err| {
        eprintln!("failed to open log file: {err}");
        std::process::exit(1);
    });

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(false)
        .with_max_level(Level::from(args.log_level))
        .init();

    match run(args.command).await {
        Ok(output) => println!("{output}"),
        Err(err) => {
            tracing::error!(error = %err, "exploration failed");
            eprintln!("error: {err}");
            std::process::exit(exit_code(err.as_ref()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serializer;

    struct Refuses;

    impl Serialize for Refuses {
        fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    #[test]
    fn serialization_failure_is_reported() {
        let err = to_json(&Refuses).unwrap_err();
        assert!(err.to_string().contains("refused"));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn connection_failures_exit_with_2() {
        let err = HydraDbError::ConnectionError {
            message: "unreachable".into(),
            source: None,
        };
        assert_eq!(exit_code(&err), 2);
        assert_eq!(exit_code(&HydraDbError::ConfigError("bad port".into())), 1);
    }
}
