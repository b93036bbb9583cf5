mod methodologies;
mod runs;
mod serve;
mod value;

use serde_json::Value;
use vcaudit_core::{EngineConfig, ValuationEngine};
use vcaudit_store::{RunStore, StoreConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// Run the selected command. Returns the JSON document to print, if any.
pub async fn run(cli: &Cli) -> Result<Option<Value>, CliError> {
    let engine = ValuationEngine::new(EngineConfig::from_env());

    match &cli.command {
        Command::Value(args) => value::run(args, &engine, cli).map(Some),
        Command::Runs(args) => runs::run(args, &open_store(cli)?).map(Some),
        Command::Methodologies => Ok(Some(methodologies::run(&engine))),
        Command::Serve(args) => {
            serve::run(args, engine, open_store(cli)?).await?;
            Ok(None)
        }
    }
}

fn open_store(cli: &Cli) -> Result<RunStore, CliError> {
    let config = match &cli.db {
        Some(path) => StoreConfig::at_path(path),
        None => StoreConfig::default(),
    };
    Ok(RunStore::open(config)?)
}
