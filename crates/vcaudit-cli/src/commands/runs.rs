use serde_json::{json, Value};
use vcaudit_store::RunStore;

use crate::cli::{RunsArgs, RunsCommand};
use crate::error::CliError;

pub fn run(args: &RunsArgs, store: &RunStore) -> Result<Value, CliError> {
    match &args.command {
        RunsCommand::List { limit } => {
            let runs = store.list_recent(*limit)?;
            Ok(json!({ "runs": runs }))
        }
        RunsCommand::Show { id } => store
            .get(id)?
            .ok_or_else(|| CliError::RunNotFound(id.clone())),
    }
}
