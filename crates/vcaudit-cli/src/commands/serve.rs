use std::time::Duration;

use vcaudit_core::ValuationEngine;
use vcaudit_store::RunStore;
use vcaudit_web::{AppState, ServerConfig};

use crate::cli::ServeArgs;
use crate::error::CliError;

pub async fn run(args: &ServeArgs, engine: ValuationEngine, store: RunStore) -> Result<(), CliError> {
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        request_timeout: Duration::from_secs(args.timeout_secs),
    };
    tracing::info!(
        addr = %config.socket_addr(),
        db = %store.db_path().display(),
        "starting vcaudit api"
    );

    vcaudit_web::serve(&config, AppState::new(engine, store))
        .await
        .map_err(CliError::Server)
}
