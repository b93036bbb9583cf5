use std::fs;
use std::path::Path;

use serde_json::Value;
use vcaudit_core::ValuationEngine;

use crate::cli::{Cli, ValueArgs};
use crate::error::CliError;

use super::open_store;

pub fn run(args: &ValueArgs, engine: &ValuationEngine, cli: &Cli) -> Result<Value, CliError> {
    let payload = read_request(&args.request_file)?;
    let result = engine.evaluate_value(&payload)?;
    let document = result.to_json_value()?;

    if args.persist {
        let store = open_store(cli)?;
        store.save(&document)?;
        tracing::info!(
            request_id = %result.request_id(),
            db = %store.db_path().display(),
            "persisted valuation run"
        );
    }

    Ok(document)
}

/// Read and parse a request file. Both a missing file and malformed JSON
/// count as an invalid request.
fn read_request(path: &Path) -> Result<Value, CliError> {
    let raw = fs::read_to_string(path).map_err(|error| {
        CliError::InvalidRequest(format!("cannot read {}: {error}", path.display()))
    })?;
    serde_json::from_str(&raw).map_err(|error| {
        CliError::InvalidRequest(format!("{} is not valid JSON: {error}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;
    use serde_json::json;
    use tempfile::TempDir;
    use vcaudit_core::EngineConfig;
    use vcaudit_store::{RunStore, StoreConfig};

    use super::*;

    fn write_request(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("request.json");
        let mut file = fs::File::create(&path).expect("create request file");
        file.write_all(body.as_bytes()).expect("write request file");
        path
    }

    fn cli_for(request: &Path, db: &Path, persist: bool) -> Cli {
        let mut argv = vec![
            String::from("vcaudit"),
            String::from("--db"),
            db.display().to_string(),
            String::from("value"),
            String::from("--request-file"),
            request.display().to_string(),
        ];
        if persist {
            argv.push(String::from("--persist"));
        }
        Cli::try_parse_from(argv).expect("valid args")
    }

    fn value_args(cli: &Cli) -> &ValueArgs {
        match &cli.command {
            crate::cli::Command::Value(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn values_request_file_and_persists_when_asked() {
        // Given: a valid comparable-companies request on disk
        let dir = TempDir::new().expect("tempdir");
        let request = write_request(
            &dir,
            &json!({
                "company_name": "Acme AI",
                "methodology": "comparable_companies",
                "as_of_date": "2026-02-18",
                "inputs": { "revenue_ltm": 10000000, "sector": "enterprise_software" }
            })
            .to_string(),
        );
        let db = dir.path().join("runs.duckdb");
        let cli = cli_for(&request, &db, true);
        let engine = ValuationEngine::new(EngineConfig::default());

        // When: the value command runs
        let document = run(value_args(&cli), &engine, &cli).expect("valuation succeeds");

        // Then: the result is returned and stored under its request id
        let request_id = document["audit_metadata"]["request_id"]
            .as_str()
            .expect("request id")
            .to_owned();
        let store = RunStore::open(StoreConfig::at_path(&db)).expect("open store");
        assert_eq!(store.count().expect("count"), 1);
        assert_eq!(store.get(&request_id).expect("get"), Some(document));
    }

    #[test]
    fn does_not_persist_by_default() {
        let dir = TempDir::new().expect("tempdir");
        let request = write_request(
            &dir,
            &json!({
                "company_name": "Acme AI",
                "methodology": "comparable_companies",
                "as_of_date": "2026-02-18",
                "inputs": { "revenue_ltm": 10000000, "sector": "enterprise_software" }
            })
            .to_string(),
        );
        let db = dir.path().join("runs.duckdb");
        let cli = cli_for(&request, &db, false);
        let engine = ValuationEngine::default();

        run(value_args(&cli), &engine, &cli).expect("valuation succeeds");

        assert!(!db.exists());
    }

    #[test]
    fn missing_and_malformed_files_are_invalid_requests() {
        let dir = TempDir::new().expect("tempdir");
        let engine = ValuationEngine::default();
        let db = dir.path().join("runs.duckdb");

        let missing = dir.path().join("absent.json");
        let cli = cli_for(&missing, &db, false);
        let err = run(value_args(&cli), &engine, &cli).expect_err("missing file");
        assert!(matches!(err, CliError::InvalidRequest(_)));
        assert_eq!(err.exit_code(), 2);

        let malformed = write_request(&dir, "{ not json");
        let cli = cli_for(&malformed, &db, false);
        let err = run(value_args(&cli), &engine, &cli).expect_err("malformed json");
        assert!(matches!(err, CliError::InvalidRequest(_)));
    }

    #[test]
    fn unknown_sector_maps_to_data_source_exit_code() {
        let dir = TempDir::new().expect("tempdir");
        let request = write_request(
            &dir,
            &json!({
                "company_name": "Acme AI",
                "methodology": "comparable_companies",
                "as_of_date": "2026-02-18",
                "inputs": { "revenue_ltm": 10000000, "sector": "biotech" }
            })
            .to_string(),
        );
        let cli = cli_for(&request, &dir.path().join("runs.duckdb"), false);

        let err = run(value_args(&cli), &ValuationEngine::default(), &cli)
            .expect_err("unknown sector");

        assert_eq!(err.exit_code(), 3);
        assert_eq!(err.to_string(), "no comps configured for sector 'biotech'");
    }
}
