//! CLI argument definitions for vcaudit.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `value` | Run a valuation from a JSON request file |
//! | `runs list` | List stored runs, newest first |
//! | `runs show` | Print a stored run |
//! | `methodologies` | List methodologies and reference data |
//! | `serve` | Start the HTTP API |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--db` | `$VCAUDIT_HOME/runs.duckdb` | Run store database file |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--log-level` | `warn` | Log level written to stderr |
//! | `--log-format` | `pretty` | Log format (pretty, json) |
//!
//! # Examples
//!
//! ```bash
//! vcaudit value --request-file request.json --pretty
//! vcaudit value --request-file request.json --persist
//! vcaudit runs list --limit 10
//! vcaudit serve --port 9000
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Auditable private-company valuations.
#[derive(Debug, Parser)]
#[command(
    name = "vcaudit",
    author,
    version,
    about = "Auditable private-company valuations"
)]
pub struct Cli {
    /// Run store database file.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Base log level (trace, debug, info, warn, error). `RUST_LOG` overrides it.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a valuation from a JSON request file.
    ///
    /// # Examples
    ///
    ///   vcaudit value --request-file request.json
    ///   vcaudit value --request-file request.json --persist --pretty
    Value(ValueArgs),

    /// Inspect stored valuation runs.
    Runs(RunsArgs),

    /// List methodologies, indices, and comparable sectors.
    Methodologies,

    /// Start the HTTP API.
    Serve(ServeArgs),
}

#[derive(Debug, Args)]
pub struct ValueArgs {
    /// Path to a JSON valuation request.
    #[arg(long, value_name = "PATH")]
    pub request_file: PathBuf,

    /// Store the result in the run store.
    #[arg(long, default_value_t = false)]
    pub persist: bool,
}

#[derive(Debug, Args)]
pub struct RunsArgs {
    #[command(subcommand)]
    pub command: RunsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RunsCommand {
    /// List stored runs, newest first.
    List {
        /// Maximum number of runs to return.
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Print the full stored result of a run.
    Show {
        /// Request id of the run.
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_value_command_with_global_flags() {
        let cli = Cli::try_parse_from([
            "vcaudit",
            "value",
            "--request-file",
            "req.json",
            "--persist",
            "--pretty",
            "--db",
            "/tmp/runs.duckdb",
        ])
        .expect("valid args");

        assert!(cli.pretty);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/runs.duckdb")));
        match cli.command {
            Command::Value(args) => {
                assert_eq!(args.request_file, PathBuf::from("req.json"));
                assert!(args.persist);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn runs_list_defaults_to_fifty() {
        let cli = Cli::try_parse_from(["vcaudit", "runs", "list"]).expect("valid args");
        assert!(matches!(
            cli.command,
            Command::Runs(RunsArgs {
                command: RunsCommand::List { limit: 50 }
            })
        ));
    }

    #[test]
    fn serve_defaults_to_loopback() {
        let cli = Cli::try_parse_from(["vcaudit", "serve"]).expect("valid args");
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(args.port, 8080);
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }
}
