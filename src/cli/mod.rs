//! CLI argument parsing for formlock.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// formlock: advisory, lease-based locking for editing forms.
///
/// A session holds a record by renewing a short lease with the lock server.
/// While another user holds it, the session's form is read-only until the
/// lease is released or taken over.
#[derive(Parser, Debug)]
#[command(name = "formlock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path of the YAML config file.
    #[arg(long, global = true, default_value = "formlock.yaml")]
    pub config: PathBuf,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for formlock.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hold a record's lease in an interactive editing session.
    ///
    /// Reads commands from stdin: `take`, `save`, `continue`, `status`,
    /// `quit`. The lease is renewed every `ping_seconds`.
    Hold(HoldArgs),

    /// Show which records of a model are locked.
    Status(StatusArgs),

    /// Take over a record's lease in the next `hold` session.
    TakeOver(ModelArgs),

    /// Release a record's lease and exit.
    Release(RecordArgs),
}

/// A model, identified by app label and model name.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// App label (e.g. "blog").
    pub app: String,

    /// Model name (e.g. "post").
    pub model: String,
}

/// A single record.
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Object id of the record.
    pub id: String,
}

/// Arguments for the `hold` command.
#[derive(Args, Debug)]
pub struct HoldArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Confirm takeovers without prompting.
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for the `status` command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Rows to annotate (default: every locked record).
    #[arg(long, value_delimiter = ',')]
    pub ids: Vec<String>,

    /// Refresh every `ping_seconds` until interrupted.
    #[arg(long)]
    pub watch: bool,

    /// Record a takeover intent for this row when someone else holds it.
    #[arg(long, value_name = "ID")]
    pub take: Option<String>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_hold() {
        let cli = Cli::try_parse_from(["formlock", "hold", "blog", "post", "42", "--yes"]).unwrap();
        match cli.command {
            Command::Hold(args) => {
                assert_eq!(args.record.model.app, "blog");
                assert_eq!(args.record.model.model, "post");
                assert_eq!(args.record.id, "42");
                assert!(args.yes);
            }
            other => panic!("expected hold, got {:?}", other),
        }
        assert_eq!(cli.config, PathBuf::from("formlock.yaml"));
    }

    #[test]
    fn parse_status_with_ids() {
        let cli = Cli::try_parse_from([
            "formlock", "-v", "--config", "cms.yaml", "status", "blog", "post", "--ids", "1,2,3",
            "--take", "2",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, PathBuf::from("cms.yaml"));
        match cli.command {
            Command::Status(args) => {
                assert_eq!(args.ids, vec!["1", "2", "3"]);
                assert_eq!(args.take.as_deref(), Some("2"));
                assert!(!args.watch);
            }
            other => panic!("expected status, got {:?}", other),
        }
    }

    #[test]
    fn parse_take_over_and_release() {
        let cli = Cli::try_parse_from(["formlock", "take-over", "blog", "post"]).unwrap();
        assert!(matches!(cli.command, Command::TakeOver(_)));

        let cli = Cli::try_parse_from(["formlock", "release", "blog", "post", "7"]).unwrap();
        match cli.command {
            Command::Release(args) => assert_eq!(args.id, "7"),
            other => panic!("expected release, got {:?}", other),
        }
    }

    #[test]
    fn parse_requires_identity() {
        assert!(Cli::try_parse_from(["formlock", "hold", "blog", "post"]).is_err());
    }
}
