use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// bcd-auto-pr: open browser-compat-data pull requests from a short
/// questionnaire.
///
/// Asks what kind of change was made, finds the data file that holds the
/// feature, writes the PR title, description, branch and labels, lints the
/// file, then commits, pushes and opens the PR with the GitHub CLI.
#[derive(Debug, Parser)]
#[command(name = "bcd-auto-pr", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the wizard and open a pull request.
    Create(CreateArgs),

    /// Print the data file that defines a feature identifier.
    Locate(LocateArgs),
}

/// Arguments for the `locate` subcommand.
#[derive(Debug, Clone, clap::Args)]
pub struct LocateArgs {
    /// Dotted feature identifier, e.g. `css.properties.color`.
    pub feature: String,

    /// Return the first matching file without checking its contents.
    #[arg(long, default_value_t = false)]
    pub first_match: bool,

    /// browser-compat-data checkout to search (default: ".").
    #[arg(long, default_value = ".")]
    pub data_root: PathBuf,
}

/// Arguments for the `create` subcommand.
///
/// Every option can also be set via config file or `BCD_PR_*` env vars.
/// Precedence: CLI > env > file > defaults.
#[derive(Debug, Clone, clap::Args)]
pub struct CreateArgs {
    /// Path to a TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// browser-compat-data checkout (default: ".").
    #[arg(long)]
    pub data_root: Option<PathBuf>,

    /// mdn-bcd-collector checkout, read for its version
    /// (default: "../mdn-bcd-collector").
    #[arg(long)]
    pub collector_path: Option<PathBuf>,

    /// Remote to push the PR branch to (default: "origin").
    #[arg(long)]
    pub remote: Option<String>,

    /// git binary name or path (default: "git").
    #[arg(long)]
    pub git_cmd: Option<String>,

    /// GitHub CLI binary name or path (default: "gh").
    #[arg(long)]
    pub gh_cmd: Option<String>,

    /// Runner for the `lint` and `lint:fix` scripts (default: "npm").
    #[arg(long)]
    pub lint_cmd: Option<String>,

    /// Log level filter (default: "info"). Supports tracing directives
    /// (e.g. "debug", "bcd_auto_pr=trace,warn"). Overridden by BCD_PR_LOG.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to a log file. When set, structured JSON logs are appended here
    /// in addition to the human-readable stderr output.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the PR that would be opened and stop before linting, git and gh.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn create_subcommand_parses_without_flags() {
        let cli = Cli::try_parse_from(["bcd-auto-pr", "create"]).expect("should parse");

        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.data_root, None);
                assert!(!args.dry_run);
            }
            Commands::Locate(_) => unreachable!("test uses create subcommand"),
        }
    }

    #[test]
    fn create_subcommand_parses_all_optional_flags() {
        let cli = Cli::try_parse_from([
            "bcd-auto-pr",
            "create",
            "--config",
            "bcd.toml",
            "--data-root",
            "/src/bcd",
            "--collector-path",
            "/src/collector",
            "--remote",
            "upstream",
            "--git-cmd",
            "/usr/bin/git",
            "--gh-cmd",
            "gh2",
            "--lint-cmd",
            "pnpm",
            "--log-level",
            "debug",
            "--log-file",
            "run.log",
            "--dry-run",
        ])
        .expect("should parse all flags");

        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.config, Some(PathBuf::from("bcd.toml")));
                assert_eq!(args.data_root, Some(PathBuf::from("/src/bcd")));
                assert_eq!(args.collector_path, Some(PathBuf::from("/src/collector")));
                assert_eq!(args.remote.as_deref(), Some("upstream"));
                assert_eq!(args.git_cmd.as_deref(), Some("/usr/bin/git"));
                assert_eq!(args.gh_cmd.as_deref(), Some("gh2"));
                assert_eq!(args.lint_cmd.as_deref(), Some("pnpm"));
                assert_eq!(args.log_level.as_deref(), Some("debug"));
                assert_eq!(args.log_file, Some(PathBuf::from("run.log")));
                assert!(args.dry_run);
            }
            Commands::Locate(_) => unreachable!("test uses create subcommand"),
        }
    }

    #[test]
    fn locate_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "bcd-auto-pr",
            "locate",
            "css.properties.color",
            "--first-match",
            "--data-root",
            "/src/bcd",
        ])
        .expect("should parse");

        match cli.command {
            Commands::Locate(args) => {
                assert_eq!(args.feature, "css.properties.color");
                assert!(args.first_match);
                assert_eq!(args.data_root, PathBuf::from("/src/bcd"));
            }
            _ => panic!("expected Locate subcommand"),
        }
    }

    #[test]
    fn locate_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["bcd-auto-pr", "locate", "api.Foo"]).expect("should parse");
        match cli.command {
            Commands::Locate(args) => {
                assert!(!args.first_match);
                assert_eq!(args.data_root, PathBuf::from("."));
            }
            _ => panic!("expected Locate subcommand"),
        }
    }

    #[test]
    fn locate_requires_feature() {
        let err = Cli::try_parse_from(["bcd-auto-pr", "locate"]).expect_err("feature is required");
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn no_subcommand_shows_error() {
        let result = Cli::try_parse_from(["bcd-auto-pr"]);
        let err = result.expect_err("should fail without subcommand");
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn unknown_subcommand_rejected() {
        let result = Cli::try_parse_from(["bcd-auto-pr", "unknown"]);
        let err = result.expect_err("should reject unknown subcommand");
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }
}
