use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::CreateArgs;
use crate::error::PrError;
use crate::git::Git;

// Precedence: CLI > env > file > defaults.

const DEFAULT_DATA_ROOT: &str = ".";
const DEFAULT_COLLECTOR_PATH: &str = "../mdn-bcd-collector";
const DEFAULT_REMOTE: &str = "origin";
const DEFAULT_GIT_CMD: &str = "git";
const DEFAULT_GH_CMD: &str = "gh";
const DEFAULT_LINT_CMD: &str = "npm";

const ENV_PREFIX: &str = "BCD_PR_";

/// Resolved configuration for a `create` run.
///
/// Built from three layers with precedence CLI > env > file > defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Checkout of browser-compat-data; git runs here and features are
    /// located under it.
    pub data_root: PathBuf,
    /// Checkout of mdn-bcd-collector, read for its version.
    pub collector_path: PathBuf,
    pub remote: String,
    pub git_cmd: String,
    pub gh_cmd: String,
    pub lint_cmd: String,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    /// Print the assembled PR instead of linting and publishing it.
    pub dry_run: bool,
}

/// On-disk TOML shape. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    data_root: Option<PathBuf>,
    collector_path: Option<PathBuf>,
    remote: Option<String>,
    git_cmd: Option<String>,
    gh_cmd: Option<String>,
    lint_cmd: Option<String>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    dry_run: Option<bool>,
}

/// One precedence layer before merging.
#[derive(Debug, Default)]
struct ConfigLayer {
    data_root: Option<PathBuf>,
    collector_path: Option<PathBuf>,
    remote: Option<String>,
    git_cmd: Option<String>,
    gh_cmd: Option<String>,
    lint_cmd: Option<String>,
    log_level: Option<String>,
    log_file: Option<PathBuf>,
    dry_run: Option<bool>,
}

impl ToolConfig {
    /// Load configuration with precedence: CLI > env > file > defaults.
    /// `config_path` names an optional TOML file.
    pub fn load(config_path: Option<&Path>, cli_args: &CreateArgs) -> anyhow::Result<Self> {
        Self::load_with_env(config_path, cli_args, real_env_var)
    }

    /// The data root must be an existing directory, and a git work tree
    /// unless this is a dry run.
    pub fn validate(&self) -> Result<(), PrError> {
        if !self.data_root.exists() {
            return Err(PrError::DataRootNotFound {
                path: self.data_root.clone(),
            });
        }
        if !self.data_root.is_dir() {
            return Err(PrError::DataRootNotDirectory {
                path: self.data_root.clone(),
            });
        }
        if !self.dry_run && !Git::new(&self.git_cmd, &self.data_root, &self.remote).is_work_tree() {
            return Err(PrError::NotGitRepo {
                path: self.data_root.clone(),
            });
        }
        Ok(())
    }

    /// Internal constructor that accepts an env-var lookup function,
    /// enabling deterministic testing without process-global mutation.
    fn load_with_env(
        config_path: Option<&Path>,
        cli_args: &CreateArgs,
        env_fn: fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let file_layer = match config_path {
            Some(path) => load_file_layer(path)?,
            None => ConfigLayer::default(),
        };
        let env_layer = load_env_layer(env_fn)?;
        let cli_layer = cli_layer_from(cli_args);

        let merged = merge_layers(file_layer, env_layer, cli_layer);

        Ok(ToolConfig {
            data_root: merged
                .data_root
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_ROOT)),
            collector_path: merged
                .collector_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_COLLECTOR_PATH)),
            remote: merged.remote.unwrap_or_else(|| DEFAULT_REMOTE.to_owned()),
            git_cmd: merged.git_cmd.unwrap_or_else(|| DEFAULT_GIT_CMD.to_owned()),
            gh_cmd: merged.gh_cmd.unwrap_or_else(|| DEFAULT_GH_CMD.to_owned()),
            lint_cmd: merged
                .lint_cmd
                .unwrap_or_else(|| DEFAULT_LINT_CMD.to_owned()),
            log_level: merged.log_level,
            log_file: merged.log_file,
            dry_run: merged.dry_run.unwrap_or(false),
        })
    }
}

fn load_file_layer(path: &Path) -> anyhow::Result<ConfigLayer> {
    let contents = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
    let fc: FileConfig = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))?;
    Ok(ConfigLayer {
        data_root: fc.data_root,
        collector_path: fc.collector_path,
        remote: fc.remote,
        git_cmd: fc.git_cmd,
        gh_cmd: fc.gh_cmd,
        lint_cmd: fc.lint_cmd,
        log_level: fc.log_level,
        log_file: fc.log_file,
        dry_run: fc.dry_run,
    })
}

fn real_env_var(suffix: &str) -> Option<String> {
    let key = format!("{ENV_PREFIX}{suffix}");
    env::var(&key).ok().filter(|v| !v.is_empty())
}

fn load_env_layer(env_fn: fn(&str) -> Option<String>) -> Result<ConfigLayer, PrError> {
    Ok(ConfigLayer {
        data_root: env_fn("DATA_ROOT").map(PathBuf::from),
        collector_path: env_fn("COLLECTOR_PATH").map(PathBuf::from),
        remote: env_fn("REMOTE"),
        git_cmd: env_fn("GIT_CMD"),
        gh_cmd: env_fn("GH_CMD"),
        lint_cmd: env_fn("LINT_CMD"),
        log_level: env_fn("LOG_LEVEL"),
        log_file: env_fn("LOG_FILE").map(PathBuf::from),
        dry_run: parse_env_bool(env_fn, "DRY_RUN")?,
    })
}

fn parse_env_bool(
    env_fn: fn(&str) -> Option<String>,
    suffix: &str,
) -> Result<Option<bool>, PrError> {
    match env_fn(suffix) {
        Some(s) => s
            .parse::<bool>()
            .map(Some)
            .map_err(|e| PrError::ConfigEnvParseError {
                var: format!("{ENV_PREFIX}{suffix}"),
                detail: e.to_string(),
            }),
        None => Ok(None),
    }
}

fn cli_layer_from(args: &CreateArgs) -> ConfigLayer {
    ConfigLayer {
        data_root: args.data_root.clone(),
        collector_path: args.collector_path.clone(),
        remote: args.remote.clone(),
        git_cmd: args.git_cmd.clone(),
        gh_cmd: args.gh_cmd.clone(),
        lint_cmd: args.lint_cmd.clone(),
        log_level: args.log_level.clone(),
        log_file: args.log_file.clone(),
        dry_run: if args.dry_run { Some(true) } else { None },
    }
}

/// Merge three layers. For each field, pick CLI first, then env, then file.
fn merge_layers(file: ConfigLayer, env: ConfigLayer, cli: ConfigLayer) -> ConfigLayer {
    ConfigLayer {
        data_root: cli.data_root.or(env.data_root).or(file.data_root),
        collector_path: cli
            .collector_path
            .or(env.collector_path)
            .or(file.collector_path),
        remote: cli.remote.or(env.remote).or(file.remote),
        git_cmd: cli.git_cmd.or(env.git_cmd).or(file.git_cmd),
        gh_cmd: cli.gh_cmd.or(env.gh_cmd).or(file.gh_cmd),
        lint_cmd: cli.lint_cmd.or(env.lint_cmd).or(file.lint_cmd),
        log_level: cli.log_level.or(env.log_level).or(file.log_level),
        log_file: cli.log_file.or(env.log_file).or(file.log_file),
        dry_run: cli.dry_run.or(env.dry_run).or(file.dry_run),
    }
}
