use std::path::PathBuf;

use tracing::debug;

use crate::error::PrError;
use crate::subprocess;

const STEP: &str = "creating pull request";

/// GitHub CLI bound to the data root checkout.
#[derive(Debug, Clone)]
pub struct Gh {
    program: String,
    cwd: PathBuf,
}

impl Gh {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            cwd: cwd.into(),
        }
    }

    /// Open a PR for the pushed branch, filling title and body from the
    /// commit. Returns whatever gh printed (normally the PR URL).
    pub fn create_pr(&self, labels: &[String]) -> Result<String, PrError> {
        debug!(?labels, "creating pull request");
        let args = pr_create_args(labels);
        let result = subprocess::run_command(&self.program, &args, &self.cwd).map_err(|e| {
            PrError::CommandSpawnFailed {
                step: STEP.to_owned(),
                detail: e.to_string(),
            }
        })?;
        if !result.success() {
            return Err(PrError::CommandFailed {
                step: STEP.to_owned(),
                exit_code: result.exit_code,
                stderr: result.stderr.trim().to_owned(),
            });
        }
        Ok(result.stdout.trim().to_owned())
    }
}

pub fn pr_create_args(labels: &[String]) -> Vec<String> {
    let mut args: Vec<String> = ["pr", "create", "--fill"].map(String::from).into();
    for label in labels {
        args.push("-l".to_owned());
        args.push(label.clone());
    }
    args
}
