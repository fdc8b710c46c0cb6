//! Lint-fix-and-check loop over the changed data file.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::PrError;
use crate::prompt::Prompter;
use crate::subprocess;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintOutcome {
    /// No file was located, so nothing was linted.
    Skipped,
    Clean,
    /// The check still failed and the user chose to carry on.
    Ignored,
}

/// npm-style runner: `<program> run lint:fix <file>` then `<program> run lint <file>`.
#[derive(Debug, Clone)]
pub struct Linter {
    program: String,
    cwd: PathBuf,
}

impl Linter {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            cwd: cwd.into(),
        }
    }

    fn script(&self, script: &str, file: &Path) -> Result<bool, PrError> {
        let file = file.to_string_lossy();
        let args = ["run", script, file.as_ref()];
        let code = subprocess::run_attached(&self.program, &args, &self.cwd).map_err(|e| {
            PrError::CommandSpawnFailed {
                step: format!("{} run {script}", self.program),
                detail: e.to_string(),
            }
        })?;
        Ok(code == Some(0))
    }

    /// Fix once, then check until clean or until the user stops retrying.
    pub fn run(&self, file: Option<&Path>, prompter: &mut dyn Prompter) -> Result<LintOutcome, PrError> {
        let Some(file) = file else {
            return Ok(LintOutcome::Skipped);
        };

        info!(file = %file.display(), "fixing lint");
        if !self.script("lint:fix", file)? {
            // The check below reports what remains.
            warn!(file = %file.display(), "lint:fix did not exit cleanly");
        }

        loop {
            info!(file = %file.display(), "checking lint");
            if self.script("lint", file)? {
                return Ok(LintOutcome::Clean);
            }
            prompter.say("Linting errors detected! Please fix them.")?;
            if !prompter.confirm("Do you want to try linting again?", true)? {
                warn!(file = %file.display(), "continuing with lint errors");
                return Ok(LintOutcome::Ignored);
            }
        }
    }
}
