//! External tool resolution.
//!
//! Checks that git, the GitHub CLI and the lint runner are reachable before
//! the wizard asks anything, so a missing binary fails fast with an install
//! hint instead of after the user has answered every question.
//!
//! **Windows:** bare names with no extension also try `<name>.exe` in each
//! PATH directory; explicit paths with no extension try `.exe` once.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::PrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Git,
    Gh,
    Lint,
}

impl Tool {
    fn not_found(self, cmd: &str) -> PrError {
        let hint = match self {
            Tool::Gh => return PrError::gh_not_found(cmd),
            Tool::Git => "Install git from https://git-scm.com".to_owned(),
            Tool::Lint => "Install Node.js and npm from https://nodejs.org".to_owned(),
        };
        PrError::ToolNotFound {
            cmd: cmd.to_owned(),
            hint,
        }
    }
}

/// Resolve `cmd` to a path, searching `PATH` for bare names.
pub fn resolve(tool: Tool, cmd: &str) -> Result<PathBuf, PrError> {
    resolve_with(tool, cmd, std::env::var_os("PATH"))
}

fn resolve_with(tool: Tool, cmd: &str, path_var: Option<OsString>) -> Result<PathBuf, PrError> {
    if cmd.contains(std::path::MAIN_SEPARATOR) || cmd.contains('/') {
        let p = PathBuf::from(cmd);
        if is_executable(&p) {
            return Ok(p);
        }
        #[cfg(windows)]
        {
            if p.extension().is_none() {
                let with_exe = p.with_extension("exe");
                if is_executable(&with_exe) {
                    return Ok(with_exe);
                }
            }
        }
        return Err(tool.not_found(cmd));
    }

    if let Some(paths) = path_var {
        for dir in std::env::split_paths(&paths) {
            for candidate in candidates(&dir, cmd) {
                if is_executable(&candidate) {
                    return Ok(candidate);
                }
            }
        }
    }

    Err(tool.not_found(cmd))
}

#[cfg(unix)]
fn candidates(dir: &Path, cmd: &str) -> Vec<PathBuf> {
    vec![dir.join(cmd)]
}

#[cfg(windows)]
fn candidates(dir: &Path, cmd: &str) -> Vec<PathBuf> {
    if Path::new(cmd).extension().is_some() {
        vec![dir.join(cmd)]
    } else {
        vec![dir.join(cmd), dir.join(format!("{cmd}.exe"))]
    }
}

/// Returns `true` when `path` is a regular file (with an execute bit on Unix).
fn is_executable(path: &Path) -> bool {
    let Ok(meta) = path.metadata() else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }

    #[cfg(not(unix))]
    {
        true
    }
}
