use std::path::PathBuf;

const GH_CLI_INSTALL_URL: &str = "https://cli.github.com";

#[derive(Debug, thiserror::Error)]
pub enum PrError {
    #[error("Data root does not exist: {path}")]
    DataRootNotFound { path: PathBuf },

    #[error("Data root is not a directory: {path}")]
    DataRootNotDirectory { path: PathBuf },

    #[error("Data root is not a git repository: {path}")]
    NotGitRepo { path: PathBuf },

    #[error("Command '{cmd}' not found on PATH. {hint}")]
    ToolNotFound { cmd: String, hint: String },

    #[error("Feature identifier '{feature}' is invalid: {reason}")]
    InvalidFeature { feature: String, reason: String },

    /// A data file that should hold a feature tree could not be parsed.
    #[error("Malformed data file {path}: {detail}")]
    MalformedDataFile { path: PathBuf, detail: String },

    /// A template references a field that the answer set does not provide.
    #[error("Unknown placeholder '{{{placeholder}}}' in template: {template}")]
    UnknownPlaceholder {
        placeholder: String,
        template: String,
    },

    #[error("PR type '{pr_type}' requires a {scope} but none was chosen")]
    MissingScope {
        pr_type: &'static str,
        scope: &'static str,
    },

    #[error("Failed to parse environment variable '{var}': {detail}")]
    ConfigEnvParseError { var: String, detail: String },

    #[error("{step} failed to start: {detail}")]
    CommandSpawnFailed { step: String, detail: String },

    #[error("{step} exited with code {exit_code:?}: {stderr}")]
    CommandFailed {
        step: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Input closed before the question was answered: {question}")]
    InputClosed { question: String },

    /// The prompter answered with something that is not one of the options.
    #[error("Answer '{answer}' is not one of the options for: {question}")]
    InvalidChoice { question: String, answer: String },
}

impl PrError {
    pub fn gh_not_found(cmd: &str) -> Self {
        PrError::ToolNotFound {
            cmd: cmd.to_owned(),
            hint: format!("Install the GitHub CLI from {GH_CLI_INSTALL_URL}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_placeholder_message_shows_braces() {
        let err = PrError::UnknownPlaceholder {
            placeholder: "browser".to_owned(),
            template: "Update {browser} data".to_owned(),
        };
        let msg = format!("{err}");
        assert!(
            msg.contains("'{browser}'"),
            "expected braced placeholder, got: {msg}"
        );
    }

    #[test]
    fn gh_not_found_includes_install_link() {
        let msg = format!("{}", PrError::gh_not_found("gh"));
        assert!(msg.contains("cli.github.com"), "got: {msg}");
    }
}
