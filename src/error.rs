use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Installation guidance appended to the missing-dependency message
pub const LATEXPAND_INSTALL_HINT: &str =
    "On Debian/Ubuntu: sudo apt-get install texlive-extra-utils; on macOS with Homebrew: brew install texlive";

/// Every way a run can fail.
///
/// Sources are kept in the error chain instead of the message, so print with
/// `{:#}` through `anyhow` to get the full cause on one line.
#[derive(Error, Debug)]
pub enum ArxivToPromptError {
    #[error("Could not extract a valid arXiv ID from: {0}")]
    InvalidIdentifier(String),

    #[error("Failed to download arXiv source for {id}")]
    Download {
        id: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to download arXiv source for {id}: HTTP {status}")]
    HttpStatus {
        id: String,
        status: reqwest::StatusCode,
    },

    #[error("Downloaded file for {id} is not a valid tar archive: {reason}")]
    InvalidArchive { id: String, reason: String },

    #[error("Failed to extract tar archive for {id}")]
    Extraction {
        id: String,
        #[source]
        source: io::Error,
    },

    #[error("Could not find a main .tex file in {}", .0.display())]
    MainFileNotFound(PathBuf),

    #[error(
        "'{program}' command not found. Please install it first ({hint})",
        hint = LATEXPAND_INSTALL_HINT
    )]
    DependencyMissing { program: String },

    #[error("latexpand failed with {status}: {stderr}")]
    ExpansionFailed { status: ExitStatus, stderr: String },

    #[error("latexpand did not finish within {}s", .timeout.as_secs())]
    ExpansionTimeout { timeout: Duration },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ArxivToPromptError {
    /// Build an `ExpansionFailed` with stderr folded onto a single line
    pub fn expansion_failed(status: ExitStatus, stderr: &str) -> Self {
        let stderr = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" | ");
        ArxivToPromptError::ExpansionFailed { status, stderr }
    }
}

pub type Result<T> = std::result::Result<T, ArxivToPromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_missing_message_has_guidance() {
        let err = ArxivToPromptError::DependencyMissing {
            program: "latexpand".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'latexpand' command not found"));
        assert!(message.contains("texlive-extra-utils"));
        assert!(message.contains("brew install texlive"));
        assert!(!message.contains('\n'));
    }

    #[test]
    fn test_invalid_identifier_includes_input() {
        let err = ArxivToPromptError::InvalidIdentifier("not-an-arxiv-id".to_string());
        assert_eq!(
            err.to_string(),
            "Could not extract a valid arXiv ID from: not-an-arxiv-id"
        );
    }
}
