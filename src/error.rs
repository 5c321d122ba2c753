//! Error types for the codeowner-search library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for codeowner-search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while resolving owners or searching
#[derive(Debug, Error)]
pub enum SearchError {
    /// The ownership manifest is missing or unreadable
    #[error("CODEOWNERS file not found.")]
    ManifestUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The search tool wrote to its error stream
    #[error("Search tool error: {0}")]
    SearchTool(String),
    /// The workspace root does not exist or is not a directory
    #[error("Open a folder/workspace first: {}", .0.display())]
    WorkspaceUnavailable(PathBuf),
    /// The command was invoked before `start` or after `stop`
    #[error("CODEOWNERS file not found.")]
    NotStarted,
    /// An interactive host capability failed
    #[error("Host error: {0}")]
    Host(String),
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
