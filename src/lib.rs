//! # codeowner-search
//!
//! Search a codebase restricted to the files a CODEOWNERS entry owns.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use codeowner_search::{CodeOwnerSearch, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Find `TODO` in every file owned by @alice
//!     let outcome = CodeOwnerSearch::workspace(Config::new("."))
//!         .owner("@alice")
//!         .term("TODO")
//!         .search()
//!         .await?;
//!
//!     for item in outcome.items() {
//!         println!("{}  {}", item.label, item.description);
//!     }
//!
//!     Ok(())
//! }
//! ```

use serde::Serialize;

pub mod config;
pub mod error;
pub mod host;
pub mod owners;
pub mod search;

pub use config::Config;
pub use error::{Result, SearchError};
pub use host::{CursorPosition, Host, Location, SearchController, WorkflowOutcome};
pub use owners::{Owner, OwnershipManifest, OwnershipRule};
pub use search::{OwnerSearch, ResultMatcher, RipgrepRunner, SearchOutcome, SearchRunner};

/// Main entry point for owner-scoped searches
pub struct CodeOwnerSearch;

impl CodeOwnerSearch {
    /// Search the workspace described by `config`
    pub fn workspace(config: Config) -> OwnerSearch {
        OwnerSearch::new(config)
    }
}

/// One line of search output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    /// Path relative to the workspace root, as printed by the search tool
    pub full_path: String,
    /// 1-based line number reported by the search tool
    pub line_number: u32,
    /// Matched text with surrounding whitespace trimmed
    pub description: String,
    /// The unparsed output line
    pub raw_line: String,
}

/// A match summarized for interactive selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresentationItem {
    /// `<basename> : <line>`
    pub label: String,
    pub description: String,
    /// Full relative path, used to open the file
    pub detail: String,
    pub line_number: u32,
}

impl From<&SearchMatch> for PresentationItem {
    fn from(m: &SearchMatch) -> Self {
        let basename = m.full_path.rsplit('/').next().unwrap_or(&m.full_path);
        Self {
            label: format!("{} : {}", basename, m.line_number),
            description: m.description.clone(),
            detail: m.full_path.clone(),
            line_number: m.line_number,
        }
    }
}
