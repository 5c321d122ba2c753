//! Owner-scoped searching: invocation, execution and result parsing

use crate::owners::{Owner, OwnershipManifest};
use crate::{Config, PresentationItem, Result, SearchMatch};
use tracing::{info, warn};

mod invocation;
mod results;

pub use invocation::{RipgrepRunner, SearchInvocation, SearchOutput, SearchRunner, globs_for};
pub use results::{filter_items, parse_results, to_presentation_items};

/// Parsed matches plus anything the tool reported on its error stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub matches: Vec<SearchMatch>,
    /// Error-stream text, verbatim
    pub diagnostics: Option<String>,
}

impl SearchOutcome {
    pub fn items(&self) -> Vec<PresentationItem> {
        to_presentation_items(&self.matches)
    }
}

/// Runs a search scoped to path patterns and filters its output
pub struct ResultMatcher<R> {
    runner: R,
    config: Config,
}

impl<R: SearchRunner> ResultMatcher<R> {
    pub fn new(config: Config, runner: R) -> Self {
        Self { runner, config }
    }

    /// The command a search for `term` over `patterns` would run
    pub fn invocation(&self, term: &str, patterns: &[String]) -> SearchInvocation {
        SearchInvocation::build(
            self.config.program(),
            term,
            patterns,
            self.config.workspace_root(),
        )
    }

    /// Execute the search; execution failures never abort the caller
    pub async fn search(&self, term: &str, patterns: &[String]) -> SearchOutcome {
        if patterns.is_empty() {
            info!("No path patterns to search.");
            return SearchOutcome::default();
        }

        let invocation = self.invocation(term, patterns);
        let output = self.runner.run(&invocation).await;

        let diagnostics = if output.stderr.trim().is_empty() {
            None
        } else {
            warn!("{}", output.stderr.trim_end());
            Some(output.stderr)
        };

        let matches = parse_results(&output.stdout, self.config.description_limit());
        if matches.is_empty() {
            info!("There are no items.");
        } else {
            info!("Found {} items.", matches.len());
        }

        SearchOutcome {
            matches,
            diagnostics,
        }
    }
}

/// Builder for a one-shot search over an owner's files
pub struct OwnerSearch {
    config: Config,
    owner: Option<String>,
    term: Option<String>,
    exact: bool,
}

impl OwnerSearch {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            owner: None,
            term: None,
            exact: false,
        }
    }

    /// Owner whose patterns scope the search, e.g. `@alice`
    pub fn owner(mut self, owner: &str) -> Self {
        self.owner = Some(owner.to_string());
        self
    }

    /// Text to search for
    pub fn term(mut self, term: &str) -> Self {
        self.term = Some(term.to_string());
        self
    }

    /// Match owners as whole tokens instead of substrings
    pub fn exact_owner_match(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Execute with the default process runner
    pub async fn search(self) -> Result<SearchOutcome> {
        self.search_with(RipgrepRunner::new()).await
    }

    /// Execute with a caller-supplied runner
    pub async fn search_with<R: SearchRunner>(self, runner: R) -> Result<SearchOutcome> {
        let manifest = OwnershipManifest::load(&self.config.manifest_path())?;

        let (Some(owner), Some(term)) = (self.owner, self.term) else {
            return Ok(SearchOutcome::default());
        };
        if term.is_empty() {
            return Ok(SearchOutcome::default());
        }
        let Some(owner) = Owner::parse(&owner, self.config.sigil()) else {
            return Ok(SearchOutcome::default());
        };

        let patterns = if self.exact {
            manifest.patterns_for_exact(&owner)
        } else {
            manifest.patterns_for(&owner)
        };

        Ok(ResultMatcher::new(self.config, runner)
            .search(&term, &patterns)
            .await)
    }
}
