//! The pick owner → pick result → jump workflow, driven through a host UI

use crate::owners::{Owner, OwnershipManifest};
use crate::search::{ResultMatcher, SearchRunner};
use crate::{Config, PresentationItem, Result, SearchError};
use indexmap::IndexSet;
use std::path::PathBuf;
use tracing::{debug, info};

const MANIFEST_MISSING: &str = "CODEOWNERS file not found.";
const NO_ITEMS: &str = "There are no items.";
const SEARCH_PROMPT: &str = "Please input search word.";

/// 0-based cursor position inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPosition {
    pub line: u32,
    pub column: u32,
}

impl CursorPosition {
    /// Place the cursor at `line_number`, then move it by `shift` lines.
    ///
    /// Never moves above the first line.
    pub fn for_match(line_number: u32, shift: i64) -> Self {
        let line = (i64::from(line_number) + shift).clamp(0, i64::from(u32::MAX));
        Self {
            line: line as u32,
            column: 0,
        }
    }

    /// 1-based line, as editors take it on the command line
    pub fn display_line(&self) -> u32 {
        self.line.saturating_add(1)
    }
}

/// A file and the cursor position to open it at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    pub cursor: CursorPosition,
}

/// How one command invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// The user dismissed a prompt or gave no search term
    Cancelled,
    /// The search produced nothing to pick from
    NoResults,
    /// The selected match was opened
    Opened(Location),
}

/// Editor capabilities the workflow needs
pub trait Host {
    /// Free-text prompt; `None` when dismissed
    fn input_box(&mut self, prompt: &str) -> Result<Option<String>>;
    /// Single-select list of owners
    fn pick_owner(&mut self, owners: &[Owner]) -> Result<Option<Owner>>;
    /// Single-select list of matches, filterable by description; returns an index into `items`
    fn pick_match(&mut self, items: &[PresentationItem]) -> Result<Option<usize>>;
    /// Open `location.path` and move the cursor
    fn open_at(&mut self, location: &Location) -> Result<()>;
    fn show_error(&mut self, message: &str);
    fn show_info(&mut self, message: &str);
}

struct Loaded {
    manifest: OwnershipManifest,
    owners: IndexSet<Owner>,
}

/// Owns the host, the search runner and the loaded manifest for one session
pub struct SearchController<H, R> {
    host: H,
    matcher: ResultMatcher<R>,
    config: Config,
    loaded: Option<Loaded>,
}

impl<H: Host, R: SearchRunner> SearchController<H, R> {
    pub fn new(config: Config, host: H, runner: R) -> Self {
        Self {
            host,
            matcher: ResultMatcher::new(config.clone(), runner),
            config,
            loaded: None,
        }
    }

    /// Load the manifest and make the command available
    pub fn start(&mut self) -> Result<()> {
        let root = self.config.workspace_root();
        if !root.is_dir() {
            self.host.show_info("Open a folder/workspace first");
            return Err(SearchError::WorkspaceUnavailable(root.to_path_buf()));
        }

        let manifest = match OwnershipManifest::load(&self.config.manifest_path()) {
            Ok(manifest) => manifest,
            Err(e) => {
                self.host.show_error(MANIFEST_MISSING);
                return Err(e);
            }
        };

        let owners = manifest.owners(self.config.sigil());
        info!(owners = owners.len(), "codeowner search is active");
        self.loaded = Some(Loaded { manifest, owners });
        Ok(())
    }

    /// Drop the loaded manifest; the command fails until the next `start`
    pub fn stop(&mut self) {
        self.loaded = None;
    }

    pub fn is_started(&self) -> bool {
        self.loaded.is_some()
    }

    /// Owners offered by the pick list, in manifest order
    pub fn owners(&self) -> Vec<Owner> {
        self.loaded
            .as_ref()
            .map(|l| l.owners.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Prompt for a term and an owner, search the owner's files, and open the picked match
    pub async fn search_by_code_owner(&mut self) -> Result<WorkflowOutcome> {
        let term = self.host.input_box(SEARCH_PROMPT)?;

        let Some(loaded) = &self.loaded else {
            self.host.show_error(MANIFEST_MISSING);
            return Err(SearchError::NotStarted);
        };

        let Some(term) = term.filter(|t| !t.is_empty()) else {
            return Ok(WorkflowOutcome::Cancelled);
        };

        let owners: Vec<Owner> = loaded.owners.iter().cloned().collect();
        let Some(owner) = self.host.pick_owner(&owners)? else {
            return Ok(WorkflowOutcome::Cancelled);
        };

        let patterns = loaded.manifest.patterns_for(&owner);
        debug!(%owner, ?patterns, "resolved owner patterns");

        let outcome = self.matcher.search(&term, &patterns).await;
        if let Some(diagnostics) = &outcome.diagnostics {
            self.host.show_error(diagnostics);
        }

        let items = outcome.items();
        if items.is_empty() {
            self.host.show_info(NO_ITEMS);
            return Ok(WorkflowOutcome::NoResults);
        }

        let Some(index) = self.host.pick_match(&items)? else {
            return Ok(WorkflowOutcome::Cancelled);
        };
        let Some(item) = items.get(index) else {
            return Err(SearchError::Host(format!(
                "selection {} out of range ({} items)",
                index,
                items.len()
            )));
        };

        let location = Location {
            path: self.config.workspace_root().join(&item.detail),
            cursor: CursorPosition::for_match(item.line_number, self.config.shift()),
        };
        self.host.open_at(&location)?;
        Ok(WorkflowOutcome::Opened(location))
    }
}
