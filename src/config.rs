//! Runtime configuration

use std::path::{Path, PathBuf};

/// Name of the ownership manifest at the workspace root
pub const DEFAULT_MANIFEST_NAME: &str = "CODEOWNERS";
/// Matches with descriptions this long or longer are dropped
pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 1000;

/// Settings shared by the ownership index, the result matcher and the controller
#[derive(Debug, Clone)]
pub struct Config {
    workspace_root: PathBuf,
    manifest_name: String,
    owner_sigil: char,
    search_program: String,
    max_description_len: usize,
    cursor_shift: i64,
}

impl Config {
    /// Defaults for a workspace rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            workspace_root: root.into(),
            manifest_name: DEFAULT_MANIFEST_NAME.to_string(),
            owner_sigil: '@',
            search_program: "rg".to_string(),
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
            cursor_shift: -1,
        }
    }

    pub fn manifest_name(mut self, name: &str) -> Self {
        self.manifest_name = name.to_string();
        self
    }

    pub fn owner_sigil(mut self, sigil: char) -> Self {
        self.owner_sigil = sigil;
        self
    }

    pub fn search_program(mut self, program: &str) -> Self {
        self.search_program = program.to_string();
        self
    }

    pub fn max_description_len(mut self, len: usize) -> Self {
        self.max_description_len = len;
        self
    }

    /// Lines to move the cursor after placing it at the match's line number.
    ///
    /// The search tool reports 1-based lines while the editor addresses
    /// 0-based lines, so the default of `-1` lands on the displayed match.
    pub fn cursor_shift(mut self, shift: i64) -> Self {
        self.cursor_shift = shift;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.workspace_root.join(&self.manifest_name)
    }

    pub fn sigil(&self) -> char {
        self.owner_sigil
    }

    pub fn program(&self) -> &str {
        &self.search_program
    }

    pub fn description_limit(&self) -> usize {
        self.max_description_len
    }

    pub fn shift(&self) -> i64 {
        self.cursor_shift
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(".")
    }
}
