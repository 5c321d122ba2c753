//! CODEOWNERS-style manifest parsing

use super::Owner;
use crate::{Result, SearchError};
use indexmap::IndexSet;
use std::path::Path;

/// One `<pattern> <owner>...` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipRule {
    pub pattern: String,
    /// Sigil-prefixed owner tokens of the line, deduplicated
    pub owners: IndexSet<Owner>,
}

/// Raw manifest lines, in file order
#[derive(Debug, Clone, Default)]
pub struct OwnershipManifest {
    lines: Vec<String>,
}

impl OwnershipManifest {
    /// Read and split the manifest at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            SearchError::ManifestUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Self::parse(&text))
    }

    /// Split raw text on `\r\n`, `\r` or `\n`
    pub fn parse(text: &str) -> Self {
        // `\r\n` first so it never yields an empty line between `\r` and `\n`
        let lines = text
            .split("\r\n")
            .flat_map(|chunk| chunk.split(['\r', '\n']))
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Rules from every line with at least a pattern and one more field
    pub fn rules(&self, sigil: char) -> impl Iterator<Item = OwnershipRule> + '_ {
        self.lines.iter().filter_map(move |line| {
            let mut fields = line.split_whitespace();
            let pattern = fields.next()?;
            let rest: Vec<&str> = fields.collect();
            if rest.is_empty() {
                return None;
            }
            let owners = rest
                .into_iter()
                .filter_map(|token| Owner::parse(token, sigil))
                .collect();
            Some(OwnershipRule {
                pattern: pattern.to_string(),
                owners,
            })
        })
    }

    /// Every distinct token starting with `sigil`, in order of first appearance
    pub fn owners(&self, sigil: char) -> IndexSet<Owner> {
        self.lines
            .iter()
            .flat_map(|line| line.split_whitespace())
            .filter_map(|token| Owner::parse(token, sigil))
            .collect()
    }

    /// First field of every line that contains `owner` as a substring.
    ///
    /// `@a` also matches lines owned only by `@ab`.
    pub fn patterns_for(&self, owner: &Owner) -> Vec<String> {
        self.lines
            .iter()
            .filter(|line| line.contains(owner.as_str()))
            .filter_map(|line| line.split_whitespace().next())
            .map(|field| field.trim().to_string())
            .collect()
    }

    /// Patterns of rules listing `owner` as a whole token
    pub fn patterns_for_exact(&self, owner: &Owner) -> Vec<String> {
        let Some(sigil) = owner.as_str().chars().next() else {
            return Vec::new();
        };
        self.rules(sigil)
            .filter(|rule| rule.owners.contains(owner))
            .map(|rule| rule.pattern)
            .collect()
    }
}
