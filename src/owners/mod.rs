//! Ownership index: owners and the path patterns assigned to them

use serde::Serialize;
use std::fmt;

mod manifest;

pub use manifest::{OwnershipManifest, OwnershipRule};

/// A sigil-prefixed token naming a responsible party, e.g. `@alice`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Owner(String);

impl Owner {
    /// Wrap `token` if it starts with `sigil`
    pub fn parse(token: &str, sigil: char) -> Option<Self> {
        token.starts_with(sigil).then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Owner {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
