//! Runtime identifier fallback table

use serde::{Deserialize, Serialize};
use std::iter;

/// The ordered ancestors of one runtime identifier, most specific first.
/// The runtime itself is not part of `fallbacks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeFallbacks {
    pub runtime: String,
    #[serde(default)]
    pub fallbacks: Vec<String>,
}

impl RuntimeFallbacks {
    pub fn new<I, S>(runtime: impl Into<String>, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            runtime: runtime.into(),
            fallbacks: fallbacks.into_iter().map(Into::into).collect(),
        }
    }
}

/// Precomputed RID fallback table.
///
/// Every chain is expected to be transitively closed already; lookups
/// return the declared chain as-is and never walk from one entry to another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackTable {
    entries: Vec<RuntimeFallbacks>,
}

impl FallbackTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Lookups use the first entry declared for a runtime.
    pub fn insert(&mut self, entry: RuntimeFallbacks) {
        self.entries.push(entry);
    }

    /// Fallbacks declared for `rid`, or an empty slice when it has none
    pub fn chain(&self, rid: &str) -> &[String] {
        match self.entries.iter().find(|e| e.runtime == rid) {
            Some(entry) => &entry.fallbacks,
            None => {
                tracing::debug!(rid, "no fallback entry for runtime");
                &[]
            }
        }
    }

    /// `rid` followed by its fallback chain
    pub fn candidates<'a>(&'a self, rid: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        iter::once(rid).chain(self.chain(rid).iter().map(String::as_str))
    }

    pub fn entries(&self) -> &[RuntimeFallbacks] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<RuntimeFallbacks> for FallbackTable {
    fn from_iter<T: IntoIterator<Item = RuntimeFallbacks>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
