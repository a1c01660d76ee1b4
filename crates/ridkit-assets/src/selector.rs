//! Asset group selection for a target runtime identifier

use crate::types::{AssetGroup, RuntimeFile};
use std::iter;

/// Picks the single best-matching asset group for a target runtime.
///
/// Candidates are the target RID followed by its fallback chain. The first
/// candidate that exactly equals some group's tag selects that group (the
/// first declared one if a tag repeats). When nothing matches, the default
/// (empty-tag) group is used, and when there is none the result is empty.
#[derive(Debug, Clone, Copy)]
pub struct GroupSelector<'a> {
    target: &'a str,
    fallbacks: &'a [String],
}

impl<'a> GroupSelector<'a> {
    pub fn new(target: &'a str, fallbacks: &'a [String]) -> Self {
        Self { target, fallbacks }
    }

    /// Selector for the RID-agnostic default assets
    pub fn default_assets() -> Self {
        Self::new("", &[])
    }

    pub fn target(&self) -> &'a str {
        self.target
    }

    pub fn fallbacks(&self) -> &'a [String] {
        self.fallbacks
    }

    /// The candidate runtime sequence, target first
    pub fn candidates(&self) -> impl Iterator<Item = &'a str> + 'a {
        iter::once(self.target).chain(self.fallbacks.iter().map(String::as_str))
    }

    /// Select at most one group from `groups`
    pub fn select<'g>(&self, groups: &'g [AssetGroup]) -> Option<&'g AssetGroup> {
        for rid in self.candidates() {
            if let Some(group) = groups.iter().find(|g| g.runtime == rid) {
                tracing::trace!(rid, "runtime candidate matched");
                return Some(group);
            }
        }

        groups.iter().find(|g| g.is_default())
    }

    /// Paths of the selected group, empty when nothing was selected
    pub fn paths<'g>(&self, groups: &'g [AssetGroup]) -> Vec<&'g str> {
        self.select(groups)
            .map(|g| g.asset_paths().collect())
            .unwrap_or_default()
    }

    /// File records of the selected group, empty when nothing was selected
    pub fn files<'g>(&self, groups: &'g [AssetGroup]) -> &'g [RuntimeFile] {
        self.select(groups)
            .map(|g| g.runtime_files.as_slice())
            .unwrap_or(&[])
    }
}
