//! Serializable summary of a resolution run

use crate::context::{LibraryResolution, Resolution};
use crate::types::AssetKind;
use ridkit_core::ContentHash;
use serde::{Deserialize, Serialize};

/// What a resolution selected for one asset kind, library by library,
/// with a fingerprint of the flattened output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    pub runtime: String,
    pub fallbacks: Vec<String>,
    pub kind: AssetKind,
    pub libraries: Vec<LibraryResolution>,
    pub fingerprint: ContentHash,
}

impl ResolutionReport {
    pub fn build<'a: 'r, 'r>(resolution: &Resolution<'a, 'r>, kind: AssetKind) -> Self {
        let libraries = resolution.per_library(kind);
        let fingerprint =
            ContentHash::from_lines(libraries.iter().flat_map(|l| l.paths.iter()));

        Self {
            runtime: resolution.runtime().to_string(),
            fallbacks: resolution.fallbacks().to_vec(),
            kind,
            libraries,
            fingerprint,
        }
    }

    /// All selected paths in manifest order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.libraries
            .iter()
            .flat_map(|l| l.paths.iter().map(String::as_str))
    }

    /// Libraries for which no group applied
    pub fn unmatched(&self) -> impl Iterator<Item = &LibraryResolution> {
        self.libraries.iter().filter(|l| l.matched_runtime.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{DependencyContext, TargetInfo};
    use crate::fallback::RuntimeFallbacks;
    use crate::types::{AssetGroup, Library};

    fn context() -> DependencyContext {
        DependencyContext::new(
            TargetInfo::default(),
            vec![
                Library::new("A", "1.0.0").with_groups(
                    AssetKind::Native,
                    vec![
                        AssetGroup::new("linux-x64", ["runtimes/linux-x64/native/liba.so"]),
                        AssetGroup::new("linux", ["runtimes/linux/native/liba.so"]),
                        AssetGroup::default_group(["lib/liba.so"]),
                    ],
                ),
                Library::new("B", "2.0.0").with_groups(
                    AssetKind::Native,
                    vec![AssetGroup::new("win", ["runtimes/win/native/b.dll"])],
                ),
            ],
            [RuntimeFallbacks::new("linux-arm", ["linux"])].into_iter().collect(),
        )
    }

    #[test]
    fn test_report_contents() {
        let ctx = context();
        let report = ResolutionReport::build(&ctx.resolve("linux-arm"), AssetKind::Native);
        assert_eq!(report.runtime, "linux-arm");
        assert_eq!(report.fallbacks, vec!["linux"]);
        assert_eq!(report.libraries[0].matched_runtime.as_deref(), Some("linux"));
        let unmatched: Vec<_> = report.unmatched().map(|l| l.name.as_str()).collect();
        assert_eq!(unmatched, vec!["B"]);
    }

    #[test]
    fn test_fingerprint_matches_flattened_output() {
        let ctx = context();
        let resolution = ctx.resolve("linux-x64");
        let report = ResolutionReport::build(&resolution, AssetKind::Native);
        let expected = ContentHash::from_lines(resolution.assets(AssetKind::Native));
        assert_eq!(report.fingerprint, expected);
        assert_eq!(
            report.paths().collect::<Vec<_>>(),
            resolution.assets(AssetKind::Native).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let ctx = context();
        let first = ResolutionReport::build(&ctx.resolve("linux-x64"), AssetKind::Native);
        let second = ResolutionReport::build(&ctx.resolve("linux-x64"), AssetKind::Native);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_different_runtime_changes_fingerprint() {
        let ctx = context();
        let linux = ResolutionReport::build(&ctx.resolve("linux-x64"), AssetKind::Native);
        let other = ResolutionReport::build(&ctx.resolve("linux-arm"), AssetKind::Native);
        assert_ne!(linux.fingerprint, other.fingerprint);
    }
}
