//! Asset group and library descriptor types

use ridkit_core::{Result, RidkitError, Version};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The three independently resolved asset collections of a library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// Native (unmanaged) libraries
    Native,
    /// Managed runtime assemblies
    Runtime,
    /// Resource (satellite) assemblies
    Resource,
}

impl AssetKind {
    pub const ALL: [AssetKind; 3] = [AssetKind::Native, AssetKind::Runtime, AssetKind::Resource];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Native => "native",
            AssetKind::Runtime => "runtime",
            AssetKind::Resource => "resource",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = RidkitError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "native" => Ok(AssetKind::Native),
            "runtime" | "assembly" => Ok(AssetKind::Runtime),
            "resource" => Ok(AssetKind::Resource),
            other => Err(RidkitError::UnknownAssetKind(other.to_string())),
        }
    }
}

/// A single file inside an asset group, with optional version metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeFile {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly_version: Option<Version>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_version: Option<Version>,
}

impl RuntimeFile {
    /// A file record with no version metadata
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            assembly_version: None,
            file_version: None,
        }
    }

    pub fn with_versions(
        path: impl Into<String>,
        assembly_version: Option<Version>,
        file_version: Option<Version>,
    ) -> Self {
        Self {
            path: path.into(),
            assembly_version,
            file_version,
        }
    }
}

/// One platform-tagged bundle of files for a single library.
///
/// An empty `runtime` tag marks the RID-agnostic default group. Paths are
/// always derived from the file records, so both views describe the same
/// files in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetGroup {
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub runtime_files: Vec<RuntimeFile>,
}

impl AssetGroup {
    /// Build a group from bare asset paths
    pub fn new<I, S>(runtime: impl Into<String>, asset_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            runtime: runtime.into(),
            runtime_files: asset_paths.into_iter().map(RuntimeFile::new).collect(),
        }
    }

    /// Build a group from file records
    pub fn with_files(runtime: impl Into<String>, runtime_files: Vec<RuntimeFile>) -> Self {
        Self {
            runtime: runtime.into(),
            runtime_files,
        }
    }

    /// The RID-agnostic default group
    pub fn default_group<I, S>(asset_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(String::new(), asset_paths)
    }

    pub fn is_default(&self) -> bool {
        self.runtime.is_empty()
    }

    /// Asset paths in declaration order
    pub fn asset_paths(&self) -> impl Iterator<Item = &str> {
        self.runtime_files.iter().map(|f| f.path.as_str())
    }
}

fn default_library_type() -> String {
    "package".to_string()
}

/// A single dependency of the application with its asset groups.
///
/// Built once by whoever loads the manifest; resolution only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub name: String,
    pub version: String,
    #[serde(rename = "type", default = "default_library_type")]
    pub library_type: String,
    #[serde(default)]
    pub serviceable: bool,
    #[serde(default)]
    pub native_library_groups: Vec<AssetGroup>,
    #[serde(default)]
    pub runtime_assembly_groups: Vec<AssetGroup>,
    #[serde(default)]
    pub resource_assembly_groups: Vec<AssetGroup>,
}

impl Library {
    /// Create a library with no asset groups
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            library_type: default_library_type(),
            serviceable: false,
            native_library_groups: Vec::new(),
            runtime_assembly_groups: Vec::new(),
            resource_assembly_groups: Vec::new(),
        }
    }

    pub fn with_groups(mut self, kind: AssetKind, groups: Vec<AssetGroup>) -> Self {
        *self.groups_mut(kind) = groups;
        self
    }

    /// The group collection for an asset kind
    pub fn groups(&self, kind: AssetKind) -> &[AssetGroup] {
        match kind {
            AssetKind::Native => &self.native_library_groups,
            AssetKind::Runtime => &self.runtime_assembly_groups,
            AssetKind::Resource => &self.resource_assembly_groups,
        }
    }

    fn groups_mut(&mut self, kind: AssetKind) -> &mut Vec<AssetGroup> {
        match kind {
            AssetKind::Native => &mut self.native_library_groups,
            AssetKind::Runtime => &mut self.runtime_assembly_groups,
            AssetKind::Resource => &mut self.resource_assembly_groups,
        }
    }

    /// Check that no collection declares the same runtime tag twice.
    ///
    /// Selection tolerates duplicates (the first declared group wins), so
    /// this is only enforced when a manifest is loaded.
    pub fn validate(&self) -> Result<()> {
        for kind in AssetKind::ALL {
            let mut seen = HashSet::new();
            for group in self.groups(kind) {
                if !seen.insert(group.runtime.as_str()) {
                    return Err(RidkitError::DuplicateAssetGroup {
                        library: self.name.clone(),
                        kind: kind.to_string(),
                        runtime: group.runtime.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_files() {
        let group = AssetGroup::with_files(
            "win-x64",
            vec![
                RuntimeFile::new("runtimes/win-x64/native/a.dll"),
                RuntimeFile::with_versions(
                    "runtimes/win-x64/native/b.dll",
                    None,
                    Some(Version::new(1, 0, 0, 0)),
                ),
            ],
        );
        let paths: Vec<_> = group.asset_paths().collect();
        assert_eq!(
            paths,
            vec!["runtimes/win-x64/native/a.dll", "runtimes/win-x64/native/b.dll"]
        );
    }

    #[test]
    fn test_default_group() {
        assert!(AssetGroup::default_group(["lib/a.dll"]).is_default());
        assert!(!AssetGroup::new("linux", ["lib/a.so"]).is_default());
    }

    #[test]
    fn test_asset_kind_parse() {
        assert_eq!("native".parse::<AssetKind>().unwrap(), AssetKind::Native);
        assert_eq!("assembly".parse::<AssetKind>().unwrap(), AssetKind::Runtime);
        assert_eq!("resource".parse::<AssetKind>().unwrap(), AssetKind::Resource);
        assert!(matches!(
            "Native".parse::<AssetKind>(),
            Err(RidkitError::UnknownAssetKind(_))
        ));
    }

    #[test]
    fn test_groups_by_kind() {
        let lib = Library::new("Lib", "1.0.0")
            .with_groups(AssetKind::Native, vec![AssetGroup::new("linux", ["a.so"])])
            .with_groups(AssetKind::Resource, vec![AssetGroup::default_group(["de/Lib.resources.dll"])]);
        assert_eq!(lib.groups(AssetKind::Native).len(), 1);
        assert!(lib.groups(AssetKind::Runtime).is_empty());
        assert_eq!(lib.groups(AssetKind::Resource).len(), 1);
    }

    #[test]
    fn test_validate_rejects_duplicate_tags() {
        let lib = Library::new("Dup", "1.0.0").with_groups(
            AssetKind::Runtime,
            vec![
                AssetGroup::new("linux", ["a.dll"]),
                AssetGroup::new("linux", ["b.dll"]),
            ],
        );
        let err = lib.validate().unwrap_err();
        assert!(matches!(
            err,
            RidkitError::DuplicateAssetGroup { ref library, ref kind, ref runtime }
                if library == "Dup" && kind == "runtime" && runtime == "linux"
        ));
    }

    #[test]
    fn test_validate_rejects_two_default_groups() {
        let lib = Library::new("Dup", "1.0.0").with_groups(
            AssetKind::Native,
            vec![AssetGroup::default_group(["a.so"]), AssetGroup::default_group(["b.so"])],
        );
        assert!(lib.validate().is_err());
    }

    #[test]
    fn test_validate_allows_same_tag_across_kinds() {
        let lib = Library::new("Ok", "1.0.0")
            .with_groups(AssetKind::Native, vec![AssetGroup::new("linux", ["a.so"])])
            .with_groups(AssetKind::Runtime, vec![AssetGroup::new("linux", ["a.dll"])]);
        assert!(lib.validate().is_ok());
    }

    #[test]
    fn test_library_deserialize_defaults() {
        let toml_str = r#"
name = "Newtonsoft.Json"
version = "13.0.3"

[[runtime_assembly_groups]]
runtime_files = [{ path = "lib/net6.0/Newtonsoft.Json.dll", assembly_version = "13.0.0.0", file_version = "13.0.3.27908" }]
"#;
        let lib: Library = toml::from_str(toml_str).unwrap();
        assert_eq!(lib.library_type, "package");
        assert!(!lib.serviceable);
        let group = &lib.runtime_assembly_groups[0];
        assert!(group.is_default());
        assert_eq!(
            group.runtime_files[0].assembly_version,
            Some(Version::new(13, 0, 0, 0))
        );
    }
}
