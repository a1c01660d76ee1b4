//! Dependency context and manifest-wide resolution

use crate::fallback::FallbackTable;
use crate::identity::AssemblyName;
use crate::selector::GroupSelector;
use crate::types::{AssetGroup, AssetKind, Library, RuntimeFile};
use ridkit_core::{Result, RidkitError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Framework and runtime the application was built for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    #[serde(default)]
    pub framework: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

/// In-memory dependency manifest: every library the application references
/// plus the runtime fallback table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyContext {
    #[serde(default)]
    pub target: TargetInfo,
    #[serde(default)]
    pub libraries: Vec<Library>,
    #[serde(default)]
    pub runtime_graph: FallbackTable,
}

/// TOML snapshot wrapper
#[derive(Debug, Serialize, Deserialize)]
struct ContextFile {
    context: DependencyContext,
}

impl DependencyContext {
    pub fn new(target: TargetInfo, libraries: Vec<Library>, runtime_graph: FallbackTable) -> Self {
        Self {
            target,
            libraries,
            runtime_graph,
        }
    }

    /// Parse and validate a TOML snapshot
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ContextFile = toml::from_str(content)?;
        file.context.validate()?;
        Ok(file.context)
    }

    /// Load and validate a TOML snapshot from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Write the context as a TOML snapshot
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = ContextFile {
            context: self.clone(),
        };
        fs::write(path, toml::to_string_pretty(&file)?)?;
        Ok(())
    }

    /// Validate every library's group collections
    pub fn validate(&self) -> Result<()> {
        for library in &self.libraries {
            if let Err(err) = library.validate() {
                tracing::warn!(library = %library.name, "invalid library: {}", err);
                return Err(err);
            }
        }
        Ok(())
    }

    pub fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.iter().find(|l| l.name == name)
    }

    /// Start a resolution for `rid`. The fallback chain is looked up once
    /// and shared by every library and asset kind.
    pub fn resolve<'a: 'r, 'r>(&'a self, rid: &'r str) -> Resolution<'a, 'r> {
        let selector = GroupSelector::new(rid, self.runtime_graph.chain(rid));
        tracing::debug!(
            rid,
            fallbacks = selector.fallbacks().len(),
            libraries = self.libraries.len(),
            "resolving runtime assets"
        );
        Resolution {
            context: self,
            selector,
        }
    }

    /// Resolution of the RID-agnostic default assets
    pub fn resolve_default(&self) -> Resolution<'_, '_> {
        self.resolve("")
    }

    pub fn native_assets(&self, rid: &str) -> Vec<&str> {
        self.resolve(rid).assets(AssetKind::Native).collect()
    }

    pub fn native_runtime_files(&self, rid: &str) -> Vec<&RuntimeFile> {
        self.resolve(rid).files(AssetKind::Native).collect()
    }

    pub fn default_native_assets(&self) -> Vec<&str> {
        self.resolve_default().assets(AssetKind::Native).collect()
    }

    pub fn default_native_runtime_files(&self) -> Vec<&RuntimeFile> {
        self.resolve_default().files(AssetKind::Native).collect()
    }

    pub fn resource_assets(&self, rid: &str) -> Vec<&str> {
        self.resolve(rid).assets(AssetKind::Resource).collect()
    }

    pub fn default_resource_assets(&self) -> Vec<&str> {
        self.resolve_default().assets(AssetKind::Resource).collect()
    }

    /// Assembly names for `rid`, one result per resolved managed assembly
    pub fn runtime_assembly_names(&self, rid: &str) -> Vec<Result<AssemblyName>> {
        self.resolve(rid).assembly_names().collect()
    }

    pub fn default_assembly_names(&self) -> Vec<Result<AssemblyName>> {
        self.resolve_default().assembly_names().collect()
    }
}

/// Outcome of resolving one library's asset kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryResolution {
    pub name: String,
    pub version: String,
    /// Tag of the selected group; `Some("")` for the default group and
    /// `None` when no group applies.
    pub matched_runtime: Option<String>,
    pub paths: Vec<String>,
}

/// Asset resolution of a whole dependency context for one runtime.
///
/// `'a` borrows the context; `'r` covers the requested runtime identifier
/// and its fallback chain.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a, 'r> {
    context: &'a DependencyContext,
    selector: GroupSelector<'r>,
}

impl<'a: 'r, 'r> Resolution<'a, 'r> {
    pub fn runtime(&self) -> &'r str {
        self.selector.target()
    }

    pub fn fallbacks(&self) -> &'r [String] {
        self.selector.fallbacks()
    }

    pub fn context(&self) -> &'a DependencyContext {
        self.context
    }

    /// The group selected for one library, if any
    pub fn library_group(&self, library: &'a Library, kind: AssetKind) -> Option<&'a AssetGroup> {
        let group = self.selector.select(library.groups(kind));
        tracing::debug!(
            library = %library.name,
            %kind,
            matched = group.map(|g| g.runtime.as_str()),
            "selected asset group"
        );
        group
    }

    pub fn library_assets(&self, library: &'a Library, kind: AssetKind) -> Vec<&'a str> {
        self.library_group(library, kind)
            .map(|g| g.asset_paths().collect())
            .unwrap_or_default()
    }

    pub fn library_files(&self, library: &'a Library, kind: AssetKind) -> &'a [RuntimeFile] {
        self.library_group(library, kind)
            .map(|g| g.runtime_files.as_slice())
            .unwrap_or(&[])
    }

    /// File records for `kind` across all libraries, in manifest order
    pub fn files(&self, kind: AssetKind) -> impl Iterator<Item = &'a RuntimeFile> + 'r {
        let this = *self;
        self.context
            .libraries
            .iter()
            .flat_map(move |library| this.library_files(library, kind).iter())
    }

    /// Asset paths for `kind` across all libraries, in manifest order
    pub fn assets(&self, kind: AssetKind) -> impl Iterator<Item = &'a str> + 'r {
        self.files(kind).map(|f| f.path.as_str())
    }

    /// Assembly names for every resolved managed assembly.
    ///
    /// A malformed path fails only its own entry.
    pub fn assembly_names(&self) -> impl Iterator<Item = Result<AssemblyName>> + 'r {
        self.assets(AssetKind::Runtime)
            .map(AssemblyName::from_asset_path)
    }

    /// Per-library outcome for `kind`, including libraries with no match
    pub fn per_library(&self, kind: AssetKind) -> Vec<LibraryResolution> {
        self.context
            .libraries
            .iter()
            .map(|library| {
                let group = self.library_group(library, kind);
                LibraryResolution {
                    name: library.name.clone(),
                    version: library.version.clone(),
                    matched_runtime: group.map(|g| g.runtime.clone()),
                    paths: group
                        .map(|g| g.asset_paths().map(str::to_string).collect())
                        .unwrap_or_default(),
                }
            })
            .collect()
    }

    /// Fail with the first malformed assembly path, if any
    pub fn require_assembly_names(&self) -> Result<Vec<AssemblyName>> {
        self.assembly_names().collect()
    }
}

/// Make sure a host-supplied runtime identifier is present.
pub fn require_runtime(rid: Option<&str>) -> Result<&str> {
    rid.ok_or_else(|| RidkitError::InvalidInput("runtime identifier is required".to_string()))
}
