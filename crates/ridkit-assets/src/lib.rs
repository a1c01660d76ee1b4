//! ridkit Assets - Runtime-identifier asset resolution
//!
//! Given a dependency context (libraries with platform-tagged asset groups
//! plus a precomputed RID fallback table) and a target runtime identifier,
//! this crate picks the single best asset group per library and asset kind,
//! flattens the results across the manifest, and derives assembly names
//! from resolved managed-assembly paths.

mod context;
mod fallback;
mod identity;
mod report;
mod selector;
mod types;

pub use context::{require_runtime, DependencyContext, LibraryResolution, Resolution, TargetInfo};
pub use fallback::{FallbackTable, RuntimeFallbacks};
pub use identity::{AssemblyName, NATIVE_IMAGE_SUFFIX};
pub use report::ResolutionReport;
pub use selector::GroupSelector;
pub use types::{AssetGroup, AssetKind, Library, RuntimeFile};
