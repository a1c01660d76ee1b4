//! CLI command implementations

pub mod check;
pub mod fallbacks;
pub mod resolve;

use anyhow::{Context, Result};
use ridkit_assets::DependencyContext;
use std::path::Path;

/// Load a dependency context snapshot, naming the file on failure
pub fn load_context(manifest: &str) -> Result<DependencyContext> {
    DependencyContext::load(Path::new(manifest))
        .with_context(|| format!("failed to load dependency context '{}'", manifest))
}
