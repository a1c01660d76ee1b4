//! Assembly identity derivation from resolved asset paths

use ridkit_core::{Result, RidkitError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trailing marker on the file stem of a native-image (precompiled) assembly
pub const NATIVE_IMAGE_SUFFIX: &str = ".ni";

/// Identity of a managed assembly, derived from its asset path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssemblyName {
    name: String,
}

impl AssemblyName {
    /// Derive the assembly name from an asset path.
    ///
    /// Takes the file name without directory or extension and strips one
    /// trailing [`NATIVE_IMAGE_SUFFIX`], so `lib/Foo.ni.dll` and
    /// `lib/Foo.dll` both yield `Foo`. Both `/` and `\` separate
    /// directories. A path that leaves no name behind is rejected.
    pub fn from_asset_path(path: &str) -> Result<Self> {
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or_default();
        let stem = match file_name.rfind('.') {
            Some(dot) => &file_name[..dot],
            None => file_name,
        };
        let name = stem.strip_suffix(NATIVE_IMAGE_SUFFIX).unwrap_or(stem);

        if name.is_empty() {
            return Err(RidkitError::MalformedPath {
                path: path.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for AssemblyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
