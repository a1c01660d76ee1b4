//! ridkit Core - Foundational types for runtime asset resolution
//!
//! This crate provides the types that every other ridkit crate depends on:
//! - `ContentHash` - SHA-256 fingerprints of resolved output
//! - `Version` - Four-part assembly and file versions
//! - Error types and Result alias

mod error;
mod hash;
mod version;

pub use error::{Result, RidkitError};
pub use hash::ContentHash;
pub use version::Version;
