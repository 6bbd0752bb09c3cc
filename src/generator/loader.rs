//! # Loader
//!
//! Read and validate the `SopsSecret` manifest.

use crate::crd::SopsSecret;
use crate::error::{GeneratorError, Result};
use std::path::Path;
use tracing::debug;

/// Read the manifest at `path`
///
/// # Errors
///
/// [`GeneratorError::Io`] if the file cannot be read, otherwise see [`parse_manifest`].
pub fn load(path: &Path) -> Result<SopsSecret> {
    let content = std::fs::read(path).map_err(|e| GeneratorError::io(path, e))?;
    debug!("Loaded manifest {} ({} bytes)", path.display(), content.len());
    parse_manifest(&content)
}

/// Deserialize and validate a manifest
///
/// # Errors
///
/// [`GeneratorError::Parse`] on malformed YAML, [`GeneratorError::Schema`]
/// when the manifest is not a named `goabout.com/v1beta1` `SopsSecret`.
pub fn parse_manifest(content: &[u8]) -> Result<SopsSecret> {
    let manifest: SopsSecret =
        serde_yaml::from_slice(content).map_err(|e| GeneratorError::Parse(e.to_string()))?;
    manifest.validate()?;
    Ok(manifest)
}
