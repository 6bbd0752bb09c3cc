//! # Generator
//!
//! The SopsSecret to Secret pipeline:
//!
//! - `loader`: read and validate the manifest
//! - `sources`: resolve, read and decrypt every source
//! - `decoders`: parse env sources (dotenv, yaml, json) into pairs
//! - `data`: the base64 accumulator, last write wins
//! - `output`: annotate and wrap everything into a Secret

pub mod data;
pub mod decoders;
pub mod loader;
pub mod output;
pub mod sources;

use crate::error::Result;
use crate::sops::Decryptor;
use std::path::Path;
use tracing::{info, info_span};

pub use data::SecretData;
pub use loader::{load, parse_manifest};
pub use output::build_secret;
pub use sources::{collect_sources, resolve_file_source};

/// Generate the Secret YAML for the manifest at `path`
///
/// # Errors
///
/// Fails fast on the first error; nothing is produced for a partial run.
pub fn generate_secret(path: &Path, decryptor: &dyn Decryptor) -> Result<String> {
    let span = info_span!("generate", manifest = %path.display());
    let _entered = span.enter();

    let manifest = load(path)?;
    info!(
        "Generating secret {} from {} env and {} file sources",
        manifest.metadata.name,
        manifest.env_sources.len(),
        manifest.file_sources.len()
    );

    let data = collect_sources(&manifest, decryptor)?;
    build_secret(manifest, data).to_yaml()
}
