//! # Output
//!
//! Build the Secret from a manifest and its collected data.

use crate::constants::{BEHAVIOR_ANNOTATION, NEEDS_HASH_ANNOTATION};
use crate::crd::{Secret, SopsSecret};
use crate::generator::data::SecretData;

/// Wrap `data` in a Secret carrying the manifest metadata
///
/// kustomize reads two annotations off generated resources: `needs-hash`
/// (added unless `disableNameSuffixHash` is set) and `behavior` (added when
/// the manifest declares one).
#[must_use]
pub fn build_secret(manifest: SopsSecret, data: SecretData) -> Secret {
    let SopsSecret {
        mut metadata,
        behavior,
        disable_name_suffix_hash,
        secret_type,
        ..
    } = manifest;

    if !disable_name_suffix_hash {
        metadata
            .annotations
            .insert(NEEDS_HASH_ANNOTATION.to_string(), "true".to_string());
    }
    if !behavior.is_empty() {
        metadata
            .annotations
            .insert(BEHAVIOR_ANNOTATION.to_string(), behavior);
    }

    Secret::new(metadata, data, secret_type)
}
