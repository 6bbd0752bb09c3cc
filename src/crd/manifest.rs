//! # SopsSecret Manifest
//!
//! The input document: which encrypted sources to combine into one Secret.
//!
//! ```yaml
//! apiVersion: goabout.com/v1beta1
//! kind: SopsSecret
//! metadata:
//!   name: my-secret
//! envs:
//!   - secrets.env
//! files:
//!   - tls.crt
//!   - KEY=tls.key
//! ```

use crate::constants::{SOPS_SECRET_API_VERSION, SOPS_SECRET_KIND};
use crate::error::{GeneratorError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Object metadata carried from the manifest to the generated Secret
///
/// Field order is the serialization order of the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct ObjectMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub namespace: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: BTreeMap<String, String>,
}

/// SopsSecret generator manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SopsSecret {
    /// Must be `goabout.com/v1beta1`
    #[serde(default, deserialize_with = "null_as_default")]
    pub api_version: String,
    /// Must be `SopsSecret`
    #[serde(default, deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ObjectMeta,
    /// Encrypted dotenv, YAML or JSON files contributing one key per entry
    #[serde(rename = "envs", default, deserialize_with = "null_as_default")]
    pub env_sources: Vec<String>,
    /// Encrypted files contributing one key each, as `path` or `key=path`
    #[serde(rename = "files", default, deserialize_with = "null_as_default")]
    pub file_sources: Vec<String>,
    /// kustomize generator behavior: create, replace or merge
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub behavior: String,
    /// Skip the kustomize name suffix hash
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub disable_name_suffix_hash: bool,
    /// Secret type, e.g. `kubernetes.io/tls`
    #[serde(
        rename = "type",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub secret_type: String,
}

impl SopsSecret {
    /// Check the manifest identity and required fields
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Schema`] on a wrong `apiVersion`/`kind` or an
    /// empty `metadata.name`.
    pub fn validate(&self) -> Result<()> {
        if self.api_version != SOPS_SECRET_API_VERSION || self.kind != SOPS_SECRET_KIND {
            return Err(GeneratorError::Schema(format!(
                "input must be apiVersion {SOPS_SECRET_API_VERSION}, kind {SOPS_SECRET_KIND}"
            )));
        }
        if self.metadata.name.is_empty() {
            return Err(GeneratorError::Schema(
                "input must contain metadata.name value".to_string(),
            ));
        }
        Ok(())
    }
}

/// A YAML `key:` with no value is null; treat it like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
