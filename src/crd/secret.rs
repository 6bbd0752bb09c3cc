//! # Secret
//!
//! The Kubernetes Secret emitted on stdout.

use crate::constants::{SECRET_API_VERSION, SECRET_KIND};
use crate::crd::ObjectMeta;
use crate::error::{GeneratorError, Result};
use crate::generator::data::SecretData;
use serde::{Deserialize, Serialize};

/// Kubernetes `v1/Secret`, limited to the fields the generator fills
///
/// Field order is the serialization order: `apiVersion`, `kind`, `metadata`,
/// `data`, `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub data: SecretData,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub secret_type: String,
}

impl Secret {
    #[must_use]
    pub fn new(metadata: ObjectMeta, data: SecretData, secret_type: String) -> Self {
        Self {
            api_version: SECRET_API_VERSION.to_string(),
            kind: SECRET_KIND.to_string(),
            metadata,
            data,
            secret_type,
        }
    }

    /// Serialize as a YAML document
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Serialize`] if serde_yaml fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(GeneratorError::Serialize)
    }
}
