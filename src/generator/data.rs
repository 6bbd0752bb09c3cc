//! # Secret Data
//!
//! The accumulator every source writes into.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Secret `data`: key to base64-encoded value
///
/// Keys are unique and kept sorted, so the serialized Secret is reproducible.
/// Inserting an existing key replaces its value; the last source wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SecretData {
    inner: BTreeMap<String, String>,
}

impl SecretData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `value` and store it under `key`, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<[u8]>) {
        self.inner.insert(key.into(), STANDARD.encode(value));
    }

    /// Insert every pair in order
    pub fn merge<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<[u8]>,
    {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    /// The base64-encoded value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Decode the value stored under `key`
    #[must_use]
    pub fn decoded(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.get(key).and_then(|v| STANDARD.decode(v).ok())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
