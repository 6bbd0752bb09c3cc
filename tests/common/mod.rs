//! Common test utilities for generator integration tests
//!
//! Provides a fake decryptor and an on-disk fixture directory so the pipeline
//! can run without sops or key material.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use sops_secret_generator::sops::error::{DecryptError, DecryptionFailureReason};
use sops_secret_generator::{Decryptor, Format};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zeroize::Zeroizing;

/// Returns content unchanged and records the format of every call
#[derive(Debug, Default)]
pub struct FakeDecryptor {
    pub calls: RefCell<Vec<Format>>,
}

impl Decryptor for FakeDecryptor {
    fn decrypt(
        &self,
        content: &[u8],
        format: Format,
    ) -> Result<Zeroizing<Vec<u8>>, DecryptError> {
        self.calls.borrow_mut().push(format);
        Ok(Zeroizing::new(content.to_vec()))
    }
}

/// Fails every decryption with the given reason
#[derive(Debug)]
pub struct FailingDecryptor(pub DecryptionFailureReason);

impl Decryptor for FailingDecryptor {
    fn decrypt(
        &self,
        _content: &[u8],
        _format: Format,
    ) -> Result<Zeroizing<Vec<u8>>, DecryptError> {
        Err(DecryptError::new(self.0, "no key could decrypt the data key"))
    }
}

/// Temporary directory holding a manifest and its sources
#[derive(Debug)]
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `name` and return its absolute path as a string
    pub fn source(&self, name: &str, content: impl AsRef<[u8]>) -> String {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write source");
        path.to_string_lossy().into_owned()
    }

    /// Write a SopsSecret manifest with the given envs, files and extra fields
    pub fn manifest(&self, envs: &[&str], files: &[&str], extra: &str) -> PathBuf {
        let mut yaml = String::from(
            "apiVersion: goabout.com/v1beta1\nkind: SopsSecret\nmetadata:\n  name: app-secrets\n",
        );
        yaml.push_str(&yaml_list("envs", envs));
        yaml.push_str(&yaml_list("files", files));
        yaml.push_str(extra);

        let path = self.dir.path().join("generator.yaml");
        fs::write(&path, yaml).expect("Failed to write manifest");
        path
    }
}

fn yaml_list(field: &str, items: &[&str]) -> String {
    if items.is_empty() {
        return format!("{field}: []\n");
    }
    let mut out = format!("{field}:\n");
    for item in items {
        out.push_str(&format!("  - '{item}'\n"));
    }
    out
}
