//! # SOPS Errors
//!
//! Classification of sops failures so the user gets an actionable message.

use std::fmt;
use thiserror::Error;

/// Why a sops decryption failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecryptionFailureReason {
    /// No key able to decrypt the data key is available
    KeyNotFound,
    /// A key was found but does not match the one used for encryption
    WrongKey,
    /// sops does not understand the input type
    UnsupportedFormat,
    /// The key material itself is malformed
    InvalidKeyFormat,
    /// The file is not a valid sops document or its MAC does not match
    CorruptedFile,
    /// A key service (KMS, Vault, ...) did not answer in time
    NetworkTimeout,
    /// sops could not be run or a key service is unreachable
    ProviderUnavailable,
    /// The key service refused access
    PermissionDenied,
    Unknown,
}

impl DecryptionFailureReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DecryptionFailureReason::KeyNotFound => "key_not_found",
            DecryptionFailureReason::WrongKey => "wrong_key",
            DecryptionFailureReason::UnsupportedFormat => "unsupported_format",
            DecryptionFailureReason::InvalidKeyFormat => "invalid_key_format",
            DecryptionFailureReason::CorruptedFile => "corrupted_file",
            DecryptionFailureReason::NetworkTimeout => "network_timeout",
            DecryptionFailureReason::ProviderUnavailable => "provider_unavailable",
            DecryptionFailureReason::PermissionDenied => "permission_denied",
            DecryptionFailureReason::Unknown => "unknown",
        }
    }

    /// Get remediation guidance for this failure
    #[must_use]
    pub fn remediation(&self) -> &'static str {
        match self {
            DecryptionFailureReason::KeyNotFound => {
                "Make the decryption key available to sops (GPG keyring, SOPS_AGE_KEY_FILE or cloud KMS credentials)"
            }
            DecryptionFailureReason::WrongKey => {
                "The available key does not match the recipients of this file; re-encrypt it for your key or import the right one"
            }
            DecryptionFailureReason::UnsupportedFormat => {
                "Use a .env, .yaml, .yml or .json extension, or a file encrypted with --input-type binary"
            }
            DecryptionFailureReason::InvalidKeyFormat => {
                "Check that the configured key is a valid GPG or age private key"
            }
            DecryptionFailureReason::CorruptedFile => {
                "The file is not a valid sops document or was modified after encryption; re-encrypt it with sops"
            }
            DecryptionFailureReason::NetworkTimeout => {
                "The key service timed out; check network access to KMS/Vault and retry"
            }
            DecryptionFailureReason::ProviderUnavailable => {
                "Install sops (https://github.com/getsops/sops) or point SOPSSECRET_SOPS_BINARY at it"
            }
            DecryptionFailureReason::PermissionDenied => {
                "The key service denied access; check the credentials and IAM permissions used by sops"
            }
            DecryptionFailureReason::Unknown => "Run sops --decrypt on the file directly for details",
        }
    }
}

impl fmt::Display for DecryptionFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed decryption, with its classified reason
#[derive(Debug, Error)]
#[error("sops decryption failed ({reason}): {message}")]
pub struct DecryptError {
    pub reason: DecryptionFailureReason,
    pub message: String,
}

impl DecryptError {
    pub fn new(reason: DecryptionFailureReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }

    /// Get remediation guidance for this error
    #[must_use]
    pub fn remediation(&self) -> &'static str {
        self.reason.remediation()
    }
}

/// Classify a sops failure from its stderr and exit code
///
/// Known sops exit codes take priority over the message text.
#[must_use]
pub fn classify_sops_error(message: &str, exit_code: Option<i32>) -> DecryptionFailureReason {
    match exit_code {
        // CouldNotRetrieveKey, NoEncryptionKeyFound
        Some(128 | 111) => return DecryptionFailureReason::KeyNotFound,
        // ErrorDecryptingMac, ErrorDecryptingTree
        Some(24 | 25) => return DecryptionFailureReason::WrongKey,
        // CouldNotReadInputFile, MacMismatch, MacNotFound
        Some(2 | 51 | 52) => return DecryptionFailureReason::CorruptedFile,
        _ => {}
    }

    let msg = message.to_lowercase();
    if msg.contains("no decryption key found")
        || msg.contains("key not found")
        || msg.contains("could not retrieve key")
        || msg.contains("failed to get the data key")
    {
        DecryptionFailureReason::KeyNotFound
    } else if msg.contains("invalid key") || msg.contains("malformed key") {
        DecryptionFailureReason::InvalidKeyFormat
    } else if msg.contains("wrong key")
        || (msg.contains("decryption failed") && (msg.contains("gpg") || msg.contains("key")))
    {
        DecryptionFailureReason::WrongKey
    } else if msg.contains("unsupported format") || msg.contains("unknown file type") {
        DecryptionFailureReason::UnsupportedFormat
    } else if msg.contains("corrupt")
        || msg.contains("invalid file")
        || msg.contains("mac mismatch")
        || msg.contains("sops metadata not found")
    {
        DecryptionFailureReason::CorruptedFile
    } else if msg.contains("timeout") || msg.contains("timed out") {
        DecryptionFailureReason::NetworkTimeout
    } else if msg.contains("permission denied") || msg.contains("access denied") {
        DecryptionFailureReason::PermissionDenied
    } else if msg.contains("connection refused") || msg.contains("service unavailable") {
        DecryptionFailureReason::ProviderUnavailable
    } else {
        DecryptionFailureReason::Unknown
    }
}
