//! # SOPS Decryption
//!
//! Decryption capability used by the generator, and its implementation on top
//! of the sops binary.
//!
//! **SECURITY**: encrypted content is piped to sops over stdin and the
//! plaintext is read back from stdout. Nothing is written to disk, and the
//! plaintext buffer is zeroized when dropped.

pub mod error;

use crate::config::GeneratorConfig;
use crate::constants::{MAX_SOPS_ERROR_LEN, SOPS_BINARY_NAME};
use crate::format::Format;
use crate::sops::error::{classify_sops_error, DecryptError, DecryptionFailureReason};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;
use tracing::{debug, error, info_span, warn};
use zeroize::Zeroizing;

/// Something that can turn encrypted bytes of a given format into plaintext
pub trait Decryptor {
    /// Decrypt `content`, declared to be in `format`
    ///
    /// # Errors
    ///
    /// Returns a classified [`DecryptError`] when the content cannot be decrypted.
    fn decrypt(&self, content: &[u8], format: Format)
        -> Result<Zeroizing<Vec<u8>>, DecryptError>;
}

/// Decryptor that shells out to the sops binary
#[derive(Debug, Clone, Default)]
pub struct SopsBinary {
    binary: Option<PathBuf>,
}

impl SopsBinary {
    /// Use `binary` if given, otherwise look `sops` up on PATH when first needed
    #[must_use]
    pub fn new(binary: Option<PathBuf>) -> Self {
        Self { binary }
    }

    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.sops_binary.clone())
    }

    fn resolve(&self) -> Result<PathBuf, DecryptError> {
        if let Some(path) = &self.binary {
            return Ok(path.clone());
        }
        which::which(SOPS_BINARY_NAME).map_err(|e| {
            DecryptError::new(
                DecryptionFailureReason::ProviderUnavailable,
                format!("sops binary not found in PATH: {e}"),
            )
        })
    }

    fn run(&self, content: &[u8], format: Format) -> Result<Zeroizing<Vec<u8>>, DecryptError> {
        let sops_path = self.resolve()?;
        debug!("Using sops binary at: {:?}", sops_path);

        let mut child = Command::new(&sops_path)
            .arg("--decrypt")
            .arg("--input-type")
            .arg(format.as_str())
            .arg("--output-type")
            .arg(format.as_str())
            .arg("/dev/stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                DecryptError::new(
                    DecryptionFailureReason::ProviderUnavailable,
                    format!("failed to spawn {}: {e}", sops_path.display()),
                )
            })?;

        // Feed stdin while stdout is drained so large payloads cannot fill
        // both pipes. sops may exit before reading all of stdin; its exit
        // status and stderr explain why better than the broken pipe does.
        let stdin = child.stdin.take();
        let (write_result, output) = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(content),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let write_result = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            (write_result, output)
        });

        let output = output.map_err(|e| {
            DecryptError::new(
                DecryptionFailureReason::Unknown,
                format!("failed to wait for sops: {e}"),
            )
        })?;
        let stdout = Zeroizing::new(output.stdout);

        if output.status.success() {
            if let Err(e) = write_result {
                return Err(DecryptError::new(
                    DecryptionFailureReason::Unknown,
                    format!("failed to write encrypted content to sops stdin: {e}"),
                ));
            }
            return Ok(stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let exit_code = output.status.code();
        warn!("sops exited with code {:?}", exit_code);

        let reason = classify_sops_error(&stderr, exit_code);
        let stderr = stderr.trim();
        let safe_error = if stderr.len() > MAX_SOPS_ERROR_LEN {
            format!("{}... (truncated)", truncate(stderr, MAX_SOPS_ERROR_LEN))
        } else {
            stderr.to_string()
        };

        Err(DecryptError::new(
            reason,
            format!("{safe_error} (exit code: {exit_code:?})"),
        ))
    }
}

impl Decryptor for SopsBinary {
    fn decrypt(
        &self,
        content: &[u8],
        format: Format,
    ) -> Result<Zeroizing<Vec<u8>>, DecryptError> {
        let span = info_span!(
            "sops.decrypt",
            file.format = format.as_str(),
            file.size = content.len()
        );
        let _entered = span.enter();
        let start = Instant::now();

        let result = self.run(content, format);
        match &result {
            Ok(plaintext) => debug!(
                "Decrypted {} bytes in {} ms",
                plaintext.len(),
                start.elapsed().as_millis()
            ),
            Err(e) => {
                error!("{e}");
                error!("Remediation: {}", e.remediation());
            }
        }
        result
    }
}

/// Cut `s` to at most `max` bytes without splitting a character
fn truncate(s: &str, max: usize) -> &str {
    let mut end = max.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
