//! # Errors
//!
//! Error type for the generator pipeline.
//!
//! Context layers (`EnvSource`, `FileSource`, `Line`) print their own frame in
//! front of the cause, so the top-level message reads as a chain:
//! `env source app.env: line 3: requires value: FOO`.

use crate::sops::error::DecryptError;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the generator
pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;

/// Errors produced while turning a `SopsSecret` into a Secret
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A manifest or source file could not be read
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A structured document (manifest, YAML or JSON source) is malformed
    #[error("{0}")]
    Parse(String),

    /// The manifest has the wrong identity or lacks a name
    #[error("{0}")]
    Schema(String),

    /// A file source reference is not `path` or `key=path`
    #[error("{0}")]
    SourceSyntax(String),

    /// A dotenv line is not valid UTF-8
    #[error("invalid UTF-8 bytes: {0}")]
    Encoding(String),

    /// A dotenv line has no `=`
    #[error("requires value: {0}")]
    Syntax(String),

    /// Env sources must be dotenv, YAML or JSON
    #[error("unknown file format, use dotenv, yaml or json")]
    UnsupportedEnvFormat,

    /// The decryptor failed
    #[error(transparent)]
    Decrypt(#[from] DecryptError),

    /// The generated Secret could not be serialized
    #[error("failed to serialize secret: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("env source {source_ref}: {cause}")]
    EnvSource {
        source_ref: String,
        #[source]
        cause: Box<GeneratorError>,
    },

    #[error("file source {source_ref}: {cause}")]
    FileSource {
        source_ref: String,
        #[source]
        cause: Box<GeneratorError>,
    },

    #[error("line {line}: {cause}")]
    Line {
        line: usize,
        #[source]
        cause: Box<GeneratorError>,
    },
}

impl GeneratorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap as the failure of env source `source_ref`
    #[must_use]
    pub fn in_env_source(self, source_ref: &str) -> Self {
        GeneratorError::EnvSource {
            source_ref: source_ref.to_string(),
            cause: Box::new(self),
        }
    }

    /// Wrap as the failure of file source `source_ref`
    #[must_use]
    pub fn in_file_source(self, source_ref: &str) -> Self {
        GeneratorError::FileSource {
            source_ref: source_ref.to_string(),
            cause: Box::new(self),
        }
    }

    /// Wrap as the failure of dotenv line `line` (0-based)
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        GeneratorError::Line {
            line,
            cause: Box::new(self),
        }
    }

    /// The error underneath all context layers
    #[must_use]
    pub fn root_cause(&self) -> &GeneratorError {
        match self {
            GeneratorError::EnvSource { cause, .. }
            | GeneratorError::FileSource { cause, .. }
            | GeneratorError::Line { cause, .. } => cause.root_cause(),
            other => other,
        }
    }

    /// Line number recorded by the innermost `Line` layer, if any
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            GeneratorError::Line { line, cause } => cause.line().or(Some(*line)),
            GeneratorError::EnvSource { cause, .. } | GeneratorError::FileSource { cause, .. } => {
                cause.line()
            }
            _ => None,
        }
    }

    /// Check if this is a decryption error
    #[must_use]
    pub fn as_decrypt_error(&self) -> Option<&DecryptError> {
        match self.root_cause() {
            GeneratorError::Decrypt(e) => Some(e),
            _ => None,
        }
    }
}
