//! # Constants
//!
//! Shared constants used throughout the generator.
//!
//! The manifest identity is fixed; everything else can be overridden via
//! environment variables where applicable.

/// API version every input manifest must declare
pub const SOPS_SECRET_API_VERSION: &str = "goabout.com/v1beta1";

/// Kind every input manifest must declare
pub const SOPS_SECRET_KIND: &str = "SopsSecret";

/// API version of the generated Secret
pub const SECRET_API_VERSION: &str = "v1";

/// Kind of the generated Secret
pub const SECRET_KIND: &str = "Secret";

/// Annotation asking kustomize to append a content hash to the Secret name
pub const NEEDS_HASH_ANNOTATION: &str = "kustomize.config.k8s.io/needs-hash";

/// Annotation carrying the kustomize generator behavior (create, replace, merge)
pub const BEHAVIOR_ANNOTATION: &str = "kustomize.config.k8s.io/behavior";

/// UTF-8 byte order mark, stripped from the first line of dotenv sources
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Name of the sops executable looked up on PATH
pub const SOPS_BINARY_NAME: &str = "sops";

/// Longest sops stderr excerpt kept in an error message (bytes)
pub const MAX_SOPS_ERROR_LEN: usize = 500;

/// Environment variable overriding the sops executable path
pub const ENV_SOPS_BINARY: &str = "SOPSSECRET_SOPS_BINARY";

/// Environment variable selecting the log level when `RUST_LOG` is unset
pub const ENV_LOG_LEVEL: &str = "SOPSSECRET_LOG_LEVEL";

/// Environment variable enabling ANSI colour in log output
pub const ENV_LOG_COLOR: &str = "SOPSSECRET_LOG_COLOR";

/// Default log level; stderr stays quiet inside kustomize builds
pub const DEFAULT_LOG_LEVEL: &str = "warn";
