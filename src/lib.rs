//! SopsSecret generator library
//!
//! Turns a `SopsSecret` manifest into a Kubernetes Secret, decrypting its
//! SOPS-encrypted sources. The `SopsSecret` binary wraps this as a kustomize
//! exec generator plugin.
//!
//! ```no_run
//! use sops_secret_generator::{generate_secret, SopsBinary};
//! use std::path::Path;
//!
//! let yaml = generate_secret(Path::new("generator.yaml"), &SopsBinary::default())?;
//! print!("{yaml}");
//! # Ok::<(), sops_secret_generator::GeneratorError>(())
//! ```

pub mod config;
pub mod constants;
pub mod crd;
pub mod error;
pub mod format;
pub mod generator;
pub mod sops;

pub use config::GeneratorConfig;
pub use error::{GeneratorError, Result};
pub use format::Format;
pub use generator::generate_secret;
pub use sops::{Decryptor, SopsBinary};
