//! # Resource Types
//!
//! Document types read and written by the generator.
//!
//! ## Module Structure
//!
//! - `manifest.rs` - The `SopsSecret` input manifest and its validation
//! - `secret.rs` - The Kubernetes `Secret` produced from it

mod manifest;
mod secret;

// Re-export all public types
pub use manifest::{ObjectMeta, SopsSecret};
pub use secret::Secret;
