//! # Schema Generator
//!
//! Prints the JSON schema of the `SopsSecret` manifest, generated from the
//! Rust type definitions.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schemagen > schema/sopssecret.json
//! ```

use anyhow::{Context, Result};
use sops_secret_generator::crd::SopsSecret;

fn main() -> Result<()> {
    let schema = schemars::schema_for!(SopsSecret);
    let json = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{json}");
    Ok(())
}
