//! # Sources
//!
//! Resolve, read, decrypt and decode the env and file sources of a manifest.
//!
//! Env sources are processed first, then file sources, each in listed order.
//! Whatever is processed later wins on a key collision.

use crate::crd::SopsSecret;
use crate::error::{GeneratorError, Result};
use crate::format::Format;
use crate::generator::data::SecretData;
use crate::generator::decoders::decode_env;
use crate::sops::Decryptor;
use tracing::{debug, info};

/// Decrypt every source of `manifest` into one [`SecretData`]
///
/// # Errors
///
/// The first failing source aborts the run; its error is wrapped with the
/// source reference.
pub fn collect_sources(manifest: &SopsSecret, decryptor: &dyn Decryptor) -> Result<SecretData> {
    let mut data = SecretData::new();

    for source in &manifest.env_sources {
        parse_env_source(source, decryptor, &mut data).map_err(|e| e.in_env_source(source))?;
    }
    for source in &manifest.file_sources {
        parse_file_source(source, decryptor, &mut data).map_err(|e| e.in_file_source(source))?;
    }

    info!(
        "Collected {} keys from {} env and {} file sources",
        data.len(),
        manifest.env_sources.len(),
        manifest.file_sources.len()
    );
    Ok(data)
}

/// Env sources are always a plain path and contribute one key per entry
fn parse_env_source(source: &str, decryptor: &dyn Decryptor, data: &mut SecretData) -> Result<()> {
    let content = read_source(source)?;
    let format = Format::for_path(source);
    debug!("Decrypting env source {} as {}", source, format);

    let decrypted = decryptor.decrypt(&content, format)?;
    let pairs = decode_env(&decrypted, format)?;

    debug!("Env source {} contributed {} keys", source, pairs.len());
    data.merge(pairs);
    Ok(())
}

/// File sources contribute their whole decrypted content under one key
///
/// No decoding or text validation happens here, so binary content is fine.
fn parse_file_source(source: &str, decryptor: &dyn Decryptor, data: &mut SecretData) -> Result<()> {
    let (key, path) = resolve_file_source(source)?;
    let content = read_source(&path)?;
    let format = Format::for_path(&path);
    debug!("Decrypting file source {} as {} into key {}", path, format, key);

    let decrypted = decryptor.decrypt(&content, format)?;
    data.insert(key, decrypted.as_slice());
    Ok(())
}

fn read_source(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| GeneratorError::io(path, e))
}

/// Split a file source reference into `(key, path)`
///
/// `path` uses the file name as key, `key=path` names the key explicitly.
///
/// # Errors
///
/// [`GeneratorError::SourceSyntax`] when the key or path is empty or the
/// reference contains more than one `=`.
pub fn resolve_file_source(source: &str) -> Result<(String, String)> {
    let separators = source.matches('=').count();
    match separators {
        0 => Ok((base_name(source).to_string(), source.to_string())),
        1 if source.starts_with('=') => Err(GeneratorError::SourceSyntax(format!(
            "key name for file path {} missing",
            &source[1..]
        ))),
        1 if source.ends_with('=') => Err(GeneratorError::SourceSyntax(format!(
            "file path for key name {} missing",
            &source[..source.len() - 1]
        ))),
        1 => {
            let (key, path) = source.split_once('=').unwrap_or((source, ""));
            Ok((key.to_string(), path.to_string()))
        }
        _ => Err(GeneratorError::SourceSyntax(
            "key names or file paths cannot contain '='".to_string(),
        )),
    }
}

/// Last element of a slash-separated path, ignoring trailing slashes
fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(key: &str, path: &str) -> (String, String) {
        (key.to_string(), path.to_string())
    }

    #[test]
    fn test_plain_path_uses_base_name() {
        assert_eq!(
            resolve_file_source("a/b/c.txt").expect("resolve"),
            resolved("c.txt", "a/b/c.txt")
        );
        assert_eq!(
            resolve_file_source("secret.txt").expect("resolve"),
            resolved("secret.txt", "secret.txt")
        );
    }

    #[test]
    fn test_key_equals_path() {
        assert_eq!(
            resolve_file_source("NAME=secret.txt").expect("resolve"),
            resolved("NAME", "secret.txt")
        );
        assert_eq!(
            resolve_file_source("tls.key=certs/server.key").expect("resolve"),
            resolved("tls.key", "certs/server.key")
        );
    }

    #[test]
    fn test_missing_key_name() {
        let err = resolve_file_source("=secret.txt").expect_err("must fail");
        assert!(matches!(err, GeneratorError::SourceSyntax(_)));
        assert_eq!(err.to_string(), "key name for file path secret.txt missing");
    }

    #[test]
    fn test_missing_file_path() {
        let err = resolve_file_source("secret.txt=").expect_err("must fail");
        assert!(matches!(err, GeneratorError::SourceSyntax(_)));
        assert_eq!(err.to_string(), "file path for key name secret.txt missing");
    }

    #[test]
    fn test_too_many_separators() {
        let err = resolve_file_source("a=b=c").expect_err("must fail");
        assert!(matches!(err, GeneratorError::SourceSyntax(_)));
        assert_eq!(err.to_string(), "key names or file paths cannot contain '='");

        assert!(resolve_file_source("==").is_err());
    }

    #[test]
    fn test_base_name_edge_cases() {
        assert_eq!(base_name(""), ".");
        assert_eq!(base_name("/"), "/");
        assert_eq!(base_name("dir/"), "dir");
        assert_eq!(base_name("/abs/path/file.bin"), "file.bin");
    }
}
