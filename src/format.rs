//! # Formats
//!
//! Content formats understood by sops, detected from the file name.

use std::fmt;

/// Content format of a source file
///
/// Detection is purely by suffix and case-sensitive, mirroring the rules sops
/// applies to its own input files. There is no content sniffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
    /// `.env`
    Dotenv,
    /// Anything else, decrypted as an opaque blob
    Binary,
}

impl Format {
    /// Classify a source path by its suffix
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        if path.ends_with(".yaml") || path.ends_with(".yml") {
            Format::Yaml
        } else if path.ends_with(".json") {
            Format::Json
        } else if path.ends_with(".env") {
            Format::Dotenv
        } else {
            Format::Binary
        }
    }

    /// Name passed to `sops --input-type` / `--output-type`
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Dotenv => "dotenv",
            Format::Binary => "binary",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_path_by_suffix() {
        let cases = [
            ("secrets.yaml", Format::Yaml),
            ("conf/secrets.yml", Format::Yaml),
            ("secrets.json", Format::Json),
            ("app.env", Format::Dotenv),
            (".env", Format::Dotenv),
            ("id_rsa", Format::Binary),
            ("cert.pem", Format::Binary),
            ("archive.yaml.gz", Format::Binary),
        ];

        for (path, expected) in cases {
            assert_eq!(Format::for_path(path), expected, "path {path}");
        }
    }

    #[test]
    fn test_for_path_is_case_sensitive() {
        assert_eq!(Format::for_path("SECRETS.YAML"), Format::Binary);
        assert_eq!(Format::for_path("app.ENV"), Format::Binary);
    }

    #[test]
    fn test_display_matches_sops_type_names() {
        assert_eq!(Format::Dotenv.to_string(), "dotenv");
        assert_eq!(Format::Binary.as_str(), "binary");
    }
}
