//! # Decoders
//!
//! Turn decrypted env sources (dotenv, yaml, json) into key/value pairs.
//!
//! Values are returned raw; base64 encoding happens when they are merged into
//! [`SecretData`](crate::generator::data::SecretData).

use crate::constants::UTF8_BOM;
use crate::error::{GeneratorError, Result};
use crate::format::Format;
use std::collections::BTreeMap;

/// Key/value pairs in the order the source defines them
pub type Pairs = Vec<(String, String)>;

/// Decode a decrypted env source according to its format
///
/// # Errors
///
/// Fails on malformed content, and with
/// [`GeneratorError::UnsupportedEnvFormat`] for binary sources.
pub fn decode_env(content: &[u8], format: Format) -> Result<Pairs> {
    match format {
        Format::Dotenv => parse_dotenv(content),
        Format::Yaml => parse_yaml(content),
        Format::Json => parse_json(content),
        Format::Binary => Err(GeneratorError::UnsupportedEnvFormat),
    }
}

/// Parse dotenv content line by line
///
/// A UTF-8 byte order mark is stripped from the first line only. Leading
/// whitespace is ignored, trailing whitespace is part of the value. Blank
/// lines and `#` comments are skipped. Errors carry the 0-based line number.
///
/// # Errors
///
/// [`GeneratorError::Encoding`] or [`GeneratorError::Syntax`], wrapped in
/// [`GeneratorError::Line`].
pub fn parse_dotenv(content: &[u8]) -> Result<Pairs> {
    let mut pairs = Vec::new();

    for (line_num, line) in content.split(|b| *b == b'\n').enumerate() {
        let line = if line_num == 0 {
            line.strip_prefix(UTF8_BOM).unwrap_or(line)
        } else {
            line
        };

        if let Some(pair) = parse_env_line(line).map_err(|e| e.at_line(line_num))? {
            pairs.push(pair);
        }
    }

    Ok(pairs)
}

fn parse_env_line(line: &[u8]) -> Result<Option<(String, String)>> {
    let Ok(line) = std::str::from_utf8(line) else {
        return Err(GeneratorError::Encoding(
            String::from_utf8_lossy(line).into_owned(),
        ));
    };

    let line = line.trim_start();

    // Skip comments and empty lines
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    match line.split_once('=') {
        Some((key, value)) => Ok(Some((key.to_string(), value.to_string()))),
        None => Err(GeneratorError::Syntax(line.to_string())),
    }
}

/// Parse a flat YAML mapping of strings
///
/// An empty document yields no pairs. A null value becomes an empty string.
///
/// # Errors
///
/// [`GeneratorError::Parse`] on malformed YAML or nested values.
pub fn parse_yaml(content: &[u8]) -> Result<Pairs> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Pairs::new());
    }
    let map: Option<BTreeMap<String, Option<String>>> =
        serde_yaml::from_slice(content).map_err(|e| GeneratorError::Parse(e.to_string()))?;
    Ok(map
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect())
}

/// Parse a flat JSON object of strings
///
/// # Errors
///
/// [`GeneratorError::Parse`] on malformed JSON or non-string values.
pub fn parse_json(content: &[u8]) -> Result<Pairs> {
    let map: BTreeMap<String, String> =
        serde_json::from_slice(content).map_err(|e| GeneratorError::Parse(e.to_string()))?;
    Ok(map.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Pairs {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    mod dotenv_tests {
        use super::*;

        #[test]
        fn test_comments_blank_lines_and_first_equals() {
            let parsed = parse_dotenv(b"FOO=bar\n# comment\n\nBAZ=qux=extra\n").expect("parse");
            assert_eq!(parsed, pairs(&[("FOO", "bar"), ("BAZ", "qux=extra")]));
        }

        #[test]
        fn test_empty_value_is_allowed() {
            let parsed = parse_dotenv(b"EMPTY=\n").expect("parse");
            assert_eq!(parsed, pairs(&[("EMPTY", "")]));
        }

        #[test]
        fn test_leading_whitespace_trimmed_trailing_kept() {
            let parsed = parse_dotenv(b"   FOO=bar  \n\t# indented comment\n").expect("parse");
            assert_eq!(parsed, pairs(&[("FOO", "bar  ")]));
        }

        #[test]
        fn test_crlf_keeps_carriage_return_in_value() {
            let parsed = parse_dotenv(b"FOO=bar\r\nBAZ=qux\r\n").expect("parse");
            assert_eq!(parsed, pairs(&[("FOO", "bar\r"), ("BAZ", "qux\r")]));
        }

        #[test]
        fn test_missing_equals_reports_line_zero() {
            let err = parse_dotenv(b"NOVALUE").expect_err("line without '=' must fail");
            assert_eq!(err.line(), Some(0));
            assert!(matches!(err.root_cause(), GeneratorError::Syntax(_)));
            assert_eq!(err.to_string(), "line 0: requires value: NOVALUE");
        }

        #[test]
        fn test_error_line_number_counts_skipped_lines() {
            let err = parse_dotenv(b"# header\n\nFOO=bar\nBROKEN\n").expect_err("must fail");
            assert_eq!(err.line(), Some(3));
        }

        #[test]
        fn test_bom_stripped_on_first_line_only() {
            let parsed = parse_dotenv(b"\xEF\xBB\xBFFOO=bar\n\xEF\xBB\xBFBAZ=qux\n").expect("parse");
            assert_eq!(
                parsed,
                pairs(&[("FOO", "bar"), ("\u{feff}BAZ", "qux")])
            );
        }

        #[test]
        fn test_invalid_utf8_reports_encoding_error() {
            let err = parse_dotenv(b"FOO=bar\nBAD=\xff\xfe\n").expect_err("invalid UTF-8 must fail");
            assert_eq!(err.line(), Some(1));
            match err.root_cause() {
                GeneratorError::Encoding(line) => assert!(line.starts_with("BAD=")),
                other => panic!("expected encoding error, got {other:?}"),
            }
        }

        #[test]
        fn test_duplicate_keys_keep_line_order() {
            let parsed = parse_dotenv(b"FOO=1\nFOO=2\n").expect("parse");
            assert_eq!(parsed, pairs(&[("FOO", "1"), ("FOO", "2")]));
        }
    }

    mod structured_tests {
        use super::*;

        #[test]
        fn test_yaml_flat_mapping() {
            let parsed = parse_yaml(b"b: two\na: one\n").expect("parse");
            assert_eq!(parsed, pairs(&[("a", "one"), ("b", "two")]));
        }

        #[test]
        fn test_yaml_null_values_become_empty() {
            let parsed = parse_yaml(b"A: ~\nB: null\nC:\nD: Null\n").expect("parse");
            assert_eq!(parsed, pairs(&[("A", ""), ("B", ""), ("C", ""), ("D", "")]));
        }

        #[test]
        fn test_yaml_quoted_null_is_text() {
            let parsed = parse_yaml(b"A: '~'\nB: \"null\"\n").expect("parse");
            assert_eq!(parsed, pairs(&[("A", "~"), ("B", "null")]));
        }

        #[test]
        fn test_yaml_empty_document() {
            assert!(parse_yaml(b"").expect("parse").is_empty());
            assert!(parse_yaml(b"\n  \n").expect("parse").is_empty());
        }

        #[test]
        fn test_yaml_nested_mapping_fails() {
            let err = parse_yaml(b"db:\n  password: secret\n").expect_err("nested must fail");
            assert!(matches!(err, GeneratorError::Parse(_)));
        }

        #[test]
        fn test_json_flat_object() {
            let parsed = parse_json(br#"{"USER": "admin", "PASS": "s3cr=t"}"#).expect("parse");
            assert_eq!(parsed, pairs(&[("PASS", "s3cr=t"), ("USER", "admin")]));
        }

        #[test]
        fn test_json_non_string_value_fails() {
            let err = parse_json(br#"{"PORT": 5432}"#).expect_err("number must fail");
            assert!(matches!(err, GeneratorError::Parse(_)));
        }

        #[test]
        fn test_json_malformed_fails() {
            assert!(matches!(parse_json(b"{not json"), Err(GeneratorError::Parse(_))));
        }
    }

    #[test]
    fn test_decode_env_rejects_binary() {
        let err = decode_env(b"whatever", Format::Binary).expect_err("binary must fail");
        assert_eq!(err.to_string(), "unknown file format, use dotenv, yaml or json");
    }

    #[test]
    fn test_decode_env_dispatches_by_format() {
        assert_eq!(
            decode_env(b"A=1\n", Format::Dotenv).expect("dotenv"),
            pairs(&[("A", "1")])
        );
        assert_eq!(
            decode_env(b"A: '1'\n", Format::Yaml).expect("yaml"),
            pairs(&[("A", "1")])
        );
        assert_eq!(
            decode_env(br#"{"A":"1"}"#, Format::Json).expect("json"),
            pairs(&[("A", "1")])
        );
    }
}
