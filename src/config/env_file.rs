//! .env file parsing.
//!
//! This module provides functionality for parsing environment variable files
//! in the dotenv KEY=value format used by the bundler's env-file convention.

use super::EnvMap;
use std::path::Path;

/// Parses .env files into a map of environment variables.
///
/// Env files are not validated: lines that do not look like an assignment
/// are skipped.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Exported: `export KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Empty: `KEY=`
/// - Comments: `# This is a comment` and `KEY=value # trailing comment`
/// - Whitespace around equals: `KEY = value`
/// - Values with equals signs: `URL=https://example.com?foo=bar`
///
/// # Example
///
/// ```
/// use fedconf::config::EnvFileParser;
///
/// let content = r#"
/// # Remotes
/// VITE_SHELL=localhost:3000
/// VITE_AUTH="localhost:3001"
/// VITE_EMPTY=
/// "#;
///
/// let vars = EnvFileParser::parse(content);
/// assert_eq!(vars.get("VITE_SHELL"), Some(&"localhost:3000".to_string()));
/// assert_eq!(vars.get("VITE_AUTH"), Some(&"localhost:3001".to_string()));
/// assert_eq!(vars.get("VITE_EMPTY"), Some(&"".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse an env file content string into a map of variables.
    pub fn parse(content: &str) -> EnvMap {
        let mut vars = EnvMap::new();

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match Self::parse_line(line) {
                Some((key, value)) => {
                    vars.insert(key, value);
                }
                None => tracing::debug!("Ignoring env line without assignment: {}", line),
            }
        }

        vars
    }

    /// Parse a single line.
    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").unwrap_or(line);
        let eq_pos = line.find('=')?;
        let key = line[..eq_pos].trim();
        if key.is_empty() {
            return None;
        }
        let value = line[eq_pos + 1..].trim();

        Some((key.to_string(), Self::unquote(value)))
    }

    /// Remove surrounding quotes from a value, or strip an inline comment
    /// from an unquoted one.
    fn unquote(value: &str) -> String {
        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) {
                if let Some(end) = value[1..].find(quote) {
                    return value[1..end + 1].to_string();
                }
            }
        }

        match Self::comment_start(value) {
            Some(pos) => value[..pos].trim_end().to_string(),
            None => value.to_string(),
        }
    }

    /// Byte offset of the first `#` preceded by whitespace.
    fn comment_start(value: &str) -> Option<usize> {
        value
            .char_indices()
            .zip(value.chars().skip(1))
            .find(|((_, c), next)| c.is_whitespace() && *next == '#')
            .map(|((pos, _), _)| pos)
    }

    /// Load and parse an env file from a path.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn load(path: &Path) -> std::io::Result<EnvMap> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        if matches!(content, std::borrow::Cow::Owned(_)) {
            tracing::warn!("{} is not valid UTF-8; invalid bytes were replaced", path.display());
        }
        Ok(Self::parse(&content))
    }

    /// Load and parse an env file, returning empty map if file doesn't exist.
    pub fn load_optional(path: &Path) -> std::io::Result<EnvMap> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(EnvMap::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_env_file() {
        let content = r#"
VITE_SHELL=localhost:3000
VITE_AUTH=localhost:3001
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.get("VITE_SHELL"), Some(&"localhost:3000".to_string()));
        assert_eq!(vars.get("VITE_AUTH"), Some(&"localhost:3001".to_string()));
    }

    #[test]
    fn skips_comments() {
        let content = r#"
# This is a comment
KEY=value
# Another comment
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("KEY"), Some(&"value".to_string()));
    }

    #[test]
    fn handles_quoted_values() {
        let content = r#"
DOUBLE="double quoted"
SINGLE='single quoted'
UNQUOTED=no quotes
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.get("DOUBLE"), Some(&"double quoted".to_string()));
        assert_eq!(vars.get("SINGLE"), Some(&"single quoted".to_string()));
        assert_eq!(vars.get("UNQUOTED"), Some(&"no quotes".to_string()));
    }

    #[test]
    fn quoted_value_keeps_hash() {
        let vars = EnvFileParser::parse("COLOR=\"#ff0000\" # red");
        assert_eq!(vars.get("COLOR"), Some(&"#ff0000".to_string()));
    }

    #[test]
    fn strips_inline_comment_from_unquoted_value() {
        let vars = EnvFileParser::parse("VITE_PORT=3000 # dev server");
        assert_eq!(vars.get("VITE_PORT"), Some(&"3000".to_string()));
    }

    #[test]
    fn strips_tab_separated_inline_comment() {
        let vars = EnvFileParser::parse("VITE_AUTH=localhost:3001\t# auth\n");
        assert_eq!(vars.get("VITE_AUTH"), Some(&"localhost:3001".to_string()));
    }

    #[test]
    fn hash_without_leading_whitespace_is_kept() {
        let vars = EnvFileParser::parse("VITE_DOCS=localhost:4000/#intro");
        assert_eq!(
            vars.get("VITE_DOCS"),
            Some(&"localhost:4000/#intro".to_string())
        );
    }

    #[test]
    fn handles_export_prefix() {
        let vars = EnvFileParser::parse("export VITE_MODE=development");
        assert_eq!(vars.get("VITE_MODE"), Some(&"development".to_string()));
    }

    #[test]
    fn handles_empty_values() {
        let vars = EnvFileParser::parse("EMPTY=");
        assert_eq!(vars.get("EMPTY"), Some(&"".to_string()));
    }

    #[test]
    fn handles_values_with_equals() {
        let vars = EnvFileParser::parse("URL=https://example.com?foo=bar");
        assert_eq!(
            vars.get("URL"),
            Some(&"https://example.com?foo=bar".to_string())
        );
    }

    #[test]
    fn handles_whitespace_around_equals() {
        let vars = EnvFileParser::parse("KEY = value with spaces");
        assert_eq!(vars.get("KEY"), Some(&"value with spaces".to_string()));
    }

    #[test]
    fn ignores_lines_without_equals_or_key() {
        let content = r#"
KEY1=value1
invalid line without equals
=orphan
KEY2=value2
"#;

        let vars = EnvFileParser::parse(content);

        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn later_duplicate_wins() {
        let vars = EnvFileParser::parse("KEY=first\nKEY=second");
        assert_eq!(vars.get("KEY"), Some(&"second".to_string()));
    }

    #[test]
    fn load_optional_returns_empty_for_missing_file() {
        let result = EnvFileParser::load_optional(Path::new("/nonexistent/path/.env"));

        assert!(result.is_ok());
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "VITE_SHELL=localhost:3000\n").unwrap();

        let vars = EnvFileParser::load(&path).unwrap();
        assert_eq!(vars.get("VITE_SHELL"), Some(&"localhost:3000".to_string()));
    }

    #[test]
    fn load_replaces_invalid_utf8() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, b"VITE_CITY=caf\xe9\nVITE_SHELL=localhost:3000\n").unwrap();

        let vars = EnvFileParser::load(&path).unwrap();
        assert_eq!(vars.get("VITE_CITY"), Some(&"caf\u{FFFD}".to_string()));
        assert_eq!(vars.get("VITE_SHELL"), Some(&"localhost:3000".to_string()));
    }
}
