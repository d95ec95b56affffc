//! Config arguments stored in files.
//!
//! `.yaml`, `.yml` and `.json` files hold a sequence of strings. Any other
//! file is plain text with one argument per line; blank lines and lines
//! starting with `#` are skipped.

use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Loads config arguments from `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`](crate::ConfigError::Io) if the file cannot be
/// read, or a JSON/YAML error if a structured file is not a string sequence.
pub fn load_config_args(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;

    let args = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&text)?,
        Some("yaml" | "yml") => serde_yaml::from_str(&text)?,
        _ => parse_config_args(&text),
    };
    debug!(path = %path.display(), args = args.len(), "Loaded config arguments");
    Ok(args)
}

/// Splits plain text into arguments, one per line.
///
/// # Examples
///
/// ```
/// use nixargs_config::parse_config_args;
///
/// let args = parse_config_args("# defaults\n--port\n  8080  \n\n--name=a b\n");
/// assert_eq!(args, vec!["--port", "8080", "--name=a b"]);
/// ```
pub fn parse_config_args(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_only_text() {
        assert!(parse_config_args("# nothing\n\n   \n").is_empty());
    }

    #[test]
    fn test_hash_inside_argument_is_kept() {
        assert_eq!(parse_config_args("--color=#fff"), vec!["--color=#fff"]);
    }

    #[test]
    fn test_crlf_lines() {
        assert_eq!(parse_config_args("-a\r\n-b\r\n"), vec!["-a", "-b"]);
    }
}
