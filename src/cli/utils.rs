//! Shared CLI utilities.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Trimmed, non-blank values of a repeatable option. `None` when none were given.
pub fn non_empty(values: &[String]) -> Option<Vec<String>> {
    let values: Vec<String> = values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// Parse a `name=bool` docstring flag assignment.
pub fn parse_flag(raw: &str) -> Result<(String, bool)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("Invalid flag '{}': expected NAME=true|false", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid flag '{}': missing flag name", raw);
    }
    let enabled = match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => true,
        "false" | "no" | "off" | "0" => false,
        other => bail!("Invalid flag value '{}' for {}: expected true or false", other, name),
    };
    Ok((name.to_string(), enabled))
}

/// The invocation directory: `dir` made absolute against the process cwd.
pub fn invocation_dir(dir: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_maps_no_values_to_none() {
        assert_eq!(non_empty(&[]), None);
        assert_eq!(non_empty(&[" ".to_string()]), None);
        assert_eq!(
            non_empty(&[" a".to_string(), "b ".to_string()]),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_parse_flag_accepts_bool_spellings() {
        assert_eq!(parse_flag("use_param=false").expect("flag"), ("use_param".to_string(), false));
        assert_eq!(parse_flag(" use_rtype = Yes ").expect("flag"), ("use_rtype".to_string(), true));
    }

    #[test]
    fn test_parse_flag_rejects_malformed_input() {
        assert!(parse_flag("use_param").is_err());
        assert!(parse_flag("=true").is_err());
        assert!(parse_flag("use_param=maybe").is_err());
    }
}
