//! Merge command-line values over the loaded override layer

use std::collections::BTreeMap;

use crate::domain::Overrides;

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub project_name: Option<String>,
    pub author: Option<String>,
    pub copyright_notice: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub theme_name: Option<String>,
    pub enabled_extensions: Option<Vec<String>>,
    pub search_path_entries: Option<Vec<String>>,
    pub docstring_style_flags: BTreeMap<String, bool>,
}

pub fn merge_cli_with_config(mut overrides: Overrides, cli: CliOverrides) -> Overrides {
    if cli.project_name.is_some() {
        overrides.project_name = cli.project_name;
    }
    if cli.author.is_some() {
        overrides.author = cli.author;
    }
    if cli.copyright_notice.is_some() {
        overrides.copyright_notice = cli.copyright_notice;
    }
    if cli.version.is_some() {
        overrides.version = cli.version;
    }
    if cli.release.is_some() {
        overrides.release = cli.release;
    }
    if cli.theme_name.is_some() {
        overrides.theme_name = cli.theme_name;
    }
    if cli.enabled_extensions.is_some() {
        overrides.enabled_extensions = cli.enabled_extensions;
    }
    if cli.search_path_entries.is_some() {
        overrides.search_path_entries = cli.search_path_entries;
    }
    if !cli.docstring_style_flags.is_empty() {
        overrides
            .docstring_style_flags
            .get_or_insert_with(BTreeMap::new)
            .extend(cli.docstring_style_flags);
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_wins_over_file_values() {
        let file = Overrides {
            project_name: Some("file".to_string()),
            author: Some("File Author".to_string()),
            ..Default::default()
        };
        let cli = CliOverrides { project_name: Some("cli".to_string()), ..Default::default() };

        let merged = merge_cli_with_config(file, cli);
        assert_eq!(merged.project_name.as_deref(), Some("cli"));
        assert_eq!(merged.author.as_deref(), Some("File Author"));
    }

    #[test]
    fn test_cli_flags_merge_into_file_flags() {
        let file = Overrides {
            docstring_style_flags: Some(BTreeMap::from([
                ("use_param".to_string(), false),
                ("use_rtype".to_string(), false),
            ])),
            ..Default::default()
        };
        let cli = CliOverrides {
            docstring_style_flags: BTreeMap::from([("use_rtype".to_string(), true)]),
            ..Default::default()
        };

        let merged = merge_cli_with_config(file, cli);
        let flags = merged.docstring_style_flags.expect("flags");
        assert_eq!(flags.get("use_param"), Some(&false));
        assert_eq!(flags.get("use_rtype"), Some(&true));
    }

    #[test]
    fn test_empty_cli_leaves_overrides_untouched() {
        let file = Overrides { theme_name: Some("furo".to_string()), ..Default::default() };
        let merged = merge_cli_with_config(file.clone(), CliOverrides::default());
        assert_eq!(merged, file);
    }
}
