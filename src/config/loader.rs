//! Override-layer loading
//!
//! Reads the file layer (explicit or auto-discovered) and the `DOC_CONF_*`
//! environment layer into a single [`Overrides`] value. Env wins over file.

use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::Overrides;
use crate::error::{ConfigurationError, Result};

/// Prefix of environment variables that override configuration keys.
///
/// Nested keys use a double underscore, e.g.
/// `DOC_CONF_DOCSTRING_STYLE_FLAGS__USE_PARAM=false`.
pub const ENV_PREFIX: &str = "DOC_CONF_";

/// Keys whose values are always text. Env values for these are taken verbatim
/// instead of being parsed, so `DOC_CONF_VERSION=1.0` stays `"1.0"`.
const STRING_KEYS: &[&str] = &[
    "project_name",
    "copyright_notice",
    "author",
    "version",
    "release",
    "theme_name",
    "autoapi.type",
    "autoapi.root",
];

const CANDIDATES: &[&str] = &["doc-conf.toml", ".doc-conf.toml", "doc-conf.yaml", "doc-conf.yml"];

pub fn load_overrides(docs_dir: &Path, config_path: Option<&Path>) -> Result<Overrides> {
    load_layers(docs_dir, config_path, ENV_PREFIX)
}

/// Same as [`load_overrides`] with a caller-chosen environment prefix.
pub fn load_layers(docs_dir: &Path, config_path: Option<&Path>, env_prefix: &str) -> Result<Overrides> {
    let config_file = match config_path {
        Some(path) => {
            let path = if path.is_absolute() { path.to_path_buf() } else { docs_dir.join(path) };
            if !path.is_file() {
                return Err(ConfigurationError::MissingConfigFile(path));
            }
            Some(path)
        }
        None => discover_config(docs_dir),
    };

    let mut figment = Figment::new();
    let mut origin = format!("{env_prefix}* environment");

    if let Some(file) = &config_file {
        let ext = file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        figment = match ext.as_str() {
            "toml" => figment.merge(Toml::file(file)),
            "yaml" | "yml" => figment.merge(Yaml::file(file)),
            other => {
                return Err(ConfigurationError::UnsupportedFormat {
                    extension: other.to_string(),
                    path: file.clone(),
                });
            }
        };
        debug!(path = %file.display(), "loading config file");
        origin = format!("{} and {origin}", file.display());
    }

    let env = Env::prefixed(env_prefix).split("__");
    figment = figment.merge(env.clone().ignore(STRING_KEYS));
    let string_env = env.only(STRING_KEYS);
    for (key, value) in string_env.iter() {
        figment = figment.merge(Serialized::default(key.as_str(), value));
    }

    figment
        .extract::<Overrides>()
        .map_err(|source| ConfigurationError::Load { origin, source: Box::new(source) })
}

fn discover_config(docs_dir: &Path) -> Option<PathBuf> {
    CANDIDATES.iter().map(|candidate| docs_dir.join(candidate)).find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Each test uses its own prefix so parallel tests never see each other's env.
    fn load(dir: &Path, path: Option<&Path>, prefix: &str) -> Result<Overrides> {
        load_layers(dir, path, prefix)
    }

    #[test]
    fn test_load_overrides_empty_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let overrides = load(tmp.path(), None, "DOC_CONF_TEST_MISSING_").expect("overrides");
        assert_eq!(overrides, Overrides::default());
    }

    #[test]
    fn test_load_discovered_toml() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("doc-conf.toml"),
            "project_name = 'geo'\nsearch_path_entries = ['../pkg']\n\n[docstring_style_flags]\nuse_param = false\n",
        )
        .expect("write");

        let overrides = load(tmp.path(), None, "DOC_CONF_TEST_TOML_").expect("overrides");
        assert_eq!(overrides.project_name.as_deref(), Some("geo"));
        assert_eq!(overrides.search_path_entries, Some(vec!["../pkg".to_string()]));
        let flags = overrides.docstring_style_flags.expect("flags");
        assert_eq!(flags.get("use_param"), Some(&false));
    }

    #[test]
    fn test_load_explicit_yaml() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("docs.yml");
        fs::write(&path, "theme_name: alabaster\nenabled_extensions:\n  - sphinx.ext.autodoc\n")
            .expect("write");

        let overrides = load(tmp.path(), Some(&path), "DOC_CONF_TEST_YAML_").expect("overrides");
        assert_eq!(overrides.theme_name.as_deref(), Some("alabaster"));
        assert_eq!(overrides.enabled_extensions, Some(vec!["sphinx.ext.autodoc".to_string()]));
    }

    #[test]
    fn test_relative_explicit_path_is_joined_to_docs_dir() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("custom.toml"), "author = 'Someone'\n").expect("write");

        let overrides = load(tmp.path(), Some(Path::new("custom.toml")), "DOC_CONF_TEST_REL_")
            .expect("overrides");
        assert_eq!(overrides.author.as_deref(), Some("Someone"));
    }

    #[test]
    fn test_explicit_missing_file_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("nope.toml");
        let err = load(tmp.path(), Some(&path), "DOC_CONF_TEST_NOPE_").expect_err("missing");
        assert!(matches!(err, ConfigurationError::MissingConfigFile(_)));
    }

    #[test]
    fn test_unsupported_extension_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("conf.ini");
        fs::write(&path, "project_name = geo\n").expect("write");
        let err = load(tmp.path(), Some(&path), "DOC_CONF_TEST_INI_").expect_err("ini");
        assert!(matches!(err, ConfigurationError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_unknown_key_returns_err() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("doc-conf.toml"), "html_theme = 'alabaster'\n").expect("write");
        let err = load(tmp.path(), None, "DOC_CONF_TEST_UNKNOWN_").expect_err("unknown key");
        assert!(matches!(err, ConfigurationError::Load { .. }));
    }

    #[test]
    fn test_auto_discovered_invalid_type_is_fatal() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("doc-conf.toml"), "enabled_extensions = 123\n").expect("write");
        let result = load(tmp.path(), None, "DOC_CONF_TEST_BADTYPE_");
        assert!(result.is_err(), "malformed discovered config must not be ignored");
    }

    #[test]
    fn test_env_overrides_file() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("doc-conf.toml"),
            "project_name = 'from-file'\nauthor = 'File Author'\n",
        )
        .expect("write");

        std::env::set_var("DOC_CONF_TEST_ENV_PROJECT_NAME", "from-env");
        std::env::set_var("DOC_CONF_TEST_ENV_DOCSTRING_STYLE_FLAGS__USE_RTYPE", "false");
        let overrides = load(tmp.path(), None, "DOC_CONF_TEST_ENV_").expect("overrides");
        std::env::remove_var("DOC_CONF_TEST_ENV_PROJECT_NAME");
        std::env::remove_var("DOC_CONF_TEST_ENV_DOCSTRING_STYLE_FLAGS__USE_RTYPE");

        assert_eq!(overrides.project_name.as_deref(), Some("from-env"));
        assert_eq!(overrides.author.as_deref(), Some("File Author"));
        let flags = overrides.docstring_style_flags.expect("flags");
        assert_eq!(flags.get("use_rtype"), Some(&false));
    }

    #[test]
    fn test_env_text_keys_keep_scalar_looking_values() {
        let tmp = TempDir::new().expect("tmp");
        let vars = [
            ("DOC_CONF_TEST_SCALAR_VERSION", "1.0"),
            ("DOC_CONF_TEST_SCALAR_RELEASE", "2"),
            ("DOC_CONF_TEST_SCALAR_PROJECT_NAME", "2025"),
            ("DOC_CONF_TEST_SCALAR_AUTHOR", "true"),
            ("DOC_CONF_TEST_SCALAR_AUTOAPI__ROOT", "3"),
            ("DOC_CONF_TEST_SCALAR_AUTOAPI__KEEP_FILES", "true"),
        ];
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        let overrides = load(tmp.path(), None, "DOC_CONF_TEST_SCALAR_");
        for (key, _) in vars {
            std::env::remove_var(key);
        }

        let overrides = overrides.expect("overrides");
        assert_eq!(overrides.version.as_deref(), Some("1.0"));
        assert_eq!(overrides.release.as_deref(), Some("2"));
        assert_eq!(overrides.project_name.as_deref(), Some("2025"));
        assert_eq!(overrides.author.as_deref(), Some("true"));
        let autoapi = overrides.autoapi.expect("autoapi");
        assert_eq!(autoapi.root.as_deref(), Some("3"));
        assert_eq!(autoapi.keep_files, Some(true));
    }

    #[test]
    fn test_env_text_keys_override_file() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("doc-conf.toml"), "version = '0.9'
release = '0.9.1'
")
            .expect("write");

        std::env::set_var("DOC_CONF_TEST_TEXTFILE_VERSION", "1.0");
        let overrides = load(tmp.path(), None, "DOC_CONF_TEST_TEXTFILE_");
        std::env::remove_var("DOC_CONF_TEST_TEXTFILE_VERSION");

        let overrides = overrides.expect("overrides");
        assert_eq!(overrides.version.as_deref(), Some("1.0"));
        assert_eq!(overrides.release.as_deref(), Some("0.9.1"));
    }
}
