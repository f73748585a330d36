//! Configuration data model
//!
//! [`ConfigDraft`] is the unvalidated shape a resolver starts from, [`Overrides`]
//! is the caller-supplied partial layer, and [`ConfigurationRecord`] is the
//! validated result handed to the documentation engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// How the EPUB builder shows link targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EpubShowUrls {
    #[default]
    Footnote,
    Inline,
    No,
}

impl EpubShowUrls {
    pub fn as_str(&self) -> &'static str {
        match self {
            EpubShowUrls::Footnote => "footnote",
            EpubShowUrls::Inline => "inline",
            EpubShowUrls::No => "no",
        }
    }
}

/// A value in `autodoc_default_options`: either a switch or a text argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

/// Target of an intersphinx mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntersphinxTarget {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<String>,
}

impl IntersphinxTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), inventory: None }
    }
}

/// Settings for the API-reference generator (`autoapi.extension`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoApiDraft {
    pub source_type: String,
    pub dirs: Vec<String>,
    pub root: String,
    pub options: Vec<String>,
    pub add_toctree_entry: bool,
    pub keep_files: bool,
    pub ignore: Vec<String>,
}

/// Partial `autoapi` section; merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoApiOverrides {
    #[serde(default, rename = "type")]
    pub source_type: Option<String>,
    #[serde(default)]
    pub dirs: Option<Vec<String>>,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub add_toctree_entry: Option<bool>,
    #[serde(default)]
    pub keep_files: Option<bool>,
    #[serde(default)]
    pub ignore: Option<Vec<String>>,
}

/// Unvalidated configuration. Paths are still written as the user wrote them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDraft {
    pub project_name: String,
    pub copyright_notice: String,
    pub author: String,
    pub version: String,
    pub release: String,
    pub search_path_entries: Vec<String>,
    pub enabled_extensions: Vec<String>,
    pub theme_name: String,
    pub docstring_style_flags: BTreeMap<String, bool>,
    pub intersphinx_mapping: BTreeMap<String, IntersphinxTarget>,
    pub intersphinx_disabled_domains: Vec<String>,
    pub templates_path: Vec<String>,
    pub epub_show_urls: EpubShowUrls,
    pub autoapi: AutoApiDraft,
    pub autodoc_default_options: BTreeMap<String, OptionValue>,
}

impl ConfigDraft {
    /// The canonical defaults of the geoparticle documentation build.
    pub fn geoparticle() -> Self {
        let flags = [
            ("google_docstring", true),
            ("numpy_docstring", true),
            ("include_init_with_doc", true),
            ("include_private_with_doc", false),
            ("include_special_with_doc", true),
            ("use_param", true),
            ("use_rtype", true),
        ];

        let mut intersphinx_mapping = BTreeMap::new();
        intersphinx_mapping
            .insert("python".to_string(), IntersphinxTarget::new("https://docs.python.org/3/"));
        intersphinx_mapping.insert(
            "sphinx".to_string(),
            IntersphinxTarget::new("https://www.sphinx-doc.org/en/master/"),
        );

        let mut autodoc_default_options = BTreeMap::new();
        autodoc_default_options.insert("members".to_string(), OptionValue::Flag(true));
        autodoc_default_options
            .insert("member-order".to_string(), OptionValue::Text("bysource".to_string()));
        autodoc_default_options
            .insert("special-members".to_string(), OptionValue::Text("__init__".to_string()));
        autodoc_default_options.insert("undoc-members".to_string(), OptionValue::Flag(false));
        autodoc_default_options.insert("show-inheritance".to_string(), OptionValue::Flag(true));

        Self {
            project_name: "geoparticle-documentation".to_string(),
            copyright_notice: "2025, Hong Zhu".to_string(),
            author: "Hong Zhu".to_string(),
            version: "1.0.2".to_string(),
            release: "1.0.2".to_string(),
            search_path_entries: strings(&["../.."]),
            enabled_extensions: strings(&[
                "sphinx.ext.autodoc",
                "sphinx.ext.autosummary",
                "sphinx.ext.napoleon",
                "sphinx.ext.viewcode",
                "sphinx.ext.intersphinx",
                "autoapi.extension",
            ]),
            theme_name: "sphinx_rtd_theme".to_string(),
            docstring_style_flags: flags.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            intersphinx_mapping,
            intersphinx_disabled_domains: strings(&["std"]),
            templates_path: strings(&["_templates"]),
            epub_show_urls: EpubShowUrls::Footnote,
            autoapi: AutoApiDraft {
                source_type: "python".to_string(),
                dirs: strings(&["../../geoparticle"]),
                root: "autoapi".to_string(),
                options: strings(&[
                    "members",
                    "show-inheritance",
                    "show-module-summary",
                    "special-members",
                ]),
                add_toctree_entry: false,
                keep_files: false,
                ignore: Vec::new(),
            },
            autodoc_default_options,
        }
    }
}

impl Default for ConfigDraft {
    fn default() -> Self {
        Self::geoparticle()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Caller-supplied partial configuration. Every key is optional; unknown keys
/// are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub copyright_notice: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
    #[serde(default)]
    pub search_path_entries: Option<Vec<String>>,
    #[serde(default)]
    pub enabled_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub theme_name: Option<String>,
    #[serde(default)]
    pub docstring_style_flags: Option<BTreeMap<String, bool>>,
    #[serde(default)]
    pub intersphinx_mapping: Option<BTreeMap<String, IntersphinxTarget>>,
    #[serde(default)]
    pub intersphinx_disabled_domains: Option<Vec<String>>,
    #[serde(default)]
    pub templates_path: Option<Vec<String>>,
    #[serde(default)]
    pub epub_show_urls: Option<EpubShowUrls>,
    #[serde(default)]
    pub autoapi: Option<AutoApiOverrides>,
    #[serde(default)]
    pub autodoc_default_options: Option<BTreeMap<String, OptionValue>>,
}

/// Resolved `autoapi` section with absolute source directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutoApiSettings {
    #[serde(rename = "type")]
    pub(crate) source_type: String,
    pub(crate) dirs: Vec<PathBuf>,
    pub(crate) root: String,
    pub(crate) options: Vec<String>,
    pub(crate) add_toctree_entry: bool,
    pub(crate) keep_files: bool,
    pub(crate) ignore: Vec<String>,
}

impl AutoApiSettings {
    pub fn source_type(&self) -> &str {
        &self.source_type
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn add_toctree_entry(&self) -> bool {
        self.add_toctree_entry
    }

    pub fn keep_files(&self) -> bool {
        self.keep_files
    }

    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }
}

/// Validated, immutable configuration for one documentation build.
///
/// Only [`crate::config::ConfigResolver::resolve`] constructs it, so every
/// instance satisfies the record invariants: non-empty project name, absolute
/// de-duplicated search paths and known extensions only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationRecord {
    pub(crate) project_name: String,
    pub(crate) copyright_notice: String,
    pub(crate) author: String,
    pub(crate) version: String,
    pub(crate) release: String,
    pub(crate) search_path_entries: Vec<PathBuf>,
    pub(crate) enabled_extensions: Vec<String>,
    pub(crate) theme_name: String,
    pub(crate) docstring_style_flags: BTreeMap<String, bool>,
    pub(crate) intersphinx_mapping: BTreeMap<String, IntersphinxTarget>,
    pub(crate) intersphinx_disabled_domains: Vec<String>,
    pub(crate) templates_path: Vec<String>,
    pub(crate) epub_show_urls: EpubShowUrls,
    pub(crate) autoapi: AutoApiSettings,
    pub(crate) autodoc_default_options: BTreeMap<String, OptionValue>,
}

impl ConfigurationRecord {
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn copyright_notice(&self) -> &str {
        &self.copyright_notice
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn release(&self) -> &str {
        &self.release
    }

    pub fn search_path_entries(&self) -> &[PathBuf] {
        &self.search_path_entries
    }

    pub fn enabled_extensions(&self) -> &[String] {
        &self.enabled_extensions
    }

    pub fn has_extension(&self, id: &str) -> bool {
        self.enabled_extensions.iter().any(|ext| ext == id)
    }

    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    pub fn docstring_style_flags(&self) -> &BTreeMap<String, bool> {
        &self.docstring_style_flags
    }

    pub fn intersphinx_mapping(&self) -> &BTreeMap<String, IntersphinxTarget> {
        &self.intersphinx_mapping
    }

    pub fn intersphinx_disabled_domains(&self) -> &[String] {
        &self.intersphinx_disabled_domains
    }

    pub fn templates_path(&self) -> &[String] {
        &self.templates_path
    }

    pub fn epub_show_urls(&self) -> EpubShowUrls {
        self.epub_show_urls
    }

    pub fn autoapi(&self) -> &AutoApiSettings {
        &self.autoapi
    }

    pub fn autodoc_default_options(&self) -> &BTreeMap<String, OptionValue> {
        &self.autodoc_default_options
    }
}
