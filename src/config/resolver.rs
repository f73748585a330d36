//! Override application and validation

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::domain::{AutoApiSettings, ConfigDraft, ConfigurationRecord, Overrides};
use crate::error::{ConfigurationError, Result};
use crate::utils::dedup_preserving_order;
use crate::utils::paths::absolutize;

/// Extensions the documentation engine ships with or that the docs
/// environment installs.
pub const KNOWN_EXTENSIONS: &[&str] = &[
    "sphinx.ext.autodoc",
    "sphinx.ext.autosectionlabel",
    "sphinx.ext.autosummary",
    "sphinx.ext.coverage",
    "sphinx.ext.doctest",
    "sphinx.ext.duration",
    "sphinx.ext.extlinks",
    "sphinx.ext.githubpages",
    "sphinx.ext.graphviz",
    "sphinx.ext.ifconfig",
    "sphinx.ext.imgconverter",
    "sphinx.ext.inheritance_diagram",
    "sphinx.ext.intersphinx",
    "sphinx.ext.linkcode",
    "sphinx.ext.mathjax",
    "sphinx.ext.napoleon",
    "sphinx.ext.todo",
    "sphinx.ext.viewcode",
    "autoapi.extension",
    "myst_parser",
    "sphinx_copybutton",
    "sphinx_rtd_theme",
];

/// Builds one validated [`ConfigurationRecord`] per documentation build.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    invocation_dir: PathBuf,
    defaults: ConfigDraft,
    known_extensions: BTreeSet<String>,
}

impl ConfigResolver {
    /// Resolver with the geoparticle defaults, resolving relative paths
    /// against `invocation_dir`.
    pub fn new(invocation_dir: impl Into<PathBuf>) -> Self {
        Self {
            invocation_dir: invocation_dir.into(),
            defaults: ConfigDraft::default(),
            known_extensions: KNOWN_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn with_defaults(mut self, defaults: ConfigDraft) -> Self {
        self.defaults = defaults;
        self
    }

    /// Accept additional extension identifiers on top of [`KNOWN_EXTENSIONS`].
    pub fn with_known_extensions<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_extensions.extend(extra.into_iter().map(Into::into));
        self
    }

    pub fn invocation_dir(&self) -> &Path {
        &self.invocation_dir
    }

    pub fn is_known_extension(&self, id: &str) -> bool {
        self.known_extensions.contains(id)
    }

    /// Apply `overrides` on top of the defaults and validate the result.
    ///
    /// Keys are last-write-wins; `docstring_style_flags` and
    /// `autodoc_default_options` merge key by key and `autoapi` field by
    /// field. No filesystem access happens here.
    pub fn resolve(&self, overrides: &Overrides) -> Result<ConfigurationRecord> {
        if !self.invocation_dir.is_absolute() {
            return Err(ConfigurationError::RelativeInvocationDir(self.invocation_dir.clone()));
        }

        let draft = apply_overrides(self.defaults.clone(), overrides.clone());
        debug!(project = %draft.project_name, "applied overrides");

        if draft.project_name.trim().is_empty() {
            return Err(ConfigurationError::EmptyProjectName);
        }

        let enabled_extensions = dedup_preserving_order(draft.enabled_extensions);
        if let Some(unknown) = enabled_extensions.iter().find(|ext| !self.is_known_extension(ext)) {
            return Err(ConfigurationError::UnknownExtension(unknown.clone()));
        }

        if !refines(&draft.release, &draft.version) {
            warn!(
                version = %draft.version,
                release = %draft.release,
                "release does not refine version"
            );
        }

        let search_path_entries =
            self.absolutize_all("search_path_entries", &draft.search_path_entries)?;
        let autoapi_dirs = self.absolutize_all("autoapi.dirs", &draft.autoapi.dirs)?;
        debug!(entries = search_path_entries.len(), "normalized search paths");

        Ok(ConfigurationRecord {
            project_name: draft.project_name,
            copyright_notice: draft.copyright_notice,
            author: draft.author,
            version: draft.version,
            release: draft.release,
            search_path_entries,
            enabled_extensions,
            theme_name: draft.theme_name,
            docstring_style_flags: draft.docstring_style_flags,
            intersphinx_mapping: draft.intersphinx_mapping,
            intersphinx_disabled_domains: draft.intersphinx_disabled_domains,
            templates_path: draft.templates_path,
            epub_show_urls: draft.epub_show_urls,
            autoapi: AutoApiSettings {
                source_type: draft.autoapi.source_type,
                dirs: autoapi_dirs,
                root: draft.autoapi.root,
                options: draft.autoapi.options,
                add_toctree_entry: draft.autoapi.add_toctree_entry,
                keep_files: draft.autoapi.keep_files,
                ignore: draft.autoapi.ignore,
            },
            autodoc_default_options: draft.autodoc_default_options,
        })
    }

    fn absolutize_all(&self, field: &'static str, entries: &[String]) -> Result<Vec<PathBuf>> {
        let resolved = entries
            .iter()
            .map(|entry| {
                absolutize(&self.invocation_dir, entry).ok_or_else(|| {
                    ConfigurationError::UnresolvablePath { field, path: entry.clone() }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(dedup_preserving_order(resolved))
    }
}

/// True when `release` equals `version` or extends it at a component
/// boundary: `1.0.2` and `1.0rc1` refine `1.0`, `1.10` does not refine `1.1`.
fn refines(release: &str, version: &str) -> bool {
    match release.strip_prefix(version) {
        Some(rest) => !rest.starts_with(|c: char| c.is_ascii_digit()),
        None => false,
    }
}

fn apply_overrides(mut draft: ConfigDraft, overrides: Overrides) -> ConfigDraft {
    if let Some(v) = overrides.project_name {
        draft.project_name = v;
    }
    if let Some(v) = overrides.copyright_notice {
        draft.copyright_notice = v;
    }
    if let Some(v) = overrides.author {
        draft.author = v;
    }
    if let Some(v) = overrides.version {
        draft.version = v;
    }
    if let Some(v) = overrides.release {
        draft.release = v;
    }
    if let Some(v) = overrides.search_path_entries {
        draft.search_path_entries = v;
    }
    if let Some(v) = overrides.enabled_extensions {
        draft.enabled_extensions = v;
    }
    if let Some(v) = overrides.theme_name {
        draft.theme_name = v;
    }
    if let Some(flags) = overrides.docstring_style_flags {
        draft.docstring_style_flags.extend(flags);
    }
    if let Some(v) = overrides.intersphinx_mapping {
        draft.intersphinx_mapping = v;
    }
    if let Some(v) = overrides.intersphinx_disabled_domains {
        draft.intersphinx_disabled_domains = v;
    }
    if let Some(v) = overrides.templates_path {
        draft.templates_path = v;
    }
    if let Some(v) = overrides.epub_show_urls {
        draft.epub_show_urls = v;
    }
    if let Some(autoapi) = overrides.autoapi {
        let target = &mut draft.autoapi;
        if let Some(v) = autoapi.source_type {
            target.source_type = v;
        }
        if let Some(v) = autoapi.dirs {
            target.dirs = v;
        }
        if let Some(v) = autoapi.root {
            target.root = v;
        }
        if let Some(v) = autoapi.options {
            target.options = v;
        }
        if let Some(v) = autoapi.add_toctree_entry {
            target.add_toctree_entry = v;
        }
        if let Some(v) = autoapi.keep_files {
            target.keep_files = v;
        }
        if let Some(v) = autoapi.ignore {
            target.ignore = v;
        }
    }
    if let Some(options) = overrides.autodoc_default_options {
        draft.autodoc_default_options.extend(options);
    }
    draft
}
