//! `conf.py` generation
//!
//! Emits the record under the option names the documentation engine reads.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::domain::{ConfigurationRecord, OptionValue};

/// `autoapi_*` options are only meaningful with this extension loaded.
const AUTOAPI_EXTENSION: &str = "autoapi.extension";

/// Docstring flags are emitted as `napoleon_<flag>` options.
const FLAG_PREFIX: &str = "napoleon_";

pub fn render_conf_py(record: &ConfigurationRecord) -> String {
    let mut out = String::new();
    out.push_str("# Configuration file for the Sphinx documentation builder.\n");
    out.push_str("# Generated by doc-conf. Edit the doc-conf overrides instead.\n\n");
    out.push_str("import sys\n\n");

    // Insert in reverse so the first entry ends up first on sys.path.
    for entry in record.search_path_entries().iter().rev() {
        let _ = writeln!(out, "sys.path.insert(0, {})", py_path(entry));
    }

    out.push_str("\n# -- Project information\n\n");
    assign(&mut out, "project", py_str(record.project_name()));
    assign(&mut out, "copyright", py_str(record.copyright_notice()));
    assign(&mut out, "author", py_str(record.author()));
    assign(&mut out, "release", py_str(record.release()));
    assign(&mut out, "version", py_str(record.version()));

    out.push_str("\n# -- General configuration\n\n");
    assign(&mut out, "extensions", py_list(record.enabled_extensions()));
    assign(&mut out, "intersphinx_mapping", py_intersphinx(record));
    assign(
        &mut out,
        "intersphinx_disabled_domains",
        py_list(record.intersphinx_disabled_domains()),
    );
    assign(&mut out, "templates_path", py_list(record.templates_path()));

    out.push_str("\n# -- Options for HTML output\n\n");
    assign(&mut out, "html_theme", py_str(record.theme_name()));

    out.push_str("\n# -- Options for EPUB output\n\n");
    assign(&mut out, "epub_show_urls", py_str(record.epub_show_urls().as_str()));

    if record.has_extension(AUTOAPI_EXTENSION) {
        let autoapi = record.autoapi();
        out.push_str("\n# -- API reference\n\n");
        assign(&mut out, "autoapi_type", py_str(autoapi.source_type()));
        assign(&mut out, "autoapi_dirs", py_paths(autoapi.dirs()));
        assign(&mut out, "autoapi_root", py_str(autoapi.root()));
        assign(&mut out, "autoapi_options", py_list(autoapi.options()));
        assign(&mut out, "autoapi_add_toctree_entry", py_bool(autoapi.add_toctree_entry()));
        assign(&mut out, "autoapi_keep_files", py_bool(autoapi.keep_files()));
        assign(&mut out, "autoapi_ignore", py_list(autoapi.ignore()));
    }

    out.push_str("\n# -- Docstring parsing\n\n");
    assign(&mut out, "autodoc_default_options", py_options(record.autodoc_default_options()));
    for (flag, enabled) in record.docstring_style_flags() {
        let _ = writeln!(out, "{FLAG_PREFIX}{flag} = {}", py_bool(*enabled));
    }

    out
}

fn assign(out: &mut String, name: &str, value: String) {
    let _ = writeln!(out, "{name} = {value}");
}

/// Python string literal with single quotes.
fn py_str(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            other => literal.push(other),
        }
    }
    literal.push('\'');
    literal
}

fn py_bool(value: bool) -> String {
    let literal = if value { "True" } else { "False" };
    literal.to_string()
}

fn py_path(path: &Path) -> String {
    py_str(&path.to_string_lossy())
}

fn py_list(items: &[String]) -> String {
    if items.is_empty() {
        return "[]".to_string();
    }
    let body: Vec<String> = items.iter().map(|item| format!("    {},", py_str(item))).collect();
    format!("[\n{}\n]", body.join("\n"))
}

fn py_paths(paths: &[PathBuf]) -> String {
    let items: Vec<String> = paths.iter().map(|p| p.to_string_lossy().into_owned()).collect();
    py_list(&items)
}

fn py_intersphinx(record: &ConfigurationRecord) -> String {
    if record.intersphinx_mapping().is_empty() {
        return "{}".to_string();
    }
    let body: Vec<String> = record
        .intersphinx_mapping()
        .iter()
        .map(|(name, target)| {
            let inventory = target.inventory.as_deref().map(py_str).unwrap_or_else(|| "None".into());
            format!("    {}: ({}, {}),", py_str(name), py_str(&target.url), inventory)
        })
        .collect();
    format!("{{\n{}\n}}", body.join("\n"))
}

fn py_options(options: &BTreeMap<String, OptionValue>) -> String {
    if options.is_empty() {
        return "{}".to_string();
    }
    let body: Vec<String> = options
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                OptionValue::Flag(flag) => py_bool(*flag),
                OptionValue::Text(text) => py_str(text),
            };
            format!("    {}: {},", py_str(key), rendered)
        })
        .collect();
    format!("{{\n{}\n}}", body.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigResolver;
    use crate::domain::Overrides;

    fn render_with(overrides: Overrides) -> String {
        let record = ConfigResolver::new("/srv/docs/source").resolve(&overrides).expect("resolve");
        render_conf_py(&record)
    }

    #[test]
    fn test_conf_py_has_engine_option_names() {
        let out = render_with(Overrides::default());
        assert!(out.contains("sys.path.insert(0, '/srv')"));
        assert!(out.contains("project = 'geoparticle-documentation'"));
        assert!(out.contains("html_theme = 'sphinx_rtd_theme'"));
        assert!(out.contains("    'autoapi.extension',"));
        assert!(out.contains("autoapi_dirs = [\n    '/srv/geoparticle',\n]"));
        assert!(out.contains("autoapi_add_toctree_entry = False"));
        assert!(out.contains("autoapi_ignore = []"));
        assert!(out.contains("napoleon_include_private_with_doc = False"));
        assert!(out.contains("napoleon_use_param = True"));
        assert!(out.contains("    'python': ('https://docs.python.org/3/', None),"));
        assert!(out.contains("    'special-members': '__init__',"));
        assert!(out.contains("epub_show_urls = 'footnote'"));
    }

    #[test]
    fn test_search_paths_keep_first_entry_first() {
        let out = render_with(Overrides {
            search_path_entries: Some(vec!["/first".to_string(), "/second".to_string()]),
            ..Default::default()
        });
        let second = out.find("sys.path.insert(0, '/second')").expect("second");
        let first = out.find("sys.path.insert(0, '/first')").expect("first");
        assert!(second < first, "later inserts take precedence on sys.path");
    }

    #[test]
    fn test_autoapi_options_need_the_extension() {
        let out = render_with(Overrides {
            enabled_extensions: Some(vec!["sphinx.ext.autodoc".to_string()]),
            ..Default::default()
        });
        assert!(!out.contains("autoapi_dirs"));
        assert!(!out.contains("# -- API reference"));
        assert!(out.contains("    'sphinx.ext.autodoc',"));
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(py_str("it's"), "'it\\'s'");
        assert_eq!(py_str("a\\b"), "'a\\\\b'");
        assert_eq!(py_str("line\nbreak"), "'line\\nbreak'");
    }
}
