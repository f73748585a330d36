//! Resolve and check command implementations

use anyhow::{Context, Result};
use clap::Args;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::utils::{invocation_dir, non_empty, parse_flag};
use crate::config::{load_overrides, merge_cli_with_config, CliOverrides, ConfigResolver};
use crate::domain::ConfigurationRecord;
use crate::render::{render, Format};

/// Options shared by every command that resolves a configuration.
#[derive(Args)]
pub struct OverrideArgs {
    /// Directory relative paths are resolved against (default: current directory)
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file with overrides (default: auto-discover doc-conf.toml/.yaml in DIR)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project name
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Author
    #[arg(long, value_name = "NAME")]
    pub author: Option<String>,

    /// Copyright notice
    #[arg(long, value_name = "TEXT")]
    pub copyright: Option<String>,

    /// Short project version
    #[arg(long = "version-string", value_name = "VERSION")]
    pub version_string: Option<String>,

    /// Full release string
    #[arg(long, value_name = "RELEASE")]
    pub release: Option<String>,

    /// HTML theme name
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Enabled extension, replacing the configured list (repeatable or comma-separated)
    #[arg(short = 'x', long = "extension", value_name = "EXT", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Search path entry, replacing the configured list (repeatable or comma-separated)
    #[arg(short = 's', long = "search-path", value_name = "PATH", value_delimiter = ',')]
    pub search_paths: Vec<String>,

    /// Docstring style flag as NAME=true|false (repeatable)
    #[arg(short = 'f', long = "flag", value_name = "NAME=BOOL")]
    pub flags: Vec<String>,
}

impl OverrideArgs {
    fn cli_overrides(&self) -> Result<CliOverrides> {
        let docstring_style_flags = self
            .flags
            .iter()
            .map(|raw| parse_flag(raw))
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(CliOverrides {
            project_name: self.project.clone(),
            author: self.author.clone(),
            copyright_notice: self.copyright.clone(),
            version: self.version_string.clone(),
            release: self.release.clone(),
            theme_name: self.theme.clone(),
            enabled_extensions: non_empty(&self.extensions),
            search_path_entries: non_empty(&self.search_paths),
            docstring_style_flags,
        })
    }

    fn resolve_record(&self) -> Result<ConfigurationRecord> {
        let dir = invocation_dir(self.dir.as_deref())?;
        let config = self.config.as_deref().map(|path| invocation_dir(Some(path))).transpose()?;

        let overrides = load_overrides(&dir, config.as_deref())?;
        let overrides = merge_cli_with_config(overrides, self.cli_overrides()?);

        let resolver = ConfigResolver::new(dir);
        let record = resolver.resolve(&overrides)?;
        info!(
            project = record.project_name(),
            dir = %resolver.invocation_dir().display(),
            "resolved configuration"
        );
        Ok(record)
    }
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

pub fn run(args: ResolveArgs) -> Result<()> {
    let record = args.overrides.resolve_record()?;
    let rendered = render(&record, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed writing output: {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

pub fn check(args: CheckArgs) -> Result<()> {
    let record = args.overrides.resolve_record()?;
    println!("Configuration OK: {}", record.project_name());
    println!("  extensions:   {}", record.enabled_extensions().len());
    println!("  search paths: {}", record.search_path_entries().len());
    Ok(())
}
