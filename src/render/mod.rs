//! Output rendering for the documentation engine (JSON, TOML, conf.py)

pub mod python;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::domain::ConfigurationRecord;

pub use python::render_conf_py;

/// Output format of a resolved record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    #[default]
    Json,
    Toml,
    /// A `conf.py` the documentation engine can load directly
    Python,
}

pub fn render(record: &ConfigurationRecord, format: Format) -> Result<String> {
    match format {
        Format::Json => {
            let mut out =
                serde_json::to_string_pretty(record).context("Failed to serialize record as JSON")?;
            out.push('\n');
            Ok(out)
        }
        Format::Toml => {
            toml::to_string_pretty(record).context("Failed to serialize record as TOML")
        }
        Format::Python => Ok(render_conf_py(record)),
    }
}
