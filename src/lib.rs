//! doc-conf: documentation-build configuration resolution
//!
//! Assembles the configuration of the geoparticle documentation build from
//! defaults, a config file, the environment and command-line overrides, then
//! validates it into an immutable [`ConfigurationRecord`] that is handed to
//! the documentation engine as JSON, TOML or a generated `conf.py`.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod utils;

pub use config::ConfigResolver;
pub use domain::{ConfigDraft, ConfigurationRecord, Overrides};
pub use error::ConfigurationError;
