//! Configuration errors
//!
//! Every variant is fatal to the documentation build. Callers surface the
//! message unchanged and stop.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("project_name must be a non-empty string")]
    EmptyProjectName,

    #[error("unknown extension '{0}': the documentation engine cannot load it")]
    UnknownExtension(String),

    #[error("unresolvable path in {field}: {path:?}")]
    UnresolvablePath { field: &'static str, path: String },

    #[error("invocation directory must be absolute: {}", .0.display())]
    RelativeInvocationDir(PathBuf),

    #[error("config file not found: {}", .0.display())]
    MissingConfigFile(PathBuf),

    #[error("unsupported config extension '.{extension}' for file {}", .path.display())]
    UnsupportedFormat { extension: String, path: PathBuf },

    #[error("invalid overrides from {origin}: {source}")]
    Load {
        origin: String,
        #[source]
        source: Box<figment::Error>,
    },
}

pub type Result<T> = std::result::Result<T, ConfigurationError>;
