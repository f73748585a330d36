//! Configuration loading, merging and resolution
//!
//! Layers apply with the precedence CLI > Env > File > Defaults. The
//! [`ConfigResolver`] turns the merged override layer into a validated
//! [`crate::domain::ConfigurationRecord`].

pub mod loader;
pub mod merge;
pub mod resolver;

pub use loader::{load_overrides, ENV_PREFIX};
pub use merge::{merge_cli_with_config, CliOverrides};
pub use resolver::{ConfigResolver, KNOWN_EXTENSIONS};
