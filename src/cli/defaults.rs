//! Defaults command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::invocation_dir;
use crate::config::ConfigResolver;
use crate::domain::Overrides;
use crate::render::{render, Format};

#[derive(Args)]
pub struct DefaultsArgs {
    /// Directory relative default paths are resolved against
    #[arg(short = 'd', long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
}

pub fn run(args: DefaultsArgs) -> Result<()> {
    let dir = invocation_dir(args.dir.as_deref())?;
    let record = ConfigResolver::new(dir).resolve(&Overrides::default())?;
    print!("{}", render(&record, args.format)?);
    Ok(())
}
