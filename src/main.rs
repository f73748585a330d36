//! doc-conf: resolve the documentation-build configuration

use anyhow::Result;

fn main() -> Result<()> {
    doc_conf::cli::run()
}
