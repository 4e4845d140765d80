//! CLI entry point for the Truchet mosaic generator

use clap::Parser;
use truchet_mosaic::io::cli::{Cli, MosaicProcessor};

fn main() -> truchet_mosaic::Result<()> {
    let cli = Cli::parse();
    let mut processor = MosaicProcessor::new(cli);
    processor.process()?;
    Ok(())
}
