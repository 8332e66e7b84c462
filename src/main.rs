//! CLI entry point for the Tents and Trees solver

use clap::Parser;
use tents::io::cli::{Cli, FileProcessor};

fn main() -> tents::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
