mod commands;
mod corpus_args;
mod logging;
mod output;

use clap::Parser;
use commands::Commands;

/// voxcorpus
#[derive(clap::Parser, Debug)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}
