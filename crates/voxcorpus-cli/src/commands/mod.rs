use crate::commands::{
    add_symbols::AddSymbolsArgs,
    build::BuildArgs,
    encode::EncodeArgs,
    inspect::InspectArgs,
};

pub mod add_symbols;
pub mod build;
pub mod encode;
pub mod inspect;

/// Subcommands for voxcorpus
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Parse a corpus manifest and build its vocabulary.
    Build(BuildArgs),

    /// Print a corpus's persisted vocabulary.
    Inspect(InspectArgs),

    /// Encode text to symbol ids with a persisted vocabulary.
    Encode(EncodeArgs),

    /// Add symbols to a persisted vocabulary.
    AddSymbols(AddSymbolsArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Build(cmd) => cmd.run(),
            Commands::Inspect(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::AddSymbols(cmd) => cmd.run(),
        }
    }
}
