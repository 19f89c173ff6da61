use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use voxcorpus::{CorpusConfig, CorpusPreprocessor};

use crate::{
    corpus_args::{CorpusArgs, ManifestArgs},
    logging::LogArgs,
};

/// Args for the build command.
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    #[clap(flatten)]
    corpus: CorpusArgs,

    #[clap(flatten)]
    manifest: ManifestArgs,

    /// Base symbols; each char is one symbol.
    #[arg(long, conflicts_with = "symbols_file")]
    symbols: Option<String>,

    /// File of base symbols, one per line.
    #[arg(long)]
    symbols_file: Option<PathBuf>,

    /// Write `mapper.json` under the corpus root.
    #[arg(long)]
    save: bool,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl BuildArgs {
    /// Run the build command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let mut config = CorpusConfig::new(&self.corpus.root_dir)
            .with_manifest(self.manifest.format())
            .with_persist_vocabulary(self.save);

        if let Some(chars) = &self.symbols {
            config = config.with_char_symbols(chars);
        } else if let Some(path) = &self.symbols_file {
            config = config.with_symbols(read_symbols_file(path)?);
        }

        let prepro = CorpusPreprocessor::new(config)?;

        for (id, name) in prepro.speaker_map().iter() {
            log::info!("speaker {id}: {name}");
        }
        println!(
            "{} items, {} speakers, {} symbols",
            prepro.items().len(),
            prepro.speaker_map().len(),
            prepro.vocab_size()
        );

        Ok(())
    }
}

fn read_symbols_file(path: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let mut symbols = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.is_empty() {
            symbols.push(line);
        }
    }
    Ok(symbols)
}
