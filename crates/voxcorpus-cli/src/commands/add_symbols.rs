use voxcorpus::{CorpusPreprocessor, SymbolInput};

use crate::{corpus_args::CorpusArgs, logging::LogArgs};

/// Args for the add-symbols command.
#[derive(clap::Args, Debug)]
pub struct AddSymbolsArgs {
    #[clap(flatten)]
    corpus: CorpusArgs,

    /// A JSON string or (nested) array of strings, e.g. '["@", ["#", "$"]]'.
    symbols: String,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl AddSymbolsArgs {
    /// Run the add-symbols command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let value: serde_json::Value = serde_json::from_str(&self.symbols)?;
        let input = SymbolInput::try_from(&value)?;

        let mut prepro = CorpusPreprocessor::new(self.corpus.reuse_config())?;
        let before = prepro.vocab_size();
        prepro.add_symbol(input);
        log::info!("added {} symbols", prepro.vocab_size() - before);

        prepro.save_vocabulary()?;
        Ok(())
    }
}
