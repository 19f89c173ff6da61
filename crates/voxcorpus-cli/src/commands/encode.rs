use voxcorpus::{CharacterCorpusOptions, CorpusPreprocessor, CorpusProcessor};

use crate::{corpus_args::CorpusArgs, logging::LogArgs};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[clap(flatten)]
    corpus: CorpusArgs,

    /// Text to encode.
    text: String,

    /// Lowercase the text first.
    #[arg(long)]
    lowercase: bool,

    /// Don't append the end-of-sequence id.
    #[arg(long)]
    no_eos: bool,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl EncodeArgs {
    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let prepro = CorpusPreprocessor::new(self.corpus.reuse_config())?;
        let corpus = CharacterCorpusOptions::default()
            .with_lowercase(self.lowercase)
            .with_append_eos(!self.no_eos)
            .init(prepro);

        let ids = corpus.text_to_sequence(&self.text)?;
        let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        println!("{}", ids.join(" "));

        Ok(())
    }
}
