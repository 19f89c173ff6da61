use std::io::Write;

use voxcorpus::CorpusPreprocessor;

use crate::{corpus_args::CorpusArgs, logging::LogArgs, output::OutputArgs};

/// Args for the inspect command.
#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    #[clap(flatten)]
    corpus: CorpusArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    pub logging: LogArgs,
}

impl InspectArgs {
    /// Run the inspect command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let prepro = CorpusPreprocessor::new(self.corpus.reuse_config())?;
        let mut writer = self.output.open_writer()?;

        writeln!(writer, "symbols: {}", prepro.vocab_size())?;
        for (symbol, id) in prepro.symbol_table().iter() {
            writeln!(writer, "  {id}\t{symbol:?}")?;
        }

        writeln!(writer, "speakers: {}", prepro.speaker_map().len())?;
        for (id, name) in prepro.speaker_map().iter() {
            writeln!(writer, "  {id}\t{name}")?;
        }

        writer.flush()?;
        Ok(())
    }
}
