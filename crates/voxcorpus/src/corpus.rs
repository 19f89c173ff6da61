//! # Corpus Processor Trait
//!
//! Concrete corpora implement [`CorpusProcessor`] to turn manifest
//! [`Item`]s into training [`Sample`]s; the vocabularies they map text
//! through live in the shared [`CorpusPreprocessor`].

use std::path::PathBuf;

use crate::{
    errors::CorpusResult,
    manifest::Item,
    processor::CorpusPreprocessor,
    types::SymbolId,
};

/// The audio of a [`Sample`].
#[derive(Debug, Clone, PartialEq)]
pub enum SampleAudio {
    /// A reference to an audio file, not yet decoded.
    Path(PathBuf),

    /// Decoded mono PCM samples.
    Pcm(Vec<f32>),
}

/// One preprocessed training sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// The transcript, as found in the manifest.
    pub raw_text: String,

    /// The transcript as symbol ids.
    pub text_ids: Vec<SymbolId>,

    /// The audio.
    pub audio: SampleAudio,

    /// Utterance id.
    pub utt_id: String,

    /// The speaker name.
    pub speaker_name: String,

    /// Audio sample rate, in Hz.
    pub sample_rate: u32,
}

/// Corpus-specific sample extraction and text tokenization.
pub trait CorpusProcessor {
    /// The shared vocabularies and items.
    fn preprocessor(&self) -> &CorpusPreprocessor;

    /// Normalize and tokenize `text` into symbol ids.
    fn text_to_sequence(
        &self,
        text: &str,
    ) -> CorpusResult<Vec<SymbolId>>;

    /// Build the [`Sample`] for one manifest item.
    fn get_one_sample(
        &self,
        item: &Item,
    ) -> CorpusResult<Sample>;

    /// Build a [`Sample`] for every item, in manifest order.
    fn samples(&self) -> impl Iterator<Item = CorpusResult<Sample>> {
        self.preprocessor()
            .items()
            .iter()
            .map(|item| self.get_one_sample(item))
    }
}
