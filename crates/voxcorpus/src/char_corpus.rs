//! # Character Corpus
//!
//! A [`CorpusProcessor`] whose symbols are single characters.

use crate::{
    corpus::{CorpusProcessor, Sample, SampleAudio},
    errors::CorpusResult,
    manifest::Item,
    processor::CorpusPreprocessor,
    types::SymbolId,
};

/// Default sample rate of character corpora, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Options for [`CharacterCorpus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCorpusOptions {
    /// Lowercase text before mapping.
    pub lowercase: bool,

    /// Append the end-of-sequence id.
    pub append_eos: bool,

    /// Audio sample rate, in Hz.
    pub sample_rate: u32,
}

impl Default for CharacterCorpusOptions {
    fn default() -> Self {
        Self {
            lowercase: false,
            append_eos: true,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl CharacterCorpusOptions {
    /// Set lowercasing.
    pub fn with_lowercase(
        mut self,
        lowercase: bool,
    ) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Set whether to append the end-of-sequence id.
    pub fn with_append_eos(
        mut self,
        append_eos: bool,
    ) -> Self {
        self.append_eos = append_eos;
        self
    }

    /// Set the sample rate.
    pub fn with_sample_rate(
        mut self,
        sample_rate: u32,
    ) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Build a [`CharacterCorpus`] over `preprocessor`.
    pub fn init(
        self,
        preprocessor: CorpusPreprocessor,
    ) -> CharacterCorpus {
        CharacterCorpus {
            options: self,
            preprocessor,
        }
    }
}

/// Character-level corpus.
///
/// Text is whitespace-collapsed, optionally lowercased, then mapped one char
/// at a time; chars missing from the table map to the unknown id.
#[derive(Debug, Clone)]
pub struct CharacterCorpus {
    options: CharacterCorpusOptions,
    preprocessor: CorpusPreprocessor,
}

impl CharacterCorpus {
    /// Wrap a preprocessor with default options.
    pub fn new(preprocessor: CorpusPreprocessor) -> Self {
        CharacterCorpusOptions::default().init(preprocessor)
    }

    /// The options.
    pub fn options(&self) -> &CharacterCorpusOptions {
        &self.options
    }

    /// Collapse whitespace runs and apply case folding.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if self.options.lowercase {
            text.to_lowercase()
        } else {
            text
        }
    }
}

impl CorpusProcessor for CharacterCorpus {
    fn preprocessor(&self) -> &CorpusPreprocessor {
        &self.preprocessor
    }

    fn text_to_sequence(
        &self,
        text: &str,
    ) -> CorpusResult<Vec<SymbolId>> {
        let table = self.preprocessor.symbol_table();
        let unk = self.preprocessor.unk_id();

        let mut buf = [0u8; 4];
        let mut ids: Vec<SymbolId> = self
            .normalize(text)
            .chars()
            .map(|c| {
                let symbol: &str = c.encode_utf8(&mut buf);
                table.lookup_id(symbol).unwrap_or_else(|| {
                    log::debug!("unknown char {c:?}, using {unk}");
                    unk
                })
            })
            .collect();

        if self.options.append_eos {
            ids.push(self.preprocessor.eos_id());
        }
        Ok(ids)
    }

    fn get_one_sample(
        &self,
        item: &Item,
    ) -> CorpusResult<Sample> {
        let utt_id = item
            .audio_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Sample {
            raw_text: item.text.clone(),
            text_ids: self.text_to_sequence(&item.text)?,
            audio: SampleAudio::Path(item.audio_path.clone()),
            utt_id,
            speaker_name: item.speaker_name.clone(),
            sample_rate: self.options.sample_rate,
        })
    }
}
