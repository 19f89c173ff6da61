//! # `voxcorpus` TTS Corpus Preprocessing
//!
//! Turns a text-to-speech training corpus (a delimited manifest of
//! utterances, audio paths, and speaker names) into indexable
//! `(text ids, audio, speaker)` samples; and persists the symbol and speaker
//! vocabularies so inference can reproduce the same mapping.
//!
//! See:
//! * [`CorpusPreprocessor`] to parse a manifest and build the vocabularies.
//! * [`CorpusProcessor`] to plug in corpus-specific tokenization and sample extraction.
//! * [`CharacterCorpus`] for a character-level corpus.
//! * [`mapper`] for the `mapper.json` vocabulary snapshot.
//!
//! ## Manifest To Samples
//!
//! ```rust,no_run
//! use voxcorpus::{CharacterCorpus, CorpusConfig, CorpusPreprocessor, CorpusProcessor};
//!
//! fn example() -> voxcorpus::CorpusResult<()> {
//!     let config = CorpusConfig::new("/data/ljspeech")
//!         .with_char_symbols("abcdefghijklmnopqrstuvwxyz '.,?!")
//!         .with_persist_vocabulary(true);
//!
//!     let corpus = CharacterCorpus::new(CorpusPreprocessor::new(config)?);
//!     for sample in corpus.samples() {
//!         let sample = sample?;
//!         println!("{}: {:?}", sample.utt_id, sample.text_ids);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Reusing A Vocabulary
//!
//! ```rust,no_run
//! use voxcorpus::{CorpusConfig, CorpusPreprocessor};
//!
//! fn example() -> voxcorpus::CorpusResult<()> {
//!     let prepro = CorpusPreprocessor::new(
//!         CorpusConfig::new("/data/ljspeech").with_reuse_vocabulary(true),
//!     )?;
//!     println!("pad id: {}", prepro.pad_id());
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod char_corpus;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod manifest;
pub mod mapper;
pub mod processor;
pub mod speakers;
pub mod symbols;
pub mod types;

#[doc(inline)]
pub use char_corpus::{CharacterCorpus, CharacterCorpusOptions};
#[doc(inline)]
pub use config::CorpusConfig;
#[doc(inline)]
pub use corpus::{CorpusProcessor, Sample, SampleAudio};
#[doc(inline)]
pub use errors::{CorpusError, CorpusResult, ErrorKind};
#[doc(inline)]
pub use manifest::{FieldPositions, Item, ManifestFormat};
#[doc(inline)]
pub use mapper::VocabularySnapshot;
#[doc(inline)]
pub use processor::CorpusPreprocessor;
#[doc(inline)]
pub use speakers::SpeakerMap;
#[doc(inline)]
pub use symbols::{ReservedToken, ReservedTokens, SymbolInput, SymbolTable};
#[doc(inline)]
pub use types::{SpeakerId, SymbolId};
