//! # Corpus Preprocessor
//!
//! [`CorpusPreprocessor`] owns the manifest [`Item`]s, the [`SpeakerMap`],
//! and the [`SymbolTable`] of one corpus.
//!
//! ```rust,no_run
//! use voxcorpus::{CorpusConfig, CorpusPreprocessor};
//!
//! fn example() -> voxcorpus::CorpusResult<()> {
//!     let config = CorpusConfig::new("/data/ljspeech")
//!         .with_char_symbols("abcdefghijklmnopqrstuvwxyz '.,?!")
//!         .with_persist_vocabulary(true);
//!     let prepro = CorpusPreprocessor::new(config)?;
//!
//!     let ids = prepro.convert_symbols_to_ids(["h", "i"])?;
//!     assert_eq!(ids.len(), 2);
//!     Ok(())
//! }
//! ```

use std::path::Path;

use crate::{
    config::CorpusConfig,
    errors::{CorpusError, CorpusResult},
    manifest::{Item, load_manifest_items},
    mapper::{VocabularySnapshot, load_snapshot_path, mapper_path, save_snapshot_path},
    speakers::SpeakerMap,
    symbols::{ReservedToken, SymbolInput, SymbolTable},
    types::{SpeakerId, SymbolId},
};

/// Builds and owns the symbol and speaker vocabularies of a corpus.
#[derive(Debug, Clone)]
pub struct CorpusPreprocessor {
    config: CorpusConfig,
    items: Vec<Item>,
    speakers: SpeakerMap,
    symbols: SymbolTable,
}

impl CorpusPreprocessor {
    /// Construct a preprocessor.
    ///
    /// With `reuse_vocabulary`, the tables are loaded from the snapshot and
    /// the manifest is not read. Otherwise the manifest is parsed, and the
    /// speaker map and symbol table are built from it and `symbols`.
    ///
    /// ## Errors
    /// * [`CorpusError::EmptySymbols`] - no symbols, and no snapshot reuse.
    /// * [`CorpusError::Io`] - the manifest or snapshot can't be read.
    pub fn new(config: CorpusConfig) -> CorpusResult<Self> {
        if config.reuse_vocabulary {
            return Self::from_snapshot_file(config);
        }

        if config.symbols.is_empty() {
            return Err(CorpusError::EmptySymbols);
        }

        let items = load_manifest_items(&config.root_dir, &config.manifest)?;
        let speakers = SpeakerMap::from_names(items.iter().map(|i| i.speaker_name.as_str()));
        let symbols = SymbolTable::with_reserved(config.symbols.as_slice(), &config.reserved)?;

        log::info!(
            "{}: {} items, {} speakers, {} symbols",
            config.root_dir.display(),
            items.len(),
            speakers.len(),
            symbols.len()
        );

        let prepro = Self {
            config,
            items,
            speakers,
            symbols,
        };

        if prepro.config.persist_vocabulary {
            prepro.save_vocabulary()?;
        }

        Ok(prepro)
    }

    /// Build a preprocessor from an in-memory snapshot.
    ///
    /// The snapshot must contain every reserved token of `config.reserved`.
    pub fn from_snapshot(
        config: CorpusConfig,
        snapshot: &VocabularySnapshot,
    ) -> CorpusResult<Self> {
        let symbols = snapshot.symbol_table()?;
        if let Some(missing) = config.reserved.iter().find(|t| !symbols.contains(t)) {
            return Err(CorpusError::CorruptSnapshot(format!(
                "reserved token {missing:?} is missing"
            )));
        }
        let speakers = snapshot.speaker_map()?;

        Ok(Self {
            config,
            items: Vec::new(),
            speakers,
            symbols,
        })
    }

    fn from_snapshot_file(config: CorpusConfig) -> CorpusResult<Self> {
        let path = mapper_path(&config.root_dir);
        let snapshot = load_snapshot_path(&path)?;
        let prepro = Self::from_snapshot(config, &snapshot)?;

        log::info!(
            "loaded vocabulary from {}: {} symbols, {} speakers",
            path.display(),
            prepro.symbols.len(),
            prepro.speakers.len()
        );
        Ok(prepro)
    }

    /// Write the vocabulary snapshot to `root_dir/mapper.json`.
    pub fn save_vocabulary(&self) -> CorpusResult<()> {
        let path = mapper_path(&self.config.root_dir);
        save_snapshot_path(&self.snapshot(), &path)?;
        log::info!("wrote vocabulary to {}", path.display());
        Ok(())
    }

    /// Capture the current vocabulary.
    pub fn snapshot(&self) -> VocabularySnapshot {
        VocabularySnapshot::capture(&self.symbols, &self.speakers)
    }

    /// The configuration this preprocessor was built with.
    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// The corpus root.
    pub fn root_dir(&self) -> &Path {
        &self.config.root_dir
    }

    /// The manifest items, in file order; empty when the vocabulary was reused.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The speaker map.
    pub fn speaker_map(&self) -> &SpeakerMap {
        &self.speakers
    }

    /// The symbol table.
    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The number of symbols.
    pub fn vocab_size(&self) -> usize {
        self.symbols.len()
    }

    /// Look up a speaker id by name.
    pub fn get_speaker_id(
        &self,
        name: &str,
    ) -> CorpusResult<SpeakerId> {
        self.speakers.id(name)
    }

    /// Look up a speaker name by id.
    pub fn get_speaker_name(
        &self,
        id: SpeakerId,
    ) -> CorpusResult<&str> {
        self.speakers.name(id)
    }

    /// Add symbols to the table; symbols already present are left alone.
    pub fn add_symbol<S: Into<SymbolInput>>(
        &mut self,
        symbol: S,
    ) {
        self.symbols.add_input(&symbol.into());
    }

    /// Map symbols to their ids.
    ///
    /// ## Errors
    /// * [`CorpusError::UnknownSymbol`] - a symbol is not in the table.
    /// * [`CorpusError::InvalidSymbolInput`] - a list element is itself a list.
    pub fn convert_symbols_to_ids<S: Into<SymbolInput>>(
        &self,
        symbols: S,
    ) -> CorpusResult<Vec<SymbolId>> {
        self.symbols.convert_input(&symbols.into())
    }

    /// The string value of a reserved token.
    pub fn reserved_token(
        &self,
        token: ReservedToken,
    ) -> &str {
        self.config.reserved.get(token)
    }

    /// The id of a reserved token.
    pub fn reserved_id(
        &self,
        token: ReservedToken,
    ) -> SymbolId {
        // Both construction paths check the reserved tokens are present.
        self.symbols
            .lookup_id(self.reserved_token(token))
            .unwrap_or_default()
    }

    /// The unknown-symbol token.
    pub fn unk_token(&self) -> &str {
        self.reserved_token(ReservedToken::Unk)
    }

    /// The id of the unknown-symbol token.
    pub fn unk_id(&self) -> SymbolId {
        self.reserved_id(ReservedToken::Unk)
    }

    /// The padding token.
    pub fn pad_token(&self) -> &str {
        self.reserved_token(ReservedToken::Pad)
    }

    /// The id of the padding token.
    pub fn pad_id(&self) -> SymbolId {
        self.reserved_id(ReservedToken::Pad)
    }

    /// The end-of-sequence token.
    pub fn eos_token(&self) -> &str {
        self.reserved_token(ReservedToken::Eos)
    }

    /// The id of the end-of-sequence token.
    pub fn eos_id(&self) -> SymbolId {
        self.reserved_id(ReservedToken::Eos)
    }

    /// The beginning-of-sequence token.
    pub fn bos_token(&self) -> &str {
        self.reserved_token(ReservedToken::Bos)
    }

    /// The id of the beginning-of-sequence token.
    pub fn bos_id(&self) -> SymbolId {
        self.reserved_id(ReservedToken::Bos)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::*;
    use crate::{errors::ErrorKind, mapper::MAPPER_FILE_NAME, symbols::ReservedTokens};

    fn write_manifest(
        dir: &Path,
        lines: &[&str],
    ) {
        fs::write(dir.join("train.txt"), lines.join("\n")).unwrap();
    }

    #[test]
    fn test_build_from_manifest() {
        let dir = tempdir::TempDir::new("prepro_test").unwrap();
        write_manifest(
            dir.path(),
            &["wav001|hello world|spk1", "wav002|bye|spk2", "wav003|again|spk1"],
        );

        let prepro =
            CorpusPreprocessor::new(CorpusConfig::new(dir.path()).with_symbols(["a", "b", "c"]))
                .unwrap();

        assert_eq!(prepro.items().len(), 3);
        assert_eq!(prepro.items()[0].text, "hello world");
        assert_eq!(prepro.items()[0].audio_path, dir.path().join("wav001.wav"));
        assert_eq!(prepro.items()[0].speaker_name, "spk1");

        assert_eq!(prepro.get_speaker_id("spk1").unwrap(), 0);
        assert_eq!(prepro.get_speaker_id("spk2").unwrap(), 1);
        assert_eq!(prepro.get_speaker_name(1).unwrap(), "spk2");

        let expected: Vec<(&str, SymbolId)> = vec![
            ("a", 0),
            ("b", 1),
            ("c", 2),
            ("[UNK]", 3),
            ("[PAD]", 4),
            ("[EOS]", 5),
            ("[BOS]", 6),
        ];
        assert_eq!(prepro.symbol_table().iter().collect::<Vec<_>>(), expected);

        assert!(!dir.path().join(MAPPER_FILE_NAME).exists());
    }

    #[test]
    fn test_reserved_accessors() {
        let dir = tempdir::TempDir::new("prepro_test").unwrap();
        write_manifest(dir.path(), &["x|t|s"]);

        let prepro =
            CorpusPreprocessor::new(CorpusConfig::new(dir.path()).with_symbols(["a"])).unwrap();

        assert_eq!(prepro.unk_token(), "[UNK]");
        assert_eq!(prepro.pad_token(), "[PAD]");
        assert_eq!(prepro.eos_token(), "[EOS]");
        assert_eq!(prepro.bos_token(), "[BOS]");
        assert_eq!(
            [prepro.unk_id(), prepro.pad_id(), prepro.eos_id(), prepro.bos_id()],
            [1, 2, 3, 4]
        );
        assert_eq!(prepro.reserved_id(ReservedToken::Pad), 2);
    }

    #[test]
    fn test_custom_reserved_tokens() {
        let dir = tempdir::TempDir::new("prepro_test").unwrap();
        write_manifest(dir.path(), &["x|t|s"]);

        let reserved = ReservedTokens {
            pad: "_".to_string(),
            ..ReservedTokens::default()
        };
        let prepro = CorpusPreprocessor::new(
            CorpusConfig::new(dir.path())
                .with_symbols(["a"])
                .with_reserved(reserved),
        )
        .unwrap();

        assert_eq!(prepro.pad_token(), "_");
        assert_eq!(prepro.convert_symbols_to_ids("_").unwrap(), vec![2]);
    }

    #[test]
    fn test_empty_symbols() {
        let dir = tempdir::TempDir::new("prepro_test").unwrap();
        write_manifest(dir.path(), &["x|t|s"]);

        let err = CorpusPreprocessor::new(CorpusConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, CorpusError::EmptySymbols));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempdir::TempDir::new("prepro_test").unwrap();
        let err = CorpusPreprocessor::new(CorpusConfig::new(dir.path()).with_symbols(["a"]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_missing_snapshot() {
        let dir = tempdir::TempDir::new("prepro_test").unwrap();
        let err =
            CorpusPreprocessor::new(CorpusConfig::new(dir.path()).with_reuse_vocabulary(true))
                .unwrap_err();
        assert!(matches!(err, CorpusError::Io(_)));
    }

    #[test]
    fn test_persist_and_reuse() {
        let dir = tempdir::TempDir::new("prepro_test").unwrap();
        write_manifest(dir.path(), &["w1|one|alice", "w2|two|bob"]);

        let built = CorpusPreprocessor::new(
            CorpusConfig::new(dir.path())
                .with_symbols(["o", "n", "e"])
                .with_persist_vocabulary(true),
        )
        .unwrap();
        assert!(dir.path().join(MAPPER_FILE_NAME).exists());

        // The manifest is not consulted on reuse.
        fs::remove_file(dir.path().join("train.txt")).unwrap();

        let reused =
            CorpusPreprocessor::new(CorpusConfig::new(dir.path()).with_reuse_vocabulary(true))
                .unwrap();

        assert!(reused.items().is_empty());
        assert_eq!(reused.snapshot(), built.snapshot());
        assert_eq!(reused.get_speaker_name(1).unwrap(), "bob");
        assert_eq!(reused.eos_id(), built.eos_id());
    }

    #[test]
    fn test_reuse_rejects_missing_reserved() {
        let mut snapshot = VocabularySnapshot::default();
        snapshot.symbol_to_id.insert("a".to_string(), 0);
        snapshot.id_to_symbol.insert(0, "a".to_string());

        let err =
            CorpusPreprocessor::from_snapshot(CorpusConfig::new(PathBuf::from("/x")), &snapshot)
                .unwrap_err();
        assert!(matches!(err, CorpusError::CorruptSnapshot(_)));
    }

    #[test]
    fn test_add_and_convert() {
        let dir = tempdir::TempDir::new("prepro_test").unwrap();
        write_manifest(dir.path(), &["x|t|s"]);

        let mut prepro =
            CorpusPreprocessor::new(CorpusConfig::new(dir.path()).with_symbols(["a", "b"]))
                .unwrap();

        prepro.add_symbol("c");
        prepro.add_symbol(["c", "d"]);
        prepro.add_symbol(vec!["a".to_string()]);
        assert_eq!(prepro.vocab_size(), 8);

        assert_eq!(
            prepro.convert_symbols_to_ids(["a", "b"]).unwrap(),
            vec![0, 1]
        );
        assert_eq!(prepro.convert_symbols_to_ids("d").unwrap(), vec![7]);

        let err = prepro.convert_symbols_to_ids(["a", "zz"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }
}
