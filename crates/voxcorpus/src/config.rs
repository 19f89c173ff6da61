//! # Preprocessor Configuration

use std::path::{Path, PathBuf};

use crate::{manifest::ManifestFormat, symbols::ReservedTokens};

/// Construction inputs for a [`crate::CorpusPreprocessor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Corpus root; holds the manifest and the vocabulary snapshot.
    pub root_dir: PathBuf,

    /// Base symbols; required unless `reuse_vocabulary` is set.
    pub symbols: Vec<String>,

    /// Manifest location and layout.
    pub manifest: ManifestFormat,

    /// Reserved control symbol values.
    pub reserved: ReservedTokens,

    /// Write the vocabulary snapshot after construction.
    pub persist_vocabulary: bool,

    /// Load the vocabulary snapshot instead of parsing the manifest.
    pub reuse_vocabulary: bool,
}

impl CorpusConfig {
    /// New config rooted at `root_dir`, with default manifest and reserved tokens.
    pub fn new<P: AsRef<Path>>(root_dir: P) -> Self {
        Self {
            root_dir: root_dir.as_ref().to_path_buf(),
            symbols: Vec::new(),
            manifest: ManifestFormat::default(),
            reserved: ReservedTokens::default(),
            persist_vocabulary: false,
            reuse_vocabulary: false,
        }
    }

    /// Set the base symbols.
    pub fn with_symbols<I, S>(
        mut self,
        symbols: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Use each char of `chars` as a base symbol.
    pub fn with_char_symbols(
        self,
        chars: &str,
    ) -> Self {
        self.with_symbols(chars.chars().map(String::from))
    }

    /// Set the manifest format.
    pub fn with_manifest(
        mut self,
        manifest: ManifestFormat,
    ) -> Self {
        self.manifest = manifest;
        self
    }

    /// Set the reserved token values.
    pub fn with_reserved(
        mut self,
        reserved: ReservedTokens,
    ) -> Self {
        self.reserved = reserved;
        self
    }

    /// Set whether to write the vocabulary snapshot.
    pub fn with_persist_vocabulary(
        mut self,
        persist: bool,
    ) -> Self {
        self.persist_vocabulary = persist;
        self
    }

    /// Set whether to load the vocabulary snapshot.
    pub fn with_reuse_vocabulary(
        mut self,
        reuse: bool,
    ) -> Self {
        self.reuse_vocabulary = reuse;
        self
    }
}
