//! # Vocabulary Snapshot IO
//!
//! The snapshot is a JSON object stored as `mapper.json` under the corpus root:
//!
//! ```json
//! {
//!   "symbol_to_id": {"a": 0, "[UNK]": 1, ...},
//!   "id_to_symbol": {"0": "a", "1": "[UNK]", ...},
//!   "speakers_map": {"spk1": 0, ...}
//! }
//! ```

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{CorpusError, CorpusResult},
    speakers::SpeakerMap,
    symbols::SymbolTable,
    types::{SpeakerId, SymbolId},
};

/// File name of the snapshot under the corpus root.
pub const MAPPER_FILE_NAME: &str = "mapper.json";

/// Serialized symbol and speaker vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularySnapshot {
    /// `{ symbol -> id }`.
    pub symbol_to_id: BTreeMap<String, SymbolId>,

    /// `{ id -> symbol }`.
    pub id_to_symbol: BTreeMap<SymbolId, String>,

    /// `{ speaker name -> id }`.
    pub speakers_map: BTreeMap<String, SpeakerId>,
}

impl VocabularySnapshot {
    /// Capture a snapshot of the given tables.
    pub fn capture(
        symbols: &SymbolTable,
        speakers: &SpeakerMap,
    ) -> Self {
        Self {
            symbol_to_id: symbols.iter().map(|(s, id)| (s.to_string(), id)).collect(),
            id_to_symbol: symbols.iter().map(|(s, id)| (id, s.to_string())).collect(),
            speakers_map: speakers.to_name_map(),
        }
    }

    /// Rebuild the symbol table.
    ///
    /// `id_to_symbol` must hold the dense ids `0..n`,
    /// and agree with `symbol_to_id`.
    pub fn symbol_table(&self) -> CorpusResult<SymbolTable> {
        if self.symbol_to_id.len() != self.id_to_symbol.len() {
            return Err(CorpusError::CorruptSnapshot(format!(
                "symbol_to_id has {} entries, id_to_symbol has {}",
                self.symbol_to_id.len(),
                self.id_to_symbol.len()
            )));
        }

        for (expected, (&id, symbol)) in self.id_to_symbol.iter().enumerate() {
            if id as usize != expected {
                return Err(CorpusError::CorruptSnapshot(format!(
                    "symbol ids are not dense: expected {expected}, found {id}"
                )));
            }
            if self.symbol_to_id.get(symbol) != Some(&id) {
                return Err(CorpusError::CorruptSnapshot(format!(
                    "symbol {symbol:?} maps to {:?}, expected {id}",
                    self.symbol_to_id.get(symbol)
                )));
            }
        }

        // BTreeMap iteration is in id order.
        SymbolTable::from_symbols(self.id_to_symbol.values().cloned())
            .map_err(|e| CorpusError::CorruptSnapshot(e.to_string()))
    }

    /// Rebuild the speaker map, with its reverse.
    pub fn speaker_map(&self) -> CorpusResult<SpeakerMap> {
        SpeakerMap::from_name_map(&self.speakers_map)
    }
}

/// The snapshot path for a corpus root.
pub fn mapper_path<P: AsRef<Path>>(root_dir: P) -> PathBuf {
    root_dir.as_ref().join(MAPPER_FILE_NAME)
}

/// Read a [`VocabularySnapshot`] from a [`Read`] stream.
pub fn read_snapshot<R: Read>(reader: R) -> CorpusResult<VocabularySnapshot> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write a [`VocabularySnapshot`] to a [`Write`] stream.
pub fn write_snapshot<W: Write>(
    snapshot: &VocabularySnapshot,
    writer: &mut W,
) -> CorpusResult<()> {
    serde_json::to_writer(&mut *writer, snapshot)?;
    writer.flush()?;
    Ok(())
}

/// Load a [`VocabularySnapshot`] from a file.
pub fn load_snapshot_path<P: AsRef<Path>>(path: P) -> CorpusResult<VocabularySnapshot> {
    let file = File::open(path)?;
    read_snapshot(BufReader::new(file))
}

/// Save a [`VocabularySnapshot`] to a file, replacing any existing file.
pub fn save_snapshot_path<P: AsRef<Path>>(
    snapshot: &VocabularySnapshot,
    path: P,
) -> CorpusResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_snapshot(snapshot, &mut writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::ReservedTokens;

    fn sample_snapshot() -> VocabularySnapshot {
        let symbols = SymbolTable::with_reserved(&["a", "b"], &ReservedTokens::default()).unwrap();
        let speakers = SpeakerMap::from_names(["spk1", "spk2"]);
        VocabularySnapshot::capture(&symbols, &speakers)
    }

    #[test]
    fn test_json_layout() {
        let snapshot = sample_snapshot();

        let mut buf = Vec::new();
        write_snapshot(&snapshot, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(value["symbol_to_id"]["[PAD]"], 3);
        assert_eq!(value["id_to_symbol"]["5"], "[BOS]");
        assert_eq!(value["speakers_map"]["spk2"], 1);
    }

    #[test]
    fn test_save_load_snapshot() {
        let snapshot = sample_snapshot();

        tempdir::TempDir::new("mapper_test")
            .and_then(|dir| {
                let path = mapper_path(dir.path());

                save_snapshot_path(&snapshot, &path).expect("Failed to save snapshot");
                let loaded = load_snapshot_path(&path).expect("Failed to load snapshot");

                assert_eq!(loaded, snapshot);
                assert_eq!(loaded.id_to_symbol.get(&0).map(String::as_str), Some("a"));

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_rebuild_tables() {
        let snapshot = sample_snapshot();

        let table = snapshot.symbol_table().unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.lookup_id("[EOS]"), Some(4));

        let speakers = snapshot.speaker_map().unwrap();
        assert_eq!(speakers.name(0).unwrap(), "spk1");
    }

    #[test]
    fn test_corrupt_snapshot() {
        let mut snapshot = sample_snapshot();
        snapshot.id_to_symbol.insert(0, "z".to_string());
        assert!(matches!(
            snapshot.symbol_table(),
            Err(CorpusError::CorruptSnapshot(_))
        ));

        let mut snapshot = sample_snapshot();
        snapshot.id_to_symbol.remove(&2);
        snapshot.symbol_to_id.remove("[UNK]");
        assert!(matches!(
            snapshot.symbol_table(),
            Err(CorpusError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_read_malformed_json() {
        let err = read_snapshot("{\"symbol_to_id\": 3}".as_bytes()).unwrap_err();
        assert!(matches!(err, CorpusError::Json(_)));
    }
}
