//! # Manifest Parsing
//!
//! A manifest is a UTF-8 text file with one utterance per line;
//! fields are separated by a delimiter:
//!
//! ```text
//! wav001|hello world|spk1
//! wav002|good morning|spk2
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::{CorpusError, CorpusResult};

/// Default manifest file name.
pub const DEFAULT_MANIFEST_FILE_NAME: &str = "train.txt";

/// Default field delimiter.
pub const DEFAULT_DELIMITER: &str = "|";

/// Default audio file extension.
pub const DEFAULT_AUDIO_EXTENSION: &str = ".wav";

/// Field positions within a split manifest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPositions {
    /// Position of the audio file path.
    pub file: usize,

    /// Position of the transcript.
    pub text: usize,

    /// Position of the speaker name.
    pub speaker: usize,
}

impl Default for FieldPositions {
    fn default() -> Self {
        Self {
            file: 0,
            text: 1,
            speaker: 2,
        }
    }
}

impl FieldPositions {
    /// The number of fields a line needs to cover every position.
    pub fn required_fields(&self) -> usize {
        self.file.max(self.text).max(self.speaker) + 1
    }
}

/// How to locate and parse a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestFormat {
    /// Manifest file name, relative to the corpus root.
    pub file_name: String,

    /// Field delimiter.
    pub delimiter: String,

    /// Extension appended to audio paths which lack it.
    pub audio_extension: String,

    /// Field positions.
    pub positions: FieldPositions,
}

impl Default for ManifestFormat {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_MANIFEST_FILE_NAME.to_string(),
            delimiter: DEFAULT_DELIMITER.to_string(),
            audio_extension: DEFAULT_AUDIO_EXTENSION.to_string(),
            positions: FieldPositions::default(),
        }
    }
}

impl ManifestFormat {
    /// Set the manifest file name.
    pub fn with_file_name<S: Into<String>>(
        mut self,
        file_name: S,
    ) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Set the field delimiter.
    pub fn with_delimiter<S: Into<String>>(
        mut self,
        delimiter: S,
    ) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the audio extension.
    pub fn with_audio_extension<S: Into<String>>(
        mut self,
        audio_extension: S,
    ) -> Self {
        self.audio_extension = audio_extension.into();
        self
    }

    /// Set the field positions.
    pub fn with_positions(
        mut self,
        positions: FieldPositions,
    ) -> Self {
        self.positions = positions;
        self
    }

    /// Resolve an audio path field against the corpus root.
    ///
    /// The audio extension is appended unless the path already ends with it.
    pub fn resolve_audio_path(
        &self,
        root_dir: &Path,
        file: &str,
    ) -> PathBuf {
        let path = root_dir.join(file);
        if path.as_os_str().to_string_lossy().ends_with(&self.audio_extension) {
            path
        } else {
            let mut path = path.into_os_string();
            path.push(&self.audio_extension);
            path.into()
        }
    }

    /// Parse one trimmed, non-empty manifest line.
    ///
    /// ## Arguments
    /// * `root_dir` - the corpus root.
    /// * `line_no` - the 1-based line number, for errors.
    /// * `line` - the line.
    pub fn parse_line(
        &self,
        root_dir: &Path,
        line_no: usize,
        line: &str,
    ) -> CorpusResult<Item> {
        let parts: Vec<&str> = line.split(self.delimiter.as_str()).collect();

        let required = self.positions.required_fields();
        if parts.len() < required {
            return Err(CorpusError::MalformedManifestLine {
                line: line_no,
                found: parts.len(),
                required,
            });
        }

        Ok(Item {
            text: parts[self.positions.text].to_string(),
            audio_path: self.resolve_audio_path(root_dir, parts[self.positions.file]),
            speaker_name: parts[self.positions.speaker].to_string(),
        })
    }
}

/// One utterance from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The raw transcript.
    pub text: String,

    /// The resolved audio file path.
    pub audio_path: PathBuf,

    /// The speaker name.
    pub speaker_name: String,
}

/// Read [`Item`]s from a manifest [`BufRead`] stream, in line order.
///
/// Lines are trimmed; blank lines are skipped.
pub fn read_manifest_items<R: BufRead>(
    reader: R,
    root_dir: &Path,
    format: &ManifestFormat,
) -> CorpusResult<Vec<Item>> {
    let mut items = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            log::warn!("skipping blank manifest line {}", idx + 1);
            continue;
        }
        items.push(format.parse_line(root_dir, idx + 1, line)?);
    }
    Ok(items)
}

/// Load the [`Item`]s of `root_dir/<format.file_name>`.
pub fn load_manifest_items<P: AsRef<Path>>(
    root_dir: P,
    format: &ManifestFormat,
) -> CorpusResult<Vec<Item>> {
    let root_dir = root_dir.as_ref();
    let path = root_dir.join(&format.file_name);
    log::debug!("reading manifest: {}", path.display());

    let reader = BufReader::new(File::open(&path)?);
    read_manifest_items(reader, root_dir, format)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_parse_line() {
        let format = ManifestFormat::default();
        let item = format
            .parse_line(Path::new("/data"), 1, "wav001|hello world|spk1")
            .unwrap();

        assert_eq!(
            item,
            Item {
                text: "hello world".to_string(),
                audio_path: PathBuf::from("/data/wav001.wav"),
                speaker_name: "spk1".to_string(),
            }
        );
    }

    #[test]
    fn test_extension_not_doubled() {
        let format = ManifestFormat::default();
        assert_eq!(
            format.resolve_audio_path(Path::new("/data"), "wavs/a.wav"),
            PathBuf::from("/data/wavs/a.wav")
        );
        assert_eq!(
            format.resolve_audio_path(Path::new("/data"), "wavs/a.flac"),
            PathBuf::from("/data/wavs/a.flac.wav")
        );
    }

    #[test]
    fn test_custom_format() {
        let format = ManifestFormat::default()
            .with_delimiter("\t")
            .with_audio_extension(".flac")
            .with_positions(FieldPositions {
                file: 2,
                text: 0,
                speaker: 1,
            });

        let item = format
            .parse_line(Path::new("root"), 1, "some text\tanna\tclips/x")
            .unwrap();
        assert_eq!(item.text, "some text");
        assert_eq!(item.speaker_name, "anna");
        assert_eq!(item.audio_path, Path::new("root").join("clips/x.flac"));
    }

    #[test]
    fn test_malformed_line() {
        let format = ManifestFormat::default();
        assert!(matches!(
            format.parse_line(Path::new("/data"), 7, "wav001|no speaker"),
            Err(CorpusError::MalformedManifestLine {
                line: 7,
                found: 2,
                required: 3,
            })
        ));
    }

    #[test]
    fn test_read_items_in_order() {
        let manifest = "a|one|s1\n\n  b|two|s2  \nc|three|s1\n";
        let items = read_manifest_items(
            Cursor::new(manifest),
            Path::new("/corpus"),
            &ManifestFormat::default(),
        )
        .unwrap();

        let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
        assert_eq!(items[1].audio_path, PathBuf::from("/corpus/b.wav"));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempdir::TempDir::new("manifest_test").unwrap();
        let err = load_manifest_items(dir.path(), &ManifestFormat::default()).unwrap_err();
        assert!(matches!(err, CorpusError::Io(_)));
    }
}
