use std::path::PathBuf;

use voxcorpus::{
    CorpusConfig,
    FieldPositions,
    ManifestFormat,
    manifest::{DEFAULT_AUDIO_EXTENSION, DEFAULT_DELIMITER, DEFAULT_MANIFEST_FILE_NAME},
};

/// Corpus root arg group.
#[derive(clap::Args, Debug)]
pub struct CorpusArgs {
    /// Corpus root directory.
    pub root_dir: PathBuf,
}

impl CorpusArgs {
    /// Config that reuses the `mapper.json` snapshot under the root.
    pub fn reuse_config(&self) -> CorpusConfig {
        CorpusConfig::new(&self.root_dir).with_reuse_vocabulary(true)
    }
}

/// Manifest layout arg group.
#[derive(clap::Args, Debug)]
pub struct ManifestArgs {
    /// Manifest file name, relative to the corpus root.
    #[arg(long, default_value = DEFAULT_MANIFEST_FILE_NAME)]
    manifest: String,

    /// Field delimiter.
    #[arg(long, default_value = DEFAULT_DELIMITER)]
    delimiter: String,

    /// Audio file extension.
    #[arg(long, default_value = DEFAULT_AUDIO_EXTENSION)]
    extension: String,

    /// Field positions, as "file,text,speaker".
    #[arg(long, default_value = "0,1,2", value_parser = parse_positions)]
    positions: FieldPositions,
}

impl ManifestArgs {
    /// Build the [`ManifestFormat`].
    pub fn format(&self) -> ManifestFormat {
        ManifestFormat::default()
            .with_file_name(self.manifest.clone())
            .with_delimiter(self.delimiter.clone())
            .with_audio_extension(self.extension.clone())
            .with_positions(self.positions)
    }
}

fn parse_positions(value: &str) -> Result<FieldPositions, String> {
    let parts = value
        .split(',')
        .map(|p| p.trim().parse::<usize>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        &[file, text, speaker] => Ok(FieldPositions {
            file,
            text,
            speaker,
        }),
        _ => Err(format!("expected 3 positions, found {}", parts.len())),
    }
}
