//! # Error Types

use crate::types::{SpeakerId, SymbolId};

/// The coarse category of a [`CorpusError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The preprocessor was configured in a way that cannot produce a vocabulary.
    Configuration,

    /// A manifest or snapshot file could not be read, written, or parsed.
    Io,

    /// A speaker or symbol lookup missed.
    Lookup,

    /// A dynamically shaped argument had the wrong shape.
    TypeValidation,
}

/// Errors from voxcorpus operations.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// No base symbols were given and no persisted vocabulary is being reused.
    #[error("symbols list is empty but the vocabulary snapshot isn't loaded")]
    EmptySymbols,

    /// A symbol occurs more than once in the base symbols plus reserved tokens.
    #[error("duplicate symbol in symbol table: {symbol:?}")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: String,
    },

    /// A manifest line has fewer fields than the configured positions need.
    #[error("manifest line {line}: found {found} fields, need at least {required}")]
    MalformedManifestLine {
        /// The 1-based line number.
        line: usize,

        /// The number of fields found on the line.
        found: usize,

        /// The number of fields required by the field positions.
        required: usize,
    },

    /// The vocabulary snapshot is internally inconsistent.
    #[error("corrupt vocabulary snapshot: {0}")]
    CorruptSnapshot(String),

    /// The speaker name is not in the speaker map.
    #[error("unknown speaker name: {name:?}")]
    UnknownSpeaker {
        /// The missing speaker name.
        name: String,
    },

    /// The speaker id is not in the reverse speaker map.
    #[error("unknown speaker id: {id}")]
    UnknownSpeakerId {
        /// The missing speaker id.
        id: SpeakerId,
    },

    /// The symbol is not in the symbol table.
    #[error("unknown symbol: {symbol:?}")]
    UnknownSymbol {
        /// The missing symbol.
        symbol: String,
    },

    /// The symbol id is not in the symbol table.
    #[error("unknown symbol id: {id}")]
    UnknownSymbolId {
        /// The missing symbol id.
        id: SymbolId,
    },

    /// A symbol argument was neither a string nor a list of strings.
    #[error("invalid symbol input: {0}")]
    InvalidSymbolInput(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CorpusError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        use CorpusError::*;
        match self {
            EmptySymbols | DuplicateSymbol { .. } => ErrorKind::Configuration,
            MalformedManifestLine { .. } | CorruptSnapshot(_) | Io(_) | Json(_) => ErrorKind::Io,
            UnknownSpeaker { .. }
            | UnknownSpeakerId { .. }
            | UnknownSymbol { .. }
            | UnknownSymbolId { .. } => ErrorKind::Lookup,
            InvalidSymbolInput(_) => ErrorKind::TypeValidation,
        }
    }
}

/// Result type for voxcorpus operations.
pub type CorpusResult<T> = core::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(CorpusError::EmptySymbols.kind(), ErrorKind::Configuration);
        assert_eq!(
            CorpusError::UnknownSpeakerId { id: 3 }.kind(),
            ErrorKind::Lookup
        );
        assert_eq!(
            CorpusError::InvalidSymbolInput("42".to_string()).kind(),
            ErrorKind::TypeValidation
        );

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "mapper.json");
        assert_eq!(CorpusError::from(io).kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_display() {
        let err = CorpusError::MalformedManifestLine {
            line: 4,
            found: 2,
            required: 3,
        };
        assert_eq!(
            err.to_string(),
            "manifest line 4: found 2 fields, need at least 3"
        );
    }
}
