//! # Common Types

/// Integer id of a symbol in a [`crate::symbols::SymbolTable`].
pub type SymbolId = u32;

/// Integer id of a speaker in a [`crate::speakers::SpeakerMap`].
pub type SpeakerId = u32;

/// Type Alias for hash maps in this crate.
pub type VcHashMap<K, V> = ahash::AHashMap<K, V>;

/// Convert a dense index into a `u32` id.
///
/// Saturates at `u32::MAX`.
pub(crate) fn index_to_id(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
