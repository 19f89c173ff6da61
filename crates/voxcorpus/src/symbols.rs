//! # Symbol Table
//!
//! A [`SymbolTable`] is a dense, bijective `{ symbol <-> id }` mapping.
//!
//! Tables built for a corpus hold the caller's base symbols followed by the
//! four reserved control symbols, in [`ReservedToken::ALL`] order.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::{CorpusError, CorpusResult},
    types::{SymbolId, VcHashMap, index_to_id},
};

/// The reserved control symbols appended after the base symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedToken {
    /// Unknown symbol.
    Unk,

    /// Padding.
    Pad,

    /// End of sequence.
    Eos,

    /// Beginning of sequence.
    Bos,
}

impl ReservedToken {
    /// All reserved tokens, in table order.
    pub const ALL: [ReservedToken; 4] = [Self::Unk, Self::Pad, Self::Eos, Self::Bos];

    /// The short key name of the token (`"unk"`, `"pad"`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::Unk => "unk",
            Self::Pad => "pad",
            Self::Eos => "eos",
            Self::Bos => "bos",
        }
    }
}

/// The string values of the reserved control symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedTokens {
    /// Unknown symbol.
    pub unk: String,

    /// Padding.
    pub pad: String,

    /// End of sequence.
    pub eos: String,

    /// Beginning of sequence.
    pub bos: String,
}

impl Default for ReservedTokens {
    fn default() -> Self {
        Self {
            unk: "[UNK]".to_string(),
            pad: "[PAD]".to_string(),
            eos: "[EOS]".to_string(),
            bos: "[BOS]".to_string(),
        }
    }
}

impl ReservedTokens {
    /// Get the string value for a reserved token.
    pub fn get(
        &self,
        token: ReservedToken,
    ) -> &str {
        match token {
            ReservedToken::Unk => &self.unk,
            ReservedToken::Pad => &self.pad,
            ReservedToken::Eos => &self.eos,
            ReservedToken::Bos => &self.bos,
        }
    }

    /// Iterate the reserved token strings in table order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        ReservedToken::ALL.into_iter().map(|t| self.get(t))
    }
}

/// A symbol argument: a single symbol, or a (possibly nested) list of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolInput {
    /// A single symbol.
    One(String),

    /// A list of inputs.
    Many(Vec<SymbolInput>),
}

impl From<&str> for SymbolInput {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for SymbolInput {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<&[&str]> for SymbolInput {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|&s| s.into()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SymbolInput {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for SymbolInput {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<SymbolInput>> for SymbolInput {
    fn from(values: Vec<SymbolInput>) -> Self {
        Self::Many(values)
    }
}

impl TryFrom<&Value> for SymbolInput {
    type Error = CorpusError;

    fn try_from(value: &Value) -> CorpusResult<Self> {
        match value {
            Value::String(s) => Ok(Self::One(s.clone())),
            Value::Array(values) => Ok(Self::Many(
                values
                    .iter()
                    .map(SymbolInput::try_from)
                    .collect::<CorpusResult<_>>()?,
            )),
            other => Err(CorpusError::InvalidSymbolInput(format!(
                "a symbol must be a string or list of strings, got: {other}"
            ))),
        }
    }
}

/// Dense, bijective symbol vocabulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    symbol_to_id: VcHashMap<String, SymbolId>,

    /// Index is the symbol id.
    id_to_symbol: Vec<String>,
}

impl SymbolTable {
    /// Build a table from symbols in id order.
    ///
    /// ## Arguments
    /// * `symbols` - the symbols; the i-th symbol gets id `i`.
    ///
    /// ## Returns
    /// The table, or [`CorpusError::DuplicateSymbol`] if a symbol repeats.
    pub fn from_symbols<I, S>(symbols: I) -> CorpusResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        for symbol in symbols {
            let symbol = symbol.into();
            if table.contains(&symbol) {
                return Err(CorpusError::DuplicateSymbol { symbol });
            }
            table.push(symbol);
        }
        Ok(table)
    }

    /// Build the table for a corpus: `base` followed by the reserved tokens.
    pub fn with_reserved<S: AsRef<str>>(
        base: &[S],
        reserved: &ReservedTokens,
    ) -> CorpusResult<Self> {
        Self::from_symbols(
            base.iter()
                .map(|s| s.as_ref())
                .chain(reserved.iter())
                .map(str::to_string),
        )
    }

    /// The number of symbols.
    pub fn len(&self) -> usize {
        self.id_to_symbol.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.id_to_symbol.is_empty()
    }

    /// Check if the symbol is in the table.
    pub fn contains(
        &self,
        symbol: &str,
    ) -> bool {
        self.symbol_to_id.contains_key(symbol)
    }

    /// Look up the id of a symbol.
    pub fn lookup_id(
        &self,
        symbol: &str,
    ) -> Option<SymbolId> {
        self.symbol_to_id.get(symbol).copied()
    }

    /// Look up the symbol for an id.
    pub fn lookup_symbol(
        &self,
        id: SymbolId,
    ) -> Option<&str> {
        self.id_to_symbol.get(id as usize).map(String::as_str)
    }

    /// Look up the id of a symbol, failing with [`CorpusError::UnknownSymbol`].
    pub fn id(
        &self,
        symbol: &str,
    ) -> CorpusResult<SymbolId> {
        self.lookup_id(symbol)
            .ok_or_else(|| CorpusError::UnknownSymbol {
                symbol: symbol.to_string(),
            })
    }

    /// Look up the symbol for an id, failing with [`CorpusError::UnknownSymbolId`].
    pub fn symbol(
        &self,
        id: SymbolId,
    ) -> CorpusResult<&str> {
        self.lookup_symbol(id)
            .ok_or(CorpusError::UnknownSymbolId { id })
    }

    /// Iterate `(symbol, id)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.id_to_symbol
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_str(), index_to_id(i)))
    }

    /// Add a symbol if it is not already present.
    ///
    /// ## Returns
    /// The id of the symbol, new or existing.
    pub fn add_symbol(
        &mut self,
        symbol: &str,
    ) -> SymbolId {
        match self.lookup_id(symbol) {
            Some(id) => id,
            None => {
                let id = self.push(symbol.to_string());
                log::debug!("added symbol {symbol:?} as {id}");
                id
            }
        }
    }

    /// Add every symbol of a [`SymbolInput`], recursing into lists.
    pub fn add_input(
        &mut self,
        input: &SymbolInput,
    ) {
        match input {
            SymbolInput::One(symbol) => {
                self.add_symbol(symbol);
            }
            SymbolInput::Many(inputs) => {
                for input in inputs {
                    self.add_input(input);
                }
            }
        }
    }

    /// Map a [`SymbolInput`] to ids.
    ///
    /// A single symbol maps to a one-element sequence;
    /// list elements must be symbols, not nested lists.
    pub fn convert_input(
        &self,
        input: &SymbolInput,
    ) -> CorpusResult<Vec<SymbolId>> {
        match input {
            SymbolInput::One(symbol) => Ok(vec![self.id(symbol)?]),
            SymbolInput::Many(inputs) => inputs
                .iter()
                .map(|input| match input {
                    SymbolInput::One(symbol) => self.id(symbol),
                    SymbolInput::Many(_) => Err(CorpusError::InvalidSymbolInput(
                        "all elements of symbols must be strings".to_string(),
                    )),
                })
                .collect(),
        }
    }

    fn push(
        &mut self,
        symbol: String,
    ) -> SymbolId {
        let id = index_to_id(self.id_to_symbol.len());
        self.symbol_to_id.insert(symbol.clone(), id);
        self.id_to_symbol.push(symbol);
        id
    }
}
