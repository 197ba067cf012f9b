//! Alphabets
//!
//! Every permutation in the simulator is defined over the index domain `0..N`
//! of an [`Alphabet`]. The alphabet maps symbols to indices and back.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while building or querying an alphabet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("alphabet needs at least 2 symbols, got {0}")]
    TooShort(usize),

    #[error("symbol '{0}' appears more than once in the alphabet")]
    DuplicateSymbol(char),

    #[error("symbol '{symbol}' is not in alphabet \"{alphabet}\"")]
    UnknownSymbol { symbol: char, alphabet: String },

    #[error("index {index} is outside alphabet of size {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

pub type AlphabetResult<T> = Result<T, AlphabetError>;

/// Ordered sequence of N >= 2 distinct symbols
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    symbols: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from its symbols in index order
    pub fn new(symbols: &str) -> AlphabetResult<Self> {
        let symbols: Vec<char> = symbols.chars().collect();

        if symbols.len() < 2 {
            return Err(AlphabetError::TooShort(symbols.len()));
        }

        for (i, c) in symbols.iter().enumerate() {
            if symbols[..i].contains(c) {
                return Err(AlphabetError::DuplicateSymbol(*c));
            }
        }

        Ok(Self { symbols })
    }

    /// The upper-case Latin alphabet used by the historical rotor tables
    pub fn latin() -> Self {
        Self {
            symbols: ('A'..='Z').collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false: construction rejects alphabets shorter than 2
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn symbol(&self, index: usize) -> AlphabetResult<char> {
        self.symbols
            .get(index)
            .copied()
            .ok_or(AlphabetError::IndexOutOfRange {
                index,
                size: self.len(),
            })
    }

    pub fn index_of(&self, symbol: char) -> AlphabetResult<usize> {
        self.symbols
            .iter()
            .position(|&c| c == symbol)
            .ok_or_else(|| AlphabetError::UnknownSymbol {
                symbol,
                alphabet: self.to_string(),
            })
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Map every symbol of `text` to its index
    pub fn indices(&self, text: &str) -> AlphabetResult<Vec<usize>> {
        text.chars().map(|c| self.index_of(c)).collect()
    }

    /// Map indices back to a string of symbols
    pub fn text(&self, indices: &[usize]) -> AlphabetResult<String> {
        indices.iter().map(|&i| self.symbol(i)).collect()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Alphabet {
    type Error = AlphabetError;

    fn try_from(value: String) -> AlphabetResult<Self> {
        Alphabet::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> String {
        alphabet.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_indices() {
        let alphabet = Alphabet::new("abcdefgh").unwrap();

        assert_eq!(alphabet.len(), 8);
        assert_eq!(alphabet.index_of('c').unwrap(), 2);
        assert_eq!(alphabet.indices("bag").unwrap(), vec![1, 0, 6]);
        assert_eq!(alphabet.text(&[7, 4, 0]).unwrap(), "hea");
    }

    #[test]
    fn test_alphabet_rejects_duplicates_and_short() {
        assert_eq!(
            Alphabet::new("abca"),
            Err(AlphabetError::DuplicateSymbol('a'))
        );
        assert_eq!(Alphabet::new("a"), Err(AlphabetError::TooShort(1)));
    }

    #[test]
    fn test_unknown_symbol() {
        let alphabet = Alphabet::new("αβγδ").unwrap();
        assert_eq!(alphabet.index_of('γ').unwrap(), 2);
        assert!(matches!(
            alphabet.index_of('z'),
            Err(AlphabetError::UnknownSymbol { symbol: 'z', .. })
        ));
        assert!(alphabet.symbol(4).is_err());
    }

    #[test]
    fn test_latin_serde() {
        let latin = Alphabet::latin();
        assert_eq!(latin.len(), 26);

        let json = serde_json::to_string(&latin).unwrap();
        assert_eq!(json, "\"ABCDEFGHIJKLMNOPQRSTUVWXYZ\"");

        let back: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, latin);
        assert!(serde_json::from_str::<Alphabet>("\"aa\"").is_err());
    }
}
