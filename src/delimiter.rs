//! Cyclic delimiter table

use crate::error::{PasteError, Result};
use crate::escape;
use crate::rune::RuneReader;

/// Name used when reporting decode failures in the delimiter list
const DELIMITER_NAME: &str = "<delimiter>";

/// An immutable, non-empty sequence of delimiter runes indexed with wraparound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    runes: Vec<char>,
}

impl Delimiters {
    /// Build the table from an already resolved (unescaped) byte string
    pub fn build(resolved: &[u8]) -> Result<Self> {
        let mut reader = RuneReader::new(DELIMITER_NAME, resolved);
        let mut runes = Vec::with_capacity(resolved.len());
        while let Some(c) = reader.read_rune()? {
            runes.push(c);
        }

        if runes.is_empty() {
            return Err(PasteError::EmptyDelimiter);
        }
        Ok(Self { runes })
    }

    /// Resolve escapes in `raw` and build the table
    pub fn parse(raw: &str) -> Result<Self> {
        Self::build(&escape::resolve(raw)?)
    }

    /// Delimiter for slot `index`, wrapping around the table
    pub fn get(&self, index: usize) -> char {
        self.runes[index % self.runes.len()]
    }

    pub fn len(&self) -> usize {
        self.runes.len()
    }

    /// Never true: an empty table cannot be built
    pub fn is_empty(&self) -> bool {
        self.runes.is_empty()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.runes
    }
}

impl Default for Delimiters {
    /// A single tab
    fn default() -> Self {
        Self { runes: vec!['\t'] }
    }
}

impl std::fmt::Display for Delimiters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text: String = self.runes.iter().collect();
        write!(f, "{}", escape::escape(text.as_bytes()))
    }
}
