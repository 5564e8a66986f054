use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 32;

/// Opaque coin symbol.
///
/// Matched exactly against stored records: no case folding, no trimming.
/// "btc" and "BTC" are different symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Validate a symbol without normalizing it.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let len = input.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        for (index, ch) in input.chars().enumerate() {
            if ch.is_whitespace() || ch.is_control() {
                return Err(ValidationError::SymbolInvalidChar { index });
            }
        }

        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_case_exactly() {
        let parsed = Symbol::parse("btc").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "btc");
        assert_ne!(parsed, Symbol::parse("BTC").expect("symbol should parse"));
    }

    #[test]
    fn rejects_empty_symbol() {
        let err = Symbol::parse("").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptySymbol));
    }

    #[test]
    fn rejects_embedded_whitespace() {
        let err = Symbol::parse("BTC USD").expect_err("must fail");
        assert!(matches!(err, ValidationError::SymbolInvalidChar { index: 3 }));
    }
}
