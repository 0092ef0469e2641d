//! Symbol and word types for automata transitions.

use std::fmt;

/// An alphabet symbol, one byte.
pub type Symbol = u8;

/// A finite sequence of symbols.
pub type Word = Vec<Symbol>;

/// Formats a symbol as a quoted character when printable, as hex otherwise.
#[derive(Debug, Clone, Copy)]
pub struct DisplaySymbol(pub Symbol);

impl fmt::Display for DisplaySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ascii_graphic() {
            write!(f, "'{}'", self.0 as char)
        } else {
            write!(f, "{:#04x}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_symbol() {
        assert_eq!(DisplaySymbol(b'e').to_string(), "'e'");
        assert_eq!(DisplaySymbol(0x00).to_string(), "0x00");
        assert_eq!(DisplaySymbol(b' ').to_string(), "0x20");
    }
}
