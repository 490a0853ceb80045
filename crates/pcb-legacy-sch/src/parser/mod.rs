//! Reader for the legacy KiCad schematic text format

mod component;
mod schematic;
mod tokenizer;

pub use component::{Component, Field, CANONICAL_FIELDS, SENTINEL};
pub(crate) use component::field_key;
pub use schematic::{Layer, Marker, Schematic, Sheet, SheetProperty, Text, Wire};
pub use tokenizer::{tokenize, Token, UnterminatedQuote};

use crate::error::{Result, SchematicError};

/// Tokenize one input line, reporting quoting errors against its line number
fn tokenize_line(line_no: usize, line: &str) -> Result<Vec<Token<'_>>> {
    tokenize(line).map_err(|e| {
        SchematicError::malformed(
            line_no,
            format!("unterminated quote starting at column {}", e.column),
        )
    })
}

/// Take the `N` tokens following the record tag as a fixed-size array
fn positional<'a, const N: usize>(
    tokens: &[Token<'a>],
    line_no: usize,
    record: &str,
) -> Result<[Token<'a>; N]> {
    tokens
        .get(1..=N)
        .and_then(|values| <[Token<'a>; N]>::try_from(values).ok())
        .ok_or_else(|| {
            SchematicError::malformed(
                line_no,
                format!(
                    "`{record}` needs {N} values, found {}",
                    tokens.len().saturating_sub(1)
                ),
            )
        })
}
