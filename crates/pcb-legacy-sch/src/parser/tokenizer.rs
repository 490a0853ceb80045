//! Line tokenizer for the legacy schematic format
//!
//! A token is either a run of characters that are neither whitespace nor a
//! double quote, or everything between a pair of double quotes. There are no
//! escape sequences. An unterminated quote is rejected rather than guessed at.

/// One token of a schematic line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    raw: &'a str,
    quoted: bool,
}

impl<'a> Token<'a> {
    /// Token text with the surrounding quotes removed
    pub fn value(&self) -> &'a str {
        if self.quoted {
            &self.raw[1..self.raw.len() - 1]
        } else {
            self.raw
        }
    }

    /// Token text exactly as it appeared in the line, quotes included
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

/// A double quote was opened but never closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnterminatedQuote {
    /// 1-based byte column of the opening quote
    pub column: usize,
}

/// Split a single line into tokens.
///
/// Returns an empty vector for blank lines.
pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>, UnterminatedQuote> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch == '"' {
            chars.next();
            let end = chars
                .by_ref()
                .find(|&(_, c)| c == '"')
                .map(|(i, _)| i)
                .ok_or(UnterminatedQuote { column: start + 1 })?;
            tokens.push(Token {
                raw: &line[start..=end],
                quoted: true,
            });
        } else {
            let mut end = line.len();
            while let Some(&(i, c)) = chars.peek() {
                if c.is_whitespace() || c == '"' {
                    end = i;
                    break;
                }
                chars.next();
            }
            tokens.push(Token {
                raw: &line[start..end],
                quoted: false,
            });
        }
    }

    Ok(tokens)
}
