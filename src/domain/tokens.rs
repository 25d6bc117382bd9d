// ============================================================
// Layer 3 - Token Cursor
// ============================================================
// A CSV row is read positionally: the flat list of cell values
// is consumed one at a time, in a fixed order, by the question
// and then by each of its answers.
//
//   text, subject, image, level, a1 text, a1 image, a2 text, ...
//
// Running out of tokens is the normal way a row ends, so the
// cursor reports it as a value (Next::End) instead of an error.
//
// A `Void` token comes from the "void" placeholder of an
// attribute selector: it takes up one position and leaves the
// attribute it lands on at its default.

use std::path::PathBuf;

use super::answer::no_image;

/// Name of the attribute-selector placeholder
pub const VOID_FIELD: &str = "void";

/// One raw value pulled out of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Value(String),
    Void,
}

impl Token {
    /// Blank cells and placeholders carry no data
    pub fn is_blank(&self) -> bool {
        match self {
            Token::Value(v) => v.trim().is_empty(),
            Token::Void     => true,
        }
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::Value(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::Value(value)
    }
}

/// What the cursor yields on each step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Next<'a> {
    Value(&'a str),
    Void,
    End,
}

/// Result of loading one entity from the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// At least the first attribute was consumed
    Loaded,
    /// The cursor was already at its end; defaults untouched
    Exhausted,
}

/// Single-pass reader over a row's tokens
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens:   Vec<Token>,
    position: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, position: 0 }
    }

    /// Build a cursor straight from string values
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(values.into_iter().map(|v| Token::Value(v.into())).collect())
    }

    /// Advance one position
    pub fn next_token(&mut self) -> Next<'_> {
        let Some(token) = self.tokens.get(self.position) else {
            return Next::End;
        };
        self.position += 1;
        match token {
            Token::Value(v) => Next::Value(v.as_str()),
            Token::Void     => Next::Void,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.tokens.len()
    }
}

// ─── Casters ──────────────────────────────────────────────────────────────────

/// Empty cell means "no image"
pub fn cast_path(value: &str) -> PathBuf {
    if value.is_empty() {
        no_image()
    } else {
        PathBuf::from(value)
    }
}

/// Lenient integer parse: anything malformed becomes 0
pub fn safe_int(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

/// Truthy parse used by true/false answers
pub fn cast_bool(value: &str) -> bool {
    let v = value.trim().to_ascii_lowercase();
    !matches!(v.as_str(), "" | "0" | "false" | "f" | "no" | "n" | "off")
}
