//! Errors in parsing
//!
//! The parser never aborts: every problem it recovers from is recorded as a [`ParseError`]
//! next to the (degraded but usable) tree, cf [`Parsed`](super::Parsed).

use std::fmt;


/// Syntax error in the formula provided (mismatching brackets, missing `\right`, unterminated environment)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    /// Human-readable description of the problem
    pub message  : String,
    /// Byte offset in the input of the token where the problem was detected
    pub position : usize,
}

impl ParseError {
    /// Creates a new error at the given byte offset
    pub fn new(message : impl Into<String>, position : usize) -> Self {
        Self { message: message.into(), position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}
