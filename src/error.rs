//! Defines different error types related to various phases of rendering a formula.
//!   - [`FontError`] : errors that have to do with the metrics provider (unknown glyph, unreadable font file).
//!   - [`LayoutError`] : errors during the layout phase ; currently, these can only be font errors.
//!   - [`Error`] : any error surfacing from the render entry points, including failures of the thread owning the metrics.
//!
//! Syntax errors are not part of this taxonomy: the parser always produces a usable tree and reports
//! problems as data, cf [`ParseError`](crate::parser::error::ParseError).

use std::fmt;

/// Result type for the [`LayoutError`]
pub type LayoutResult<T> = ::std::result::Result<T, LayoutError>;

/// Errors during the layout phase ; currently, these can only be font errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// a font error
    Font(FontError)
}

/// Errors raised by a [`FontMetrics`](crate::font::FontMetrics) provider
#[derive(Debug, Clone, PartialEq)]
pub enum FontError {
    /// The font does not contain a glyph for the given char.
    MissingGlyph(char),
    /// The font data could not be read.
    InvalidFont(String),
}

impl From<FontError> for LayoutError {
    fn from(e: FontError) -> Self {
        LayoutError::Font(e)
    }
}

/// A generic error type covering any error that may happen during the process.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// a layout error (including font errors)
    Layout(LayoutError),
    /// the executor owning the metrics provider could not run the job (thread gone, job panicked)
    Executor(String),
}

impl From<LayoutError> for Error {
    fn from(e: LayoutError) -> Self {
        Error::Layout(e)
    }
}

impl From<FontError> for Error {
    fn from(e: FontError) -> Self {
        Error::Layout(LayoutError::Font(e))
    }
}


impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::FontError::*;
        match *self {
            MissingGlyph(cp) =>
                write!(f, "missing glyph for codepoint '{}'", cp),
            InvalidFont(ref reason) =>
                write!(f, "invalid font: {}", reason),
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LayoutError::Font(ref e) => write!(f, "font error: {}", e),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Layout(ref e)     => write!(f, "layout error: {}", e),
            Error::Executor(ref msg) => write!(f, "metrics executor failed: {}", msg),
        }
    }
}

impl std::error::Error for FontError {}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::Font(e) => Some(e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Layout(e)   => Some(e),
            Error::Executor(_) => None,
        }
    }
}
