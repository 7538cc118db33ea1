//! Glyph extents estimated from the shape class of each character.
//!
//! The figures are rough averages over common text faces, in em. They are good enough to lay out
//! formulas when no font file is at hand and, being deterministic, they make layout testable.

use crate::dimensions::Unit;
use crate::dimensions::units::Em;
use crate::error::FontError;
use crate::font::{FontMetrics, GlyphMetrics};
use crate::parser::lexer::{char_class, CharClass};


/// Extents of a single character, in em: `(width, height, depth)`
fn char_extents(c : char) -> (f64, f64, f64) {
    const X_HEIGHT   : f64 = 0.43;
    const ASCENDER   : f64 = 0.69;
    const CAP_HEIGHT : f64 = 0.68;
    const DESCENDER  : f64 = 0.2;

    match c {
        ' '                          => (0.25, 0.,       0.),
        'i' | 'j' | 'l' | 't' | 'f'  => (0.28, ASCENDER, if c == 'j' || c == 'f' { DESCENDER } else { 0. }),
        'm' | 'w'                    => (0.75, X_HEIGHT, 0.),
        'g' | 'p' | 'q' | 'y'        => (0.5,  X_HEIGHT, DESCENDER),
        'b' | 'd' | 'h' | 'k'        => (0.52, ASCENDER, 0.),
        'a' ..= 'z'                  => (0.48, X_HEIGHT, 0.),
        'M' | 'W'                    => (0.92, CAP_HEIGHT, 0.),
        'I' | 'J'                    => (0.36, CAP_HEIGHT, 0.),
        'Q'                          => (0.78, CAP_HEIGHT, 0.19),
        'A' ..= 'Z'                  => (0.7,  CAP_HEIGHT, 0.),
        '0' ..= '9'                  => (0.5,  0.66,     0.),
        '(' | ')' | '[' | ']' | '{' | '}' | '⟨' | '⟩' | '⌈' | '⌉' | '⌊' | '⌋'
                                     => (0.39, 0.75,     0.25),
        '|' | '‖'                    => (0.28, 0.75,     0.25),
        '∑' | '∏' | '∐' | '⋃' | '⋂' | '⨁' | '⨂'
                                     => (1.0,  0.75,     0.25),
        '∫' | '∬' | '∭' | '∮'        => (0.56, 0.8,      0.3),
        _ => match char_class(c) {
            CharClass::Binary      => (0.78, 0.58, 0.08),
            CharClass::Relation    => (0.78, 0.5,  0.),
            CharClass::Punctuation => (0.28, 0.12, if c == ',' || c == ';' { 0.19 } else { 0. }),
            CharClass::Other       => (0.6,  0.7,  0.),
        },
    }
}


/// A [`FontMetrics`] provider that never fails. A run of several characters is measured as the
/// concatenation of its characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxMetrics {
    /// Multiplies every width, e.g. `1.1` for a wide face
    pub width_factor : f64,
}

impl ApproxMetrics {
    /// Creates a provider with the default proportions
    pub const fn new() -> Self {
        Self { width_factor : 1.0 }
    }

    /// Sets [`ApproxMetrics::width_factor`]
    pub fn with_width_factor(self, width_factor : f64) -> Self {
        Self { width_factor }
    }

}

impl Default for ApproxMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl FontMetrics for ApproxMetrics {
    fn measure_char(&self, glyph : &str, font_size : f64) -> Result<GlyphMetrics, FontError> {
        let mut width  = 0f64;
        let mut height = 0f64;
        let mut depth  = 0f64;
        for c in glyph.chars() {
            let (w, h, d) = char_extents(c);
            width += w;
            height = height.max(h);
            depth  = depth.max(d);
        }

        Ok(GlyphMetrics::new(
            Unit::<Em>::new(width * self.width_factor).scaled(font_size),
            Unit::<Em>::new(height).scaled(font_size),
            Unit::<Em>::new(depth).scaled(font_size),
        ))
    }
}
