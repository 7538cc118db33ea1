//! The contract between the layout engine and whoever knows the size of glyphs.
//!
//! The layout engine never reads font files itself: it asks a [`FontMetrics`] provider for the extents of glyphs
//! and for a handful of typographic parameters. Every parameter has a conventional default, so that a provider
//! only needs to implement [`FontMetrics::measure_char`].

/// Different implementations of the [`FontMetrics`] trait, e.g. an approximate one and one based on `ttf-parser`.
#[deny(missing_docs)]
pub mod backend;

use std::sync::Arc;

use crate::dimensions::Unit;
use crate::dimensions::units::{Em, Px};
use crate::error::FontError;


/// Extents of a glyph (or of a run of glyphs measured together), in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlyphMetrics {
    /// Advance width
    pub width  : Unit<Px>,
    /// Distance from the baseline to the top of the glyph
    pub height : Unit<Px>,
    /// Distance from the baseline to the bottom of the glyph
    pub depth  : Unit<Px>,
}

impl GlyphMetrics {
    /// Creates new metrics
    pub fn new(width : Unit<Px>, height : Unit<Px>, depth : Unit<Px>) -> Self {
        Self { width, height, depth }
    }

    /// `height + depth`
    pub fn total_height(&self) -> Unit<Px> {
        self.height + self.depth
    }

    /// Multiplies every extent by `factor`
    pub fn scale(self, factor : f64) -> Self {
        Self {
            width  : self.width.scale(factor),
            height : self.height.scale(factor),
            depth  : self.depth.scale(factor),
        }
    }
}


/// Provides glyph measurements and typographic parameters. Font sizes are expressed in pixels per em.
///
/// Implementations must be cheap to call repeatedly ; caching is at the provider's discretion.
pub trait FontMetrics {
    /// Measures a glyph at the given font size. `glyph` is usually a single character but may be a short run
    /// like `sin`, in which case the run is measured as a whole.
    fn measure_char(&self, glyph : &str, font_size : f64) -> Result<GlyphMetrics, FontError>;

    /// Font size used for sub- and superscripts of a formula typeset at `font_size`
    fn script_size(&self, font_size : f64) -> f64 {
        0.7 * font_size
    }

    /// How far a superscript is raised above the baseline
    fn script_shift_up(&self, font_size : f64) -> Unit<Px> {
        Unit::<Em>::new(0.4).scaled(font_size)
    }

    /// How far a subscript is lowered below the baseline
    fn script_shift_down(&self, font_size : f64) -> Unit<Px> {
        Unit::<Em>::new(0.2).scaled(font_size)
    }

    /// Thickness of the bar of a fraction
    fn fraction_rule_thickness(&self, font_size : f64) -> Unit<Px> {
        Unit::<Em>::new(0.05).scaled(font_size)
    }

    /// Gap between the numerator and the bar
    fn fraction_numerator_shift(&self, font_size : f64) -> Unit<Px> {
        Unit::<Em>::new(0.1).scaled(font_size)
    }

    /// Gap between the bar and the denominator
    fn fraction_denominator_shift(&self, font_size : f64) -> Unit<Px> {
        Unit::<Em>::new(0.1).scaled(font_size)
    }

    /// Width of the radical sign
    fn sqrt_symbol_width(&self, font_size : f64) -> Unit<Px> {
        Unit::<Em>::new(0.6).scaled(font_size)
    }

    /// Thickness of the bar of the radical sign
    fn sqrt_rule_thickness(&self, font_size : f64) -> Unit<Px> {
        Unit::<Em>::new(0.05).scaled(font_size)
    }

    /// Space between the radicand and the radical sign
    fn sqrt_padding(&self, font_size : f64) -> Unit<Px> {
        Unit::<Em>::new(0.1).scaled(font_size)
    }
}


macro_rules! forward_font_metrics {
    ($($wrapper:ty),*) => {$(
        impl<M : FontMetrics + ?Sized> FontMetrics for $wrapper {
            fn measure_char(&self, glyph : &str, font_size : f64) -> Result<GlyphMetrics, FontError> {
                (**self).measure_char(glyph, font_size)
            }
            fn script_size(&self, font_size : f64) -> f64 {
                (**self).script_size(font_size)
            }
            fn script_shift_up(&self, font_size : f64) -> Unit<Px> {
                (**self).script_shift_up(font_size)
            }
            fn script_shift_down(&self, font_size : f64) -> Unit<Px> {
                (**self).script_shift_down(font_size)
            }
            fn fraction_rule_thickness(&self, font_size : f64) -> Unit<Px> {
                (**self).fraction_rule_thickness(font_size)
            }
            fn fraction_numerator_shift(&self, font_size : f64) -> Unit<Px> {
                (**self).fraction_numerator_shift(font_size)
            }
            fn fraction_denominator_shift(&self, font_size : f64) -> Unit<Px> {
                (**self).fraction_denominator_shift(font_size)
            }
            fn sqrt_symbol_width(&self, font_size : f64) -> Unit<Px> {
                (**self).sqrt_symbol_width(font_size)
            }
            fn sqrt_rule_thickness(&self, font_size : f64) -> Unit<Px> {
                (**self).sqrt_rule_thickness(font_size)
            }
            fn sqrt_padding(&self, font_size : f64) -> Unit<Px> {
                (**self).sqrt_padding(font_size)
            }
        }
    )*};
}

forward_font_metrics!(&M, Box<M>, Arc<M>);
