//! Metrics read from an OpenType font file.
//!
//! Glyph extents come from the `hmtx` advances and the glyph bounding boxes. If the font has a MATH table,
//! its constants replace the conventional defaults of [`FontMetrics`].

use crate::dimensions::Unit;
use crate::dimensions::units::{Em, FUnit, Px, Ratio};
use crate::error::FontError;
use crate::font::{FontMetrics, GlyphMetrics};


/// The subset of the MATH constants the layout engine needs
#[derive(Debug, Clone, Copy, PartialEq)]
struct MathConstants {
    script_scale                 : f64,
    superscript_shift_up         : Unit<Em>,
    subscript_shift_down         : Unit<Em>,
    fraction_rule_thickness      : Unit<Em>,
    fraction_numerator_gap_min   : Unit<Em>,
    fraction_denominator_gap_min : Unit<Em>,
    radical_rule_thickness       : Unit<Em>,
    radical_vertical_gap         : Unit<Em>,
}


/// A wrapper around `ttf_parser::Face` implementing [`FontMetrics`]
pub struct TtfMetrics<'a> {
    face             : ::ttf_parser::Face<'a>,
    font_units_to_em : Unit<Ratio<Em, FUnit>>,
    constants        : Option<MathConstants>,
}

impl<'a> TtfMetrics<'a> {
    /// Parses the first face of a font file
    pub fn new(data : &'a [u8]) -> Result<Self, FontError> {
        let face = ::ttf_parser::Face::parse(data, 0)
            .map_err(|e| FontError::InvalidFont(e.to_string()))?;
        Self::from_face(face)
    }

    /// Creates new metrics from an already parsed face.
    /// Fails if the face declares no units per em.
    pub fn from_face(face : ::ttf_parser::Face<'a>) -> Result<Self, FontError> {
        let units_per_em = face.units_per_em();
        if units_per_em == 0 {
            return Err(FontError::InvalidFont("zero units per em".to_string()));
        }
        let font_units_to_em = Unit::<Ratio<Em, FUnit>>::new(f64::from(units_per_em).recip());
        let constants = Self::math_constants(&face, font_units_to_em);
        if constants.is_none() {
            info!("font has no MATH constants, falling back to default parameters");
        }

        Ok(Self { face, font_units_to_em, constants })
    }

    /// Returns a reference to the wrapped `ttf_parser::Face`
    pub fn face(&self) -> &::ttf_parser::Face<'a> {
        &self.face
    }

    /// Whether the font provides a MATH table with constants
    pub fn has_math_constants(&self) -> bool {
        self.constants.is_some()
    }

    fn math_constants(face : &::ttf_parser::Face<'a>, font_units_to_em : Unit<Ratio<Em, FUnit>>) -> Option<MathConstants> {
        let constants = face.tables().math?.constants?;
        let em = |v : i16| -> Unit<Em> { Unit::<FUnit>::from(v) * font_units_to_em };

        Some(MathConstants {
            script_scale                 : 0.01 * f64::from(constants.script_percent_scale_down()),
            superscript_shift_up         : em(constants.superscript_shift_up().value),
            subscript_shift_down         : em(constants.subscript_shift_down().value),
            fraction_rule_thickness      : em(constants.fraction_rule_thickness().value),
            fraction_numerator_gap_min   : em(constants.fraction_numerator_gap_min().value),
            fraction_denominator_gap_min : em(constants.fraction_denominator_gap_min().value),
            radical_rule_thickness       : em(constants.radical_rule_thickness().value),
            radical_vertical_gap         : em(constants.radical_vertical_gap().value),
        })
    }

    fn measure_codepoint(&self, codepoint : char) -> Result<(Unit<Em>, Unit<Em>, Unit<Em>), FontError> {
        let gid = self.face.glyph_index(codepoint).ok_or(FontError::MissingGlyph(codepoint))?;
        let advance = self.face.glyph_hor_advance(gid).unwrap_or_default();
        let advance = Unit::<FUnit>::from(advance) * self.font_units_to_em;

        // glyphs without outline, like the space, have no bounding box
        let (height, depth) = match self.face.glyph_bounding_box(gid) {
            Some(bbox) => (
                Unit::<FUnit>::from(bbox.y_max) * self.font_units_to_em,
                - (Unit::<FUnit>::from(bbox.y_min) * self.font_units_to_em),
            ),
            None => (Unit::ZERO, Unit::ZERO),
        };
        Ok((advance, height, depth))
    }

    fn constant_or(&self, font_size : f64, pick : impl Fn(&MathConstants) -> Unit<Em>, default : Unit<Px>) -> Unit<Px> {
        match self.constants {
            Some(ref constants) => pick(constants).scaled(font_size),
            None                => default,
        }
    }
}


impl<'a> FontMetrics for TtfMetrics<'a> {
    fn measure_char(&self, glyph : &str, font_size : f64) -> Result<GlyphMetrics, FontError> {
        let mut width  = Unit::<Em>::ZERO;
        let mut height = Unit::<Em>::ZERO;
        let mut depth  = Unit::<Em>::ZERO;
        for codepoint in glyph.chars() {
            let (advance, glyph_height, glyph_depth) = self.measure_codepoint(codepoint)?;
            width += advance;
            height = height.max(glyph_height);
            depth  = depth.max(glyph_depth);
        }
        Ok(GlyphMetrics::new(
            width.scaled(font_size),
            height.scaled(font_size),
            depth.scaled(font_size),
        ))
    }

    fn script_size(&self, font_size : f64) -> f64 {
        match self.constants {
            Some(ref constants) if constants.script_scale > 0. => constants.script_scale * font_size,
            _ => 0.7 * font_size,
        }
    }

    fn script_shift_up(&self, font_size : f64) -> Unit<Px> {
        self.constant_or(font_size, |c| c.superscript_shift_up, Unit::<Em>::new(0.4).scaled(font_size))
    }

    fn script_shift_down(&self, font_size : f64) -> Unit<Px> {
        self.constant_or(font_size, |c| c.subscript_shift_down, Unit::<Em>::new(0.2).scaled(font_size))
    }

    fn fraction_rule_thickness(&self, font_size : f64) -> Unit<Px> {
        self.constant_or(font_size, |c| c.fraction_rule_thickness, Unit::<Em>::new(0.05).scaled(font_size))
    }

    fn fraction_numerator_shift(&self, font_size : f64) -> Unit<Px> {
        self.constant_or(font_size, |c| c.fraction_numerator_gap_min, Unit::<Em>::new(0.1).scaled(font_size))
    }

    fn fraction_denominator_shift(&self, font_size : f64) -> Unit<Px> {
        self.constant_or(font_size, |c| c.fraction_denominator_gap_min, Unit::<Em>::new(0.1).scaled(font_size))
    }

    fn sqrt_rule_thickness(&self, font_size : f64) -> Unit<Px> {
        self.constant_or(font_size, |c| c.radical_rule_thickness, Unit::<Em>::new(0.05).scaled(font_size))
    }

    fn sqrt_padding(&self, font_size : f64) -> Unit<Px> {
        self.constant_or(font_size, |c| c.radical_vertical_gap, Unit::<Em>::new(0.1).scaled(font_size))
    }
}
