//! Length constants for layout

use crate::dimensions::{units::{Em, Px}, Unit};

/// Fractions are laid out at this fraction of the surrounding font size
pub const FRACTION_SIZE_FACTOR : f64 = 0.8;

/// Added to the width of the wider part of a fraction, so that the bar sticks out on both sides
pub const FRACTION_EXTRA_WIDTH : Unit<Px> = Unit::<Px>::new(4.0);

/// Room kept below a radicand for the tail of the check mark
pub const SQRT_DEPTH_BUFFER : Unit<Em> = Unit::<Em>::new(0.1);

/// How far up the radical sign the bottom of the index sits, as a fraction of the sign's height
pub const SQRT_INDEX_RAISE : f64 = 0.5;

/// Width taken by `\left.`, `\right.`
pub const NULL_DELIMITER_SPACE : Unit<Em> = Unit::<Em>::new(0.1);

/// Height of the math axis above the baseline; the vertical centre of matrices and fraction-like constructs
pub const AXIS_HEIGHT : Unit<Em> = Unit::<Em>::new(0.25);

/// Horizontal room reserved for each delimiter around a matrix
pub const MATRIX_DELIMITER_ALLOWANCE : Unit<Em> = Unit::<Em>::new(0.4);

/// Space on each side of a matrix cell. With a 10pt font, this is LaTeX's `\arraycolsep` (5pt).
pub const MATRIX_CELL_PADDING : Unit<Em> = Unit::<Em>::new(0.5);

/// Space between two rows of a matrix
pub const MATRIX_ROW_SPACING : Unit<Em> = Unit::<Em>::new(0.3);

/// Gap between the content and the line in `\overline`, `\underline`
pub const LINE_GAP : Unit<Em> = Unit::<Em>::new(0.1);
