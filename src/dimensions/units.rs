//! Defines the units relevant to layout: font units, em and pixels.
//!
//! The conversion between [`Em`] and [`Px`] is precisely what a font size is: a font size of 16
//! means "1 em = 16 px". The conversion between [`FUnit`] and [`Em`] is specified in the font file.

// ------------------------- BASIC UNITS --------------------------------

/// Smallest virtual units that the font file can address (so every dimension in the font file is given as an integer number in FUnit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FUnit;

/// A virtual unit, bigger than [`FUnit`], conventionally corresponding to:
///
///  - width of an em-dash and an em-space character
///  - the font size
///
/// All spacing rules of the layout engine (thin, medium and thick spaces, `\quad`, etc.) are expressed in em.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Em;

/// Final surface unit. Every dimension of a laid out box is expressed in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Px;

/// Font size is expressed in px / em
pub type FontSize = Ratio<Px, Em>;

// ------------------- UNIT COMBINATORS -------------------------

/// If U is a unit and V is a unit, Ratio<U, V> is the unit U . V⁻¹
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio<U, V> {
	_numerator    : std::marker::PhantomData<U>,
	_denominator  : std::marker::PhantomData<V>,
}


impl<U, V> Ratio<U, V> {
	/// Creates new ratio unit
	pub const fn new() -> Self {
		Self {
			_numerator:   std::marker::PhantomData,
			_denominator: std::marker::PhantomData
		}
	}
}
