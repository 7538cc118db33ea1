//! This module decides how much space surrounds a character, from its class.
//! Functions from this module for instance decide that "a + b" gets more room around "+" than "a, b" gets after ",".
use crate::dimensions::Unit;
use crate::dimensions::units::Em;
use crate::parser::lexer::{char_class, CharClass};

/// Different types of space
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Spacing {
    /// no space
    None,
    /// thin space, after punctuation
    Thin,
    /// medium space, around binary operators
    Medium,
    /// thick space, around relations
    Thick,
}

impl Spacing {
    /// Returns how much a given type of spaces measure in *em* units
    pub fn to_length(self) -> Unit<Em> {
        match self {
            Spacing::None   => Unit::<Em>::new(0.0),
            Spacing::Thin   => Unit::<Em>::new(1. / 6.),
            Spacing::Medium => Unit::<Em>::new(2. / 9.),
            Spacing::Thick  => Unit::<Em>::new(5. / 18.),
        }
    }

    /// Space that goes with a class of characters
    pub fn of_class(class : CharClass) -> Spacing {
        match class {
            CharClass::Binary      => Spacing::Medium,
            CharClass::Relation    => Spacing::Thick,
            CharClass::Punctuation => Spacing::Thin,
            CharClass::Other       => Spacing::None,
        }
    }

    /// Space that goes with the class of `c`
    pub fn of_char(c : char) -> Spacing {
        Spacing::of_class(char_class(c))
    }
}
