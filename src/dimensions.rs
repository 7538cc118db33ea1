//! Types for quantities with units (em, pixels, etc.)
//!
//! This allows for compile-time checking of unit errors.
//! A function requiring an input to be in px units would for instance ask an argument of type [`Unit<Px>`].


use std::ops::{Add, Sub, Mul, AddAssign, SubAssign, Div, Neg};
use std::cmp::{PartialEq, PartialOrd};
use std::fmt::{Display, Debug};
use std::iter::Sum;

use self::units::{Em, Px, Ratio};
pub mod units;

/// A f64 value with its unit represented in the type
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit<U> {
    value : f64,
    #[serde(skip)]
    _phantom : std::marker::PhantomData<U>,
}


impl<U> PartialEq for Unit<U> {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq(&other.value)
    }
}

impl<U> PartialOrd for Unit<U> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<U> Clone for Unit<U> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<U> Copy for Unit<U> {}
impl<U> Debug for Unit<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let type_name = std::any::type_name::<U>();
        let type_name = type_name.rsplit("::").next().unwrap_or(type_name);
        write!(f, "Unit::<{}>::new({})", type_name, self.value)
    }
}

impl<U> Display for Unit<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.value, f)
    }
}

impl<U> Default for Unit<U> {
    fn default() -> Self {
        Self::ZERO
    }
}


impl<U> Unit<U> {
    /// The zero value
    pub const ZERO : Self = Self::new(0.);

    /// Creates a value with unit from a unit-less value.
    /// To be used with care: you need to manually check that the value you pass is indeed in the right dimension.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            _phantom: std::marker::PhantomData
        }
    }

    /// Is quantity equal to zero?
    pub fn is_zero(self) -> bool {
        self.value == 0.0
    }

    /// Converts a value to a unit-less value ("unsafe" since it removes information about dimensions)
    #[inline]
    pub const fn to_unitless(self) -> f64
    { self.value }

    /// Like [`Unit::to_unitless`] but explicitly asks for the dimension to avoid errors
    #[inline]
    pub fn unitless(self, _unit : U) -> f64
    { self.to_unitless() }

    /// Multiply value by a unitless value
    pub fn scale(self, scale : f64) -> Self {
        Self::new(self.value * scale)
    }

    /// Equivalent to [`f64::min`] for values with units
    pub fn min(self, other : Self) -> Self {
        Self::new(self.value.min(other.value))
    }

    /// Equivalent to [`f64::max`] for values with units
    pub fn max(self, other : Self) -> Self {
        Self::new(self.value.max(other.value))
    }

    /// Equivalent to [`f64::abs`] for values with units
    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }

    /// Checks if two quantities are equal up to `epsilon`.
    /// Layout arithmetic sums many floating-point values, so exact comparisons are rarely meaningful.
    pub fn approx_eq(self, other : Self, epsilon : f64) -> bool {
        (self.value - other.value).abs() <= epsilon
    }
}

impl Unit<Em> {
    /// Converts a length in em into pixels, given a font size in pixels per em.
    #[inline]
    pub fn scaled(self, font_size : f64) -> Unit<Px> {
        self * Unit::<Ratio<Px, Em>>::new(font_size)
    }
}

impl<U, V> Unit<Ratio<U, V>> {
    /// Inverts a ratio going from `x` (unit: U/V) to `1/x` (unit: V/U)
    #[inline]
    pub fn recip(self) -> Unit<Ratio<V, U>> {
        Unit::<Ratio<V, U>>::new(self.value.recip())
    }
}

impl<U> Add for Unit<U> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.value + rhs.value)
    }
}

impl<U> Sub for Unit<U> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.value - rhs.value)
    }
}

impl<U> Neg for Unit<U> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(- self.value)
    }
}

impl<U> AddAssign for Unit<U> {
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl<U> SubAssign for Unit<U> {
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}


impl<U, V> Mul<Unit<Ratio<U, V>>> for Unit<V> {
    type Output = Unit<U>;

    fn mul(self, rhs: Unit<Ratio<U, V>>) -> Self::Output {
        Unit::<U>::new(self.value * rhs.value)
    }
}


impl<U, V> Div<Unit<V>> for Unit<U> {
    type Output = Unit<Ratio<U, V>>;

    fn div(self, rhs: Unit<V>) -> Self::Output {
        Unit::<Ratio<U, V>>::new(self.value / rhs.value)
    }
}


impl<U> From<f64> for Unit<U> {
    fn from(x: f64) -> Self
    { Unit::new(x) }
}

impl<U> From<i16> for Unit<U> {
    fn from(x: i16) -> Self
    { Unit::new(x.into()) }
}

impl<U> From<u16> for Unit<U> {
    fn from(x: u16) -> Self
    { Unit::new(x.into()) }
}


impl<U> Sum for Unit<U> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(
            Unit::ZERO,
            |a, b| a + b
        )
    }
}
