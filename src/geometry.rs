//! Defines geometric primitives
//! Currently only defines bbox

use crate::dimensions::Unit;

/// A generic bounding box for a 2D coordinate system, parameterized by unit type.
/// The coordinate system is the one of the painter: y grows downwards, so `y_min` is the top of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct BBox<U> {
    /// minimal x-value
    pub x_min : Unit<U>,
    /// maximal x-value
    pub x_max : Unit<U>,
    /// minimal y-value
    pub y_min : Unit<U>,
    /// maximal y-value
    pub y_max : Unit<U>,
}

impl<U> BBox<U> {
    /// Creates new bbox from coordinates of extremal points
    /// Does not check the invariant that `x_min <= x_max` and `y_min <= y_max`
    pub fn new(x_min: Unit<U>, y_min: Unit<U>, x_max: Unit<U>, y_max: Unit<U>) -> Self {
        debug_assert!(x_min <= x_max);
        debug_assert!(y_min <= y_max);
        Self { x_min, x_max, y_min, y_max }
    }

    /// Creates a bbox, given a position for top-left corner, width and height.
    /// Negative dimensions are normalized so that the invariants of [`BBox::new`] hold.
    pub fn from_dims(x : Unit<U>, y : Unit<U>, width : Unit<U>, height : Unit<U>) -> Self {
        Self {
            x_min : Unit::min(x, x + width), x_max : Unit::max(x, x + width),
            y_min : Unit::min(y, y + height), y_max : Unit::max(y, y + height),
        }
    }

    /// Translates the box by the given offsets
    pub fn translate(&self, t_x : Unit<U>, t_y : Unit<U>) -> Self {
        Self {
            x_min: self.x_min + t_x,
            x_max: self.x_max + t_x,
            y_min: self.y_min + t_y,
            y_max: self.y_max + t_y,
        }
    }

    /// Creates a bbox corresponding to a zero-width zero-height point
    pub fn single_point(x : Unit<U>, y : Unit<U>) -> Self {
        Self {
            x_min : x, x_max : x,
            y_min : y, y_max : y,
        }
    }

    /// Creates the smallest bbox containing `self` and the point with coordinates `x` and `y`
    pub fn enclose(&self, x : Unit<U>, y: Unit<U>) -> Self {
        self.union(&Self::single_point(x, y))
    }

    /// Creates the smallest bbox containing `self` and `other`
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x_min : Unit::min(self.x_min, other.x_min),
            x_max : Unit::max(self.x_max, other.x_max),
            y_min : Unit::min(self.y_min, other.y_min),
            y_max : Unit::max(self.y_max, other.y_max),
        }
    }

    /// Width of the bounding box
    pub fn width(&self) -> Unit<U> {
        self.x_max - self.x_min
    }

    /// The geometric height: the unsigned distance between the top of the box and the bottom of the box
    pub fn total_height(&self) -> Unit<U> {
        self.y_max - self.y_min
    }

    /// Checks if 2 bboxes are the same up to `epsilon` on each coordinate.
    pub fn close_to(&self, other: &Self, epsilon: f64) -> bool {
        self.x_min.approx_eq(other.x_min, epsilon) &&
        self.x_max.approx_eq(other.x_max, epsilon) &&
        self.y_min.approx_eq(other.y_min, epsilon) &&
        self.y_max.approx_eq(other.y_max, epsilon)
    }
}
