use std::fmt;

use bigdecimal::Zero;

use super::units::{Float, Precision};

/// Two-axis decimal vector. Both axes always exist.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Vector {
    pub x: Float,
    pub y: Float,
}

impl Vector {
    pub fn new(x: Float, y: Float) -> Vector {
        Vector { x, y }
    }

    pub fn zero() -> Vector {
        Vector::new(Float::zero(), Float::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    pub(crate) fn add(&self, other: &Vector, precision: &Precision) -> Vector {
        Vector::new(
            precision.add(&self.x, &other.x),
            precision.add(&self.y, &other.y),
        )
    }

    /// Unrounded sum. Exact addition is associative, so accumulating with it
    /// does not depend on the order of the terms.
    pub(crate) fn add_exact(&self, other: &Vector) -> Vector {
        Vector::new(&self.x + &other.x, &self.y + &other.y)
    }

    pub(crate) fn rounded(&self, precision: &Precision) -> Vector {
        Vector::new(
            precision.round(self.x.clone()),
            precision.round(self.y.clone()),
        )
    }

    pub(crate) fn sub(&self, other: &Vector, precision: &Precision) -> Vector {
        Vector::new(
            precision.sub(&self.x, &other.x),
            precision.sub(&self.y, &other.y),
        )
    }

    pub(crate) fn scale(&self, factor: &Float, precision: &Precision) -> Vector {
        Vector::new(
            precision.mul(&self.x, factor),
            precision.mul(&self.y, factor),
        )
    }

    /// Component-wise negation.
    pub(crate) fn negated(&self, precision: &Precision) -> Vector {
        Vector::new(precision.neg(&self.x), precision.neg(&self.y))
    }

    pub(crate) fn norm_squared(&self, precision: &Precision) -> Float {
        let x_squared = precision.mul(&self.x, &self.x);
        let y_squared = precision.mul(&self.y, &self.y);
        precision.add(&x_squared, &y_squared)
    }

    pub fn norm(&self, precision: &Precision) -> Float {
        precision.sqrt(&self.norm_squared(precision))
    }
}

impl Default for Vector {
    fn default() -> Self {
        Vector::zero()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{x: {}, y: {}}}", self.x, self.y)
    }
}
