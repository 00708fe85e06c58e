use std::num::NonZeroU64;

use bigdecimal::{BigDecimal, Context, RoundingMode, Zero};

use super::error::ConfigError;

pub type Float = BigDecimal;

// 6.67408e-11 m^3 kg^-1 s^-2
pub fn gravitational_constant() -> Float {
    BigDecimal::new(667_408.into(), 16)
}

// 1.495978707e11 m, only meaningful to a renderer mapping metres to pixels.
pub fn astronomical_unit() -> Float {
    BigDecimal::new(1_495_978_707.into(), -2)
}

/// Significant digits kept by every computed result, rounded half-even.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Precision {
    digits: NonZeroU64,
}

impl Precision {
    pub fn new(digits: u64) -> Result<Precision, ConfigError> {
        NonZeroU64::new(digits)
            .map(|digits| Precision { digits })
            .ok_or(ConfigError::NonPositivePrecision)
    }

    pub fn digits(&self) -> u64 {
        self.digits.get()
    }

    fn context(&self) -> Context {
        Context::new(self.digits, RoundingMode::HalfEven)
    }

    pub fn round(&self, value: Float) -> Float {
        value.with_precision_round(self.digits, RoundingMode::HalfEven)
    }

    pub fn add(&self, lhs: &Float, rhs: &Float) -> Float {
        self.round(lhs + rhs)
    }

    pub fn sub(&self, lhs: &Float, rhs: &Float) -> Float {
        self.round(lhs - rhs)
    }

    pub fn mul(&self, lhs: &Float, rhs: &Float) -> Float {
        self.round(lhs * rhs)
    }

    // Plain `/` stops at bigdecimal's built-in 100 digits.
    pub fn div(&self, lhs: &Float, rhs: &Float) -> Float {
        debug_assert!(!rhs.is_zero());
        self.round(lhs * rhs.inverse_with_context(&self.context()))
    }

    pub fn neg(&self, value: &Float) -> Float {
        self.round(-value)
    }

    /// Negative input collapses to zero.
    pub fn sqrt(&self, value: &Float) -> Float {
        value
            .sqrt_with_context(&self.context())
            .unwrap_or_else(BigDecimal::zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn zero_digits_are_rejected() {
        assert!(matches!(
            Precision::new(0),
            Err(ConfigError::NonPositivePrecision)
        ));
    }

    #[test]
    fn results_are_rounded_to_significant_digits() {
        let precision = Precision::new(5).unwrap();
        let third = precision.div(&BigDecimal::from(1), &BigDecimal::from(3));
        println!("1/3 at 5 digits: {}", third);
        assert_eq!(third, BigDecimal::from_str("0.33333").unwrap());

        let product = precision.mul(
            &BigDecimal::from_str("123.456").unwrap(),
            &BigDecimal::from(1000),
        );
        assert_eq!(product, BigDecimal::from_str("123460").unwrap());
    }

    #[test]
    fn division_keeps_digits_beyond_one_hundred() {
        let precision = Precision::new(150).unwrap();
        let third = precision.div(&BigDecimal::from(1), &BigDecimal::from(3));
        let expected = BigDecimal::from_str(&format!("0.{}", "3".repeat(150))).unwrap();
        println!("1/3 at 150 digits: {}", third);
        assert_eq!(third, expected);

        let root = precision.sqrt(&BigDecimal::from(2));
        let squared = precision.mul(&root, &root);
        let error = (squared - BigDecimal::from(2)).abs();
        assert!(error < BigDecimal::from_str("1e-140").unwrap());
    }

    #[test]
    fn sqrt_of_perfect_square_is_exact() {
        let precision = Precision::new(50).unwrap();
        let root = precision.sqrt(&BigDecimal::from(144));
        assert_eq!(root, BigDecimal::from(12));
        assert_eq!(precision.sqrt(&BigDecimal::zero()), BigDecimal::zero());
    }

    #[test]
    fn constants_have_expected_values() {
        assert_eq!(
            gravitational_constant(),
            BigDecimal::from_str("6.67408e-11").unwrap()
        );
        assert_eq!(
            astronomical_unit(),
            BigDecimal::from_str("149597870700").unwrap()
        );
    }
}
