//! Configuration documents for building a [`SolarSystem`](super::system::SolarSystem).
//!
//! The loader is strict: every body needs a name, mass, radius, location and
//! velocity. Keys meant for a renderer (`au_ratio`, `frame_buffer`, ...) are
//! accepted and ignored.
//!
//! ```json
//! {
//!   "decimal_accuracy": 50,
//!   "tick_period": 60,
//!   "seed": 42,
//!   "bodies": [
//!     { "name": "earth", "mass": 5.972e24, "radius": 6.371e6,
//!       "location": { "x": 0, "y": 0 }, "velocity": { "x": 0, "y": 0 } },
//!     { "name": "moon", "mass": "7.342e22", "radius": 1.737e6,
//!       "location": { "x": 3.844e8, "y": 0 }, "velocity": { "x": 0, "y": 1022 } }
//!   ]
//! }
//! ```

use std::{fs::File, io::BufReader, path::Path, str::FromStr};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::body::{Body, BodyBuilder, DirectionConvention};
use super::error::ConfigError;
use super::units::{Float, Precision};
use super::vector::Vector;

/// A decimal value. Document numbers keep their literal text; floats built
/// in code go through their shortest decimal representation.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Number {
    pub fn to_decimal(&self, field: &str) -> Result<Float, ConfigError> {
        let invalid = |value: String| ConfigError::InvalidNumber {
            field: field.to_string(),
            value,
        };
        match self {
            Number::Integer(value) => Ok(Float::from(*value)),
            Number::Float(value) if value.is_finite() => {
                Float::from_str(&value.to_string()).map_err(|_| invalid(value.to_string()))
            }
            Number::Float(value) => Err(invalid(value.to_string())),
            Number::Text(text) => Float::from_str(text.trim()).map_err(|_| invalid(text.clone())),
        }
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => Ok(Number::Text(number.to_string())),
            Value::String(text) => Ok(Number::Text(text)),
            other => Err(serde::de::Error::custom(format!(
                "expected a number or a decimal string, got {}",
                other
            ))),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<&str> for Number {
    fn from(value: &str) -> Self {
        Number::Text(value.to_string())
    }
}

/// An `{x, y}` mapping. Any other axis name is an error.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisConfig {
    pub x: Number,
    pub y: Number,
}

impl AxisConfig {
    pub fn to_vector(&self, field: &str) -> Result<Vector, ConfigError> {
        Ok(Vector::new(
            self.x.to_decimal(&format!("{}.x", field))?,
            self.y.to_decimal(&format!("{}.y", field))?,
        ))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub mass: Number,
    pub radius: Number,
    pub location: AxisConfig,
    pub velocity: AxisConfig,
}

impl BodyConfig {
    pub fn into_body(self, precision: Precision) -> Result<Body, ConfigError> {
        let mass = self.mass.to_decimal(&format!("mass of {}", self.name))?;
        let radius = self.radius.to_decimal(&format!("radius of {}", self.name))?;
        let position = self.location.to_vector(&format!("location of {}", self.name))?;
        let velocity = self.velocity.to_vector(&format!("velocity of {}", self.name))?;
        BodyBuilder::new(self.name)
            .mass(mass)
            .radius(radius)
            .position(position)
            .velocity(velocity)
            .build(precision)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SystemConfig {
    pub decimal_accuracy: u64,
    pub tick_period: Number,
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub direction: Option<DirectionConvention>,
}

impl SystemConfig {
    pub fn from_json_str(document: &str) -> Result<SystemConfig, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<SystemConfig, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
