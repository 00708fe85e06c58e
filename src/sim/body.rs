use std::fmt;

use bigdecimal::{Signed, Zero};
use log::info;

use super::error::ConfigError;
use super::units::{gravitational_constant, Float, Precision};
use super::vector::Vector;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionConvention {
    /// `F * position / d`: projects onto this body's own position, not the
    /// separation. Only Newtonian when the other body is at the origin.
    #[default]
    AbsolutePosition,
    /// `F * (position - other.position) / d`
    Separation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub(crate) name: String,
    pub(crate) mass: Float,
    pub(crate) radius: Float,
    pub(crate) position: Vector,
    pub(crate) velocity: Vector,
    pub(crate) precision: Precision,
}

impl Body {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> &Float {
        &self.mass
    }

    pub fn radius(&self) -> &Float {
        &self.radius
    }

    pub fn position(&self) -> &Vector {
        &self.position
    }

    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn distance(&self, other: &Self) -> Float {
        other
            .position
            .sub(&self.position, &self.precision)
            .norm(&self.precision)
    }

    pub fn speed(&self) -> Float {
        self.velocity.norm(&self.precision)
    }

    pub fn momentum(&self) -> Vector {
        self.velocity.scale(&self.mass, &self.precision)
    }

    pub fn kinetic_energy(&self) -> Float {
        let p = &self.precision;
        let speed_squared = self.velocity.norm_squared(p);
        let twice = p.mul(&self.mass, &speed_squared);
        p.div(&twice, &Float::from(2))
    }

    /// Zero for coincident bodies. A massless body gets `-G m_other / d^2`.
    pub fn gravitational_acceleration(
        &self,
        other: &Self,
        convention: DirectionConvention,
    ) -> Vector {
        let p = &self.precision;
        let distance = self.distance(other);
        if distance.is_zero() {
            return Vector::zero();
        }

        let distance_squared = p.mul(&distance, &distance);
        let direction = match convention {
            DirectionConvention::AbsolutePosition => self.position.clone(),
            DirectionConvention::Separation => self.position.sub(&other.position, p),
        };
        let unit = Vector::new(
            p.div(&direction.x, &distance),
            p.div(&direction.y, &distance),
        );

        let attraction = p.mul(&gravitational_constant(), &other.mass);
        if self.mass.is_zero() {
            let magnitude = p.neg(&p.div(&attraction, &distance_squared));
            return unit.scale(&magnitude, p);
        }

        // F = -G m_self m_other / d^2, then a = F / m_self per axis
        let numerator = p.mul(&attraction, &self.mass);
        let force_magnitude = p.neg(&p.div(&numerator, &distance_squared));
        let force = unit.scale(&force_magnitude, p);
        Vector::new(p.div(&force.x, &self.mass), p.div(&force.y, &self.mass))
    }

    // semi-implicit Euler: velocity first, then position with the new velocity
    pub fn integrate(&mut self, acceleration: &Vector, tick_period: &Float) {
        debug_assert!(tick_period.is_positive());
        let p = self.precision;
        self.velocity = self.velocity.add(&acceleration.scale(tick_period, &p), &p);
        self.position = self.position.add(&self.velocity.scale(tick_period, &p), &p);
    }

    pub fn collides_with(&self, other: &Self) -> bool {
        let radii = self.precision.add(&self.radius, &other.radius);
        self.distance(other) < radii
    }

    // Negates both velocities; no mass-weighted exchange, no separation.
    pub fn resolve_collision(&mut self, other: &mut Self) {
        info!("collision between {} and {}", self.name, other.name);
        self.velocity = self.velocity.negated(&self.precision);
        other.velocity = other.velocity.negated(&other.precision);
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name:     {}", self.name)?;
        writeln!(f, "location: {}", self.position)?;
        write!(f, "velocity: {}", self.velocity)
    }
}

/// Unset fields default to zero.
#[derive(Clone, Debug)]
pub struct BodyBuilder {
    name: String,
    mass: Float,
    radius: Float,
    position: Vector,
    velocity: Vector,
}

impl BodyBuilder {
    pub fn new(name: impl Into<String>) -> BodyBuilder {
        BodyBuilder {
            name: name.into(),
            mass: Float::zero(),
            radius: Float::zero(),
            position: Vector::zero(),
            velocity: Vector::zero(),
        }
    }

    pub fn mass(mut self, mass: Float) -> Self {
        self.mass = mass;
        self
    }

    pub fn radius(mut self, radius: Float) -> Self {
        self.radius = radius;
        self
    }

    pub fn position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    pub fn velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn build(self, precision: Precision) -> Result<Body, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        for (field, value) in [("mass", &self.mass), ("radius", &self.radius)] {
            if value.is_negative() {
                return Err(ConfigError::Negative {
                    field: format!("{} of {}", field, self.name),
                    value: value.to_string(),
                });
            }
        }
        Ok(Body {
            name: self.name,
            mass: self.mass,
            radius: self.radius,
            position: self.position,
            velocity: self.velocity,
            precision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::ToPrimitive;
    use std::str::FromStr;

    fn decimal(value: &str) -> Float {
        Float::from_str(value).unwrap()
    }

    fn precision() -> Precision {
        Precision::new(50).unwrap()
    }

    fn body(name: &str, mass: &str, x: &str, y: &str) -> Body {
        BodyBuilder::new(name)
            .mass(decimal(mass))
            .position(Vector::new(decimal(x), decimal(y)))
            .build(precision())
            .unwrap()
    }

    #[test]
    fn builder_defaults_unset_fields_to_zero() {
        let body = BodyBuilder::new("rock").build(precision()).unwrap();
        assert!(body.mass.is_zero());
        assert!(body.radius.is_zero());
        assert!(body.position.is_zero());
        assert!(body.velocity.is_zero());
    }

    #[test]
    fn builder_rejects_invalid_attributes() {
        assert!(matches!(
            BodyBuilder::new("").build(precision()),
            Err(ConfigError::EmptyName)
        ));
        assert!(matches!(
            BodyBuilder::new("rock").mass(decimal("-1")).build(precision()),
            Err(ConfigError::Negative { .. })
        ));
        assert!(matches!(
            BodyBuilder::new("rock").radius(decimal("-0.5")).build(precision()),
            Err(ConfigError::Negative { .. })
        ));
    }

    #[test]
    fn distance_is_symmetric() {
        let values = vec!["-3", "0", "1.5", "4e8"];
        for x in values.iter() {
            for y in values.iter() {
                let body1 = body("a", "1", "0.25", "-7");
                let body2 = body("b", "1", x, y);
                println!("body2 at ({}, {})", x, y);
                assert_eq!(body1.distance(&body2), body2.distance(&body1));
            }
        }
    }

    #[test]
    fn speed_is_velocity_magnitude() {
        let mut body = body("a", "1", "0", "0");
        body.velocity = Vector::new(decimal("-6"), decimal("8"));
        assert_eq!(body.speed(), decimal("10"));
    }

    #[test]
    fn momentum_and_kinetic_energy_scale_with_mass() {
        let mut body = body("a", "4", "0", "0");
        body.velocity = Vector::new(decimal("3"), decimal("-4"));
        assert_eq!(body.momentum(), Vector::new(decimal("12"), decimal("-16")));
        assert_eq!(body.kinetic_energy(), decimal("50"));
    }

    #[test]
    fn coincident_bodies_have_zero_acceleration() {
        let body1 = body("a", "5", "2", "3");
        let body2 = body("b", "7", "2", "3");
        for convention in [
            DirectionConvention::AbsolutePosition,
            DirectionConvention::Separation,
        ] {
            assert!(body1.gravitational_acceleration(&body2, convention).is_zero());
        }
    }

    #[test]
    fn acceleration_toward_body_at_origin_follows_inverse_square() {
        let star = body("star", "2e20", "0", "0");
        let near = body("near", "1", "1000", "0");
        let far = body("far", "1", "2000", "0");

        let acc_near =
            near.gravitational_acceleration(&star, DirectionConvention::AbsolutePosition);
        let acc_far = far.gravitational_acceleration(&star, DirectionConvention::AbsolutePosition);
        println!("near: {}, far: {}", acc_near, acc_far);

        // G * 2e20 / 1000^2
        let expected = -6.67408e-11 * 2e20 / 1e6;
        let got = acc_near.x.to_f64().unwrap();
        assert!((got - expected).abs() < 1e-9 * expected.abs());
        assert!(acc_near.y.is_zero());

        let ratio = acc_near.x.to_f64().unwrap() / acc_far.x.to_f64().unwrap();
        assert!((ratio - 4.).abs() < 1e-12);
    }

    #[test]
    fn acceleration_is_independent_of_own_mass() {
        let star = body("star", "1e24", "0", "0");
        let light = body("light", "1", "3e6", "4e6");
        let heavy = body("heavy", "1e10", "3e6", "4e6");
        let massless = body("massless", "0", "3e6", "4e6");
        let a_light = light.gravitational_acceleration(&star, DirectionConvention::default());
        let a_heavy = heavy.gravitational_acceleration(&star, DirectionConvention::default());
        let a_massless = massless.gravitational_acceleration(&star, DirectionConvention::default());
        for a in [&a_heavy, &a_massless] {
            let dx = (a.x.to_f64().unwrap() - a_light.x.to_f64().unwrap()).abs();
            let dy = (a.y.to_f64().unwrap() - a_light.y.to_f64().unwrap()).abs();
            assert!(dx < 1e-30 && dy < 1e-30);
        }
        assert!(a_light.x.is_negative());
        assert!(a_light.y.is_negative());
    }

    #[test]
    fn absolute_position_convention_ignores_other_position() {
        // A body at the origin feels nothing under the historical convention.
        let centre = body("centre", "1", "0", "0");
        let other = body("other", "1e20", "100", "0");
        let literal = centre.gravitational_acceleration(&other, DirectionConvention::AbsolutePosition);
        assert!(literal.is_zero());

        let physical = centre.gravitational_acceleration(&other, DirectionConvention::Separation);
        println!("separation convention: {}", physical);
        assert!(physical.x.is_positive());
        assert!(physical.y.is_zero());
    }

    #[test]
    fn integration_updates_velocity_before_position() {
        let mut body = body("a", "1", "10", "20");
        body.velocity = Vector::new(decimal("1"), decimal("-1"));
        body.integrate(&Vector::new(decimal("2"), decimal("3")), &decimal("0.5"));

        // v = (1 + 2*0.5, -1 + 3*0.5) = (2, 0.5)
        assert_eq!(body.velocity, Vector::new(decimal("2"), decimal("0.5")));
        // x = (10 + 2*0.5, 20 + 0.5*0.5)
        assert_eq!(body.position, Vector::new(decimal("11"), decimal("20.25")));
    }

    #[test]
    fn collision_requires_strict_overlap() {
        let mut body1 = body("a", "1", "0", "0");
        let mut body2 = body("b", "1", "10", "0");
        body1.radius = decimal("4");
        body2.radius = decimal("6");
        assert!(!body1.collides_with(&body2));
        body2.radius = decimal("6.000001");
        assert!(body1.collides_with(&body2));
        assert!(body2.collides_with(&body1));
    }

    #[test]
    fn collision_negates_both_velocities() {
        let mut body1 = body("a", "1", "0", "0");
        let mut body2 = body("b", "1000", "1", "0");
        body1.radius = decimal("1");
        body2.radius = decimal("1");
        body1.velocity = Vector::new(decimal("3"), decimal("-4"));
        body2.velocity = Vector::new(decimal("-0.5"), decimal("0"));
        let position1 = body1.position.clone();
        let position2 = body2.position.clone();

        body1.resolve_collision(&mut body2);

        assert_eq!(body1.velocity, Vector::new(decimal("-3"), decimal("4")));
        assert_eq!(body2.velocity, Vector::new(decimal("0.5"), decimal("0")));
        assert_eq!(body1.position, position1);
        assert_eq!(body2.position, position2);
    }

    #[test]
    fn display_lists_name_location_and_velocity() {
        let body = body("moon", "1", "1", "2");
        let text = body.to_string();
        assert!(text.starts_with("name:     moon\n"));
        assert!(text.contains("location: {x: 1, y: 2}"));
        assert!(text.contains("velocity: {x: 0, y: 0}"));
    }
}
