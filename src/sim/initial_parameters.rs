use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError};

use super::config::{AxisConfig, BodyConfig, Number, SystemConfig};

/// Parameters for a randomly scattered system: one star at the origin and
/// `body_count` satellites with normally distributed positions and
/// velocities. All values are in SI units.
#[derive(Clone, Debug)]
pub struct InitialParameters {
    pub body_count: u32,
    pub star_mass: f64,
    pub total_satellite_mass: f64,
    pub star_radius: f64,
    pub body_radius: f64,
    pub position_variance: f64,
    pub velocity_variance: f64,
    pub tick_period: f64,
    pub decimal_accuracy: u64,
}

impl Default for InitialParameters {
    fn default() -> Self {
        Self {
            body_count: 8,
            star_mass: 1.989e30,
            total_satellite_mass: 2.7e27,
            star_radius: 6.957e8,
            body_radius: 6.4e6,
            position_variance: 1.5e11,
            velocity_variance: 3e4,
            tick_period: 3600.,
            decimal_accuracy: 40,
        }
    }
}

impl InitialParameters {
    fn random_axes(
        distribution: &Normal<f64>,
        rng: &mut StdRng,
    ) -> AxisConfig {
        AxisConfig {
            x: Number::Float(distribution.sample(rng)),
            y: Number::Float(distribution.sample(rng)),
        }
    }

    /// Same seed, same system.
    pub fn scatter(&self, seed: u64) -> Result<SystemConfig, NormalError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions = Normal::new(0., self.position_variance)?;
        let velocities = Normal::new(0., self.velocity_variance)?;

        let mut bodies = vec![BodyConfig {
            name: String::from("star"),
            mass: Number::Float(self.star_mass),
            radius: Number::Float(self.star_radius),
            location: AxisConfig {
                x: Number::Integer(0),
                y: Number::Integer(0),
            },
            velocity: AxisConfig {
                x: Number::Integer(0),
                y: Number::Integer(0),
            },
        }];
        for i in 0..self.body_count {
            let mass = self.total_satellite_mass / self.body_count as f64;
            bodies.push(BodyConfig {
                name: format!("body-{}", i + 1),
                mass: Number::Float(mass),
                radius: Number::Float(self.body_radius),
                location: Self::random_axes(&positions, &mut rng),
                velocity: Self::random_axes(&velocities, &mut rng),
            });
        }

        Ok(SystemConfig {
            decimal_accuracy: self.decimal_accuracy,
            tick_period: Number::Float(self.tick_period),
            bodies,
            seed: Some(seed),
            direction: None,
        })
    }
}
