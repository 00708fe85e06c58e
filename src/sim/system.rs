use bigdecimal::{Signed, Zero};
use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::sim::{
    body::{Body, DirectionConvention},
    config::SystemConfig,
    error::ConfigError,
    units::{Float, Precision},
    vector::Vector,
};

/// A pair of body indices whose collision was resolved during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Collision {
    pub first: usize,
    pub second: usize,
}

/// What happened during one call to [`SolarSystem::step`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    pub collisions: Vec<Collision>,
}

#[derive(Clone, Debug)]
pub struct SolarSystem {
    bodies: Vec<Body>,
    pairing_order: Vec<usize>,
    tick_period: Float,
    precision: Precision,
    convention: DirectionConvention,
    rng: StdRng,
    current_time: Float,
    ticks: u64,
}

impl SolarSystem {
    pub fn new(precision: Precision, tick_period: Float) -> Result<SolarSystem, ConfigError> {
        if !tick_period.is_positive() {
            return Err(ConfigError::NonPositiveTickPeriod(tick_period.to_string()));
        }
        Ok(SolarSystem {
            bodies: Vec::new(),
            pairing_order: Vec::new(),
            tick_period,
            precision,
            convention: DirectionConvention::default(),
            rng: StdRng::from_entropy(),
            current_time: Float::zero(),
            ticks: 0,
        })
    }

    pub fn from_config(config: SystemConfig) -> Result<SolarSystem, ConfigError> {
        let precision = Precision::new(config.decimal_accuracy)?;
        let tick_period = config.tick_period.to_decimal("tick period")?;
        let mut system = SolarSystem::new(precision, tick_period)?;
        if let Some(seed) = config.seed {
            system = system.with_seed(seed);
        }
        if let Some(convention) = config.direction {
            system = system.with_convention(convention);
        }
        for body_config in config.bodies {
            let body = body_config.into_body(precision)?;
            system.add_body(body)?;
        }
        debug!(
            "configured {} bodies at {} digits, tick period {}",
            system.bodies.len(),
            precision.digits(),
            system.tick_period
        );
        Ok(system)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_convention(mut self, convention: DirectionConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn add_body(&mut self, body: Body) -> Result<(), ConfigError> {
        if body.precision != self.precision {
            return Err(ConfigError::PrecisionMismatch {
                name: body.name,
                body_digits: body.precision.digits(),
                system_digits: self.precision.digits(),
            });
        }
        if self.bodies.iter().any(|b| b.name == body.name) {
            return Err(ConfigError::DuplicateName(body.name));
        }
        self.pairing_order.push(self.bodies.len());
        self.bodies.push(body);
        Ok(())
    }

    /// Bodies in insertion order, independent of the per-tick shuffle.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn tick_period(&self) -> &Float {
        &self.tick_period
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn convention(&self) -> DirectionConvention {
        self.convention
    }

    pub fn elapsed(&self) -> &Float {
        &self.current_time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn total_momentum(&self) -> Vector {
        self.bodies
            .iter()
            .fold(Vector::zero(), |sum, b| sum.add(&b.momentum(), &self.precision))
    }

    fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
        debug_assert!(i != j);
        if i < j {
            let (left, right) = bodies.split_at_mut(j);
            (&mut left[i], &mut right[0])
        } else {
            let (left, right) = bodies.split_at_mut(i);
            (&mut right[0], &mut left[j])
        }
    }

    /// Collisions are resolved as each shuffled pair is visited; accelerations
    /// are summed exactly and applied once every pair has contributed.
    pub fn step(&mut self) -> Tick {
        let mut tick = Tick::default();
        self.pairing_order.shuffle(&mut self.rng);

        let mut accelerations = vec![Vector::zero(); self.bodies.len()];
        for (n, &i) in self.pairing_order.iter().enumerate() {
            for &j in self.pairing_order[n + 1..].iter() {
                let (body1, body2) = Self::pair_mut(&mut self.bodies, i, j);
                if body1.collides_with(body2) {
                    body1.resolve_collision(body2);
                    tick.collisions.push(Collision { first: i, second: j });
                }

                let acc1 = body1.gravitational_acceleration(body2, self.convention);
                let acc2 = body2.gravitational_acceleration(body1, self.convention);
                accelerations[i] = accelerations[i].add_exact(&acc1);
                accelerations[j] = accelerations[j].add_exact(&acc2);
            }
        }

        for (body, acceleration) in self.bodies.iter_mut().zip(accelerations.iter()) {
            body.integrate(&acceleration.rounded(&self.precision), &self.tick_period);
            trace!("{} at {} moving {}", body.name, body.position, body.velocity);
        }

        self.current_time = self.precision.add(&self.current_time, &self.tick_period);
        self.ticks += 1;
        debug!(
            "tick {} done, t = {}, {} collisions",
            self.ticks,
            self.current_time,
            tick.collisions.len()
        );
        tick
    }
}
