//! Newtonian n-body core with decimal arithmetic at a configurable precision.
//!
//! A host (typically a renderer) builds a [`sim::system::SolarSystem`] once,
//! then calls [`step`](sim::system::SolarSystem::step) once per frame and
//! reads back each body's position, radius and name.

pub mod sim;
