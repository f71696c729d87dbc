//! Particle-mesh gravity core for a periodic, expanding cosmological box.
//!
//! The crate implements one self-gravitating simulation: mass deposition
//! onto a grid, a spectral Poisson solve, a central-difference gradient,
//! a kick-drift integrator, box expansion, and a two-point correlation
//! estimator over the final configuration. Sweeping many expansion
//! factors across parallel workers is the job of an external driver;
//! `protocol` only defines the wire types such a driver needs.

pub mod correlation;
pub mod deposit;
pub mod error;
pub mod expansion;
pub mod fft;
pub mod gradient;
pub mod integrator;
pub mod mesh;
pub mod output;
pub mod particle;
pub mod protocol;
pub mod poisson;
pub mod settings;
pub mod simulation;

pub use error::SimError;
pub use particle::{Particle, ParticleGroup};
pub use settings::Settings;
pub use simulation::Simulation;
