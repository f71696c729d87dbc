//! Particle store: positions in unit-box coordinates, velocities in
//! physical units, one shared mass for the whole group.
//!
//! There is no orientation field here: this system has no rod-like
//! degrees of freedom, just point masses. Seeded uniform sampling uses
//! `rand_chacha` for reproducible draws across runs.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A single point mass: position in `[0,1)^3`, velocity in physical
/// units (the box width `W` is carried separately by the simulation
/// state, not by the particle).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl Particle {
    pub fn new(position: [f64; 3], velocity: [f64; 3]) -> Particle {
        Particle { position, velocity }
    }

    /// Wraps `position` componentwise into `[0,1)`. `rem_euclid` always
    /// returns a non-negative result, keeping the particle in the unit
    /// box in one call instead of a repeated add/subtract loop.
    pub fn wrap(&mut self) {
        for x in &mut self.position {
            *x = x.rem_euclid(1.0);
        }
    }
}

/// Fixed-size collection of particles sharing one mass. Ordering is
/// arbitrary but fixed for the group's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleGroup {
    pub particles: Vec<Particle>,
    pub mass: f64,
}

impl ParticleGroup {
    /// Places `n` particles uniformly at random in `[0,1)^3` with zero
    /// initial velocity, using a deterministic seed: one PRNG is seeded
    /// once and every coordinate is drawn from a uniform `[0, 1)`
    /// distribution.
    pub fn random_uniform(n: usize, mass: f64, seed: u64) -> ParticleGroup {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let particles = (0..n)
            .map(|_| {
                let position = [
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                    rng.gen_range(0.0..1.0),
                ];
                Particle::new(position, [0.0, 0.0, 0.0])
            })
            .collect();

        ParticleGroup { particles, mass }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
