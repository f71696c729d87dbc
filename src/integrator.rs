//! Kick-drift particle integrator.
//!
//! A particle's NGP cell is located once per step by floor-dividing its
//! position by the grid spacing, and the per-cell gradient value is
//! read straight out of a dense array at that index. The step is plain
//! semi-implicit Euler kick-drift: velocity updates from the sampled
//! acceleration, then position drifts by the new velocity, then wraps
//! into the unit box.

use crate::gradient::GradientField;
use crate::particle::ParticleGroup;
use rayon::prelude::*;

/// Advances every particle in `particles` by one step of size `dt`,
/// sampling acceleration as `-grad(potential)` at the particle's NGP
/// cell.
///
/// Velocity is kicked first using the acceleration sampled at the
/// particle's *current* cell, then position is drifted using the
/// already-updated velocity, then wrapped into `[0,1)^3`. The drift is
/// `p += v * dt` literally, with no additional box-width factor: the
/// unit-box position update is taken directly in terms of `v`.
pub fn step(particles: &mut ParticleGroup, field: &GradientField, _box_width: f64, dt: f64) {
    let n_c = field.field.shape()[0];

    particles.particles.par_iter_mut().for_each(|p| {
        let i = (p.position[0] * n_c as f64).floor() as usize % n_c;
        let j = (p.position[1] * n_c as f64).floor() as usize % n_c;
        let k = (p.position[2] * n_c as f64).floor() as usize % n_c;

        let grad = field.at(i, j, k);

        for axis in 0..3 {
            p.velocity[axis] -= grad[axis] * dt;
            p.position[axis] += p.velocity[axis] * dt;
        }

        p.wrap();
    });
}
