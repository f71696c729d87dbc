//! Comoving box expansion.
//!
//! A tiny pure function called once per step to mutate both the box
//! width and every particle's velocity in place, preserving comoving
//! momentum as the box grows or shrinks.

use crate::particle::ParticleGroup;

/// Scales `box_width` by `factor` and every particle's velocity by
/// `1 / factor`. `factor` is expected to be `> 0`; the caller
/// (`Simulation`) is responsible for rejecting non-positive expansion
/// factors before calling this.
pub fn expand(box_width: &mut f64, particles: &mut ParticleGroup, factor: f64) {
    *box_width *= factor;
    for p in &mut particles.particles {
        for v in &mut p.velocity {
            *v /= factor;
        }
    }
}
