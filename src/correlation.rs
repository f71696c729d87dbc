//! Two-point correlation estimator.
//!
//! Zero a set of bins, then walk every unordered particle pair and bump
//! one bin by minimum-image separation. The `O(N_p^2)` loop is
//! parallelized with `rayon`'s `fold`/`reduce`: each thread accumulates
//! into its own private `Vec<u64>` histogram, and the per-thread
//! histograms are summed at the end rather than contending on one
//! shared array.

use crate::particle::ParticleGroup;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Half the unit-box diagonal, `sqrt(3)/2`, the fixed maximum
/// separation considered. Distances are measured directly in unit-box coordinates,
/// not rescaled by the box width.
pub const R_MAX: f64 = 0.866_025_403_784_438_6;

pub const DEFAULT_BIN_COUNT: usize = 101;

/// Raw pair counts `DD(b)` binned by minimum-image separation, plus the
/// bin width they were binned at.
#[derive(Debug, Clone)]
pub struct Correlation {
    pub bin_width: f64,
    pub counts: Vec<u64>,
}

impl Correlation {
    /// `ξ(b) = DD(b) / N_rand(b) − 1`, where `N_rand(b)` is the
    /// Poisson-random pair count expected in shell `b` of a uniform
    /// field at the same particle count and density.
    ///
    /// With zero pairs total (`N_p ≤ 1`), every bin is defined as `−1`
    /// (no pairs means `DD = 0` everywhere).
    pub fn xi(&self, n_particles: usize) -> Vec<f64> {
        if n_particles < 2 {
            return vec![-1.0; self.counts.len()];
        }

        let pair_count = (n_particles * (n_particles - 1)) as f64 / 2.0;

        self.counts
            .iter()
            .enumerate()
            .map(|(b, &dd)| {
                let r_lo = b as f64 * self.bin_width;
                let r_hi = r_lo + self.bin_width;
                let shell_volume = (4.0 / 3.0) * PI * (r_hi.powi(3) - r_lo.powi(3));
                let n_rand = pair_count * shell_volume;
                dd as f64 / n_rand - 1.0
            })
            .collect()
    }
}

/// Minimum-image distance between two positions in unit-box
/// coordinates.
fn minimum_image_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let mut sum_sq = 0.0;
    for axis in 0..3 {
        let mut d = (a[axis] - b[axis]).abs();
        if d > 0.5 {
            d = 1.0 - d;
        }
        sum_sq += d * d;
    }
    sum_sq.sqrt()
}

/// Estimates the two-point correlation histogram over every unordered
/// particle pair, binning minimum-image separations into `n_bins`
/// equal-width bins spanning `[0, R_MAX)`. Pairs at or beyond `R_MAX`
/// are dropped.
pub fn estimate(particles: &ParticleGroup, n_bins: usize) -> Correlation {
    let bin_width = R_MAX / n_bins as f64;
    let n = particles.particles.len();
    let positions = &particles.particles;

    let counts = (0..n)
        .into_par_iter()
        .fold(
            || vec![0u64; n_bins],
            |mut local, i| {
                for j in (i + 1)..n {
                    let r =
                        minimum_image_distance(positions[i].position, positions[j].position);
                    if r < R_MAX {
                        let bin = (r / bin_width).floor() as usize;
                        let bin = bin.min(n_bins - 1);
                        local[bin] += 1;
                    }
                }
                local
            },
        )
        .reduce(
            || vec![0u64; n_bins],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b.iter()) {
                    *x += y;
                }
                a
            },
        );

    Correlation { bin_width, counts }
}
