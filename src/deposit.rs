//! Nearest-grid-point mass deposition.
//!
//! Zero the bins, then for every particle bump the one cell it falls
//! in. This pass runs under `rayon` with many particles potentially
//! landing in the same cell concurrently, so the accumulator is a flat
//! array of `AtomicU64` holding `f64` bit patterns (no portable atomic
//! `f64::fetch_add` exists in `std`), updated with a compare-exchange
//! retry loop rather than per-thread shadow meshes summed at the end.

use crate::mesh::Mesh;
use crate::particle::ParticleGroup;
use num_complex::Complex64;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};

fn atomic_add_f64(cell: &AtomicU64, value: f64) {
    let mut current = cell.load(Ordering::Relaxed);
    loop {
        let updated = f64::from_bits(current) + value;
        match cell.compare_exchange_weak(
            current,
            updated.to_bits(),
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return,
            Err(actual) => current = actual,
        }
    }
}

/// Owns the atomic accumulator so it is allocated once per grid size
/// instead of once per timestep.
pub struct Depositor {
    n_c: usize,
    accum: Vec<AtomicU64>,
}

impl Depositor {
    pub fn new(n_c: usize) -> Depositor {
        Depositor {
            n_c,
            accum: (0..n_c * n_c * n_c).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    /// Deposits `particles` onto `mesh.density`'s real part, scaled by
    /// `mass / (box_width/n_c)^3`. Imaginary parts are left at zero.
    pub fn deposit(&self, mesh: &mut Mesh, particles: &ParticleGroup, box_width: f64) {
        debug_assert_eq!(mesh.n_c(), self.n_c);

        for cell in &self.accum {
            cell.store(0, Ordering::Relaxed);
        }

        let n_c = self.n_c;
        let cell_volume = (box_width / n_c as f64).powi(3);
        let increment = particles.mass / cell_volume;

        particles.particles.par_iter().for_each(|p| {
            let i = (p.position[0] * n_c as f64).floor() as usize % n_c;
            let j = (p.position[1] * n_c as f64).floor() as usize % n_c;
            let k = (p.position[2] * n_c as f64).floor() as usize % n_c;
            let idx = k + n_c * (j + n_c * i);
            atomic_add_f64(&self.accum[idx], increment);
        });

        for (n, cell) in mesh.density.iter_mut().enumerate() {
            *cell = Complex64::new(f64::from_bits(self.accum[n].load(Ordering::Relaxed)), 0.0);
        }
    }
}
