//! 3-D complex-to-complex DFT, forward (density -> k-space) and backward
//! (k-space -> potential), built from three passes of a 1-D FFT plan
//! applied along each axis in turn.
//!
//! Plans are pinned to specific buffer addresses in classic FFTW-style
//! wrappers: "plans are tied to specific buffer addresses; buffers live
//! exactly as long as the plans". `rustfft`'s plans are buffer-agnostic
//! scratch-free transforms instead, so the same discipline is realized
//! here by having `FftTransformer` own both the plan *and* its one
//! scratch buffer, sized once at construction and never reallocated or
//! exposed: every lane of the mesh is staged through that one buffer,
//! processed, and copied back. `FftTransformer` is built once per grid
//! size and lives exactly as long as the `Simulation` that owns it.
//!
//! Both directions are unnormalized, matching FFTW's convention: a
//! forward and backward round trip scales the input by the number of
//! elements. The Poisson solver relies on this and folds the
//! `1/(8*N_c^3)` round-trip normalization into its Green's-function
//! factor rather than having the FFT normalize itself.

use ndarray::{Array3, Axis};
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

pub struct FftTransformer {
    n: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl FftTransformer {
    /// Builds forward and inverse plans for a cubic grid of side `n`.
    pub fn new(n: usize) -> FftTransformer {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(n);
        let inverse = planner.plan_fft_inverse(n);
        FftTransformer {
            n,
            forward,
            inverse,
            scratch: vec![Complex64::new(0.0, 0.0); n],
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    fn transform_axis(&mut self, field: &mut Array3<Complex64>, axis: Axis, forward: bool) {
        let fft = if forward {
            Arc::clone(&self.forward)
        } else {
            Arc::clone(&self.inverse)
        };

        for mut lane in field.lanes_mut(axis) {
            for (dst, src) in self.scratch.iter_mut().zip(lane.iter()) {
                *dst = *src;
            }
            fft.process(&mut self.scratch);
            for (dst, src) in lane.iter_mut().zip(self.scratch.iter()) {
                *dst = *src;
            }
        }
    }

    /// Forward 3-D DFT: copies `density` into `k_space` and transforms
    /// it in place, axis by axis.
    pub fn forward(&mut self, density: &Array3<Complex64>, k_space: &mut Array3<Complex64>) {
        k_space.assign(density);
        self.transform_axis(k_space, Axis(0), true);
        self.transform_axis(k_space, Axis(1), true);
        self.transform_axis(k_space, Axis(2), true);
    }

    /// Backward 3-D DFT: copies `k_space` into `potential` and
    /// transforms it in place, axis by axis. Unnormalized, see above.
    pub fn backward(&mut self, k_space: &Array3<Complex64>, potential: &mut Array3<Complex64>) {
        potential.assign(k_space);
        self.transform_axis(potential, Axis(0), false);
        self.transform_axis(potential, Axis(1), false);
        self.transform_axis(potential, Axis(2), false);
    }
}
