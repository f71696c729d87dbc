//! Central-difference gradient of the potential field.
//!
//! Turns the scalar potential into a dense per-cell vector field the
//! particle loop later samples by index, computed directly in real
//! space with a periodic central difference rather than another
//! spectral pass.

use crate::mesh::Mesh;
use ndarray::Array4;
use rayon::prelude::*;

/// Dense force field: shape `(n_c, n_c, n_c, 3)`, one gradient vector
/// per cell, real part of `mesh.potential` only.
pub struct GradientField {
    n_c: usize,
    pub field: Array4<f64>,
}

impl GradientField {
    pub fn new(n_c: usize) -> GradientField {
        GradientField {
            n_c,
            field: Array4::zeros((n_c, n_c, n_c, 3)),
        }
    }

    /// Fills `self.field` with the periodic central difference of
    /// `mesh.potential`'s real part, scaled by `1 / (2 * cell_width)`.
    pub fn compute(&mut self, mesh: &Mesh, box_width: f64) {
        let n_c = self.n_c;
        debug_assert_eq!(mesh.n_c(), n_c);

        let cell_width = box_width / n_c as f64;
        let inv_two_h = 1.0 / (2.0 * cell_width);
        let potential = &mesh.potential;

        self.field
            .axis_iter_mut(ndarray::Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(i, mut plane)| {
                let ip = (i + 1) % n_c;
                let im = (i + n_c - 1) % n_c;
                for j in 0..n_c {
                    let jp = (j + 1) % n_c;
                    let jm = (j + n_c - 1) % n_c;
                    for k in 0..n_c {
                        let kp = (k + 1) % n_c;
                        let km = (k + n_c - 1) % n_c;

                        let dx = potential[[ip, j, k]].re - potential[[im, j, k]].re;
                        let dy = potential[[i, jp, k]].re - potential[[i, jm, k]].re;
                        let dz = potential[[i, j, kp]].re - potential[[i, j, km]].re;

                        plane[[j, k, 0]] = dx * inv_two_h;
                        plane[[j, k, 1]] = dy * inv_two_h;
                        plane[[j, k, 2]] = dz * inv_two_h;
                    }
                }
            });
    }

    pub fn at(&self, i: usize, j: usize, k: usize) -> [f64; 3] {
        [self.field[[i, j, k, 0]], self.field[[i, j, k, 1]], self.field[[i, j, k, 2]]]
    }
}
