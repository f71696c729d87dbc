//! Poisson solver: forward DFT, Green's-function scaling, backward DFT.
//!
//! Forward-transforms the density field, multiplies it in k-space by a
//! kernel, and backward-transforms the result to get the potential. The
//! kernel is not precomputed and cached, because it depends on the
//! current box width `W`, which changes every step via expansion, so
//! it is recomputed on every solve instead.
//!
//! The kernel uses the *unfolded* index triple `(i, j, k)` as the
//! wavenumber proxy, not the aliased `i' = i if i <= N_c/2 else i - N_c`
//! form a physically-motivated discrete Laplacian would use. This is a
//! known, likely numerical-correctness issue, reproduced here literally
//! rather than silently "fixed" (see DESIGN.md, "Open question:
//! Green's-function indexing").

use crate::fft::FftTransformer;
use crate::mesh::{decode_index, Mesh};
use rayon::prelude::*;
use std::f64::consts::PI;

/// Runs one forward DFT -> Green's-function scale -> backward DFT pass.
/// `mesh.density` is consumed, `mesh.k_space` and `mesh.potential` are
/// overwritten.
pub fn solve(mesh: &mut Mesh, fft: &mut FftTransformer, box_width: f64) {
    let n_c = mesh.n_c();
    let total_cells = mesh.cell_count();

    fft.forward(&mesh.density, &mut mesh.k_space);

    let slice = mesh
        .k_space
        .as_slice_mut()
        .expect("k_space buffer must be contiguous");

    // The DC bin is zeroed unconditionally, then every other index is
    // scaled by G(i,j,k).
    slice[0].re = 0.0;
    slice[0].im = 0.0;

    let w2 = box_width * box_width;
    let normalization = 8.0 * total_cells as f64;

    slice
        .par_iter_mut()
        .enumerate()
        .skip(1)
        .for_each(|(n, cell)| {
            let (i, j, k) = decode_index(n_c, n);
            let denom = (i * i + j * j + k * k) as f64;
            let g = -4.0 * PI * w2 / denom / normalization;
            *cell = *cell * g;
        });

    fft.backward(&mesh.k_space, &mut mesh.potential);
}
