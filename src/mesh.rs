//! The three complex scalar fields the PM solver operates on: density,
//! k-space, and potential, all on an `N_c^3` grid.
//!
//! One struct owns all three fields plus the grid geometry they share,
//! since the PM solver round-trips through Fourier space and density,
//! k-space, and potential are always the same shape. `ndarray`'s
//! `Array3` is row-major by default, so `mesh.density[[i, j, k]]`
//! already satisfies the `idx(i,j,k) = k + N_c*(j + N_c*i)` indexing
//! convention without any manual flattening.

use ndarray::Array3;
use num_complex::Complex64;

/// A cubic grid of side `n_c`, storing the three buffers the PM solver
/// round-trips between: density (real space), k_space (after the
/// forward transform, scaled in place by the Poisson solver), and
/// potential (after the backward transform).
///
/// Buffers are reused step to step: the depositor overwrites `density`,
/// the solver overwrites `k_space` and `potential`. Reallocating any one
/// of them independently of the others (or of `n_c`) is not supported;
/// recreate the whole `Mesh` if the grid resolution changes.
#[derive(Debug, Clone)]
pub struct Mesh {
    n_c: usize,
    pub density: Array3<Complex64>,
    pub k_space: Array3<Complex64>,
    pub potential: Array3<Complex64>,
}

impl Mesh {
    pub fn new(n_c: usize) -> Mesh {
        let shape = (n_c, n_c, n_c);
        Mesh {
            n_c,
            density: Array3::from_elem(shape, Complex64::new(0.0, 0.0)),
            k_space: Array3::from_elem(shape, Complex64::new(0.0, 0.0)),
            potential: Array3::from_elem(shape, Complex64::new(0.0, 0.0)),
        }
    }

    pub fn n_c(&self) -> usize {
        self.n_c
    }

    /// Total number of cells, `N_c^3`.
    pub fn cell_count(&self) -> usize {
        self.n_c * self.n_c * self.n_c
    }

    /// Decodes a linear index `n` (as produced by iterating a row-major
    /// `(N_c, N_c, N_c)` array) back into its `(i, j, k)` grid
    /// coordinates.
    pub fn decode(&self, n: usize) -> (usize, usize, usize) {
        decode_index(self.n_c, n)
    }
}

/// Free-standing form of [`Mesh::decode`], usable while a `Mesh`'s
/// buffer is already borrowed mutably (e.g. by `poisson::solve`, which
/// holds `&mut [Complex64]` on `k_space` while decoding indices).
pub fn decode_index(n_c: usize, n: usize) -> (usize, usize, usize) {
    let k = n % n_c;
    let j = (n / n_c) % n_c;
    let i = n / (n_c * n_c);
    (i, j, k)
}
