//! Output sink for density-field snapshots.
//!
//! CSV/image serialization details and filesystem layout are the
//! caller's concern, so this module stops at the interface:
//! `write_density(field, n_c, path)` is modeled as a trait rather than a
//! single free function so a driver can swap in whatever on-disk format
//! it needs without this crate depending on it.

use crate::error::Result;
use ndarray::Array3;
use num_complex::Complex64;
use std::path::Path;

/// Destination for a density-field snapshot. Implementors decide the
/// on-disk format; this crate only defines the call shape and provides
/// one reference implementation ([`PlainTextSink`]) for tests and
/// demos.
pub trait DensitySink {
    fn write_density(&self, field: &Array3<Complex64>, n_c: usize, path: &Path) -> Result<()>;
}

/// Writes the real part of every cell as whitespace-separated floats,
/// one row per `(i, j)` plane, row-major, sufficient for
/// `sweep_demo` and for integration tests to read back without a
/// serialization crate dependency. Not intended as a stable or
/// efficient on-disk format.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextSink;

impl DensitySink for PlainTextSink {
    fn write_density(&self, field: &Array3<Complex64>, n_c: usize, path: &Path) -> Result<()> {
        debug_assert_eq!(field.shape(), [n_c, n_c, n_c]);

        let mut buffer = String::with_capacity(field.len() * 12);
        for i in 0..n_c {
            for j in 0..n_c {
                for k in 0..n_c {
                    if k > 0 {
                        buffer.push(' ');
                    }
                    buffer.push_str(&field[[i, j, k]].re.to_string());
                }
                buffer.push('\n');
            }
        }

        std::fs::write(path, buffer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_sink_round_trips_through_a_tempfile() {
        let n_c = 3;
        let mut field = Array3::from_elem((n_c, n_c, n_c), Complex64::new(0.0, 0.0));
        field[[1, 1, 1]] = Complex64::new(2.5, 0.0);

        let path = std::env::temp_dir().join("pm_nbody_core_density_sink_test.txt");
        let sink = PlainTextSink;
        sink.write_density(&field, n_c, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("2.5"));

        std::fs::remove_file(&path).ok();
    }
}
