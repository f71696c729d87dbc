//! Error taxonomy for the simulation core.
//!
//! A `thiserror`-derived enum with a two-tier split: configuration and
//! resource failures that prevent a run from starting at all, versus
//! I/O and transport failures encountered along the way.

use std::io;

/// Fatal failures. Advisory conditions (a contracting universe,
/// an oversized grid) are logged with `log::warn!` at construction and
/// never become a `SimError`.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Non-positive time/step/width/expansion factor, or a cell count
    /// outside `[1, i32::MAX]`. Raised at construction, before any work
    /// is done.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Mesh or FFT-plan allocation failure.
    #[error("resource allocation failed: {0}")]
    Resource(String),

    /// Unrecovered transport failure in the coordinator/peer protocol.
    #[error("worker transport failed: {0}")]
    Transport(String),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
