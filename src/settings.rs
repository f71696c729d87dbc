//! TOML-backed run configuration.
//!
//! Reads a file into a string and `toml::from_str`s it into a
//! `#[derive(Deserialize)]` struct with `#[serde(deny_unknown_fields)]`.
//! A separate, dedicated sanity-check function rejects nonsensical
//! values before a run starts; it is called exactly once, by
//! `Simulation::new`, so a settings file can be loaded and inspected
//! without triggering its advisory warnings. The box is already defined
//! in comoving units, so there is no physical-unit rescaling stage here.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level run configuration, deserialized from a TOML settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub grid: GridSettings,
    pub particles: ParticleSettings,
    pub integration: IntegrationSettings,
    #[serde(default)]
    pub correlation: Option<CorrelationSettings>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSettings {
    /// Cells per side, `N_c`.
    pub cells_per_side: usize,
    /// Initial comoving box width, `W`.
    pub box_width: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParticleSettings {
    pub number_of_particles: usize,
    pub mass: f64,
    pub seed: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntegrationSettings {
    pub timestep: f64,
    pub number_of_steps: usize,
    /// Per-step box expansion factor, applied after each kick-drift
    /// step. `1.0` disables expansion.
    #[serde(default = "default_expansion_factor")]
    pub expansion_factor: f64,
}

fn default_expansion_factor() -> f64 {
    1.0
}

/// Correlation estimator is always run over `[0, R_MAX)`, the fixed
/// `sqrt(3)/2` half-diagonal bound; only the bin count is
/// configurable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorrelationSettings {
    #[serde(default = "default_bin_count")]
    pub n_bins: usize,
}

fn default_bin_count() -> usize {
    crate::correlation::DEFAULT_BIN_COUNT
}

impl Settings {
    /// Reads and parses a TOML settings file: read to string, parse,
    /// return. Validation happens once, at `Simulation::new`, so loading
    /// a settings file on its own never emits advisory warnings.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Rejects configurations that would make the solver meaningless
    /// (a non-positive box size, grid, or timestep) before they can
    /// propagate into the solver.
    pub fn validate(&self) -> Result<()> {
        if self.grid.cells_per_side == 0 {
            return Err(SimError::Configuration(
                "grid.cells_per_side must be greater than zero".into(),
            ));
        }
        if self.grid.cells_per_side > i32::MAX as usize {
            return Err(SimError::Configuration(format!(
                "grid.cells_per_side = {} does not fit in a 32-bit signed int",
                self.grid.cells_per_side
            )));
        }
        if self.grid.box_width <= 0.0 {
            return Err(SimError::Configuration(format!(
                "grid.box_width must be positive, got {}",
                self.grid.box_width
            )));
        }
        if self.particles.mass <= 0.0 {
            return Err(SimError::Configuration(format!(
                "particles.mass must be positive, got {}",
                self.particles.mass
            )));
        }
        if self.integration.timestep <= 0.0 {
            return Err(SimError::Configuration(format!(
                "integration.timestep must be positive, got {}",
                self.integration.timestep
            )));
        }
        if self.integration.number_of_steps == 0 {
            return Err(SimError::Configuration(
                "integration.number_of_steps must be greater than zero (t_max must be positive)"
                    .into(),
            ));
        }
        if self.integration.expansion_factor <= 0.0 {
            return Err(SimError::Configuration(format!(
                "integration.expansion_factor must be positive, got {}",
                self.integration.expansion_factor
            )));
        }
        if let Some(corr) = &self.correlation {
            if corr.n_bins == 0 {
                return Err(SimError::Configuration(
                    "correlation.n_bins must be greater than zero".into(),
                ));
            }
        }

        // Advisory only: these conditions are legal but likely a
        // mistake, so they're logged rather than rejected outright.
        if self.integration.expansion_factor < 1.0 {
            log::warn!(
                "integration.expansion_factor = {} is below 1.0; the box will contract rather \
                 than expand",
                self.integration.expansion_factor
            );
        }
        if self.grid.cells_per_side > 400 {
            log::warn!(
                "grid.cells_per_side = {} exceeds 400; this run will be extremely memory- and \
                 compute-intensive",
                self.grid.cells_per_side
            );
        }
        if self.particles.number_of_particles == 0 {
            log::warn!("particles.number_of_particles is zero; the run will deposit no mass");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Settings {
        Settings {
            grid: GridSettings {
                cells_per_side: 16,
                box_width: 10.0,
            },
            particles: ParticleSettings {
                number_of_particles: 1000,
                mass: 1.0,
                seed: 1,
            },
            integration: IntegrationSettings {
                timestep: 0.01,
                number_of_steps: 100,
                expansion_factor: 1.001,
            },
            correlation: Some(CorrelationSettings { n_bins: 20 }),
        }
    }

    #[test]
    fn well_formed_settings_validate() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn zero_box_width_is_rejected() {
        let mut s = sample();
        s.grid.box_width = 0.0;
        assert!(matches!(s.validate(), Err(SimError::Configuration(_))));
    }

    #[test]
    fn non_positive_expansion_factor_is_rejected() {
        let mut s = sample();
        s.integration.expansion_factor = 0.0;
        assert!(matches!(s.validate(), Err(SimError::Configuration(_))));
    }

    #[test]
    fn cells_per_side_above_i32_max_is_rejected() {
        let mut s = sample();
        s.grid.cells_per_side = i32::MAX as usize + 1;
        assert!(matches!(s.validate(), Err(SimError::Configuration(_))));
    }

    #[test]
    fn zero_number_of_steps_is_rejected() {
        let mut s = sample();
        s.integration.number_of_steps = 0;
        assert!(matches!(s.validate(), Err(SimError::Configuration(_))));
    }

    #[test]
    fn contracting_universe_is_advisory_not_fatal() {
        let mut s = sample();
        s.integration.expansion_factor = 0.9;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn oversized_grid_is_advisory_not_fatal() {
        let mut s = sample();
        s.grid.cells_per_side = 401;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn toml_round_trip_parses_minimal_document() {
        let doc = r#"
            [grid]
            cells_per_side = 8
            box_width = 5.0

            [particles]
            number_of_particles = 200
            mass = 1.0
            seed = 7

            [integration]
            timestep = 0.02
            number_of_steps = 50
        "#;
        let settings: Settings = toml::from_str(doc).unwrap();
        assert_eq!(settings.grid.cells_per_side, 8);
        assert_eq!(settings.integration.expansion_factor, 1.0);
        assert!(settings.correlation.is_none());
    }

    #[test]
    fn from_file_does_not_validate_so_loading_alone_never_warns_twice() {
        let mut invalid = sample();
        invalid.grid.box_width = -1.0;
        let toml_text = toml::to_string(&invalid).unwrap();

        let path = std::env::temp_dir().join("pm_nbody_core_settings_from_file_test.toml");
        fs::write(&path, toml_text).unwrap();

        // `from_file` only parses; the one validation checkpoint is
        // `Simulation::new`, so an on-disk settings file with a fatal
        // misconfiguration still loads without erroring here.
        let loaded = Settings::from_file(&path).unwrap();
        assert!(loaded.validate().is_err());

        fs::remove_file(&path).ok();
    }
}
