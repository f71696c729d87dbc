//! Simulation driver: owns the mesh, particles, and solvers, and
//! advances them one timestep at a time.
//!
//! A struct that bundles the solvers and mutable state, built once via
//! `new`, seeded via `init`, and advanced step by step via
//! `do_timestep`, with accessors exposing read-only views of the
//! current state. A `timestep` counter is tracked on the struct and
//! returned from `do_timestep`.

use crate::correlation::{self, Correlation};
use crate::deposit::Depositor;
use crate::error::Result;
use crate::expansion;
use crate::fft::FftTransformer;
use crate::gradient::GradientField;
use crate::mesh::Mesh;
use crate::output::DensitySink;
use crate::particle::ParticleGroup;
use crate::poisson;
use crate::settings::Settings;
use std::path::Path;

/// Every 10th step, if a snapshot sink is supplied, the driver loop
/// writes the current density field. Side-effect only: it never alters
/// simulation state.
const SNAPSHOT_INTERVAL: usize = 10;

/// Owns every piece of per-run state: the mesh, the two solver helpers
/// that need persistent scratch space (`FftTransformer`, `Depositor`),
/// the gradient field, the particle group, the current comoving box
/// width, and the step counter.
pub struct Simulation {
    settings: Settings,
    mesh: Mesh,
    fft: FftTransformer,
    depositor: Depositor,
    gradient: GradientField,
    particles: ParticleGroup,
    box_width: f64,
    timestep: usize,
}

impl Simulation {
    /// Builds a new simulation, allocating the mesh and solver scratch
    /// space once up front rather than per step. This is the single
    /// construction-time checkpoint: `settings` is validated exactly
    /// once here, so each advisory warning is logged exactly once.
    pub fn new(settings: Settings) -> Result<Simulation> {
        settings.validate()?;

        let n_c = settings.grid.cells_per_side;
        let box_width = settings.grid.box_width;
        let particles = ParticleGroup::random_uniform(
            settings.particles.number_of_particles,
            settings.particles.mass,
            settings.particles.seed,
        );

        Ok(Simulation {
            settings,
            mesh: Mesh::new(n_c),
            fft: FftTransformer::new(n_c),
            depositor: Depositor::new(n_c),
            gradient: GradientField::new(n_c),
            particles,
            box_width,
            timestep: 0,
        })
    }

    /// Replaces the particle group in place, e.g. to seed a specific
    /// initial condition instead of the uniform-random default built by
    /// `new`.
    pub fn init(&mut self, particles: ParticleGroup) {
        self.particles = particles;
    }

    pub fn particles(&self) -> &ParticleGroup {
        &self.particles
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn box_width(&self) -> f64 {
        self.box_width
    }

    pub fn timestep(&self) -> usize {
        self.timestep
    }

    /// Runs one full step: deposit, solve, gradient, kick-drift, expand.
    /// Returns the new timestep counter.
    pub fn do_timestep(&mut self) -> usize {
        self.depositor
            .deposit(&mut self.mesh, &self.particles, self.box_width);

        poisson::solve(&mut self.mesh, &mut self.fft, self.box_width);

        self.gradient.compute(&self.mesh, self.box_width);

        crate::integrator::step(
            &mut self.particles,
            &self.gradient,
            self.box_width,
            self.settings.integration.timestep,
        );

        let factor = self.settings.integration.expansion_factor;
        if factor != 1.0 {
            expansion::expand(&mut self.box_width, &mut self.particles, factor);
        }

        self.timestep += 1;
        self.timestep
    }

    /// Runs `do_timestep` until `settings.integration.number_of_steps`
    /// total steps have elapsed. `run` is parameterless except for an
    /// optional snapshot sink and output directory: when supplied,
    /// every 10th step's density field is written through the sink
    /// before the next step begins. Snapshotting is side-effect only
    /// and never alters particle or mesh state.
    pub fn run(&mut self, snapshots: Option<(&dyn DensitySink, &Path)>) -> Result<()> {
        while self.timestep < self.settings.integration.number_of_steps {
            self.do_timestep();

            if let Some((sink, dir)) = snapshots {
                if self.timestep % SNAPSHOT_INTERVAL == 0 {
                    let path = dir.join(format!("density_{:06}.txt", self.timestep));
                    sink.write_density(&self.mesh.density, self.mesh.n_c(), &path)?;
                }
            }
        }
        Ok(())
    }

    /// Estimates the two-point correlation of the current particle
    /// configuration, using `settings.correlation` if present.
    pub fn correlation(&self) -> Option<Correlation> {
        let corr = self.settings.correlation?;
        Some(correlation::estimate(&self.particles, corr.n_bins))
    }
}
