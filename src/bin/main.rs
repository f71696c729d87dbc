//! Entry point: loads a TOML settings file, runs the simulation to
//! completion, and writes the final density field.
//!
//! Argument parsing, output directory layout, and serialization format
//! choice are intentionally minimal: there is no `clap` CLI here, just
//! a settings path and an optional output directory as positional
//! arguments, with `env_logger::init()` called before anything else
//! runs.

use log::{error, info};
use pm_nbody_core::output::{DensitySink, PlainTextSink};
use pm_nbody_core::{Settings, Simulation};
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        error!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> pm_nbody_core::error::Result<()> {
    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| "settings.toml".to_string());
    let output_dir = args.next().map(PathBuf::from);

    info!("Loading settings from {}", settings_path);
    let settings = Settings::from_file(&settings_path)?;
    let number_of_steps = settings.integration.number_of_steps;

    let mut simulation = Simulation::new(settings)?;

    info!(
        "Running {} steps on a {}^3 grid with {} particles",
        number_of_steps,
        simulation.mesh().n_c(),
        simulation.particles().len()
    );

    let sink = PlainTextSink;
    match &output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            info!("Writing every-10th-step density snapshots to {}", dir.display());
            simulation.run(Some((&sink as &dyn DensitySink, dir.as_path())))?;
        }
        None => simulation.run(None)?,
    }
    info!("Finished at timestep {}", simulation.timestep());

    if let Some(correlation) = simulation.correlation() {
        let xi = correlation.xi(simulation.particles().len());
        info!("Correlation histogram: {:?}", xi);
    }

    let out_path: &Path = output_dir
        .as_deref()
        .unwrap_or_else(|| Path::new("."));
    let final_density_path = out_path.join("density.txt");
    sink.write_density(&simulation.mesh().density, simulation.mesh().n_c(), &final_density_path)?;
    info!("Wrote final density field to {}", final_density_path.display());

    Ok(())
}
