//! Demonstrates the coordinator/worker wire protocol over an in-process
//! transport: one coordinator thread and `num_proc - 1` peer threads,
//! each running its own small simulation at a different expansion
//! factor and reporting back a correlation vector.
//!
//! A real sweep driver would spawn these as separate processes and use
//! a real point-to-point transport; this binary exists to exercise
//! `pm_nbody_core::protocol` end to end without depending on one.

use log::info;
use pm_nbody_core::protocol::{
    self, run_coordinator_handshake, run_peer_handshake, InProcessChannel,
};
use pm_nbody_core::settings::{
    CorrelationSettings, GridSettings, IntegrationSettings, ParticleSettings, Settings,
};
use pm_nbody_core::Simulation;

const NUM_PROC: usize = 4;
const A_MIN: f64 = 1.00;
const A_MAX: f64 = 1.06;

fn main() {
    env_logger::init();

    let step = match protocol::expansion_step(A_MIN, A_MAX, NUM_PROC) {
        Ok(step) => step,
        Err(e) => {
            log::error!("cannot start sweep: {}", e);
            std::process::exit(1);
        }
    };

    let mut handles = Vec::new();
    for rank in 1..NUM_PROC {
        let (coordinator_side, peer_side) = InProcessChannel::pair();

        handles.push(std::thread::spawn(move || {
            let a = protocol::expansion_factor_for_rank(A_MIN, step, rank);
            let correlation = run_simulation_at(a);
            run_peer_handshake(&peer_side, rank, correlation).expect("peer handshake failed");
        }));

        let correlation =
            run_coordinator_handshake(&coordinator_side, A_MIN, step).expect("coordinator handshake failed");
        info!(
            "rank {}: received correlation vector of length {}",
            rank,
            correlation.len()
        );
    }

    // Rank 0: the coordinator runs its own simulation at a = a_min.
    let own_correlation = run_simulation_at(A_MIN);
    info!(
        "rank 0: own correlation vector of length {}",
        own_correlation.len()
    );

    for handle in handles {
        handle.join().expect("peer thread panicked");
    }
}

fn run_simulation_at(expansion_factor: f64) -> Vec<f64> {
    let settings = Settings {
        grid: GridSettings {
            cells_per_side: 16,
            box_width: 10.0,
        },
        particles: ParticleSettings {
            number_of_particles: 500,
            mass: 1.0,
            seed: 1,
        },
        integration: IntegrationSettings {
            timestep: 0.01,
            number_of_steps: 10,
            expansion_factor,
        },
        correlation: Some(CorrelationSettings { n_bins: 101 }),
    };

    let mut simulation = Simulation::new(settings).expect("invalid sweep settings");
    simulation.run(None).expect("sweep run failed");

    simulation
        .correlation()
        .expect("correlation settings were provided")
        .xi(simulation.particles().len())
}
