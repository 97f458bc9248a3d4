use crate::world::World;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one simulation run. `total_energy` sums the energy of the
/// survivors, which is the closest observable proxy for food consumed over
/// the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    pub simulation_id: usize,
    pub ticks: u64,
    pub initial_organisms: usize,
    pub final_organisms: usize,
    pub total_energy: i64,
    pub average_energy: f64,
    pub survival_rate: f64,
}

impl RunStatistics {
    pub fn compute(simulation_id: usize, ticks: u64, initial_organisms: usize, world: &World) -> Self {
        let final_organisms = world.organism_count();
        let total_energy = world.total_energy();

        let average_energy = if final_organisms == 0 {
            0.0
        } else {
            total_energy as f64 / final_organisms as f64
        };
        let survival_rate = if initial_organisms == 0 {
            0.0
        } else {
            final_organisms as f64 / initial_organisms as f64
        };

        Self {
            simulation_id,
            ticks,
            initial_organisms,
            final_organisms,
            total_energy,
            average_energy,
            survival_rate,
        }
    }
}

/// Roll-up across a batch of independent runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub simulations: usize,
    pub total_ticks: u64,
    pub total_initial_organisms: usize,
    pub total_final_organisms: usize,
    pub total_energy: i64,
    pub average_energy: f64,
    pub average_survival_rate: f64,
    pub generated_at: DateTime<Utc>,
}

impl AggregateStatistics {
    pub fn compute(runs: &[RunStatistics]) -> Self {
        if runs.is_empty() {
            return Self {
                simulations: 0,
                total_ticks: 0,
                total_initial_organisms: 0,
                total_final_organisms: 0,
                total_energy: 0,
                average_energy: 0.0,
                average_survival_rate: 0.0,
                generated_at: Utc::now(),
            };
        }

        let total_ticks = runs.iter().map(|r| r.ticks).sum();
        let total_initial_organisms = runs.iter().map(|r| r.initial_organisms).sum();
        let total_final_organisms = runs.iter().map(|r| r.final_organisms).sum();
        let total_energy = runs.iter().map(|r| r.total_energy).sum();
        let average_energy =
            runs.iter().map(|r| r.average_energy).sum::<f64>() / runs.len() as f64;
        let average_survival_rate =
            runs.iter().map(|r| r.survival_rate).sum::<f64>() / runs.len() as f64;

        Self {
            simulations: runs.len(),
            total_ticks,
            total_initial_organisms,
            total_final_organisms,
            total_energy,
            average_energy,
            average_survival_rate,
            generated_at: Utc::now(),
        }
    }
}
