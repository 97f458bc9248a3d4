pub mod tick;

use crate::config::Config;
use crate::stats::RunStatistics;
use crate::world::{generator, World};

/// One independent simulation: a world advanced tick by tick until the
/// tick budget runs out or the population goes extinct. Instances share
/// nothing and may run on separate threads.
#[derive(Debug)]
pub struct SimulationState {
    pub id: usize,
    pub world: World,
    pub tick: u64,
    pub initial_organisms: usize,
    pub total_deaths: u64,
}

impl SimulationState {
    pub fn new(id: usize, config: &Config) -> Result<Self, Box<dyn std::error::Error>> {
        let world = generator::generate(config)?;
        let initial_organisms = world.organism_count();
        Ok(Self {
            id,
            world,
            tick: 0,
            initial_organisms,
            total_deaths: 0,
        })
    }

    /// Wraps an already-built world; used when the caller wants full control
    /// over terrain and population.
    pub fn with_world(id: usize, world: World) -> Self {
        let initial_organisms = world.organism_count();
        Self {
            id,
            world,
            tick: 0,
            initial_organisms,
            total_deaths: 0,
        }
    }

    pub fn statistics(&self) -> RunStatistics {
        RunStatistics::compute(self.id, self.tick, self.initial_organisms, &self.world)
    }

    pub fn run(&mut self, config: &Config) -> RunStatistics {
        let log_interval = config.simulation.log_interval_ticks;

        while self.tick < config.simulation.max_ticks && self.world.organism_count() > 0 {
            self.tick(config);

            if log_interval > 0 && self.tick % log_interval == 0 {
                let population = self.world.organism_count();
                let avg_energy = if population == 0 {
                    0.0
                } else {
                    self.world.total_energy() as f64 / population as f64
                };
                log::info!(
                    "sim {} | tick {} | population {} | avg energy {:.2} | food {} | deaths {}",
                    self.id,
                    self.tick,
                    population,
                    avg_energy,
                    self.world.total_food(),
                    self.total_deaths
                );
            }
        }

        if self.world.organism_count() == 0 {
            log::warn!("sim {}: population extinct at tick {}", self.id, self.tick);
        }

        self.statistics()
    }
}
