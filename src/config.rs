use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    pub brain: BrainConfig,
    pub organism: OrganismConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub land_probability: f64,
    pub organism_probability: f64,
    pub food_spawn_interval: u64,
    pub food_spawn_probability: f64,
    pub food_energy: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrainConfig {
    pub interneurons: usize,
    pub motor_neurons: usize,
    pub connection_probability: f64,
    pub initial_activation: f64,
    pub init_weight_min: f64,
    pub init_weight_max: f64,
    pub weight_min: f64,
    pub weight_max: f64,
    pub activation_threshold: f64,
    pub learn_depth: u32,
    pub memory_decay: f64,
    pub decay_step: f64,
    pub decay_min: f64,
    pub decay_max: f64,
    pub prune_threshold: f64,
    pub plasticity_interval: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismConfig {
    pub initial_health: i32,
    pub initial_energy: i32,
    pub overfeed_cap: i32,
    pub learning_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub runs: usize,
    pub max_ticks: u64,
    pub vital_reset_interval: u64,
    pub reality_tick: u64,
    pub log_interval_ticks: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                width: 16,
                height: 16,
                land_probability: 0.7,
                organism_probability: 0.25,
                food_spawn_interval: 30,
                food_spawn_probability: 0.1,
                food_energy: 30,
            },
            brain: BrainConfig {
                interneurons: 10,
                motor_neurons: 6,
                connection_probability: 0.2,
                initial_activation: 0.2,
                init_weight_min: -0.5,
                init_weight_max: 0.5,
                weight_min: -5.0,
                weight_max: 5.0,
                activation_threshold: 0.1,
                learn_depth: 8,
                memory_decay: 0.9,
                decay_step: 0.05,
                decay_min: 0.5,
                decay_max: 1.0,
                prune_threshold: 0.2,
                plasticity_interval: 50,
            },
            organism: OrganismConfig {
                initial_health: 100,
                initial_energy: 60,
                overfeed_cap: 100,
                learning_rate: 0.02,
            },
            simulation: SimulationConfig {
                runs: 10,
                max_ticks: 1000,
                vital_reset_interval: 100,
                reality_tick: 500,
                log_interval_ticks: 100,
            },
        }
    }
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Rejects setups the simulation cannot start with. Everything else is
    /// modeled as data at runtime, never as an error.
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err("world dimensions must be non-zero".into());
        }
        if self.brain.motor_neurons == 0 {
            return Err("brain must have at least one motor neuron".into());
        }
        if self.brain.init_weight_min >= self.brain.init_weight_max {
            return Err("init_weight_min must be below init_weight_max".into());
        }
        if self.brain.weight_min >= self.brain.weight_max {
            return Err("weight_min must be below weight_max".into());
        }
        if self.brain.decay_min > self.brain.decay_max {
            return Err("decay_min must not exceed decay_max".into());
        }
        for (name, p) in [
            ("land_probability", self.world.land_probability),
            ("organism_probability", self.world.organism_probability),
            ("food_spawn_probability", self.world.food_spawn_probability),
            ("connection_probability", self.brain.connection_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} must lie in [0, 1]", name).into());
            }
        }
        if self.simulation.runs == 0 {
            return Err("at least one simulation run is required".into());
        }
        Ok(())
    }
}
