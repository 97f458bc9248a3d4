use super::SimulationState;
use crate::config::Config;

impl SimulationState {
    /// Advances the world by one tick: food respawn and vital resets on
    /// their cadences, then every occupied tile from a stable row-major
    /// snapshot runs its occupant's full sense -> decide -> act -> age ->
    /// learn -> move cycle before the next occupant starts.
    pub fn tick(&mut self, config: &Config) {
        let sim = &config.simulation;

        if self.tick > 0
            && config.world.food_spawn_interval > 0
            && self.tick % config.world.food_spawn_interval == 0
        {
            self.world.respawn_food(
                config.world.food_spawn_probability,
                config.world.food_energy,
            );
        }

        // Training phase: vitals snap back periodically so brains can learn
        // without the population collapsing. At the reality tick everyone is
        // restored once; from then on starvation is permanent.
        let training = self.tick < sim.reality_tick;
        let periodic_reset = training
            && sim.vital_reset_interval > 0
            && self.tick > 0
            && self.tick % sim.vital_reset_interval == 0;
        let reality_reset = sim.reality_tick > 0 && self.tick == sim.reality_tick;
        if periodic_reset || reality_reset {
            let organism_config = &config.organism;
            self.world
                .for_each_organism_mut(|o| o.reset_vitals(organism_config));
        }

        for (x, y, id) in self.world.occupied_tiles() {
            // The snapshot pins this tick's processing order; if the occupant
            // changed since (died, or someone moved in), skip the tile.
            match self.world.organism_at(x, y) {
                Some(organism) if organism.id == id => {}
                _ => continue,
            }
            let Some(mut organism) = self.world.take_organism(x, y) else {
                continue;
            };

            let sensory_data = organism.sense(&self.world, x, y);
            organism.brain.process_input(&sensory_data);
            let action = organism.brain.trigger_single_action();

            // Idle ticks are recorded too; a stalled brain is exactly what
            // the diagnostic is there to show.
            if self.tick >= sim.reality_tick {
                organism.record_history(
                    self.tick,
                    format!(
                        "health={} energy={} action={:?} food_here={}",
                        organism.health,
                        organism.energy,
                        action,
                        self.world.tile(x, y).has_food()
                    ),
                );
            }

            let mut reward = 0.0;
            let mut staged = None;
            if let Some(action) = action {
                let (r, s) =
                    organism.execute(action, &mut self.world, x, y, config.organism.overfeed_cap);
                reward = r;
                staged = s;
            }

            organism.time_goes_on();

            // The organism is off the grid for the duration of its turn, so
            // dropping it here clears whichever tile would have held it.
            if !organism.is_alive() {
                self.total_deaths += 1;
                continue;
            }

            organism
                .brain
                .adjust_weights_based_on_reward(reward, organism.learning_rate);

            if config.brain.plasticity_interval > 0
                && self.tick > 0
                && self.tick % config.brain.plasticity_interval == 0
            {
                let pruned = organism
                    .brain
                    .prune_weak_connections(config.brain.prune_threshold);
                organism.brain.grow_random_connections(pruned);
            }

            let organism = match staged {
                Some((nx, ny)) => match self.world.place_organism(nx, ny, organism) {
                    Ok(()) => continue,
                    // Destination filled up since the action was chosen; the
                    // move is dropped and the organism stays put.
                    Err(organism) => organism,
                },
                None => organism,
            };
            // The origin was vacated at take time and nobody else has run
            // since, so going back cannot fail.
            let _ = self.world.place_organism(x, y, organism);
        }

        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::{Brain, BrainParams};
    use crate::organism::action::{Action, Direction};
    use crate::organism::Organism;
    use crate::world::tile::{Food, Terrain};
    use crate::world::World;

    /// Config with food, resets and plasticity cadences disabled so tests
    /// observe the organism cycle in isolation.
    fn bare_config() -> Config {
        let mut config = Config::default();
        config.world.food_spawn_interval = 0;
        config.world.food_spawn_probability = 0.0;
        config.simulation.vital_reset_interval = 0;
        config.simulation.reality_tick = 0;
        config
    }

    /// A brain whose single motor neuron has no inputs and a fixed
    /// activation: either permanently silent (0.0) or permanently firing.
    fn fixed_brain(action: Action, activation: f64) -> Brain {
        let mut brain = Brain::new(BrainParams {
            initial_activation: activation,
            ..BrainParams::default()
        });
        brain.add_sensory(crate::organism::sense::Sense::Hunger);
        brain.add_motor(action);
        brain
    }

    fn organism_with(id: u64, brain: Brain, energy: i32, health: i32) -> Organism {
        let config = Config::default();
        let mut organism = Organism::new(id, brain, &config.organism);
        organism.energy = energy;
        organism.health = health;
        organism
    }

    #[test]
    fn test_idle_organism_starves_on_schedule() {
        // Single organism, energy 5, no food anywhere: energy hits 0 after
        // five ticks, then health drains by one per tick until death.
        let config = bare_config();
        let mut world = World::new(3, 3, Terrain::Land);
        let organism = organism_with(1, fixed_brain(Action::Eat, 0.0), 5, 2);
        world.place_organism(1, 1, organism).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        for _ in 0..5 {
            sim.tick(&config);
        }
        let survivor = sim.world.organism_at(1, 1).unwrap();
        assert_eq!(survivor.energy, 0);
        assert_eq!(survivor.health, 1);

        sim.tick(&config);
        assert_eq!(sim.world.organism_count(), 0);
        assert!(sim.world.occupied_tiles().is_empty());
        assert_eq!(sim.total_deaths, 1);
    }

    #[test]
    fn test_silent_motor_neuron_never_acts() {
        // A motor neuron with no incoming connections and zero activation
        // stays below threshold forever: the organism idles, losing exactly
        // one energy per tick, with food right under it.
        let config = bare_config();
        let mut world = World::new(3, 3, Terrain::Land);
        world.tile_mut(1, 1).food = Some(Food { energy: 30 });
        let organism = organism_with(1, fixed_brain(Action::Eat, 0.0), 10, 100);
        world.place_organism(1, 1, organism).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        for expected in (0..10).rev() {
            sim.tick(&config);
            let organism = sim.world.organism_at(1, 1).unwrap();
            assert_eq!(organism.energy, expected);
            assert_eq!(organism.age as i32, 10 - expected);
        }
        // The food was never touched.
        assert!(sim.world.tile(1, 1).has_food());
    }

    #[test]
    fn test_firing_motor_neuron_eats_the_food() {
        let config = bare_config();
        let mut world = World::new(3, 3, Terrain::Land);
        world.tile_mut(1, 1).food = Some(Food { energy: 30 });
        let organism = organism_with(1, fixed_brain(Action::Eat, 5.0), 10, 100);
        world.place_organism(1, 1, organism).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        sim.tick(&config);
        let organism = sim.world.organism_at(1, 1).unwrap();
        // +30 from the meal, -1 from aging.
        assert_eq!(organism.energy, 39);
        assert!(!sim.world.tile(1, 1).has_food());
    }

    #[test]
    fn test_contested_destination_goes_to_the_first_mover() {
        let config = bare_config();
        let mut world = World::new(4, 1, Terrain::Land);
        let a = organism_with(1, fixed_brain(Action::Move(Direction::Right), 5.0), 50, 100);
        let b = organism_with(2, fixed_brain(Action::Move(Direction::Right), 5.0), 50, 100);
        world.place_organism(0, 0, a).unwrap();
        world.place_organism(1, 0, b).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        sim.tick(&config);

        // A's move onto B's tile was rejected at commit time (B had not yet
        // moved when A committed); B then moved freely.
        assert_eq!(sim.world.organism_at(0, 0).unwrap().id, 1);
        assert_eq!(sim.world.organism_at(2, 0).unwrap().id, 2);
        assert!(sim.world.organism_at(1, 0).is_none());
    }

    #[test]
    fn test_mover_is_processed_once_per_tick() {
        let config = bare_config();
        let mut world = World::new(3, 1, Terrain::Land);
        let organism =
            organism_with(1, fixed_brain(Action::Move(Direction::Right), 5.0), 50, 100);
        world.place_organism(0, 0, organism).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        sim.tick(&config);
        let organism = sim.world.organism_at(1, 0).unwrap();
        assert_eq!(organism.age, 1);
        assert_eq!(organism.energy, 49);
    }

    #[test]
    fn test_movement_wraps_around_the_world_edge() {
        let config = bare_config();
        let mut world = World::new(5, 1, Terrain::Land);
        let organism =
            organism_with(1, fixed_brain(Action::Move(Direction::Left), 5.0), 50, 100);
        world.place_organism(0, 0, organism).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        sim.tick(&config);
        assert_eq!(sim.world.organism_at(4, 0).unwrap().id, 1);
    }

    #[test]
    fn test_vital_reset_cadence_restores_the_population() {
        let mut config = bare_config();
        config.simulation.vital_reset_interval = 4;
        config.simulation.reality_tick = 1_000;

        let mut world = World::new(3, 3, Terrain::Land);
        let organism = organism_with(1, fixed_brain(Action::Eat, 0.0), 50, 100);
        world.place_organism(0, 0, organism).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        for _ in 0..5 {
            sim.tick(&config);
        }
        // Tick 4 reset vitals before the organism aged that tick.
        let organism = sim.world.organism_at(0, 0).unwrap();
        assert_eq!(organism.energy, config.organism.initial_energy - 1);
        assert_eq!(organism.health, config.organism.initial_health);
    }

    #[test]
    fn test_no_resets_once_reality_starts() {
        let mut config = bare_config();
        config.simulation.vital_reset_interval = 4;
        config.simulation.reality_tick = 2;

        let mut world = World::new(3, 3, Terrain::Land);
        let organism = organism_with(1, fixed_brain(Action::Eat, 0.0), 50, 100);
        world.place_organism(0, 0, organism).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        // Tick 2 applies the one-time reality reset, after which the
        // periodic cadence (tick 4, 8, ...) no longer applies.
        for _ in 0..8 {
            sim.tick(&config);
        }
        let organism = sim.world.organism_at(0, 0).unwrap();
        // Reset at tick 2, then 6 unassisted ticks of drain.
        assert_eq!(organism.energy, config.organism.initial_energy - 6);
    }

    #[test]
    fn test_history_covers_idle_reality_ticks() {
        let mut config = bare_config();
        config.simulation.reality_tick = 1;

        let mut world = World::new(3, 3, Terrain::Land);
        let organism = organism_with(1, fixed_brain(Action::Eat, 0.0), 50, 100);
        world.place_organism(1, 1, organism).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        sim.tick(&config);
        sim.tick(&config);

        // Nothing during training; once reality starts every tick gets a
        // line, even when no motor neuron fired.
        let organism = sim.world.organism_at(1, 1).unwrap();
        assert!(!organism.history.contains_key(&0));
        assert!(organism.history.get(&1).unwrap().contains("action=None"));
    }

    #[test]
    fn test_food_respawn_cadence() {
        let mut config = bare_config();
        config.world.food_spawn_interval = 3;
        config.world.food_spawn_probability = 1.0;

        let mut world = World::new(3, 3, Terrain::Land);
        let organism = organism_with(1, fixed_brain(Action::FleeDanger, 0.0), 50, 100);
        world.place_organism(0, 0, organism).unwrap();
        let mut sim = SimulationState::with_world(1, world);

        sim.tick(&config);
        assert_eq!(sim.world.total_food(), 0);

        sim.tick(&config);
        sim.tick(&config);
        sim.tick(&config);
        // Tick 3 rolled every land tile at probability one.
        assert_eq!(sim.world.total_food(), 9);
    }

    #[test]
    fn test_plasticity_cadence_keeps_connection_count_stable() {
        let mut config = bare_config();
        config.brain.plasticity_interval = 2;
        config.brain.prune_threshold = 10.0; // prune everything, regrow as many

        let mut brain = fixed_brain(Action::FleeDanger, 5.0);
        let sensory = brain.sensory_ids()[0];
        let motor = brain.motor_ids()[0];
        brain.connect(sensory, motor, 0.01);
        brain.connect(sensory, motor, -0.02);

        let mut world = World::new(3, 3, Terrain::Land);
        world
            .place_organism(0, 0, organism_with(1, brain, 50, 100))
            .unwrap();
        let mut sim = SimulationState::with_world(1, world);

        sim.tick(&config);
        sim.tick(&config);
        sim.tick(&config);
        let organism = sim.world.organism_at(0, 0).unwrap();
        assert_eq!(organism.brain.connection_count(), 2);
    }
}
