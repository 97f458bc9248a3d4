pub mod action;
pub mod sense;

use crate::brain::Brain;
use crate::config::OrganismConfig;
use crate::world::World;
use action::Action;
use sense::Sense;
use std::collections::HashMap;

const REWARD_MOVE_LAND: f64 = 0.2;
const REWARD_MOVE_FOOD: f64 = 0.5;
const REWARD_MOVE_WATER: f64 = -0.5;
const REWARD_MOVE_OCCUPIED: f64 = -1.0;
const REWARD_EAT: f64 = 3.0;
const REWARD_OVERFED: f64 = -1.0;
const REWARD_EAT_NOTHING: f64 = -20.0;

/// A creature: one brain plus vital state. The grid owns the organism; its
/// position is always the tile it currently sits on.
#[derive(Debug)]
pub struct Organism {
    pub id: u64,
    pub brain: Brain,
    pub health: i32,
    pub energy: i32,
    pub age: u64,
    pub learning_rate: f64,
    /// Per-tick diagnostic notes, debug only. Learning never reads this.
    pub history: HashMap<u64, String>,
}

impl Organism {
    pub fn new(id: u64, brain: Brain, config: &OrganismConfig) -> Self {
        Self {
            id,
            brain,
            health: config.initial_health,
            energy: config.initial_energy,
            age: 0,
            learning_rate: config.learning_rate,
            history: HashMap::new(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Evaluates every sense the brain is wired with against the current
    /// surroundings.
    pub fn sense(&self, world: &World, x: usize, y: usize) -> HashMap<Sense, f64> {
        self.brain
            .senses()
            .iter()
            .map(|s| (*s, s.calc(world, self, x, y)))
            .collect()
    }

    /// Executes one chosen action against the world and returns the earned
    /// reward plus a staged destination for movement. Movement is never
    /// applied here; the driver commits it after the death check.
    pub fn execute(
        &mut self,
        action: Action,
        world: &mut World,
        x: usize,
        y: usize,
        overfeed_cap: i32,
    ) -> (f64, Option<(usize, usize)>) {
        match action {
            Action::Move(direction) => {
                let (nx, ny) = world.neighbor(x, y, direction);
                let mut reward = 0.0;

                // On a one-tile axis the wrap lands back on the origin. The
                // actor is off the grid while it acts, so the origin reads as
                // empty; it still counts as occupied, by the actor itself.
                if (nx, ny) == (x, y) || world.organism_at(nx, ny).is_some() {
                    reward += REWARD_MOVE_OCCUPIED;
                }
                let destination = world.tile(nx, ny);
                if destination.is_land() {
                    reward += REWARD_MOVE_LAND;
                    if destination.has_food() {
                        reward += REWARD_MOVE_FOOD;
                    }
                } else {
                    reward += REWARD_MOVE_WATER;
                }

                (reward, Some((nx, ny)))
            }
            Action::Eat => {
                let tile = world.tile_mut(x, y);
                if tile.is_land() {
                    if let Some(food) = tile.consume_food() {
                        self.energy += food.energy;
                        let reward = if self.energy > overfeed_cap {
                            REWARD_OVERFED
                        } else {
                            REWARD_EAT
                        };
                        return (reward, None);
                    }
                }
                // Acting on a false belief costs dearly.
                (REWARD_EAT_NOTHING, None)
            }
            Action::FleeDanger => (0.0, None),
        }
    }

    /// One tick of metabolism: energy drains, age advances, and once energy
    /// is exhausted health starts to fall.
    pub fn time_goes_on(&mut self) {
        self.energy -= 1;
        self.age += 1;

        if self.energy <= 0 {
            self.energy = 0;
            self.health -= 1;
        }
    }

    pub fn reset_vitals(&mut self, config: &OrganismConfig) {
        self.health = config.initial_health;
        self.energy = config.initial_energy;
    }

    pub fn record_history(&mut self, tick: u64, note: String) {
        self.history.insert(tick, note);
    }
}
