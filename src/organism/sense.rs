use super::action::Direction;
use super::Organism;
use crate::world::World;

const HUNGER_THRESHOLD: i32 = 60;
const HUNGER_PENALTY: f64 = -20.0;
const HEALTH_ABUNDANT_ENERGY: i32 = 60;
const HEALTH_LOW_ENERGY: i32 = 10;

/// A capability that turns world and body state into a scalar stimulus for
/// one sensory neuron. Senses and sensory neurons are index-aligned inside
/// the brain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    /// Is the neighboring tile in this direction traversable land?
    Vision(Direction),
    /// Is there food on the neighboring tile (`Some`) or right here (`None`)?
    Smell(Option<Direction>),
    Hunger,
    Health,
}

impl Sense {
    /// The canonical sense set every generated brain is wired with: four
    /// directional eyes, a local plus four directional noses, and the two
    /// interoceptive senses.
    pub fn all() -> Vec<Sense> {
        let mut senses: Vec<Sense> =
            Direction::ALL.iter().map(|d| Sense::Vision(*d)).collect();
        senses.push(Sense::Smell(None));
        senses.extend(Direction::ALL.iter().map(|d| Sense::Smell(Some(*d))));
        senses.push(Sense::Hunger);
        senses.push(Sense::Health);
        senses
    }

    pub fn calc(&self, world: &World, organism: &Organism, x: usize, y: usize) -> f64 {
        match self {
            Sense::Vision(direction) => {
                let (nx, ny) = world.neighbor(x, y, *direction);
                if world.tile(nx, ny).is_land() {
                    1.0
                } else {
                    0.0
                }
            }
            Sense::Smell(Some(direction)) => {
                let (nx, ny) = world.neighbor(x, y, *direction);
                if world.tile(nx, ny).has_food() {
                    1.0
                } else {
                    0.0
                }
            }
            Sense::Smell(None) => {
                if world.tile(x, y).has_food() {
                    1.0
                } else {
                    0.0
                }
            }
            Sense::Hunger => {
                if organism.energy < HUNGER_THRESHOLD {
                    HUNGER_PENALTY
                } else {
                    1.0
                }
            }
            Sense::Health => {
                if organism.energy > HEALTH_ABUNDANT_ENERGY {
                    1.5
                } else if organism.energy > HEALTH_LOW_ENERGY {
                    1.0
                } else if organism.energy <= 0 {
                    -5.0
                } else {
                    0.0
                }
            }
        }
    }
}
