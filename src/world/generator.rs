use super::tile::Terrain;
use super::World;
use crate::brain::generator as brain_generator;
use crate::config::Config;
use crate::organism::Organism;
use rand::Rng;

/// Builds a random world: terrain rolled per tile, organisms with freshly
/// generated brains scattered over land, and an initial helping of food.
pub fn generate(config: &Config) -> Result<World, Box<dyn std::error::Error>> {
    let mut world = World::new(config.world.width, config.world.height, Terrain::Land);
    let mut rng = rand::thread_rng();

    for y in 0..world.height() {
        for x in 0..world.width() {
            if rng.gen::<f64>() >= config.world.land_probability {
                world.tile_mut(x, y).terrain = Terrain::Water;
            }
        }
    }

    let mut next_id: u64 = 0;
    for y in 0..world.height() {
        for x in 0..world.width() {
            if !world.tile(x, y).is_land() {
                continue;
            }
            if rng.gen::<f64>() < config.world.organism_probability {
                let brain = brain_generator::generate(&config.brain)?;
                let organism = Organism::new(next_id, brain, &config.organism);
                next_id += 1;
                // The tile was just checked empty; placement cannot fail.
                let _ = world.place_organism(x, y, organism);
            }
        }
    }

    world.respawn_food(config.world.food_spawn_probability, config.world.food_energy);

    Ok(world)
}
