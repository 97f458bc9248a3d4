pub mod generator;
pub mod tile;

use crate::organism::action::Direction;
use crate::organism::Organism;
use rand::Rng;
use tile::{Food, Terrain, Tile};

/// Toroidal 2-D grid of tiles, created once per simulation and never resized.
/// Coordinates wrap modulo width/height for both sensing and movement.
#[derive(Debug)]
pub struct World {
    width: usize,
    height: usize,
    /// Row-major: index = y * width + x.
    tiles: Vec<Tile>,
}

impl World {
    pub fn new(width: usize, height: usize, terrain: Terrain) -> Self {
        let tiles = (0..width * height).map(|_| Tile::new(terrain)).collect();
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    pub fn tile(&self, x: usize, y: usize) -> &Tile {
        &self.tiles[self.index(x, y)]
    }

    pub fn tile_mut(&mut self, x: usize, y: usize) -> &mut Tile {
        let idx = self.index(x, y);
        &mut self.tiles[idx]
    }

    fn wrap(coordinate: i64, max: usize) -> usize {
        let max = max as i64;
        (((coordinate % max) + max) % max) as usize
    }

    /// Wrapped coordinates of the cell one step away in `direction`.
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> (usize, usize) {
        let (dx, dy) = direction.to_delta();
        (
            Self::wrap(x as i64 + dx, self.width),
            Self::wrap(y as i64 + dy, self.height),
        )
    }

    pub fn organism_at(&self, x: usize, y: usize) -> Option<&Organism> {
        self.tile(x, y).organism.as_ref()
    }

    /// Puts an organism on a tile. A tile never holds more than one organism:
    /// placing onto an occupied tile fails and hands the organism back.
    pub fn place_organism(
        &mut self,
        x: usize,
        y: usize,
        organism: Organism,
    ) -> Result<(), Organism> {
        let tile = self.tile_mut(x, y);
        if tile.organism.is_some() {
            return Err(organism);
        }
        tile.organism = Some(organism);
        Ok(())
    }

    pub fn take_organism(&mut self, x: usize, y: usize) -> Option<Organism> {
        self.tile_mut(x, y).organism.take()
    }

    /// Row-major snapshot of every occupied tile as `(x, y, organism id)`.
    /// The driver iterates this stable snapshot rather than the live grid so
    /// an organism that moves mid-pass is never processed twice in one tick.
    pub fn occupied_tiles(&self) -> Vec<(usize, usize, u64)> {
        let mut occupied = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(organism) = self.organism_at(x, y) {
                    occupied.push((x, y, organism.id));
                }
            }
        }
        occupied
    }

    pub fn organisms(&self) -> impl Iterator<Item = &Organism> {
        self.tiles.iter().filter_map(|t| t.organism.as_ref())
    }

    pub fn organism_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.organism.is_some()).count()
    }

    pub fn for_each_organism_mut(&mut self, mut f: impl FnMut(&mut Organism)) {
        for tile in &mut self.tiles {
            if let Some(organism) = tile.organism.as_mut() {
                f(organism);
            }
        }
    }

    pub fn total_energy(&self) -> i64 {
        self.organisms().map(|o| o.energy as i64).sum()
    }

    pub fn total_food(&self) -> usize {
        self.tiles.iter().filter(|t| t.has_food()).count()
    }

    /// Clears all food, then re-rolls every land tile independently. Food
    /// never spawns on water.
    pub fn respawn_food(&mut self, probability: f64, energy: i32) {
        let mut rng = rand::thread_rng();
        for tile in &mut self.tiles {
            tile.food = None;
            if tile.is_land() && rng.gen::<f64>() < probability {
                tile.food = Some(Food { energy });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_organism(id: u64) -> Organism {
        let config = Config::default();
        let brain = crate::brain::generator::generate(&config.brain).unwrap();
        Organism::new(id, brain, &config.organism)
    }

    #[test]
    fn test_wrap_left_from_origin() {
        let world = World::new(5, 4, Terrain::Land);
        assert_eq!(world.neighbor(0, 0, Direction::Left), (4, 0));
        assert_eq!(world.neighbor(0, 0, Direction::Up), (0, 3));
        assert_eq!(world.neighbor(4, 3, Direction::Right), (0, 3));
        assert_eq!(world.neighbor(4, 3, Direction::Down), (4, 0));
    }

    #[test]
    fn test_occupancy_is_exclusive() {
        let mut world = World::new(3, 3, Terrain::Land);
        assert!(world.place_organism(1, 1, test_organism(1)).is_ok());

        let rejected = world.place_organism(1, 1, test_organism(2));
        let rejected = match rejected {
            Err(organism) => organism,
            Ok(()) => panic!("occupied tile must reject placement"),
        };
        assert_eq!(rejected.id, 2);
        assert_eq!(world.organism_at(1, 1).unwrap().id, 1);
        assert_eq!(world.organism_count(), 1);
    }

    #[test]
    fn test_take_organism_empties_the_tile() {
        let mut world = World::new(3, 3, Terrain::Land);
        world.place_organism(2, 0, test_organism(7)).unwrap();

        let taken = world.take_organism(2, 0).unwrap();
        assert_eq!(taken.id, 7);
        assert!(world.organism_at(2, 0).is_none());
        assert!(world.take_organism(2, 0).is_none());
    }

    #[test]
    fn test_occupied_tiles_row_major_order() {
        let mut world = World::new(3, 2, Terrain::Land);
        world.place_organism(2, 1, test_organism(1)).unwrap();
        world.place_organism(0, 0, test_organism(2)).unwrap();
        world.place_organism(1, 0, test_organism(3)).unwrap();

        let occupied = world.occupied_tiles();
        assert_eq!(occupied, vec![(0, 0, 2), (1, 0, 3), (2, 1, 1)]);
    }

    #[test]
    fn test_respawn_food_clears_before_rolling() {
        let mut world = World::new(4, 4, Terrain::Land);
        world.tile_mut(0, 0).food = Some(Food { energy: 30 });

        world.respawn_food(0.0, 30);
        assert_eq!(world.total_food(), 0);

        world.respawn_food(1.0, 30);
        assert_eq!(world.total_food(), 16);
    }

    #[test]
    fn test_food_never_spawns_on_water() {
        let mut world = World::new(2, 2, Terrain::Water);
        world.respawn_food(1.0, 30);
        assert_eq!(world.total_food(), 0);
    }

    #[test]
    fn test_total_energy_sums_occupants() {
        let mut world = World::new(3, 3, Terrain::Land);
        let mut a = test_organism(1);
        a.energy = 40;
        let mut b = test_organism(2);
        b.energy = 25;
        world.place_organism(0, 0, a).unwrap();
        world.place_organism(1, 1, b).unwrap();

        assert_eq!(world.total_energy(), 65);
    }
}
