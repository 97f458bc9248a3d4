use crate::organism::Organism;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    Land,
    Water,
}

/// Something an organism can eat for energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub energy: i32,
}

/// One cell of the grid. The tile is the sole owner of the organism standing
/// on it; "which tile is this organism on" is always answered by iteration
/// context, never by a back-pointer.
#[derive(Debug)]
pub struct Tile {
    pub terrain: Terrain,
    pub food: Option<Food>,
    pub organism: Option<Organism>,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            food: None,
            organism: None,
        }
    }

    pub fn is_land(&self) -> bool {
        self.terrain == Terrain::Land
    }

    pub fn has_food(&self) -> bool {
        self.food.is_some()
    }

    pub fn is_occupied(&self) -> bool {
        self.organism.is_some()
    }

    /// Removes and returns the food, if any.
    pub fn consume_food(&mut self) -> Option<Food> {
        self.food.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tile_is_bare() {
        let tile = Tile::new(Terrain::Land);
        assert!(tile.is_land());
        assert!(!tile.has_food());
        assert!(!tile.is_occupied());
    }

    #[test]
    fn test_consume_food_clears_the_tile() {
        let mut tile = Tile::new(Terrain::Land);
        tile.food = Some(Food { energy: 30 });

        let food = tile.consume_food();
        assert_eq!(food, Some(Food { energy: 30 }));
        assert!(!tile.has_food());
        assert_eq!(tile.consume_food(), None);
    }

    #[test]
    fn test_water_tile() {
        let tile = Tile::new(Terrain::Water);
        assert!(!tile.is_land());
    }
}
