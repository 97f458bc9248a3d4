/// Cardinal movement direction on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn to_delta(&self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// The closed set of behaviors an organism can choose in one tick. A motor
/// neuron maps to exactly one variant; an idle tick maps to none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Direction),
    Eat,
    /// Reserved for a predator/prey extension; currently reward-neutral.
    FleeDanger,
}

impl Action {
    /// Pool of actions a generated motor neuron may be bound to.
    pub fn pool() -> Vec<Action> {
        let mut actions: Vec<Action> = Direction::ALL.iter().map(|d| Action::Move(*d)).collect();
        actions.push(Action::Eat);
        actions.push(Action::FleeDanger);
        actions
    }

    pub fn is_movement(&self) -> bool {
        matches!(self, Action::Move(_))
    }
}
