use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{
    coord::{Coord, Direction},
    player::PlayerId,
};

/// The four worker labels. A and B belong to white, Y and Z to blue.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
pub enum WorkerId {
    A,
    B,
    Y,
    Z,
}

impl WorkerId {
    pub const ALL: [WorkerId; 4] = [WorkerId::A, WorkerId::B, WorkerId::Y, WorkerId::Z];

    pub const fn owner(self) -> PlayerId {
        match self {
            WorkerId::A | WorkerId::B => PlayerId::One,
            WorkerId::Y | WorkerId::Z => PlayerId::Two,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The other worker controlled by the same player.
    pub const fn partner(self) -> WorkerId {
        match self {
            WorkerId::A => WorkerId::B,
            WorkerId::B => WorkerId::A,
            WorkerId::Y => WorkerId::Z,
            WorkerId::Z => WorkerId::Y,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub coord: Option<Coord>,
}

impl Worker {
    pub const fn new(id: WorkerId) -> Self {
        Worker { id, coord: None }
    }

    /// Where a step in `direction` would land. `None` if unplaced or off the board.
    /// Height and occupancy are the board's business, not the worker's.
    pub fn new_space(&self, direction: Direction) -> Option<Coord> {
        self.coord?.offset(direction)
    }

    pub(crate) fn set_coord(&mut self, coord: Coord) {
        self.coord = Some(coord);
    }
}
