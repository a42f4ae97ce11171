use crate::{
    coord::{BOARD_WIDTH, Coord},
    worker::WorkerId,
};

pub const MAX_LEVEL: u8 = 4;
pub const WINNING_LEVEL: u8 = 3;

// center = 2, ring = 1, edge = 0
#[rustfmt::skip]
pub const CENTRALITY: [[u8; BOARD_WIDTH]; BOARD_WIDTH] = [
    [0, 0, 0, 0, 0],
    [0, 1, 1, 1, 0],
    [0, 1, 2, 1, 0],
    [0, 1, 1, 1, 0],
    [0, 0, 0, 0, 0],
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Space {
    coord: Coord,
    level: u8,
    occupant: Option<WorkerId>,
    rank: u8,
}

impl Space {
    pub const fn new(coord: Coord) -> Self {
        Space {
            coord,
            level: 0,
            occupant: None,
            rank: CENTRALITY[coord.x as usize][coord.y as usize],
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn occupant(&self) -> Option<WorkerId> {
        self.occupant
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Free to receive a worker or a block: nobody standing here and no dome.
    pub fn is_unoccupied(&self) -> bool {
        self.occupant.is_none() && self.level < MAX_LEVEL
    }

    pub(crate) fn set_occupant(&mut self, worker: Option<WorkerId>) {
        self.occupant = worker;
    }

    pub(crate) fn set_level(&mut self, level: u8) {
        debug_assert!(level <= MAX_LEVEL);
        self.level = level.min(MAX_LEVEL);
    }

    pub(crate) fn build(&mut self) {
        debug_assert!(self.level < MAX_LEVEL, "Can't build on a dome at {:?}", self.coord);
        self.level = (self.level + 1).min(MAX_LEVEL);
    }

    pub(crate) fn unbuild(&mut self) {
        debug_assert!(self.level > 0, "Nothing to remove at {:?}", self.coord);
        self.level = self.level.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centrality_table() {
        let ones = [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)];
        for coord in Coord::ALL {
            let expected = if (coord.x, coord.y) == (2, 2) {
                2
            } else if ones.contains(&(coord.x, coord.y)) {
                1
            } else {
                0
            };
            assert_eq!(Space::new(coord).rank(), expected, "{coord:?}");
        }
    }

    #[test]
    fn test_dome_is_occupied() {
        let mut space = Space::new(Coord::new(0, 0));
        for _ in 0..3 {
            space.build();
            assert!(space.is_unoccupied());
        }
        space.build();
        assert_eq!(space.level(), 4);
        assert!(!space.is_unoccupied());

        space.unbuild();
        assert!(space.is_unoccupied());
    }

    #[test]
    fn test_worker_is_occupied() {
        let mut space = Space::new(Coord::new(1, 1));
        space.set_occupant(Some(WorkerId::A));
        assert!(!space.is_unoccupied());
        space.set_occupant(None);
        assert!(space.is_unoccupied());
    }
}
