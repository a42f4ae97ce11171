use tracing::{debug, info};

use crate::{
    coord::{BOARD_WIDTH, Coord},
    error::GameError,
    history::{TurnHistory, TurnRecord},
    notation::{board_to_string, parse_position},
    player::PlayerId,
    pretty_board::BoardSnapshot,
    space::{Space, WINNING_LEVEL},
    worker::{Worker, WorkerId},
};

pub const STARTING_POSITIONS: [(WorkerId, Coord); 4] = [
    (WorkerId::A, Coord::new(3, 1)),
    (WorkerId::B, Coord::new(1, 3)),
    (WorkerId::Y, Coord::new(3, 3)),
    (WorkerId::Z, Coord::new(1, 1)),
];

/// The 5x5 grid plus everything standing on it.
///
/// Mutations here do not validate legality. Callers check with
/// [`Board::is_unoccupied`], [`Board::check_height_delta`] and the adjacency
/// helpers first, so the same predicates serve real turns and enumeration.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    spaces: [[Space; BOARD_WIDTH]; BOARD_WIDTH],
    workers: [Worker; 4],
    running: bool,
    history: TurnHistory,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board with all four workers still in hand.
    pub fn new() -> Self {
        let spaces = std::array::from_fn(|x| {
            std::array::from_fn(|y| Space::new(Coord::new(x as u8, y as u8)))
        });

        Board {
            spaces,
            workers: WorkerId::ALL.map(Worker::new),
            running: true,
            history: TurnHistory::new(),
        }
    }

    /// Empty board with the standard opening placement.
    pub fn new_standard() -> Self {
        let mut result = Self::new();
        for (id, coord) in STARTING_POSITIONS {
            result.move_worker(id, None, coord);
        }
        result
    }

    pub fn place_workers_for(&mut self, player: PlayerId, coords: [Coord; 2]) {
        for (id, coord) in player.workers().into_iter().zip(coords) {
            self.move_worker(id, None, coord);
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn space(&self, coord: Coord) -> &Space {
        &self.spaces[coord.x as usize][coord.y as usize]
    }

    fn space_mut(&mut self, coord: Coord) -> &mut Space {
        &mut self.spaces[coord.x as usize][coord.y as usize]
    }

    pub fn spaces(&self) -> impl Iterator<Item = &Space> {
        self.spaces.iter().flatten()
    }

    pub fn worker(&self, id: WorkerId) -> &Worker {
        &self.workers[id.index()]
    }

    pub fn worker_coord(&self, id: WorkerId) -> Option<Coord> {
        self.workers[id.index()].coord
    }

    pub fn height(&self, coord: Coord) -> u8 {
        self.space(coord).level()
    }

    pub fn is_unoccupied(&self, coord: Coord) -> bool {
        self.space(coord).is_unoccupied()
    }

    /// A worker may step up at most one level. Bounds and occupancy are checked elsewhere.
    pub fn check_height_delta(&self, from: Coord, to: Coord) -> bool {
        (self.height(to) as i32) - (self.height(from) as i32) < 2
    }

    /// Moves `worker` from `from` to `to`. `from` is `None` for the initial placement.
    /// Arriving on level 3 ends the game.
    pub fn move_worker(&mut self, worker: WorkerId, from: Option<Coord>, to: Coord) {
        debug_assert_eq!(from, self.worker_coord(worker));
        debug_assert!(
            self.space(to).occupant().is_none(),
            "{to:?} is already occupied by {:?}",
            self.space(to).occupant()
        );

        self.relocate(worker, from, to);
        self.check_victory(worker, to);
    }

    fn relocate(&mut self, worker: WorkerId, from: Option<Coord>, to: Coord) {
        if let Some(from) = from {
            self.space_mut(from).set_occupant(None);
        }
        self.space_mut(to).set_occupant(Some(worker));
        self.workers[worker.index()].set_coord(to);
    }

    fn check_victory(&mut self, worker: WorkerId, to: Coord) {
        if self.height(to) == WINNING_LEVEL && self.running {
            info!(%worker, coord = %to, "worker reached level 3");
            self.running = false;
        }
    }

    pub fn build(&mut self, coord: Coord) {
        self.space_mut(coord).build();
    }

    pub fn unbuild(&mut self, coord: Coord) {
        self.space_mut(coord).unbuild();
    }

    pub(crate) fn set_level(&mut self, coord: Coord, level: u8) {
        self.space_mut(coord).set_level(level);
    }

    pub fn centrality_score(&self, coord: Coord) -> u8 {
        self.space(coord).rank()
    }

    /// Distance from `coord` to the closest worker of `player`'s opponent.
    pub fn distance_score(&self, player: PlayerId, coord: Coord) -> u8 {
        (!player)
            .workers()
            .iter()
            .filter_map(|id| self.worker_coord(*id))
            .map(|other| coord.chebyshev(other))
            .min()
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(self)
    }

    pub fn history(&self) -> &TurnHistory {
        &self.history
    }

    pub fn save(&mut self, record: TurnRecord) {
        self.history.save(record);
    }

    /// Plays the latest saved turn backwards. Does not touch the victory flag.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.step_back() else {
            return false;
        };

        self.unbuild(record.build);
        self.relocate(record.worker, Some(record.to), record.from);
        debug!(%record, "undo");
        true
    }

    /// Replays the latest undone turn.
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.history.step_forward() else {
            return false;
        };

        self.move_worker(record.worker, Some(record.from), record.to);
        self.build(record.build);
        debug!(%record, "redo");
        true
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", board_to_string(self))
    }
}

impl TryFrom<&str> for Board {
    type Error = GameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        parse_position(s).map(|position| position.board)
    }
}
