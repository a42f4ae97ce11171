use serde::{Deserialize, Serialize};

use crate::{
    adjacency::{AdjacencyRules, Neighbors, adjacent_spaces},
    board::Board,
    coord::{Coord, Direction},
    error::{GameError, IllegalReason},
    player::PlayerId,
    worker::WorkerId,
};

/// One legal (worker, destination, build) triple.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Turn {
    pub worker: WorkerId,
    pub to: Coord,
    pub build: Coord,
}

impl Turn {
    pub fn new(worker: WorkerId, to: Coord, build: Coord) -> Self {
        Turn { worker, to, build }
    }
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}>{}^{}", self.worker, self.to, self.build)
    }
}

/// Build targets for a worker that moves `from` -> `to`. The space it just left
/// counts as free, so it is appended after the scanned neighbors.
fn build_targets(board: &Board, from: Coord, to: Coord) -> Neighbors {
    let mut builds = adjacent_spaces(board, to, AdjacencyRules::Build);
    if !builds.contains(&from) {
        builds.push(from);
    }
    builds
}

/// Every legal turn for `player`, in enumeration order: worker, then
/// destination scan order, then build scan order with the vacated origin last.
pub fn legal_turns(board: &Board, player: PlayerId) -> Vec<Turn> {
    let mut result = Vec::with_capacity(128);

    for worker in player.workers() {
        let Some(from) = board.worker_coord(worker) else {
            continue;
        };

        for to in adjacent_spaces(board, from, AdjacencyRules::Movement) {
            for build in build_targets(board, from, to) {
                result.push(Turn::new(worker, to, build));
            }
        }
    }

    result
}

pub fn is_legal_move(board: &Board, worker: WorkerId, to: Coord) -> bool {
    board
        .worker_coord(worker)
        .is_some_and(|from| adjacent_spaces(board, from, AdjacencyRules::Movement).contains(&to))
}

/// Assumes `worker` is about to step to `to`.
pub fn is_legal_build(board: &Board, worker: WorkerId, to: Coord, build: Coord) -> bool {
    board
        .worker_coord(worker)
        .is_some_and(|from| build_targets(board, from, to).contains(&build))
}

pub fn can_worker_move(board: &Board, worker: WorkerId) -> bool {
    board
        .worker_coord(worker)
        .is_some_and(|from| !adjacent_spaces(board, from, AdjacencyRules::Movement).is_empty())
}

/// Resolves a typed move direction, explaining why it is refused if it is.
pub fn check_move(board: &Board, worker: WorkerId, direction: Direction) -> Result<Coord, GameError> {
    let illegal = |to, reason| GameError::IllegalMove { worker, to, reason };

    let from = board
        .worker_coord(worker)
        .ok_or(illegal(None, IllegalReason::OffBoard))?;
    let to = from
        .offset(direction)
        .ok_or(illegal(None, IllegalReason::OffBoard))?;

    if !board.is_unoccupied(to) {
        return Err(illegal(Some(to), IllegalReason::Occupied));
    }
    if !board.check_height_delta(from, to) {
        return Err(illegal(Some(to), IllegalReason::TooHigh));
    }

    debug_assert!(is_legal_move(board, worker, to));
    Ok(to)
}

/// Resolves a typed build direction relative to the destination `to`.
pub fn check_build(
    board: &Board,
    worker: WorkerId,
    to: Coord,
    direction: Direction,
) -> Result<Coord, GameError> {
    let build = to.offset(direction);
    match build {
        Some(build) if is_legal_build(board, worker, to, build) => Ok(build),
        _ => Err(GameError::IllegalBuild { worker, at: build }),
    }
}
