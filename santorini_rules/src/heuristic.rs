use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    board::Board,
    coord::Coord,
    moves::Turn,
    player::PlayerId,
    space::WINNING_LEVEL,
};

pub type Score = f64;

/// Upper bound on the summed distances of two workers, so closer scores higher.
const DISTANCE_BASELINE: u8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub height: Score,
    pub center: Score,
    pub distance: Score,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        HeuristicWeights {
            height: 4.0,
            center: 2.5,
            distance: 1.5,
        }
    }
}

fn sum_over(d: Coord, o: Option<Coord>, f: impl Fn(Coord) -> u8) -> u8 {
    f(d) + o.map(f).unwrap_or(0)
}

/// Combined height of both workers. Standing on level 3 is a win and scores infinity.
pub fn height_score(board: &Board, d: Coord, o: Option<Coord>) -> Score {
    if board.height(d) == WINNING_LEVEL {
        return Score::INFINITY;
    }
    sum_over(d, o, |c| board.height(c)) as Score
}

pub fn center_score(board: &Board, d: Coord, o: Option<Coord>) -> Score {
    sum_over(d, o, |c| board.centrality_score(c)) as Score
}

pub fn distance_score(board: &Board, player: PlayerId, d: Coord, o: Option<Coord>) -> Score {
    let total = sum_over(d, o, |c| board.distance_score(player, c));
    DISTANCE_BASELINE as Score - total as Score
}

pub fn score_turn(board: &Board, weights: &HeuristicWeights, turn: &Turn) -> Score {
    let player = turn.worker.owner();
    let d = turn.to;
    let o = board.worker_coord(turn.worker.partner());

    let height = height_score(board, d, o);
    if height.is_infinite() {
        return Score::INFINITY;
    }

    weights.height * height
        + weights.center * center_score(board, d, o)
        + weights.distance * distance_score(board, player, d, o)
}

/// The highest scoring turn. Ties go to whichever came first in `turns`.
pub fn best_turn(board: &Board, weights: &HeuristicWeights, turns: &[Turn]) -> Option<Turn> {
    let mut best: Option<(Turn, Score)> = None;

    for turn in turns {
        let score = score_turn(board, weights, turn);
        trace!(%turn, score, "scored turn");
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((*turn, score)),
        }
    }

    best.map(|(turn, _)| turn)
}

/// The three unweighted terms for where a player's workers stand right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PositionScore {
    pub height: u8,
    pub center: u8,
    pub distance: u8,
}

impl PositionScore {
    pub fn for_player(board: &Board, player: PlayerId) -> Self {
        let coords: Vec<Coord> = player
            .workers()
            .iter()
            .filter_map(|id| board.worker_coord(*id))
            .collect();

        let sum = |f: &dyn Fn(Coord) -> u8| coords.iter().map(|c| f(*c)).sum::<u8>();

        PositionScore {
            height: sum(&|c| board.height(c)),
            center: sum(&|c| board.centrality_score(c)),
            distance: DISTANCE_BASELINE.saturating_sub(sum(&|c| board.distance_score(player, c))),
        }
    }
}

impl std::fmt::Display for PositionScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.height, self.center, self.distance)
    }
}
