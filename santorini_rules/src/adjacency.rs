use arrayvec::ArrayVec;
use itertools::iproduct;

use crate::{board::Board, coord::Coord, player::PlayerId};

pub type Neighbors = ArrayVec<Coord, 8>;

/// Which rule set filters the neighbors of a space.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AdjacencyRules {
    /// Reachable by a worker: unoccupied and at most one level up.
    Movement,
    /// Buildable: unoccupied, any height difference.
    Build,
}

/// Neighbors of `origin` that pass `rules`. The row offset is the outer loop and the
/// column offset the inner one, so from 22 the order is 11, 12, 13, 21, 23, 31, 32, 33.
/// Computer players break ties with this order. A column-first scan (11, 21, 31, 12, ...)
/// would pick different turns on ties.
pub fn adjacent_spaces(board: &Board, origin: Coord, rules: AdjacencyRules) -> Neighbors {
    iproduct!(-1..=1, -1..=1)
        .filter(|&(dx, dy)| (dx, dy) != (0, 0))
        .filter_map(|(dx, dy)| origin.offset_by(dx, dy))
        .filter(|&candidate| {
            rules == AdjacencyRules::Build || board.check_height_delta(origin, candidate)
        })
        .filter(|&candidate| board.is_unoccupied(candidate))
        .collect()
}

/// True if any of `player`'s placed workers has somewhere to step.
pub fn has_any_move(board: &Board, player: PlayerId) -> bool {
    player
        .workers()
        .iter()
        .filter_map(|id| board.worker_coord(*id))
        .any(|coord| !adjacent_spaces(board, coord, AdjacencyRules::Movement).is_empty())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn board_from(s: &str) -> Board {
        Board::try_from(s).unwrap()
    }

    #[test]
    fn test_scan_order() {
        let board = Board::try_from("0000000000000000000000000/22,-/-,-").unwrap();
        let neighbors = adjacent_spaces(&board, Coord::new(2, 2), AdjacencyRules::Movement);
        let expected = [
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(1, 3),
            Coord::new(2, 1),
            Coord::new(2, 3),
            Coord::new(3, 1),
            Coord::new(3, 2),
            Coord::new(3, 3),
        ];
        assert_eq!(neighbors.as_slice(), &expected);
    }

    #[test]
    fn test_corner_bounds() {
        let board = board_from("0000000000000000000000000/00,-/-,-");
        let neighbors = adjacent_spaces(&board, Coord::new(0, 0), AdjacencyRules::Build);
        assert_eq!(
            neighbors.as_slice(),
            &[Coord::new(0, 1), Coord::new(1, 0), Coord::new(1, 1)]
        );
    }

    #[test]
    fn test_movement_respects_height_but_build_does_not() {
        // Worker on level 0 at 22, a level 2 tower at 12, a dome at 32, a blue worker at 21.
        let board = board_from("0000000200000000040000000/22,-/21,-");
        let moves = adjacent_spaces(&board, Coord::new(2, 2), AdjacencyRules::Movement);
        let builds = adjacent_spaces(&board, Coord::new(2, 2), AdjacencyRules::Build);

        assert!(!moves.contains(&Coord::new(1, 2)));
        assert!(builds.contains(&Coord::new(1, 2)));

        for rules_result in [&moves, &builds] {
            assert!(!rules_result.contains(&Coord::new(3, 2)));
            assert!(!rules_result.contains(&Coord::new(2, 1)));
        }
        assert_eq!(moves.len(), 5);
        assert_eq!(builds.len(), 6);
    }

    #[test]
    fn test_stepping_down_is_allowed() {
        let board = board_from("0000000000003000000000000/22,-/-,-");
        let moves = adjacent_spaces(&board, Coord::new(2, 2), AdjacencyRules::Movement);
        assert_eq!(moves.len(), 8);
    }

    #[test]
    fn test_has_any_move() {
        // A boxed in by domes and Y, B boxed in by tall towers.
        let blocked = board_from("4440040000444220020200222/11,33/12,-");
        assert!(!has_any_move(&blocked, PlayerId::One));
        assert!(has_any_move(&blocked, PlayerId::Two));

        assert!(has_any_move(&Board::new_standard(), PlayerId::One));
    }

    proptest! {
        #[test]
        fn test_build_neighbors_superset_of_movement(
            levels in proptest::collection::vec(0u8..=4, 25),
            origin_idx in 0usize..25,
        ) {
            let mut board = Board::new();
            for (coord, level) in Coord::ALL.iter().zip(levels) {
                board.set_level(*coord, level);
            }
            let origin = Coord::ALL[origin_idx];
            let moves = adjacent_spaces(&board, origin, AdjacencyRules::Movement);
            let builds = adjacent_spaces(&board, origin, AdjacencyRules::Build);
            for coord in moves.iter() {
                prop_assert!(builds.contains(coord));
            }
            for coord in builds.iter() {
                prop_assert!(origin.chebyshev(*coord) == 1);
                prop_assert!(board.height(*coord) < 4);
            }
        }
    }
}
