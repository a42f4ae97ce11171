use regex::Regex;

use crate::{
    board::Board,
    coord::{Coord, NUM_SPACES},
    error::GameError,
    player::PlayerId,
    space::MAX_LEVEL,
    worker::WorkerId,
};

/// Compact position text, eg `0000000000000000000000000/1/31,13/33,11`:
/// 25 row-major levels, the player to move, then the A,B and Y,Z coordinates
/// (`-` for a worker that hasn't been placed). The player section is optional
/// when only the board matters.
const POSITION_PATTERN: &str =
    r"^([0-4]{25})(?:/([12]))?/([0-4]{2}|-),([0-4]{2}|-)/([0-4]{2}|-),([0-4]{2}|-)$";

const POSITION_WARNING: &str =
    "Positions must look like <25 levels>/<1|2>/<A>,<B>/<Y>,<Z>, eg 0000000000000000000000000/1/31,13/33,11";

#[derive(Clone, Debug)]
pub struct Position {
    pub board: Board,
    pub to_move: PlayerId,
}

fn worker_section(board: &Board, player: PlayerId) -> String {
    player
        .workers()
        .map(|id| match board.worker_coord(id) {
            Some(coord) => coord.to_string(),
            None => "-".to_owned(),
        })
        .join(",")
}

fn levels_section(board: &Board) -> String {
    Coord::ALL
        .iter()
        .map(|coord| board.height(*coord).to_string())
        .collect()
}

pub fn board_to_string(board: &Board) -> String {
    format!(
        "{}/{}/{}",
        levels_section(board),
        worker_section(board, PlayerId::One),
        worker_section(board, PlayerId::Two)
    )
}

pub fn position_to_string(board: &Board, to_move: PlayerId) -> String {
    let player_digit = match to_move {
        PlayerId::One => 1,
        PlayerId::Two => 2,
    };
    format!(
        "{}/{}/{}/{}",
        levels_section(board),
        player_digit,
        worker_section(board, PlayerId::One),
        worker_section(board, PlayerId::Two)
    )
}

pub fn parse_position(s: &str) -> Result<Position, GameError> {
    let re = Regex::new(POSITION_PATTERN).map_err(|e| GameError::InvalidPosition(e.to_string()))?;
    let captures = re
        .captures(s.trim())
        .ok_or_else(|| GameError::InvalidPosition(format!("'{s}'. {POSITION_WARNING}")))?;

    let mut board = Board::new();

    let levels = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    debug_assert_eq!(levels.len(), NUM_SPACES);
    for (coord, c) in Coord::ALL.iter().zip(levels.chars()) {
        let level = c.to_digit(10).unwrap_or_default() as u8;
        board.set_level(*coord, level);
    }

    let to_move = match captures.get(2).map(|m| m.as_str()) {
        Some("2") => PlayerId::Two,
        _ => PlayerId::One,
    };

    for (group, id) in (3..=6).zip(WorkerId::ALL) {
        let raw = captures.get(group).map(|m| m.as_str()).unwrap_or("-");
        if raw == "-" {
            continue;
        }

        let coord: Coord = raw.parse().map_err(GameError::InvalidPosition)?;
        if let Some(other) = board.space(coord).occupant() {
            return Err(GameError::InvalidPosition(format!(
                "{id} and {other} can't both stand on {coord:?}"
            )));
        }
        if board.height(coord) == MAX_LEVEL {
            return Err(GameError::InvalidPosition(format!(
                "{id} can't stand on the dome at {coord:?}"
            )));
        }
        board.move_worker(id, None, coord);
    }

    Ok(Position { board, to_move })
}
