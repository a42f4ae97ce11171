use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::{
    board::Board,
    coord::{BOARD_WIDTH, Coord},
    worker::WorkerId,
};

const ROW_SEPARATOR: &str = "+--+--+--+--+--+";

/// What a display needs to know about one space.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct SpaceView {
    pub level: u8,
    pub occupant: Option<WorkerId>,
}

/// Read-only copy of the grid, row by row.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct BoardSnapshot {
    pub rows: [[SpaceView; BOARD_WIDTH]; BOARD_WIDTH],
}

impl BoardSnapshot {
    pub fn new(board: &Board) -> Self {
        let rows = std::array::from_fn(|x| {
            std::array::from_fn(|y| {
                let space = board.space(Coord::new(x as u8, y as u8));
                SpaceView {
                    level: space.level(),
                    occupant: space.occupant(),
                }
            })
        });
        BoardSnapshot { rows }
    }

    pub fn get(&self, coord: Coord) -> SpaceView {
        self.rows[coord.x as usize][coord.y as usize]
    }

    /// Same grid as [`Display`](std::fmt::Display) but with the level shown as a background colour.
    pub fn to_colored_string(&self) -> String {
        let mut result = String::new();
        for row in &self.rows {
            for view in row {
                result.push_str(&colored_space(view).to_string());
            }
            result.push('\n');
        }
        result
    }

    pub fn print_to_console(&self) {
        print!("{}", self.to_colored_string());
    }
}

fn colored_space(view: &SpaceView) -> ColoredString {
    let label = match view.occupant {
        Some(worker) => format!("{}{worker}", view.level),
        None => format!("{} ", view.level),
    }
    .black();

    match view.level {
        0 => label.on_white(),
        1 => label.on_yellow(),
        2 => label.on_blue(),
        3 => label.on_green(),
        _ => label.white().on_black(),
    }
}

impl std::fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            writeln!(f, "{ROW_SEPARATOR}")?;
            for view in row {
                match view.occupant {
                    Some(worker) => write!(f, "|{}{worker}", view.level)?,
                    None => write!(f, "|{} ", view.level)?,
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "{ROW_SEPARATOR}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board_display() {
        let expected = "\
+--+--+--+--+--+
|0 |0 |0 |0 |0 |
+--+--+--+--+--+
|0 |0Z|0 |0B|0 |
+--+--+--+--+--+
|0 |0 |0 |0 |0 |
+--+--+--+--+--+
|0 |0A|0 |0Y|0 |
+--+--+--+--+--+
|0 |0 |0 |0 |0 |
+--+--+--+--+--+";
        assert_eq!(Board::new_standard().snapshot().to_string(), expected);
    }

    #[test]
    fn test_snapshot_tracks_levels_and_workers() {
        let board = Board::try_from("0000000000000230000000000/23,33/44,40").unwrap();
        let snapshot = board.snapshot();
        assert_eq!(
            snapshot.get(Coord::new(2, 3)),
            SpaceView { level: 2, occupant: Some(WorkerId::A) }
        );
        assert_eq!(snapshot.get(Coord::new(2, 4)), SpaceView { level: 3, occupant: None });
        assert!(snapshot.to_string().contains("|2A|3 |"));
    }

    #[test]
    fn test_colored_output_has_every_space() {
        colored::control::set_override(false);
        let text = Board::new_standard().snapshot().to_colored_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), BOARD_WIDTH);
        assert_eq!(lines[3], "0 0A0 0Y0 ");
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = Board::new_standard().snapshot();
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["rows"][3][1]["occupant"], "A");
        assert_eq!(json["rows"][0][0]["level"], 0);
    }
}
