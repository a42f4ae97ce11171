use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

pub const BOARD_WIDTH: usize = 5;
pub const NUM_SPACES: usize = BOARD_WIDTH * BOARD_WIDTH;

/// A space on the board. `x` is the row, `y` is the column, both in `0..5`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        debug_assert!((x as usize) < BOARD_WIDTH && (y as usize) < BOARD_WIDTH);
        Coord { x, y }
    }

    pub const fn try_new(x: i32, y: i32) -> Option<Self> {
        if x >= 0 && x < BOARD_WIDTH as i32 && y >= 0 && y < BOARD_WIDTH as i32 {
            Some(Coord {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    pub const ALL: [Self; NUM_SPACES] = {
        let mut result = [Coord { x: 0, y: 0 }; NUM_SPACES];
        let mut i = 0;
        while i < NUM_SPACES {
            result[i] = Coord { x: (i / BOARD_WIDTH) as u8, y: (i % BOARD_WIDTH) as u8 };
            i += 1;
        }
        result
    };

    pub const fn index(self) -> usize {
        self.x as usize * BOARD_WIDTH + self.y as usize
    }

    pub const fn offset_by(self, dx: i32, dy: i32) -> Option<Self> {
        Self::try_new(self.x as i32 + dx, self.y as i32 + dy)
    }

    pub const fn offset(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.offset_by(dx, dy)
    }

    /// Chebyshev distance: the number of king steps between two spaces.
    pub fn chebyshev(self, other: Coord) -> u8 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.x, self.y)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl FromStr for Coord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();
        if s.len() != 2 || digits.len() != 2 {
            return Err(format!("Invalid coordinate '{s}': expected two digits like 31"));
        }

        Coord::try_new(digits[0] as i32, digits[1] as i32)
            .ok_or_else(|| format!("Coordinate '{s}' is off the board"))
    }
}

impl Serialize for Coord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Coord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Coord::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// The eight compass directions a human can type. North decreases the row.
#[derive(
    Clone, Copy, Hash, PartialEq, Eq, Debug, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// (row delta, column delta)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::N => (-1, 0),
            Direction::NE => (-1, 1),
            Direction::E => (0, 1),
            Direction::SE => (1, 1),
            Direction::S => (1, 0),
            Direction::SW => (1, -1),
            Direction::W => (0, -1),
            Direction::NW => (-1, -1),
        }
    }

    /// The direction that steps from `from` to `to`, if they are neighbors.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let delta = (to.x as i32 - from.x as i32, to.y as i32 - from.y as i32);
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }
}
