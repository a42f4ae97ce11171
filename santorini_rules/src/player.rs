use std::ops::Not;

use serde::{Deserialize, Serialize};

use crate::worker::WorkerId;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::One
    }
}

impl Not for PlayerId {
    type Output = PlayerId;

    fn not(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    pub const fn workers(self) -> [WorkerId; 2] {
        match self {
            PlayerId::One => [WorkerId::A, WorkerId::B],
            PlayerId::Two => [WorkerId::Y, WorkerId::Z],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PlayerId::One => "white",
            PlayerId::Two => "blue",
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [first, second] = self.workers();
        write!(f, "{} ({}{})", self.name(), first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_negation() {
        let player = PlayerId::One;
        assert_eq!(!player, PlayerId::Two);
        assert_eq!(!!player, PlayerId::One);
    }

    #[test]
    fn test_player_display() {
        assert_eq!(PlayerId::One.to_string(), "white (AB)");
        assert_eq!(PlayerId::Two.to_string(), "blue (YZ)");
    }
}
