use thiserror::Error;

use crate::{coord::Coord, moves::Turn, player::PlayerId, worker::WorkerId};

/// Why a requested destination was refused.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum IllegalReason {
    OffBoard,
    TooHigh,
    Occupied,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IllegalReason::OffBoard => "off the board",
            IllegalReason::TooHigh => "too high to climb",
            IllegalReason::Occupied => "occupied",
        };
        write!(f, "{s}")
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum GameError {
    #[error("Cannot move {worker} to {to:?}: {reason}")]
    IllegalMove {
        worker: WorkerId,
        to: Option<Coord>,
        reason: IllegalReason,
    },

    #[error("Cannot build at {at:?} with {worker}")]
    IllegalBuild { worker: WorkerId, at: Option<Coord> },

    #[error("{worker} is not a worker for {player}")]
    WrongWorker { worker: WorkerId, player: PlayerId },

    #[error("{worker} has no legal moves")]
    StuckWorker { worker: WorkerId },

    #[error("{player} has no legal turns")]
    NoLegalTurn { player: PlayerId },

    #[error("{0} is not a legal turn")]
    IllegalTurn(Turn),

    #[error("Input closed")]
    InputClosed,

    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Invalid config: {0}")]
    Config(String),
}

impl GameError {
    /// Errors a human can fix by answering again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::IllegalMove { .. }
                | GameError::IllegalBuild { .. }
                | GameError::WrongWorker { .. }
                | GameError::StuckWorker { .. }
        )
    }
}
