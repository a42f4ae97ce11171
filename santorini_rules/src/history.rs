use serde::{Deserialize, Serialize};

use crate::{coord::Coord, worker::WorkerId};

/// The smallest description of a finished turn that can be played backwards.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TurnRecord {
    pub worker: WorkerId,
    pub from: Coord,
    pub to: Coord,
    pub build: Coord,
}

impl TurnRecord {
    pub fn new(worker: WorkerId, from: Coord, to: Coord, build: Coord) -> Self {
        TurnRecord {
            worker,
            from,
            to,
            build,
        }
    }
}

impl std::fmt::Display for TurnRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}>{}^{}", self.worker, self.from, self.to, self.build)
    }
}

/// Linear undo/redo ledger. It only moves records between its two stacks;
/// the board applies their effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnHistory {
    // most recent last
    past: Vec<TurnRecord>,
    future: Vec<TurnRecord>,
}

impl TurnHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Any new turn invalidates everything that was undone.
    pub fn save(&mut self, record: TurnRecord) {
        self.future.clear();
        self.past.push(record);
    }

    pub fn step_back(&mut self) -> Option<TurnRecord> {
        let record = self.past.pop()?;
        self.future.push(record);
        Some(record)
    }

    pub fn step_forward(&mut self) -> Option<TurnRecord> {
        let record = self.future.pop()?;
        self.past.push(record);
        Some(record)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn len(&self) -> usize {
        self.past.len()
    }

    pub fn is_empty(&self) -> bool {
        self.past.is_empty()
    }

    pub fn past(&self) -> &[TurnRecord] {
        &self.past
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: u8) -> TurnRecord {
        TurnRecord::new(WorkerId::A, Coord::new(0, n), Coord::new(1, n), Coord::new(2, n))
    }

    #[test]
    fn test_empty_history() {
        let mut history = TurnHistory::new();
        assert_eq!(history.step_back(), None);
        assert_eq!(history.step_forward(), None);
        assert!(history.is_empty());
    }

    #[test]
    fn test_stack_order() {
        let mut history = TurnHistory::new();
        history.save(record(0));
        history.save(record(1));

        assert_eq!(history.step_back(), Some(record(1)));
        assert_eq!(history.step_back(), Some(record(0)));
        assert_eq!(history.step_back(), None);

        assert_eq!(history.step_forward(), Some(record(0)));
        assert_eq!(history.step_forward(), Some(record(1)));
        assert_eq!(history.step_forward(), None);
        assert_eq!(history.past(), &[record(0), record(1)]);
    }

    #[test]
    fn test_save_clears_future() {
        let mut history = TurnHistory::new();
        history.save(record(0));
        history.step_back();
        assert!(!history.can_undo());
        assert!(history.can_redo());

        history.save(record(2));
        assert!(!history.can_redo());
        assert_eq!(history.step_forward(), None);
        assert_eq!(history.len(), 1);
    }
}
