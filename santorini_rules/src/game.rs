use serde::Serialize;
use tracing::info;

use crate::{
    agent::Agent,
    board::Board,
    error::GameError,
    history::TurnRecord,
    notation::Position,
    player::PlayerId,
    turn::play_turn,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum WinReason {
    ReachedLevelThree,
    /// The loser had no legal turn.
    Gridlock,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub enum GameStatus {
    Running,
    Won { winner: PlayerId, reason: WinReason },
}

/// Alternates two agents over one board until somebody wins.
pub struct Game {
    board: Board,
    agents: [Box<dyn Agent>; 2],
    turn: u32,
    record_history: bool,
    status: GameStatus,
    last_turn: Option<TurnRecord>,
}

impl Game {
    pub fn new(board: Board, agents: [Box<dyn Agent>; 2], record_history: bool) -> Self {
        Game {
            board,
            agents,
            turn: 1,
            record_history,
            status: GameStatus::Running,
            last_turn: None,
        }
    }

    pub fn from_position(
        position: Position,
        agents: [Box<dyn Agent>; 2],
        record_history: bool,
    ) -> Self {
        let mut result = Self::new(position.board, agents, record_history);
        if position.to_move == PlayerId::Two {
            result.turn = 2;
        }
        if !result.board.running() {
            // Whoever just moved is the one standing on level 3.
            result.status = GameStatus::Won {
                winner: !position.to_move,
                reason: WinReason::ReachedLevelThree,
            };
        }
        result
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The turn the latest [`Game::step`] played, if it played one.
    pub fn last_turn(&self) -> Option<TurnRecord> {
        self.last_turn
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// White moves on odd turns.
    pub fn current_player(&self) -> PlayerId {
        if self.turn % 2 == 1 {
            PlayerId::One
        } else {
            PlayerId::Two
        }
    }

    pub fn current_agent(&self) -> &dyn Agent {
        &*self.agents[self.current_player() as usize]
    }

    pub fn step(&mut self) -> Result<GameStatus, GameError> {
        if !self.is_running() {
            return Ok(self.status);
        }

        let player = self.current_player();
        let agent = self.agents[player as usize].as_mut();
        self.last_turn = None;

        match play_turn(&mut self.board, player, agent, self.record_history) {
            Ok(record) => {
                self.last_turn = Some(record);
                if self.board.running() {
                    self.turn += 1;
                } else {
                    self.finish(player, WinReason::ReachedLevelThree);
                }
            }
            Err(GameError::NoLegalTurn { player }) => {
                self.finish(!player, WinReason::Gridlock);
            }
            Err(e) => return Err(e),
        }

        Ok(self.status)
    }

    fn finish(&mut self, winner: PlayerId, reason: WinReason) {
        info!(%winner, ?reason, turn = self.turn, "game over");
        self.status = GameStatus::Won { winner, reason };
    }

    /// Undo is only offered while the game is running and history is kept.
    pub fn can_undo(&self) -> bool {
        self.is_running() && self.record_history && self.board.history().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.is_running() && self.record_history && self.board.history().can_redo()
    }

    /// Takes back the previous turn.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() || !self.board.undo() {
            return false;
        }
        self.turn -= 1;
        self.last_turn = None;
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() || !self.board.redo() {
            return false;
        }
        self.turn += 1;
        self.last_turn = None;
        true
    }

    /// Steps until the game ends, calling `on_turn` before every turn.
    pub fn run(
        &mut self,
        mut on_turn: impl FnMut(&Game),
    ) -> Result<(PlayerId, WinReason), GameError> {
        loop {
            if let GameStatus::Won { winner, reason } = self.status {
                return Ok((winner, reason));
            }
            on_turn(self);
            self.step()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        agent::{HeuristicAgent, RandomAgent},
        coord::Coord,
        notation::{board_to_string, parse_position},
        worker::WorkerId,
    };

    fn computer_game(seed: u64) -> Game {
        Game::new(
            Board::new_standard(),
            [
                Box::new(RandomAgent::seeded(seed)),
                Box::new(HeuristicAgent::default()),
            ],
            true,
        )
    }

    #[test]
    fn test_players_alternate() {
        let mut game = computer_game(3);
        assert_eq!(game.current_player(), PlayerId::One);
        game.step().unwrap();
        assert_eq!(game.current_player(), PlayerId::Two);
        assert_eq!(game.turn(), 2);
        game.step().unwrap();
        assert_eq!(game.current_player(), PlayerId::One);
    }

    #[test]
    fn test_random_games_terminate() {
        for seed in 0..20 {
            let mut game = Game::new(
                Board::new_standard(),
                [
                    Box::new(RandomAgent::seeded(seed)),
                    Box::new(RandomAgent::seeded(seed + 100)),
                ],
                false,
            );
            let mut turns = 0;
            let (winner, reason) = game.run(|_| turns += 1).unwrap();

            assert!(turns < 200);
            match reason {
                WinReason::ReachedLevelThree => {
                    let coords = winner.workers().map(|id| game.board().worker_coord(id).unwrap());
                    assert!(coords.iter().any(|c| game.board().height(*c) == 3));
                }
                WinReason::Gridlock => assert!(game.board().running()),
            }
            for space in game.board().spaces() {
                assert!(space.level() <= 4);
            }
        }
    }

    #[test]
    fn test_gridlock_on_first_turn_awards_opponent() {
        let position = parse_position("4440040000444220020200222/1/11,33/12,-").unwrap();
        let mut game = Game::from_position(
            position,
            [Box::new(HeuristicAgent::default()), Box::new(HeuristicAgent::default())],
            true,
        );

        let status = game.step().unwrap();
        assert_eq!(
            status,
            GameStatus::Won {
                winner: PlayerId::Two,
                reason: WinReason::Gridlock
            }
        );
        // Further steps are no-ops.
        assert_eq!(game.step().unwrap(), status);
    }

    #[test]
    fn test_heuristic_wins_when_it_can() {
        let position = parse_position("0000000000000230000000000/1/23,33/44,40").unwrap();
        let mut game = Game::from_position(
            position,
            [Box::new(HeuristicAgent::default()), Box::new(RandomAgent::seeded(0))],
            true,
        );
        let (winner, reason) = game.run(|_| {}).unwrap();
        assert_eq!(winner, PlayerId::One);
        assert_eq!(reason, WinReason::ReachedLevelThree);
        assert_eq!(game.board().worker_coord(WorkerId::A), Some(Coord::new(2, 4)));
        let last = game.last_turn().unwrap();
        assert_eq!((last.worker, last.from, last.to), (WorkerId::A, Coord::new(2, 3), Coord::new(2, 4)));
        assert!(!game.undo());
    }

    #[test]
    fn test_from_finished_position() {
        let position = parse_position("3000000000000000000000000/2/00,44/22,33").unwrap();
        let game = Game::from_position(
            position,
            [Box::new(HeuristicAgent::default()), Box::new(HeuristicAgent::default())],
            true,
        );
        assert_eq!(
            game.status(),
            GameStatus::Won {
                winner: PlayerId::One,
                reason: WinReason::ReachedLevelThree
            }
        );
    }

    #[test]
    fn test_undo_redo_moves_turn_counter() {
        let mut game = computer_game(5);
        let start = board_to_string(game.board());

        game.step().unwrap();
        game.step().unwrap();
        let after_two = board_to_string(game.board());
        assert_eq!(game.turn(), 3);

        assert!(game.can_undo());
        assert!(!game.can_redo());
        assert!(game.undo());
        assert!(game.undo());
        assert!(!game.can_undo());
        assert!(!game.undo());
        assert!(game.can_redo());
        assert_eq!(game.turn(), 1);
        assert_eq!(game.current_player(), PlayerId::One);
        assert_eq!(board_to_string(game.board()), start);

        assert!(game.redo());
        assert!(game.redo());
        assert!(!game.redo());
        assert_eq!(game.turn(), 3);
        assert_eq!(board_to_string(game.board()), after_two);
    }

    #[test]
    fn test_new_turn_after_undo_drops_redo() {
        let mut game = computer_game(9);
        game.step().unwrap();
        assert!(game.undo());
        game.step().unwrap();
        assert!(!game.redo());
    }

    #[test]
    fn test_undo_disabled_without_history() {
        let mut game = Game::new(
            Board::new_standard(),
            [Box::new(HeuristicAgent::default()), Box::new(HeuristicAgent::default())],
            false,
        );
        game.step().unwrap();
        assert!(!game.can_undo());
        assert!(!game.undo());
        assert_eq!(game.turn(), 2);
    }
}
