use clap::ValueEnum;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::debug;

use crate::{
    board::Board,
    coord::{Coord, Direction},
    error::GameError,
    heuristic::{HeuristicWeights, best_turn},
    moves::{Turn, can_worker_move, check_build, check_move},
    player::PlayerId,
    worker::WorkerId,
};

/// Anything that can pick one of the legal turns for a player.
pub trait Agent {
    /// `legal` is never empty: gridlock is detected before the agent is asked.
    fn choose_turn(
        &mut self,
        board: &Board,
        player: PlayerId,
        legal: &[Turn],
    ) -> Result<Turn, GameError>;

    fn kind(&self) -> AgentKind;
}

#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Default, Display, EnumString, ValueEnum, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    #[default]
    Human,
    Heuristic,
    Random,
}

impl AgentKind {
    pub fn is_computer(self) -> bool {
        self != AgentKind::Human
    }
}

pub struct RandomAgent<R: Rng = StdRng> {
    rng: R,
}

impl RandomAgent<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        RandomAgent::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        RandomAgent::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomAgent<R> {
    pub fn new(rng: R) -> Self {
        RandomAgent { rng }
    }
}

impl<R: Rng> Agent for RandomAgent<R> {
    fn choose_turn(
        &mut self,
        _board: &Board,
        player: PlayerId,
        legal: &[Turn],
    ) -> Result<Turn, GameError> {
        legal
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoLegalTurn { player })
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Random
    }
}

#[derive(Clone, Debug, Default)]
pub struct HeuristicAgent {
    weights: HeuristicWeights,
}

impl HeuristicAgent {
    pub fn new(weights: HeuristicWeights) -> Self {
        HeuristicAgent { weights }
    }
}

impl Agent for HeuristicAgent {
    fn choose_turn(
        &mut self,
        board: &Board,
        player: PlayerId,
        legal: &[Turn],
    ) -> Result<Turn, GameError> {
        best_turn(board, &self.weights, legal).ok_or(GameError::NoLegalTurn { player })
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Heuristic
    }
}

/// Where a human's answers come from: a terminal, a UI, a test script.
/// Parsing text into these types is the implementor's job; judging them is the engine's.
pub trait TurnInput {
    fn select_worker(&mut self, board: &Board, player: PlayerId) -> Result<WorkerId, GameError>;

    fn move_direction(&mut self, board: &Board, worker: WorkerId) -> Result<Direction, GameError>;

    fn build_direction(
        &mut self,
        board: &Board,
        worker: WorkerId,
        to: Coord,
    ) -> Result<Direction, GameError>;

    /// Called with every refused answer before asking again.
    fn rejected(&mut self, _error: &GameError) {}
}

impl<T: TurnInput + ?Sized> TurnInput for Box<T> {
    fn select_worker(&mut self, board: &Board, player: PlayerId) -> Result<WorkerId, GameError> {
        (**self).select_worker(board, player)
    }

    fn move_direction(&mut self, board: &Board, worker: WorkerId) -> Result<Direction, GameError> {
        (**self).move_direction(board, worker)
    }

    fn build_direction(
        &mut self,
        board: &Board,
        worker: WorkerId,
        to: Coord,
    ) -> Result<Direction, GameError> {
        (**self).build_direction(board, worker, to)
    }

    fn rejected(&mut self, error: &GameError) {
        (**self).rejected(error)
    }
}

pub struct HumanAgent<I: TurnInput> {
    input: I,
}

impl<I: TurnInput> HumanAgent<I> {
    pub fn new(input: I) -> Self {
        HumanAgent { input }
    }

    fn ask<T>(
        &mut self,
        mut attempt: impl FnMut(&mut I) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        loop {
            match attempt(&mut self.input) {
                Ok(result) => return Ok(result),
                Err(e) if e.is_recoverable() => {
                    debug!(error = %e, "rejected human input");
                    self.input.rejected(&e);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl<I: TurnInput> Agent for HumanAgent<I> {
    fn choose_turn(
        &mut self,
        board: &Board,
        player: PlayerId,
        legal: &[Turn],
    ) -> Result<Turn, GameError> {
        let worker = self.ask(|input| {
            let worker = input.select_worker(board, player)?;
            if worker.owner() != player {
                Err(GameError::WrongWorker { worker, player })
            } else if !can_worker_move(board, worker) {
                Err(GameError::StuckWorker { worker })
            } else {
                Ok(worker)
            }
        })?;

        let to = self.ask(|input| {
            let direction = input.move_direction(board, worker)?;
            check_move(board, worker, direction)
        })?;

        let build = self.ask(|input| {
            let direction = input.build_direction(board, worker, to)?;
            check_build(board, worker, to, direction)
        })?;

        let turn = Turn::new(worker, to, build);
        debug_assert!(legal.contains(&turn), "{turn} passed validation but isn't legal");
        Ok(turn)
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
}

/// Builds the agent for `kind`. `input` is only consulted for humans.
pub fn build_agent(
    kind: AgentKind,
    weights: HeuristicWeights,
    seed: Option<u64>,
    input: impl FnOnce() -> Box<dyn TurnInput>,
) -> Box<dyn Agent> {
    match kind {
        AgentKind::Human => Box::new(HumanAgent::new(input())),
        AgentKind::Heuristic => Box::new(HeuristicAgent::new(weights)),
        AgentKind::Random => match seed {
            Some(seed) => Box::new(RandomAgent::seeded(seed)),
            None => Box::new(RandomAgent::from_entropy()),
        },
    }
}
