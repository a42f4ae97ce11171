use tracing::{debug, warn};

use crate::{
    adjacency::has_any_move,
    agent::Agent,
    board::Board,
    error::GameError,
    history::TurnRecord,
    moves::legal_turns,
    player::PlayerId,
};

/// Plays one turn for `player`: gridlock check, choice, move, build, then the
/// history entry when `record` is set. A turn that fails leaves the board untouched.
pub fn play_turn(
    board: &mut Board,
    player: PlayerId,
    agent: &mut dyn Agent,
    record: bool,
) -> Result<TurnRecord, GameError> {
    if !has_any_move(board, player) {
        warn!(%player, "no legal turns");
        return Err(GameError::NoLegalTurn { player });
    }

    // A worker that can step can always build on the space it left.
    let legal = legal_turns(board, player);
    debug_assert!(!legal.is_empty());

    let turn = agent.choose_turn(board, player, &legal)?;
    if !legal.contains(&turn) {
        return Err(GameError::IllegalTurn(turn));
    }
    let from = board
        .worker_coord(turn.worker)
        .ok_or(GameError::IllegalTurn(turn))?;

    board.move_worker(turn.worker, Some(from), turn.to);
    board.build(turn.build);

    let turn_record = TurnRecord::new(turn.worker, from, turn.to, turn.build);
    if record {
        board.save(turn_record);
    }

    debug!(%player, agent = %agent.kind(), record = %turn_record, "played turn");
    Ok(turn_record)
}
