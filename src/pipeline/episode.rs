//! Episode runner - one full game between two participants

use crate::{
    Error, Result,
    ports::{Learner, Observer},
    tictactoe::{BoardState, Outcome},
};

/// Play one game on `board` with `p1` moving first.
///
/// See [`play_observed`].
pub fn play(p1: &mut dyn Learner, p2: &mut dyn Learner, board: &mut BoardState) -> Result<Outcome> {
    play_observed(p1, p2, board, 0, &mut [])
}

/// Play one game on `board`, notifying `observers` of every ply.
///
/// Turns alternate strictly p1, p2, p1, ... while the board is not terminal.
/// After each ply the resulting hash is handed to both players, and once the
/// game is over both players learn from the outcome, in seat order.
///
/// If the game is abandoned with an error, both players drop the states they
/// recorded for it.
///
/// # Errors
///
/// Returns an error if both players hold the same symbol, if a player picks
/// an occupied cell, or if a player or observer fails.
pub fn play_observed(
    p1: &mut dyn Learner,
    p2: &mut dyn Learner,
    board: &mut BoardState,
    game_num: usize,
    observers: &mut [Box<dyn Observer>],
) -> Result<Outcome> {
    if p1.symbol() == p2.symbol() {
        return Err(Error::InvalidConfiguration {
            message: format!(
                "{} and {} both play {}",
                p1.name(),
                p2.name(),
                p1.symbol()
            ),
        });
    }

    let played = run_episode(p1, p2, board, game_num, observers);
    if let Err(err) = &played {
        log::debug!("game {game_num} abandoned: {err}");
        p1.reset_episode();
        p2.reset_episode();
    }
    played
}

fn run_episode(
    p1: &mut dyn Learner,
    p2: &mut dyn Learner,
    board: &mut BoardState,
    game_num: usize,
    observers: &mut [Box<dyn Observer>],
) -> Result<Outcome> {
    for observer in observers.iter_mut() {
        observer.on_game_start(game_num)?;
    }

    let mut ply: usize = 0;
    while !board.evaluate_outcome(false).is_terminal() {
        let mover: &mut dyn Learner = if ply.is_multiple_of(2) {
            &mut *p1
        } else {
            &mut *p2
        };

        let position = mover.select_move(board)?;
        if !board.is_empty(position.row(), position.col()) {
            return Err(Error::InvalidMove {
                row: position.row(),
                col: position.col(),
            });
        }

        let player = mover.symbol();
        board.place_at(position, player.to_cell());

        for observer in observers.iter_mut() {
            observer.on_move(game_num, ply, board, position, player, mover.move_values())?;
        }

        let hash = board.state_hash();
        p1.record_visited(hash);
        p2.record_visited(hash);
        ply += 1;
    }

    let outcome = board.evaluate_outcome(false);
    p1.learn(outcome)?;
    p2.learn(outcome)?;
    log::debug!("game {game_num} finished after {ply} plies: {outcome}");

    for observer in observers.iter_mut() {
        observer.on_game_end(game_num, outcome)?;
    }

    Ok(outcome)
}
