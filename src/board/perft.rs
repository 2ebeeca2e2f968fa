/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Game, Move};

/// Perform a perft at the specified depth, collecting only data about the number of possible game states (nodes).
///
/// Every landing counts as one ply, so each capture in a chain is its own ply.
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
///
/// # Example
/// ```
/// # use qorki::{perft, Game};
/// let game = Game::default();
/// assert_eq!(perft(&game, 1), 7);
/// assert_eq!(perft(&game, 2), 49);
/// ```
#[inline(always)]
pub fn perft(game: &Game, depth: usize) -> u64 {
    perft_generic::<true>(game, depth)
}

/// Perform a perft at the specified depth, returning the number of nodes reachable after each move available at the root.
///
/// The moves are listed in the order they are generated.
pub fn splitperft(game: &Game, depth: usize) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    game.legal_moves()
        .into_iter()
        .map(|mv| (mv, perft(&play_generated(game, mv), depth - 1)))
        .collect()
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
pub fn perft_generic<const BULK: bool>(game: &Game, depth: usize) -> u64 {
    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && depth == 1 {
        return game.legal_moves().len() as u64;
    }
    // Recursion limit; return 1, since we're fathoming this node.
    else if depth == 0 {
        return 1;
    }

    game.legal_moves().into_iter().fold(0, |nodes, mv| {
        nodes + perft_generic::<BULK>(&play_generated(game, mv), depth - 1)
    })
}

/// Plays a move taken from [`Game::legal_moves`].
///
/// # Panics
///
/// If the controller refuses the move, since the generator and the controller disagree.
fn play_generated(game: &Game, mv: Move) -> Game {
    game.with_move_played(mv)
        .unwrap_or_else(|err| panic!("Generated move {mv} was refused: {err}"))
}
