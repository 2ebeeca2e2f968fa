/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Player, Square};

/// Reasons a selection or a move is refused by [`crate::Game`].
///
/// A refused action never changes the board, the scores, or the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// Tried to select a cell with nothing on it.
    #[error("there is no piece on {0}")]
    EmptySquare(Square),

    /// Tried to select a piece belonging to the player who is not on move.
    #[error("the piece on {square} belongs to {owner:#}, but it is {side_to_move:#}'s turn")]
    NotYourPiece {
        square: Square,
        owner: Player,
        side_to_move: Player,
    },

    /// Tried to pick another piece, or let go of the current one, while a capture chain is in progress.
    #[error("the piece on {locked} must continue capturing")]
    ChainInProgress { locked: Square },

    /// Tried to move without a selected piece.
    #[error("no piece is selected")]
    NothingSelected,

    /// Tried to move the selected piece somewhere it cannot go.
    #[error("the piece on {from} cannot move to {to}")]
    IllegalDestination { from: Square, to: Square },
}

/// Result type alias for rule-checked game actions.
pub type RuleResult<T> = Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let b3 = Square::new(1, 2).unwrap();
        let c4 = Square::new(2, 3).unwrap();

        assert_eq!(RuleError::EmptySquare(b3).to_string(), "there is no piece on b3");
        assert_eq!(
            RuleError::NotYourPiece {
                square: b3,
                owner: Player::Blue,
                side_to_move: Player::Red
            }
            .to_string(),
            "the piece on b3 belongs to blue, but it is red's turn"
        );
        assert_eq!(
            RuleError::IllegalDestination { from: b3, to: c4 }.to_string(),
            "the piece on b3 cannot move to c4"
        );
    }
}
