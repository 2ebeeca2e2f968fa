/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{has_legal_move, Board, Player};

/// Whether a game is still being played, and if not, who won.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum GameOutcome {
    #[default]
    Ongoing,
    Won(Player),
}

impl GameOutcome {
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Won(_))
    }

    #[inline(always)]
    pub const fn winner(&self) -> Option<Player> {
        match self {
            Self::Ongoing => None,
            Self::Won(player) => Some(*player),
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing => write!(f, "ongoing"),
            Self::Won(player) => write!(f, "{player:#} wins"),
        }
    }
}

/// Decides whether `side_to_move` has lost on `board`.
///
/// A player with no pieces left loses, whoever is on move. Otherwise, the side to move loses
/// if none of its pieces can move or capture.
///
/// # Example
/// ```
/// # use qorki::{outcome, Board, GameOutcome, Player};
/// assert_eq!(outcome(&Board::starting(), Player::Red), GameOutcome::Ongoing);
///
/// let board = Board::from_placement("8/8/8/8/8/8/8/R7").unwrap();
/// assert_eq!(outcome(&board, Player::Red), GameOutcome::Won(Player::Red));
/// assert_eq!(outcome(&board, Player::Blue), GameOutcome::Won(Player::Red));
/// ```
pub fn outcome(board: &Board, side_to_move: Player) -> GameOutcome {
    for player in Player::all() {
        if board.count(player) == 0 {
            return GameOutcome::Won(player.opponent());
        }
    }

    if !has_legal_move(board, side_to_move) {
        return GameOutcome::Won(side_to_move.opponent());
    }

    GameOutcome::Ongoing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_is_ongoing() {
        let board = Board::starting();
        assert_eq!(outcome(&board, Player::Red), GameOutcome::Ongoing);
        assert_eq!(outcome(&board, Player::Blue), GameOutcome::Ongoing);
        assert!(!GameOutcome::Ongoing.is_over());
    }

    #[test]
    fn test_no_pieces_loses() {
        let board = Board::from_placement("8/8/8/8/8/8/8/7b").unwrap();
        assert_eq!(outcome(&board, Player::Red), GameOutcome::Won(Player::Blue));
        assert_eq!(outcome(&board, Player::Blue), GameOutcome::Won(Player::Blue));
    }

    #[test]
    fn test_stuck_side_to_move_loses() {
        // Blue Man on the first row cannot move, Red Man on h2 can
        let board = Board::from_placement("8/8/8/8/8/8/7r/1b6").unwrap();
        assert_eq!(outcome(&board, Player::Blue), GameOutcome::Won(Player::Red));
        assert_eq!(outcome(&board, Player::Red), GameOutcome::Ongoing);

        let won = outcome(&board, Player::Blue);
        assert!(won.is_over());
        assert_eq!(won.winner(), Some(Player::Red));
        assert_eq!(won.to_string(), "red wins");
    }
}
