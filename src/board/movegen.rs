/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use super::{Board, Piece, Player, Square, MAX_DESTINATIONS};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_DESTINATIONS`] cells.
///
/// Order is irrelevant.
pub type Destinations = ArrayVec<Square, MAX_DESTINATIONS>;

/// Computes every cell the piece on `from` may legally land on.
///
/// * Men step one cell diagonally forward onto an empty cell, or jump an adjacent opponent's piece
///   onto the empty cell directly beyond it. Men never travel backward.
/// * Kings slide along each diagonal across empty cells. The first occupied cell closes the ray;
///   if it holds an opponent's piece and the cell right after it is empty, that cell is a capture landing.
///
/// If `continuation_only` is set, only capture landings are returned.
/// An empty `from` yields no destinations.
///
/// # Example
/// ```
/// # use qorki::{legal_destinations, Board, Square};
/// let board = Board::starting();
/// let b3 = Square::new(1, 2).unwrap();
/// let mut dests = legal_destinations(&board, b3, false);
/// dests.sort();
/// assert_eq!(dests.as_slice(), [Square::new(0, 3).unwrap(), Square::new(2, 3).unwrap()]);
/// assert!(legal_destinations(&board, b3, true).is_empty());
/// ```
pub fn legal_destinations(board: &Board, from: Square, continuation_only: bool) -> Destinations {
    let mut destinations = Destinations::new();

    let Some(piece) = board.piece_at(from) else {
        return destinations;
    };

    if piece.is_king() {
        king_destinations(board, from, piece, continuation_only, &mut destinations);
    } else {
        man_destinations(board, from, piece, continuation_only, &mut destinations);
    }

    destinations
}

/// Returns `true` if any of `player`'s pieces has at least one legal destination.
pub fn has_legal_move(board: &Board, player: Player) -> bool {
    board
        .iter_for(player)
        .any(|(square, _)| !legal_destinations(board, square, false).is_empty())
}

fn man_destinations(
    board: &Board,
    from: Square,
    man: Piece,
    continuation_only: bool,
    destinations: &mut Destinations,
) {
    for &(dc, dr) in man.directions() {
        let Some(adjacent) = from.offset(dc, dr) else {
            continue;
        };

        match board.piece_at(adjacent) {
            None => {
                if !continuation_only {
                    destinations.push(adjacent);
                }
            }
            Some(other) => {
                if other.is_opponent_of(man) {
                    if let Some(landing) = adjacent.offset(dc, dr) {
                        if !board.has(landing) {
                            destinations.push(landing);
                        }
                    }
                }
            }
        }
    }
}

fn king_destinations(
    board: &Board,
    from: Square,
    king: Piece,
    continuation_only: bool,
    destinations: &mut Destinations,
) {
    for &(dc, dr) in king.directions() {
        let mut current = from;

        while let Some(next) = current.offset(dc, dr) {
            match board.piece_at(next) {
                None => {
                    if !continuation_only {
                        destinations.push(next);
                    }
                    current = next;
                }
                Some(other) => {
                    // Only a single piece may be jumped, and only onto the cell right behind it
                    if other.is_opponent_of(king) {
                        if let Some(landing) = next.offset(dc, dr) {
                            if !board.has(landing) {
                                destinations.push(landing);
                            }
                        }
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn sorted(mut dests: Destinations) -> Vec<Square> {
        dests.sort();
        dests.to_vec()
    }

    fn setup(placements: &[(Piece, &str)]) -> Board {
        let mut board = Board::new();
        for &(piece, square) in placements {
            board.place(piece, sq(square));
        }
        board
    }

    #[test]
    fn test_empty_origin() {
        let board = Board::starting();
        assert!(legal_destinations(&board, sq("d4"), false).is_empty());
        assert!(legal_destinations(&board, sq("d4"), true).is_empty());
    }

    #[test]
    fn test_man_steps() {
        let board = Board::starting();
        assert_eq!(
            sorted(legal_destinations(&board, sq("b3"), false)),
            [sq("a4"), sq("c4")]
        );
        // Blocked by its own pieces
        assert!(legal_destinations(&board, sq("b1"), false).is_empty());
        assert_eq!(
            sorted(legal_destinations(&board, sq("a6"), false)),
            [sq("b5")]
        );
    }

    #[test]
    fn test_man_capture() {
        let board = setup(&[(Piece::RED_MAN, "b3"), (Piece::BLUE_MAN, "c4")]);
        assert_eq!(
            sorted(legal_destinations(&board, sq("b3"), false)),
            [sq("a4"), sq("d5")]
        );
        assert_eq!(
            sorted(legal_destinations(&board, sq("b3"), true)),
            [sq("d5")]
        );
    }

    #[test]
    fn test_man_never_moves_backward() {
        let board = setup(&[
            (Piece::RED_MAN, "d5"),
            (Piece::BLUE_MAN, "c4"),
            (Piece::BLUE_MAN, "e4"),
        ]);
        assert_eq!(
            sorted(legal_destinations(&board, sq("d5"), false)),
            [sq("c6"), sq("e6")]
        );
        assert!(legal_destinations(&board, sq("d5"), true).is_empty());

        // Blue moves toward the first row
        let board = setup(&[(Piece::BLUE_MAN, "d5"), (Piece::RED_MAN, "c6")]);
        assert_eq!(
            sorted(legal_destinations(&board, sq("d5"), false)),
            [sq("c4"), sq("e4")]
        );
    }

    #[test]
    fn test_man_capture_needs_empty_landing() {
        let board = setup(&[
            (Piece::RED_MAN, "b3"),
            (Piece::BLUE_MAN, "c4"),
            (Piece::BLUE_MAN, "d5"),
        ]);
        assert!(legal_destinations(&board, sq("b3"), true).is_empty());

        // Landing would be off the board
        let board = setup(&[(Piece::RED_MAN, "f7"), (Piece::BLUE_MAN, "g8")]);
        assert!(legal_destinations(&board, sq("f7"), true).is_empty());
    }

    #[test]
    fn test_man_cannot_capture_friends() {
        let board = setup(&[(Piece::RED_MAN, "b3"), (Piece::RED_MAN, "c4")]);
        assert_eq!(
            sorted(legal_destinations(&board, sq("b3"), false)),
            [sq("a4")]
        );
    }

    #[test]
    fn test_king_long_capture() {
        let board = setup(&[(Piece::RED_KING, "a1"), (Piece::BLUE_MAN, "d4")]);
        assert_eq!(
            sorted(legal_destinations(&board, sq("a1"), false)),
            [sq("b2"), sq("c3"), sq("e5")]
        );
        assert_eq!(
            sorted(legal_destinations(&board, sq("a1"), true)),
            [sq("e5")]
        );
    }

    #[test]
    fn test_king_cannot_jump_two_pieces() {
        let board = setup(&[
            (Piece::RED_KING, "a1"),
            (Piece::BLUE_MAN, "d4"),
            (Piece::BLUE_MAN, "e5"),
        ]);
        assert_eq!(
            sorted(legal_destinations(&board, sq("a1"), false)),
            [sq("b2"), sq("c3")]
        );
        assert!(legal_destinations(&board, sq("a1"), true).is_empty());
    }

    #[test]
    fn test_king_lands_only_right_behind_capture() {
        let board = setup(&[(Piece::BLUE_KING, "h8"), (Piece::RED_MAN, "e5")]);
        assert_eq!(
            sorted(legal_destinations(&board, sq("h8"), false)),
            [sq("d4"), sq("f6"), sq("g7")]
        );
    }

    #[test]
    fn test_king_blocked_by_friend() {
        let board = setup(&[(Piece::RED_KING, "a1"), (Piece::RED_MAN, "c3")]);
        assert_eq!(
            sorted(legal_destinations(&board, sq("a1"), false)),
            [sq("b2")]
        );
    }

    #[test]
    fn test_king_moves_backward() {
        let board = setup(&[(Piece::RED_KING, "b8")]);
        assert_eq!(legal_destinations(&board, sq("b8"), false).len(), 7);
    }

    #[test]
    fn test_king_max_destinations() {
        let board = setup(&[(Piece::RED_KING, "d5")]);
        let dests = legal_destinations(&board, sq("d5"), false);
        assert_eq!(dests.len(), MAX_DESTINATIONS);
        assert!(dests.iter().all(|&to| sq("d5").is_diagonal_to(to)));

        // No cell does better, so 12 would not be enough
        let most = Square::iter()
            .map(|from| {
                let mut board = Board::new();
                board.place(Piece::RED_KING, from);
                legal_destinations(&board, from, false).len()
            })
            .max();
        assert_eq!(most, Some(MAX_DESTINATIONS));
    }

    #[test]
    fn test_side_has_moves() {
        let board = Board::starting();
        assert!(has_legal_move(&board, Player::Red));
        assert!(has_legal_move(&board, Player::Blue));

        // A lone Blue Man on the first row has nowhere to go
        let board = setup(&[(Piece::BLUE_MAN, "b1"), (Piece::RED_MAN, "h2")]);
        assert!(!has_legal_move(&board, Player::Blue));
        assert!(has_legal_move(&board, Player::Red));
        assert!(!has_legal_move(&Board::new(), Player::Red));
    }
}
