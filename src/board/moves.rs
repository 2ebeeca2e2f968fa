/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{Board, Square, MAX_NUM_MOVES};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// A single landing of a piece: where it starts and where it ends.
///
/// Internally encoded using the following bit pattern:
/// ```text
///     0000 000000 000000
///      |     |      |
///      |     |      +- Source square of the move.
///      |     +- Target square of the move.
///      +- Unused.
/// ```
///
/// A capture chain is played as several [`Move`]s by the same player.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Move(u16);

impl Move {
    /// Mask for the source ("from") bits.
    const SRC_MASK: u16 = 0b0000_0000_0011_1111;
    /// Mask for the destination ("to") bits.
    const DST_MASK: u16 = 0b0000_1111_1100_0000;
    /// Start index of destination bits.
    const DST_BITS: u16 = 6;

    /// Creates a new [`Move`] from the given [`Square`]s.
    ///
    /// # Example
    /// ```
    /// # use qorki::{Move, Square};
    /// let b3c4 = Move::new(Square::new(1, 2).unwrap(), Square::new(2, 3).unwrap());
    /// assert_eq!(b3c4.to_string(), "b3c4");
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self((to.inner() as u16) << Self::DST_BITS | from.inner() as u16)
    }

    /// Fetches the source (or "from") part of this [`Move`], as a [`Square`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        Square::from_index_unchecked((self.0 & Self::SRC_MASK) as usize)
    }

    /// Fetches the destination (or "to") part of this [`Move`], as a [`Square`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        Square::from_index_unchecked(((self.0 & Self::DST_MASK) >> Self::DST_BITS) as usize)
    }

    /// Parses a [`Move`] from two concatenated cells, like `b3d5`.
    ///
    /// The cells may also be separated by whitespace or a `-`.
    pub fn from_uci(uci: &str) -> Result<Self> {
        let uci = uci.trim();

        let (from, to) = if let Some(split) = uci.split_once(|c: char| c.is_whitespace() || c == '-') {
            split
        } else if uci.len() == 4 && uci.is_ascii() {
            uci.split_at(2)
        } else {
            bail!("Invalid move string: expected two cells like \"b3c4\". Got {uci:?}");
        };

        Ok(Self::new(from.trim().parse()?, to.trim().parse()?))
    }

    #[inline(always)]
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from(), self.to())
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Move {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from(), self.to())
    }
}

impl<T: AsRef<str>> PartialEq<T> for Move {
    #[inline(always)]
    fn eq(&self, other: &T) -> bool {
        self.to_uci().eq(other.as_ref())
    }
}

/// What happened to the board when a [`Move`] was made.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct AppliedMove {
    /// Cell of the opponent's piece that was removed, if any.
    pub captured: Option<Square>,

    /// Whether the moving Man became a King.
    pub promoted: bool,
}

impl AppliedMove {
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl Board {
    /// Finds the cell of the piece that `mv` would jump over, if any.
    ///
    /// This is the first occupied cell strictly between the two ends of `mv`.
    /// A Man's step and a King's quiet slide capture nothing, however far they travel.
    ///
    /// # Example
    /// ```
    /// # use qorki::Board;
    /// let board = Board::from_placement("8/8/8/8/8/8/8/R6b").unwrap();
    /// assert_eq!(board.captured_by("a1c3".parse().unwrap()), None);
    ///
    /// let board = Board::from_placement("8/8/8/8/3b4/8/8/R7").unwrap();
    /// assert_eq!(board.captured_by("a1e5".parse().unwrap()), "d4".parse().ok());
    /// ```
    pub fn captured_by(&self, mv: Move) -> Option<Square> {
        let (from, to) = (mv.from(), mv.to());
        let (dc, dr) = from.direction_to(to);

        let mut current = from.offset(dc, dr)?;
        while current != to {
            if self.has(current) {
                return Some(current);
            }
            current = current.offset(dc, dr)?;
        }

        None
    }

    /// Applies `mv` to the board, without checking whether it is legal.
    ///
    /// For a capture, the first occupied cell between `from` and `to` is emptied.
    /// Only one piece is ever removed by a single [`Move`].
    /// A Man that lands on its promotion row becomes a King.
    ///
    /// # Example
    /// ```
    /// # use qorki::{Board, Move, Piece};
    /// let mut board = Board::from_placement("8/8/8/8/8/2b5/1r6/8").unwrap();
    /// let applied = board.make_move("b2d4".parse().unwrap());
    /// assert_eq!(applied.captured, "c3".parse().ok());
    /// assert!(!applied.promoted);
    /// assert_eq!(board.to_placement(), "8/8/8/8/3r4/8/8/8");
    /// ```
    pub fn make_move(&mut self, mv: Move) -> AppliedMove {
        let (from, to) = (mv.from(), mv.to());
        debug_assert!(self.has(from), "Cannot make move {mv} from an empty cell");
        debug_assert!(from.is_diagonal_to(to), "Move {mv} is not diagonal");

        let mut applied = AppliedMove {
            captured: self.captured_by(mv),
            promoted: false,
        };

        if let Some(captured) = applied.captured {
            self.clear(captured);
        }

        let Some(piece) = self.relocate(from, to) else {
            return applied;
        };

        if piece.is_man() && to.row() == piece.owner().promotion_row() {
            self.place(piece.promoted(), to);
            applied.promoted = true;
        }

        applied
    }
}
