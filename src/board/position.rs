/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Index, str::FromStr};

use anyhow::{bail, Result};

use super::{Piece, PieceKind, Player, Square};

/// The `8x8` grid of cells, each holding at most one [`Piece`].
///
/// A [`Board`] knows nothing about whose turn it is. For that, see [`crate::Game`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Piece on each cell, indexed by [`Square`].
    mailbox: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`].
    ///
    /// # Example
    /// ```
    /// # use qorki::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_placement(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            mailbox: [None; Square::COUNT],
        }
    }

    /// Creates the starting [`Board`]: twelve Men per player on the dark cells of their three home rows.
    ///
    /// # Example
    /// ```
    /// # use qorki::{Board, Player, PLACEMENT_STARTPOS};
    /// let board = Board::starting();
    /// assert_eq!(board.count(Player::Red), 12);
    /// assert_eq!(board.count(Player::Blue), 12);
    /// assert!(PLACEMENT_STARTPOS.starts_with(&board.to_placement()));
    /// ```
    pub fn starting() -> Self {
        let mut board = Self::new();

        for player in Player::all() {
            let man = Piece::new(player, PieceKind::Man);
            for square in Square::dark().filter(|sq| player.home_rows().contains(&sq.row())) {
                board.place(man, square);
            }
        }

        board
    }

    /// Constructs a [`Board`] from a placement string, ignoring anything after the first space.
    ///
    /// Rows are listed from the eighth down to the first, separated by `/`.
    /// Pieces are written as `r`, `R`, `b`, or `B`, and runs of empty cells as a digit.
    ///
    /// # Example
    /// ```
    /// # use qorki::{Board, Piece, Square};
    /// let board = Board::from_placement("8/8/8/8/8/8/8/R7").unwrap();
    /// assert_eq!(board.piece_at(Square::new(0, 0).unwrap()), Some(Piece::RED_KING));
    /// assert!(Board::from_placement("8/8/8").is_err());
    /// ```
    pub fn from_placement(placement: &str) -> Result<Self> {
        let mut board = Self::new();

        let placements = placement.split_whitespace().next().unwrap_or_default();

        if placements.matches('/').count() != Square::SIZE as usize - 1 {
            bail!("Placement must describe all 8 rows. Got {placements:?}");
        }

        // Rows are written top-down, so reverse them to start from the first row
        for (row, cells) in placements.split('/').rev().enumerate() {
            let row = row as u8;
            let mut col = 0;

            for c in cells.chars() {
                if let Some(empty) = c.to_digit(10) {
                    if empty == 0 {
                        bail!("Placement digits must be between [1,8]. Got {c:?} in row {}", row + 1);
                    }
                    col += empty as u8;
                } else {
                    let piece = Piece::from_uci(c)?;
                    if col >= Square::SIZE {
                        bail!("Placement row {} describes more than 8 cells", row + 1);
                    }
                    board.place(piece, Square::new_unchecked(col, row));
                    col += 1;
                }

                if col > Square::SIZE {
                    bail!("Placement row {} describes more than 8 cells", row + 1);
                }
            }

            if col != Square::SIZE {
                bail!("Placement row {} describes {col} cells instead of 8", row + 1);
            }
        }

        Ok(board)
    }

    /// Generates the placement string of this [`Board`].
    pub fn to_placement(&self) -> String {
        let mut rows: [String; Square::SIZE as usize] = Default::default();

        for (row, placements) in rows.iter_mut().enumerate() {
            let mut empty_cells = 0;

            for col in 0..Square::SIZE {
                if let Some(piece) = self.piece_at(Square::new_unchecked(col, row as u8)) {
                    if empty_cells != 0 {
                        *placements += &empty_cells.to_string();
                        empty_cells = 0;
                    }
                    *placements += piece.as_ref();
                } else {
                    empty_cells += 1;
                }
            }

            if empty_cells != 0 {
                *placements += &empty_cells.to_string();
            }
        }
        rows.reverse();

        rows.join("/")
    }

    /// Returns `true` if there is a piece at the given [`Square`].
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.mailbox[square.index()].is_some()
    }

    /// Fetches the [`Piece`] at the given [`Square`], if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Fetches the owner of the piece at the given [`Square`], if there is one.
    #[inline(always)]
    pub fn owner_at(&self, square: Square) -> Option<Player> {
        self.piece_at(square).map(|piece| piece.owner())
    }

    /// Places `piece` on `square`, replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.mailbox[square] = Some(piece);
    }

    /// Empties `square`.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.mailbox[square] = None;
    }

    /// Removes and returns the piece on `square`, if any.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.mailbox[square].take()
    }

    /// Moves whatever occupies `from` onto `to`, leaving `from` empty.
    ///
    /// Returns the moved piece, or [`None`] if `from` was empty.
    #[inline(always)]
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.take(from)?;
        self.place(piece, to);
        Some(piece)
    }

    /// Number of pieces `player` has on the board.
    ///
    /// # Example
    /// ```
    /// # use qorki::{Board, Player};
    /// let board = Board::from_placement("8/8/8/8/8/8/1b6/R1r5").unwrap();
    /// assert_eq!(board.count(Player::Red), 2);
    /// assert_eq!(board.count(Player::Blue), 1);
    /// ```
    #[inline(always)]
    pub fn count(&self, player: Player) -> usize {
        self.iter_for(player).count()
    }

    /// Iterates over every occupied cell, starting at `a1`.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Iterates over every cell occupied by one of `player`'s pieces.
    #[inline(always)]
    pub fn iter_for(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.owner() == player)
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::starting()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_placement(s)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board = String::with_capacity(198);

        for row in (0..Square::SIZE).rev() {
            board += &format!("{}| ", row + 1);

            for col in 0..Square::SIZE {
                let occupant = self
                    .piece_at(Square::new_unchecked(col, row))
                    .map(|piece| piece.char())
                    .unwrap_or('.');

                board.push(occupant);
                board.push(' ');
            }

            board += "\n"
        }
        board += " +";
        for _ in 0..Square::SIZE {
            board += "--";
        }
        board += "\n   ";
        for col in 0..Square::SIZE {
            board.push((b'a' + col) as char);
            board.push(' ');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_placement())
    }
}
