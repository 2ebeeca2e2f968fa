/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::Square;

/// One of the two players.
///
/// Red starts on the low rows, advances toward the eighth row, and moves first, so [`Player`] defaults to [`Player::Red`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Player {
    #[default]
    Red,
    Blue,
}

impl Player {
    /// Number of players.
    pub const COUNT: usize = 2;

    /// Both players, starting with Red.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Red, Self::Blue]
    }

    /// Creates a new [`Player`] from a set of bits, which must be `[0,1]`.
    ///
    /// # Example
    /// ```
    /// # use qorki::Player;
    /// assert_eq!(Player::from_bits(1).unwrap(), Player::Blue);
    /// assert!(Player::from_bits(2).is_err());
    /// ```
    #[inline(always)]
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            0 => Ok(Self::Red),
            1 => Ok(Self::Blue),
            _ => bail!("Invalid bits for Player: Bits must be between [0,1]. Got {bits}."),
        }
    }

    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        *self as u8
    }

    /// Useful for indexing into per-player arrays.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the other [`Player`].
    ///
    /// # Example
    /// ```
    /// # use qorki::Player;
    /// assert_eq!(Player::Red.opponent(), Player::Blue);
    /// assert_eq!(Player::Blue.opponent(), Player::Red);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }

    /// Row delta of a single step toward the opponent's side.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::Red => 1,
            Self::Blue => -1,
        }
    }

    /// The opponent's back row, where this player's Men are promoted.
    #[inline(always)]
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Self::Red => Square::SIZE - 1,
            Self::Blue => 0,
        }
    }

    /// Rows this player's Men occupy at the start of a game.
    #[inline(always)]
    pub const fn home_rows(&self) -> [u8; 3] {
        match self {
            Self::Red => [0, 1, 2],
            Self::Blue => [5, 6, 7],
        }
    }

    /// Parses a [`Player`] from its initial.
    #[inline(always)]
    pub fn from_uci(player: char) -> Result<Self> {
        match player.to_ascii_lowercase() {
            'r' => Ok(Self::Red),
            'b' => Ok(Self::Blue),
            _ => bail!("Invalid char for Player: must be 'r' or 'b'. Got {player:?}"),
        }
    }

    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Red => 'r',
            Self::Blue => 'b',
        }
    }

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "r",
            Self::Blue => "b",
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
        }
    }
}

impl Not for Player {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

/// The rank of a piece.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    /// Moves and captures one step forward.
    #[default]
    Man,

    /// Moves along any diagonal, and captures by landing just past an opponent's piece.
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 2;

    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Man, Self::King]
    }

    #[inline(always)]
    pub fn from_bits(bits: u8) -> Result<Self> {
        match bits {
            0 => Ok(Self::Man),
            1 => Ok(Self::King),
            _ => bail!("Invalid bits for PieceKind: Bits must be between [0,1]. Got {bits}."),
        }
    }

    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        *self as u8
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    #[inline(always)]
    pub fn from_uci(kind: char) -> Result<Self> {
        match kind.to_ascii_lowercase() {
            'm' => Ok(Self::Man),
            'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: must be 'm' or 'k'. Got {kind:?}"),
        }
    }

    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self {
            Self::Man => 'm',
            Self::King => 'k',
        }
    }

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Man => "m",
            Self::King => "k",
        }
    }

    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Man => "man",
            Self::King => "king",
        }
    }
}

/// A piece on the board: an owner and a rank.
///
/// Internally encoded using the following bit pattern:
/// ```text
///     000000 0 0
///        |   | |
///        |   | +- Represents the PieceKind. `0` for Man, `1` for King.
///        |   +- Represents the Player. `0` for Red, `1` for Blue.
///        +- Unused.
/// ```
///
/// As text, the owner's initial is used, uppercased for Kings: `r`, `R`, `b`, `B`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece(u8);

impl Piece {
    pub const RED_MAN: Self = Self::new(Player::Red, PieceKind::Man);
    pub const RED_KING: Self = Self::new(Player::Red, PieceKind::King);
    pub const BLUE_MAN: Self = Self::new(Player::Blue, PieceKind::Man);
    pub const BLUE_KING: Self = Self::new(Player::Blue, PieceKind::King);

    /// Number of unique piece variants.
    pub const COUNT: usize = Player::COUNT * PieceKind::COUNT;

    /// Start index of the owner bit.
    const OWNER_BITS: u8 = 1;

    /// Mask for the kind bit.
    const KIND_MASK: u8 = 0b0000_0001;

    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::RED_MAN,
            Self::RED_KING,
            Self::BLUE_MAN,
            Self::BLUE_KING,
        ]
    }

    /// Creates a new [`Piece`] from the given [`Player`] and [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use qorki::{Piece, Player, PieceKind};
    /// let blue_king = Piece::new(Player::Blue, PieceKind::King);
    /// assert_eq!(blue_king.to_string(), "B");
    /// ```
    #[inline(always)]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self(owner.bits() << Self::OWNER_BITS | kind.bits())
    }

    /// Decodes a [`Piece`] from its bit pattern, which must be `[0,3]`.
    #[inline(always)]
    pub fn from_bits(bits: u8) -> Result<Self> {
        if bits as usize >= Self::COUNT {
            bail!(
                "Invalid bits for Piece: Bits must be between [0,{}]. Got {bits}.",
                Self::COUNT - 1
            );
        }

        Ok(Self(bits))
    }

    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn owner(&self) -> Player {
        match self.0 >> Self::OWNER_BITS {
            0 => Player::Red,
            _ => Player::Blue,
        }
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        match self.0 & Self::KIND_MASK {
            0 => PieceKind::Man,
            _ => PieceKind::King,
        }
    }

    #[inline(always)]
    pub const fn is_man(&self) -> bool {
        matches!(self.kind(), PieceKind::Man)
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind(), PieceKind::King)
    }

    /// Returns `true` if this piece and `other` belong to different players.
    #[inline(always)]
    pub const fn is_opponent_of(&self, other: Self) -> bool {
        self.owner().bits() != other.owner().bits()
    }

    /// Returns this piece with its rank raised to King.
    ///
    /// # Example
    /// ```
    /// # use qorki::{Piece, PieceKind};
    /// assert_eq!(Piece::RED_MAN.promoted(), Piece::RED_KING);
    /// assert_eq!(Piece::RED_KING.promoted().kind(), PieceKind::King);
    /// ```
    #[inline(always)]
    pub const fn promoted(self) -> Self {
        Self::new(self.owner(), PieceKind::King)
    }

    /// Returns the row-delta directions this piece may travel along.
    ///
    /// Men only travel forward; Kings travel along all four diagonals.
    #[inline(always)]
    pub fn directions(&self) -> &'static [(i8, i8)] {
        const RED_FORWARD: [(i8, i8); 2] = [(-1, 1), (1, 1)];
        const BLUE_FORWARD: [(i8, i8); 2] = [(-1, -1), (1, -1)];
        const DIAGONALS: [(i8, i8); 4] = [(-1, 1), (1, 1), (-1, -1), (1, -1)];

        match (self.kind(), self.owner()) {
            (PieceKind::King, _) => &DIAGONALS,
            (PieceKind::Man, Player::Red) => &RED_FORWARD,
            (PieceKind::Man, Player::Blue) => &BLUE_FORWARD,
        }
    }

    /// Parses a [`Piece`] from its placement character.
    ///
    /// # Example
    /// ```
    /// # use qorki::{Piece, Player, PieceKind};
    /// let piece = Piece::from_uci('R').unwrap();
    /// assert_eq!(piece.owner(), Player::Red);
    /// assert_eq!(piece.kind(), PieceKind::King);
    /// assert!(Piece::from_uci('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_uci(piece: char) -> Result<Self> {
        let owner = Player::from_uci(piece)?;
        let kind = if piece.is_ascii_uppercase() {
            PieceKind::King
        } else {
            PieceKind::Man
        };

        Ok(Self::new(owner, kind))
    }

    #[inline(always)]
    pub const fn to_uci(&self) -> char {
        match self.kind() {
            PieceKind::Man => self.owner().to_uci(),
            PieceKind::King => self.owner().to_uci().to_ascii_uppercase(),
        }
    }

    /// Alias for [`Piece::to_uci`].
    #[inline(always)]
    pub const fn char(&self) -> char {
        self.to_uci()
    }

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match (self.owner(), self.kind()) {
            (Player::Red, PieceKind::Man) => "r",
            (Player::Red, PieceKind::King) => "R",
            (Player::Blue, PieceKind::Man) => "b",
            (Player::Blue, PieceKind::King) => "B",
        }
    }

    /// Human-readable name, such as `"blue king"`.
    #[inline(always)]
    pub fn name(&self) -> String {
        format!("{} {}", self.owner().name(), self.kind().name())
    }
}

macro_rules! impl_common_traits {
    ($type:ty) => {
        impl<T> Index<$type> for [T; <$type>::COUNT] {
            type Output = T;
            /// [`$type`] can be used to index into a list of [`<$type>::COUNT`] elements.
            #[inline(always)]
            fn index(&self, index: $type) -> &Self::Output {
                &self[index.index()]
            }
        }

        impl<T> IndexMut<$type> for [T; <$type>::COUNT] {
            #[inline(always)]
            fn index_mut(&mut self, index: $type) -> &mut Self::Output {
                &mut self[index.index()]
            }
        }

        impl FromStr for $type {
            type Err = anyhow::Error;
            /// Does the same as [`Self::from_uci`], but only if `s` is one character in length.
            #[inline(always)]
            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::from_uci(c),
                    _ => bail!(
                        "Invalid str for {}: Must be a str of len 1. Got {s:?}",
                        stringify!($type)
                    ),
                }
            }
        }

        impl AsRef<str> for $type {
            #[inline(always)]
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if f.alternate() {
                    write!(f, "{}", self.name())
                } else {
                    write!(f, "{}", self.to_uci())
                }
            }
        }

        impl fmt::Debug for $type {
            /// Debug formatting displays a $type as its human-readable name and index value.
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "\"{}\" ({})", self.name(), self.index())
            }
        }
    };
}

impl_common_traits!(Piece);
impl_common_traits!(PieceKind);
impl_common_traits!(Player);
