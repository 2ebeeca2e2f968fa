/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Context, Result};

/// Represents a single cell on the `8x8` board.
///
/// Internally encoded as `col + row * 8`, so the cells are numbered as follows:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
///
/// Columns are written as letters and rows as numbers starting at 1,
/// so the cell at `(col, row) = (1, 2)` is `b3`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// Number of cells along each side of the board.
    pub const SIZE: u8 = 8;

    /// Number of cells on the board.
    pub const COUNT: usize = (Self::SIZE * Self::SIZE) as usize;

    pub const MIN: u8 = 0;

    pub const MAX: u8 = Self::COUNT as u8 - 1;

    /// An iterator over all cells, starting at `a1` and ending at `h8`.
    ///
    /// # Example
    /// ```
    /// # use qorki::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap().to_string(), "a1");
    /// assert_eq!(iter.last().unwrap().to_string(), "h8");
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// An iterator over the 32 dark cells, the only ones pieces start on.
    #[inline(always)]
    pub fn dark() -> impl Iterator<Item = Self> {
        Self::iter().filter(Self::is_dark)
    }

    /// Creates a new [`Square`] from a column and a row, both of which must be `[0, 8)`.
    ///
    /// # Example
    /// ```
    /// # use qorki::Square;
    /// let b3 = Square::new(1, 2).unwrap();
    /// assert_eq!(b3.to_string(), "b3");
    /// assert!(Square::new(8, 0).is_err());
    /// ```
    #[inline(always)]
    pub fn new(col: u8, row: u8) -> Result<Self> {
        if col >= Self::SIZE || row >= Self::SIZE {
            bail!(
                "Invalid Square: column and row must be between [0, {}). Got ({col}, {row})",
                Self::SIZE
            );
        }

        Ok(Self::new_unchecked(col, row))
    }

    /// Creates a new [`Square`] from a column and a row, without bounds checking.
    #[inline(always)]
    pub const fn new_unchecked(col: u8, row: u8) -> Self {
        debug_assert!(col < Self::SIZE && row < Self::SIZE);
        Self(col + row * Self::SIZE)
    }

    /// Creates a new [`Square`] from the provided index value, which must be `[0, 63]`.
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index > Self::MAX as usize {
            bail!(
                "Invalid index for Square: Must be between [{}, {}]. Got {index}",
                Self::MIN,
                Self::MAX
            );
        }

        Ok(Self(index as u8))
    }

    /// Creates a new [`Square`] from the provided index value, without bounds checking.
    #[inline(always)]
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Index must be between [0,64)");
        Self(index as u8)
    }

    /// Column of this [`Square`], `0` being the `a` column.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.0 % Self::SIZE
    }

    /// Row of this [`Square`], `0` being the first row.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.0 / Self::SIZE
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn inner(&self) -> u8 {
        self.0
    }

    /// Returns `true` if `col + row` is odd.
    ///
    /// # Example
    /// ```
    /// # use qorki::Square;
    /// assert!(Square::new(1, 0).unwrap().is_dark());
    /// assert!(!Square::new(0, 0).unwrap().is_dark());
    /// ```
    #[inline(always)]
    pub const fn is_dark(&self) -> bool {
        (self.col() + self.row()) % 2 == 1
    }

    /// Attempt to offset this [`Square`] by a column and row delta.
    ///
    /// Returns [`None`] if the result would leave the board.
    ///
    /// # Example
    /// ```
    /// # use qorki::Square;
    /// let c4: Square = "c4".parse().unwrap();
    /// assert_eq!(c4.offset(1, 1), "d5".parse().ok());
    /// assert_eq!(c4.offset(-3, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, col_delta: i8, row_delta: i8) -> Option<Self> {
        let col = self.col() as i8 + col_delta;
        let row = self.row() as i8 + row_delta;
        let size = Self::SIZE as i8;

        if col < 0 || col >= size || row < 0 || row >= size {
            return None;
        }

        Some(Self::new_unchecked(col as u8, row as u8))
    }

    #[inline(always)]
    pub const fn distance_cols(&self, other: Self) -> u8 {
        self.col().abs_diff(other.col())
    }

    #[inline(always)]
    pub const fn distance_rows(&self, other: Self) -> u8 {
        self.row().abs_diff(other.row())
    }

    /// Returns `true` if `self` and `other` are distinct and share a diagonal.
    #[inline(always)]
    pub const fn is_diagonal_to(&self, other: Self) -> bool {
        self.0 != other.0 && self.distance_cols(other) == self.distance_rows(other)
    }

    /// Returns the unit step `(col, row)` leading from `self` toward `other`.
    #[inline(always)]
    pub const fn direction_to(&self, other: Self) -> (i8, i8) {
        let col = (other.col() as i8 - self.col() as i8).signum();
        let row = (other.row() as i8 - self.row() as i8).signum();
        (col, row)
    }

    /// Parses a [`Square`] from either algebraic (`b3`) or numeric (`1,2`) form.
    ///
    /// # Example
    /// ```
    /// # use qorki::Square;
    /// assert_eq!(Square::from_uci("b3").unwrap(), Square::from_uci("1,2").unwrap());
    /// assert!(Square::from_uci("z0").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let square = square.trim();

        if let Some((col, row)) = square.split_once(',') {
            let col = col
                .trim()
                .parse()
                .with_context(|| format!("Invalid column in {square:?}"))?;
            let row = row
                .trim()
                .parse()
                .with_context(|| format!("Invalid row in {square:?}"))?;
            return Self::new(col, row);
        }

        let bytes = square.as_bytes();
        if bytes.len() != 2 {
            bail!("Invalid Square string: expected a cell like \"b3\" or \"1,2\". Got {square:?}");
        }

        let col = bytes[0].to_ascii_lowercase();
        let row = bytes[1];
        if !(b'a'..=b'h').contains(&col) || !(b'1'..=b'8').contains(&row) {
            bail!("Invalid Square string: columns are a-h and rows are 1-8. Got {square:?}");
        }

        Ok(Self::new_unchecked(col - b'a', row - b'1'))
    }

    /// Converts this [`Square`] to its algebraic form.
    #[inline(always)]
    pub fn to_uci(self) -> String {
        format!("{}{}", (b'a' + self.col()) as char, self.row() + 1)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_uci`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_uci(value)
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = anyhow::Error;
    /// Converts a `(col, row)` pair.
    #[inline(always)]
    fn try_from((col, row): (u8, u8)) -> Result<Self, Self::Error> {
        Self::new(col, row)
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;
    #[inline(always)]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value as usize)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// A [`Square`] can be used to index into an array of 64 elements.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_uci().fmt(f)
    }
}

impl fmt::Debug for Square {
    /// Displays the algebraic form along with the `(col, row)` pair.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.to_uci(), self.col(), self.row())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        assert_eq!(Square::new(0, 0).unwrap().to_string(), "a1");
        assert_eq!(Square::new(7, 0).unwrap().to_string(), "h1");
        assert_eq!(Square::new(0, 7).unwrap().to_string(), "a8");
        assert_eq!(Square::new(7, 7).unwrap().to_string(), "h8");
    }

    #[test]
    fn test_parsing() {
        assert_eq!(Square::try_from("b3").unwrap(), Square::new(1, 2).unwrap());
        assert_eq!(Square::try_from("B3").unwrap(), Square::new(1, 2).unwrap());
        assert_eq!(Square::try_from("1,2").unwrap(), Square::new(1, 2).unwrap());
        assert_eq!(Square::try_from(" 7 , 7 ").unwrap(), Square::new(7, 7).unwrap());
        assert_eq!(Square::try_from(63u8).unwrap().to_string(), "h8");

        assert!(Square::try_from("").is_err());
        assert!(Square::try_from("a").is_err());
        assert!(Square::try_from("i1").is_err());
        assert!(Square::try_from("a9").is_err());
        assert!(Square::try_from("8,0").is_err());
        assert!(Square::try_from("-1,0").is_err());
        assert!(Square::try_from(64u8).is_err());
    }

    #[test]
    fn test_offsets_stay_on_board() {
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 1), None);
        assert_eq!(a1.offset(1, -1), None);
        assert_eq!(a1.offset(7, 7), Square::new(7, 7).ok());

        let h8 = Square::new(7, 7).unwrap();
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(-1, -1), Square::new(6, 6).ok());
    }

    #[test]
    fn test_geometry() {
        let b3 = Square::new(1, 2).unwrap();
        let d5 = Square::new(3, 4).unwrap();
        assert!(b3.is_diagonal_to(d5));
        assert!(!b3.is_diagonal_to(b3));
        assert_eq!(b3.direction_to(d5), (1, 1));
        assert_eq!(d5.direction_to(b3), (-1, -1));
    }

    #[test]
    fn test_dark_squares() {
        assert_eq!(Square::dark().count(), 32);
        assert!(Square::dark().all(|sq| (sq.col() + sq.row()) % 2 == 1));
    }

    #[test]
    fn test_indexing() {
        let mut cells = [0; Square::COUNT];
        cells[Square::new(3, 4).unwrap()] = u8::MAX;
        assert_eq!(cells[35], u8::MAX);
    }
}
