// This file is part of the warden library.
// Copyright (C) 2026 The warden developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{
    error::Error,
    fmt::{self, Write as _},
    str::FromStr,
};

use crate::board::Board;

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePositionError;

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParsePositionError {}

/// A square on the board, identified by file (column) and rank (row), both
/// counted from zero.
///
/// Positions know nothing about the size of the board they are used on.
/// They can address every square of the largest supported board
/// ([`Board::MAX_SIZE`]); use [`Board::contains()`] to check that a position
/// lies on a particular board.
///
/// # Examples
///
/// ```
/// use warden::Position;
///
/// let e4 = Position::new(4, 3);
/// assert_eq!(e4.to_string(), "e4");
/// assert_eq!("e4".parse::<Position>()?, e4);
/// # Ok::<_, warden::ParsePositionError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position {
    file: u8,
    rank: u8,
}

impl Position {
    /// Creates a position from zero-based file and rank.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if a coordinate is not below
    /// [`Board::MAX_SIZE`].
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Position {
        debug_assert!(file < Board::MAX_SIZE && rank < Board::MAX_SIZE);
        Position { file, rank }
    }

    /// Creates a position from signed coordinates, or `None` if a
    /// coordinate is negative or not below [`Board::MAX_SIZE`].
    #[inline]
    pub fn from_coords(file: i16, rank: i16) -> Option<Position> {
        let max = i16::from(Board::MAX_SIZE);
        if (0..max).contains(&file) && (0..max).contains(&rank) {
            Some(Position::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Parses a square name like `e4`.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePositionError`] if the text is not a file letter
    /// followed by a 1-based rank number, or if the square would lie beyond
    /// the largest supported board.
    pub fn from_ascii(ascii: &[u8]) -> Result<Position, ParsePositionError> {
        let (&letter, digits) = ascii.split_first().ok_or(ParsePositionError)?;
        if !letter.is_ascii_lowercase() || digits.first() == Some(&b'0') {
            return Err(ParsePositionError);
        }
        let rank = btoi::btou::<u8>(digits).map_err(|_| ParsePositionError)?;
        if rank == 0 {
            return Err(ParsePositionError);
        }
        Position::from_coords(i16::from(letter - b'a'), i16::from(rank) - 1)
            .ok_or(ParsePositionError)
    }

    /// Like [`Position::from_ascii()`], but also requires the square to lie
    /// on a board with `size` files and ranks.
    ///
    /// ```
    /// use warden::Position;
    ///
    /// assert!(Position::from_ascii_within(b"h8", 8).is_ok());
    /// assert!(Position::from_ascii_within(b"a9", 8).is_err());
    /// assert!(Position::from_ascii(b"a9").is_ok());
    /// ```
    pub fn from_ascii_within(ascii: &[u8], size: u8) -> Result<Position, ParsePositionError> {
        let pos = Position::from_ascii(ascii)?;
        if pos.file < size && pos.rank < size {
            Ok(pos)
        } else {
            Err(ParsePositionError)
        }
    }

    /// Zero-based file (column).
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank (row).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Gets the position shifted by `(dx, dy)`, if it still lies on the
    /// largest supported board.
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Position> {
        Position::from_coords(
            i16::from(self.file) + i16::from(dx),
            i16::from(self.rank) + i16::from(dy),
        )
    }

    pub fn file_char(self) -> char {
        char::from(b'a' + self.file)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Position, ParsePositionError> {
        Position::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.file_char())?;
        write!(f, "{}", u32::from(self.rank) + 1)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.file_char().to_ascii_uppercase())?;
        write!(f, "{}", u32::from(self.rank) + 1)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Position {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct PositionVisitor;

        impl serde::de::Visitor<'_> for PositionVisitor {
            type Value = Position;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(PositionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for file in 0..Board::MAX_SIZE {
            for rank in 0..Board::MAX_SIZE {
                let pos = Position::new(file, rank);
                let name = pos.to_string();
                assert_eq!(name.parse::<Position>(), Ok(pos));
                assert_eq!(name.parse::<Position>().map(|p| p.to_string()), Ok(name));
            }
        }
    }

    #[test]
    fn test_invalid() {
        for name in [
            "", "e", "4", "e0", "e04", "E4", "e-1", "e+4", "é4", "e27", "{1", "e4 ", "e256",
        ] {
            assert_eq!(name.parse::<Position>(), Err(ParsePositionError), "{:?}", name);
        }
    }

    #[test]
    fn test_offset() {
        let a1 = Position::new(0, 0);
        assert_eq!(a1.offset(1, 2), Some(Position::new(1, 2)));
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, 26), None);
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", Position::new(7, 7)), "H8");
    }
}
