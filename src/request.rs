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

//! Move requests as typed by a player, e.g. `e2 e4`.

use std::{error::Error, fmt, str::FromStr};

use crate::position::{ParsePositionError, Position};

/// Error when parsing an invalid move request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseMoveRequestError;

impl fmt::Display for ParseMoveRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid move request")
    }
}

impl Error for ParseMoveRequestError {}

impl From<ParsePositionError> for ParseMoveRequestError {
    fn from(_: ParsePositionError) -> ParseMoveRequestError {
        ParseMoveRequestError
    }
}

/// A request to move the piece on `from` to `to`.
///
/// A request is only syntactically valid. Whether it describes a legal move
/// is decided by [`Game::play()`](crate::Game::play).
///
/// # Examples
///
/// ```
/// use warden::{MoveRequest, Position};
///
/// let request: MoveRequest = "g1 f3".parse()?;
/// assert_eq!(request.from, Position::new(6, 0));
/// assert_eq!(request.to, Position::new(5, 2));
/// assert_eq!(request.to_string(), "g1 f3");
///
/// assert!("g1f3".parse::<MoveRequest>().is_err());
/// assert!("g1 f3 e5".parse::<MoveRequest>().is_err());
/// # Ok::<_, warden::ParseMoveRequestError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
}

impl MoveRequest {
    pub const fn new(from: Position, to: Position) -> MoveRequest {
        MoveRequest { from, to }
    }

    /// Parses exactly two whitespace separated square names.
    ///
    /// # Errors
    ///
    /// Returns [`ParseMoveRequestError`] if there are not exactly two
    /// tokens, or if either is not a valid square name.
    pub fn from_ascii(ascii: &[u8]) -> Result<MoveRequest, ParseMoveRequestError> {
        let (from, to) = split_tokens(ascii)?;
        Ok(MoveRequest {
            from: Position::from_ascii(from)?,
            to: Position::from_ascii(to)?,
        })
    }

    /// Like [`MoveRequest::from_ascii()`], but also requires both squares to
    /// lie on a board with `size` files and ranks.
    ///
    /// ```
    /// use warden::MoveRequest;
    ///
    /// assert!(MoveRequest::from_ascii_within(b"a1 a9", 8).is_err());
    /// assert!(MoveRequest::from_ascii_within(b"a1 a8", 8).is_ok());
    /// ```
    pub fn from_ascii_within(
        ascii: &[u8],
        size: u8,
    ) -> Result<MoveRequest, ParseMoveRequestError> {
        let (from, to) = split_tokens(ascii)?;
        Ok(MoveRequest {
            from: Position::from_ascii_within(from, size)?,
            to: Position::from_ascii_within(to, size)?,
        })
    }
}

fn split_tokens(ascii: &[u8]) -> Result<(&[u8], &[u8]), ParseMoveRequestError> {
    let mut tokens = ascii
        .split(|ch| ch.is_ascii_whitespace())
        .filter(|token| !token.is_empty());
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(from), Some(to), None) => Ok((from, to)),
        _ => Err(ParseMoveRequestError),
    }
}

impl FromStr for MoveRequest {
    type Err = ParseMoveRequestError;

    fn from_str(s: &str) -> Result<MoveRequest, ParseMoveRequestError> {
        MoveRequest::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.from, self.to)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MoveRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MoveRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MoveRequestVisitor;

        impl serde::de::Visitor<'_> for MoveRequestVisitor {
            type Value = MoveRequest;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("move request like \"e2 e4\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(MoveRequestVisitor)
    }
}
