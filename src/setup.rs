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

//! Initial piece layouts.
//!
//! # Examples
//!
//! Parse the piece placement part of a FEN and build a board from it:
//!
//! ```
//! use warden::{Board, Color, Position, Setup};
//!
//! let setup: Setup = "4k3/8/8/8/8/8/8/R3K3".parse()?;
//! let board = Board::from_setup(&setup)?;
//! assert_eq!(board.piece_at(Position::new(0, 0)), Some(Color::White.rook()));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Setups are validated before use:
//!
//! ```
//! use warden::{Board, Setup, SetupErrorKinds};
//!
//! let setup: Setup = "8/8/8/8/8/8/8/R3K3".parse()?;
//! let err = Board::from_setup(&setup).unwrap_err();
//! assert_eq!(err.kinds(), SetupErrorKinds::MISSING_KING);
//! # Ok::<_, warden::ParsePlacementError>(())
//! ```

use std::{error::Error, fmt, str::FromStr};

use bitflags::bitflags;

use crate::{board::Board, color::Color, position::Position, role::Role, types::Piece};

const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// A not necessarily valid board layout.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Setup {
    /// Number of files and ranks.
    pub size: u8,
    /// Pieces and their squares.
    pub pieces: Vec<(Piece, Position)>,
}

impl Setup {
    /// An empty board with `size` files and ranks.
    pub fn empty(size: u8) -> Setup {
        Setup {
            size,
            pieces: Vec::new(),
        }
    }

    /// The standard chess starting position.
    pub fn standard() -> Setup {
        let mut setup = Setup::empty(Board::STANDARD_SIZE);
        for color in Color::ALL {
            let back = color.fold(0, Board::STANDARD_SIZE - 1);
            let pawns = color.fold(1, Board::STANDARD_SIZE - 2);
            for (file, role) in (0..).zip(BACK_RANK) {
                setup.push(role.of(color), Position::new(file, back));
                setup.push(color.pawn(), Position::new(file, pawns));
            }
        }
        setup
    }

    pub fn push(&mut self, piece: Piece, pos: Position) -> &mut Setup {
        self.pieces.push((piece, pos));
        self
    }

    /// Parses the piece placement part of a FEN, like
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    ///
    /// Ranks are listed from top to bottom. The number of ranks determines
    /// the board size, and every rank must describe exactly that many
    /// squares. Runs of empty squares may have more than one digit on
    /// large boards.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePlacementError`] if the text is malformed.
    pub fn from_ascii(ascii: &[u8]) -> Result<Setup, ParsePlacementError> {
        let rows: Vec<&[u8]> = ascii.split(|&ch| ch == b'/').collect();
        let size = u8::try_from(rows.len())
            .ok()
            .filter(|&size| size <= Board::MAX_SIZE)
            .ok_or(ParsePlacementError)?;

        let mut setup = Setup::empty(size);
        for (rank, row) in (0..size).rev().zip(rows) {
            let mut file = 0usize;
            let mut rest = row;
            while let Some(&ch) = rest.first() {
                if ch.is_ascii_digit() {
                    let len = rest.iter().take_while(|ch| ch.is_ascii_digit()).count();
                    let run = btoi::btou::<u8>(&rest[..len]).map_err(|_| ParsePlacementError)?;
                    if run == 0 {
                        return Err(ParsePlacementError);
                    }
                    file += usize::from(run);
                    rest = &rest[len..];
                } else {
                    let piece = Piece::from_char(char::from(ch)).ok_or(ParsePlacementError)?;
                    if file >= usize::from(size) {
                        return Err(ParsePlacementError);
                    }
                    setup.push(piece, Position::new(file as u8, rank));
                    file += 1;
                    rest = &rest[1..];
                }
            }
            if file != usize::from(size) {
                return Err(ParsePlacementError);
            }
        }

        Ok(setup)
    }

    /// Checks the setup for problems that would break board invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] with every problem found.
    pub fn validate(&self) -> Result<(), SetupError> {
        let mut kinds = SetupErrorKinds::empty();

        if self.size == 0 || self.size > Board::MAX_SIZE {
            kinds |= SetupErrorKinds::BAD_SIZE;
        }

        for (i, &(_, pos)) in self.pieces.iter().enumerate() {
            if pos.file() >= self.size || pos.rank() >= self.size {
                kinds |= SetupErrorKinds::OUT_OF_BOUNDS;
            }
            if self.pieces[i + 1..].iter().any(|&(_, other)| other == pos) {
                kinds |= SetupErrorKinds::DUPLICATE_SQUARE;
            }
        }

        for color in Color::ALL {
            let kings = self
                .pieces
                .iter()
                .filter(|&&(piece, _)| piece == color.king())
                .count();
            if kings == 0 {
                kinds |= SetupErrorKinds::MISSING_KING;
            } else if kings > 1 {
                kinds |= SetupErrorKinds::TOO_MANY_KINGS;
            }
        }

        SetupError::from_kinds(kinds)
    }
}

impl Default for Setup {
    fn default() -> Setup {
        Setup::standard()
    }
}

impl FromStr for Setup {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Setup, ParsePlacementError> {
        Setup::from_ascii(s.as_bytes())
    }
}

/// Error when parsing a syntactically invalid piece placement.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePlacementError;

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid piece placement")
    }
}

impl Error for ParsePlacementError {}

bitflags! {
    /// Reasons for a setup to be rejected.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct SetupErrorKinds: u32 {
        /// Board size is zero or larger than [`Board::MAX_SIZE`].
        const BAD_SIZE = 1 << 0;
        /// A piece lies outside of the board.
        const OUT_OF_BOUNDS = 1 << 1;
        /// More than one piece on the same square.
        const DUPLICATE_SQUARE = 1 << 2;
        /// A side has no king.
        const MISSING_KING = 1 << 3;
        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 4;
        /// The side not to move is in check.
        const OPPOSITE_CHECK = 1 << 5;
    }
}

const DESCRIPTIONS: [(SetupErrorKinds, &str); 6] = [
    (SetupErrorKinds::BAD_SIZE, "bad board size"),
    (SetupErrorKinds::OUT_OF_BOUNDS, "piece out of bounds"),
    (SetupErrorKinds::DUPLICATE_SQUARE, "more than one piece on a square"),
    (SetupErrorKinds::MISSING_KING, "missing king"),
    (SetupErrorKinds::TOO_MANY_KINGS, "too many kings"),
    (SetupErrorKinds::OPPOSITE_CHECK, "side not to move in check"),
];

/// Error when a setup cannot be used to start a game.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetupError {
    kinds: SetupErrorKinds,
}

impl SetupError {
    pub(crate) fn from_kinds(kinds: SetupErrorKinds) -> Result<(), SetupError> {
        if kinds.is_empty() {
            Ok(())
        } else {
            Err(SetupError { kinds })
        }
    }

    /// Every reason the setup was rejected for.
    pub fn kinds(&self) -> SetupErrorKinds {
        self.kinds
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal setup: ")?;
        let mut reasons = DESCRIPTIONS
            .iter()
            .filter(|&&(kind, _)| self.kinds.contains(kind))
            .map(|&(_, reason)| reason);
        if let Some(first) = reasons.next() {
            f.write_str(first)?;
        }
        for reason in reasons {
            write!(f, ", {}", reason)?;
        }
        Ok(())
    }
}

impl Error for SetupError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(name: &str) -> Position {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_standard() {
        let setup = Setup::standard();
        assert_eq!(setup.pieces.len(), 32);
        assert_eq!(setup.validate(), Ok(()));
        assert!(setup.pieces.contains(&(Color::White.king(), pos("e1"))));
        assert!(setup.pieces.contains(&(Color::Black.king(), pos("e8"))));
        assert!(setup.pieces.contains(&(Color::Black.queen(), pos("d8"))));
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".parse::<Setup>().map(|s| s.pieces.len()),
            Ok(32)
        );
    }

    #[test]
    fn test_parse_large_board() {
        let setup: Setup = "k9/10/10/10/10/10/10/10/10/9K".parse().expect("valid placement");
        assert_eq!(setup.size, 10);
        assert_eq!(
            setup.pieces,
            [
                (Color::Black.king(), pos("a10")),
                (Color::White.king(), pos("j1")),
            ]
        );
    }

    #[test]
    fn test_parse_invalid() {
        for text in [
            "",
            "8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "7/8/8/8/8/8/8/8",
            "4k4/8/8/8/8/8/8/8",
            "0k7/8/8/8/8/8/8/8",
            "4x3/8/8/8/8/8/8/8",
            "4k3/8/8/8/8/8/8/8/",
        ] {
            assert_eq!(text.parse::<Setup>(), Err(ParsePlacementError), "{:?}", text);
        }
    }

    #[test]
    fn test_validate() {
        let mut setup = Setup::empty(8);
        assert_eq!(
            setup.validate().map_err(|err| err.kinds()),
            Err(SetupErrorKinds::MISSING_KING)
        );

        setup.push(Color::White.king(), pos("e1"));
        setup.push(Color::Black.king(), pos("e8"));
        assert_eq!(setup.validate(), Ok(()));

        setup.push(Color::White.king(), pos("e1"));
        setup.push(Color::Black.rook(), pos("a9"));
        assert_eq!(
            setup.validate().map_err(|err| err.kinds()),
            Err(SetupErrorKinds::OUT_OF_BOUNDS
                | SetupErrorKinds::DUPLICATE_SQUARE
                | SetupErrorKinds::TOO_MANY_KINGS)
        );
    }

    #[test]
    fn test_bad_size() {
        let setup = Setup::empty(0);
        let err = setup.validate().unwrap_err();
        assert!(err.kinds().contains(SetupErrorKinds::BAD_SIZE));
        assert_eq!(err.to_string(), "illegal setup: bad board size, missing king");
    }
}
