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

use crate::{color::Color, position::Position, role::Role};

/// A piece with [`Color`] and [`Role`].
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Piece {
    pub color: Color,
    pub role: Role,
}

impl Piece {
    /// Gets the English letter for the piece, uppercase for White and
    /// lowercase for Black.
    pub fn char(self) -> char {
        self.color.fold(self.role.upper_char(), self.role.char())
    }

    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }
}

/// A [`Piece`] standing on the board.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Placement {
    pub piece: Piece,
    pub position: Position,
    /// Set on the first relocation and never cleared. Pawns lose their
    /// double step once it is set.
    pub moved: bool,
}

impl Placement {
    pub fn new(piece: Piece, position: Position) -> Placement {
        Placement {
            piece,
            position,
            moved: false,
        }
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.piece.color
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.piece.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char() {
        assert_eq!(Color::White.queen().char(), 'Q');
        assert_eq!(Color::Black.knight().char(), 'n');
        assert_eq!(Piece::from_char('k'), Some(Color::Black.king()));
        assert_eq!(Piece::from_char('P'), Some(Color::White.pawn()));
        assert_eq!(Piece::from_char('x'), None);
    }
}
