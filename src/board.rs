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

//! Piece placement and the geometric queries move generation is built on.
//!
//! # Examples
//!
//! ```
//! use warden::{Board, Color, Position, Probe};
//!
//! let board = Board::new();
//! let d1 = Position::new(3, 0);
//!
//! // The queen is boxed in by her own pieces.
//! assert!(board.ray_scan(d1, Color::White, 0, 1).is_empty());
//!
//! // A pawn on e6 cannot step onto the occupied e7 ...
//! let e6 = Position::new(4, 5);
//! assert_eq!(board.step_probe(e6, Color::White, 0, 1, Probe::FreeOnly), None);
//! // ... but would capture on d7 and f7.
//! let d7 = Position::new(3, 6);
//! assert_eq!(board.step_probe(e6, Color::White, -1, 1, Probe::ThreatOnly), Some(d7));
//! ```

use std::{
    error::Error,
    fmt::{self, Write as _},
};

use tracing::trace;

use crate::{
    attacks::{self, Targets},
    color::{ByColor, Color},
    position::Position,
    request::MoveRequest,
    role::Role,
    setup::{Setup, SetupError},
    types::{Piece, Placement},
};

/// Capture policy of [`Board::step_probe()`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Probe {
    /// Empty squares and enemy pieces.
    Normal,
    /// Enemy pieces only. Pawn captures.
    ThreatOnly,
    /// Empty squares only. Pawn advances.
    FreeOnly,
}

/// A broken board invariant. Indicates a bug, never a user error.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InvariantViolation {
    /// More than one piece on the same square.
    Overlap(Position),
    /// A piece outside of the board.
    OutOfBounds(Position),
    /// The king index disagrees with the king on the board.
    KingIndex(Color),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InvariantViolation::Overlap(pos) => write!(f, "more than one piece on {}", pos),
            InvariantViolation::OutOfBounds(pos) => write!(f, "piece outside of the board on {}", pos),
            InvariantViolation::KingIndex(color) => write!(f, "{} king index out of sync", color),
        }
    }
}

impl Error for InvariantViolation {}

/// Square grid with the pieces on it.
///
/// The board owns its pieces and an index of king positions that is
/// updated whenever a king moves, so that check detection never has to
/// search for the king.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    size: u8,
    placements: Vec<Placement>,
    kings: ByColor<Option<Position>>,
}

impl Board {
    /// Number of files and ranks of a standard chess board.
    pub const STANDARD_SIZE: u8 = 8;

    /// Largest supported board. Files are named by the letters `a` to `z`.
    pub const MAX_SIZE: u8 = 26;

    /// The standard starting position.
    pub fn new() -> Board {
        Board::standard()
    }

    fn standard() -> Board {
        let mut board = Board::empty(Board::STANDARD_SIZE);
        for (piece, pos) in Setup::standard().pieces {
            board.place(piece, pos);
        }
        board
    }

    pub(crate) fn empty(size: u8) -> Board {
        Board {
            size,
            placements: Vec::new(),
            kings: ByColor::default(),
        }
    }

    /// Builds a board from a custom setup.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the setup has a bad size, pieces off the
    /// board or on the same square, or not exactly one king per color.
    pub fn from_setup(setup: &Setup) -> Result<Board, SetupError> {
        setup.validate()?;
        let mut board = Board::empty(setup.size);
        for &(piece, pos) in &setup.pieces {
            board.place(piece, pos);
        }
        Ok(board)
    }

    /// Adds a piece to a square known to be empty. Pawns away from their
    /// starting rank count as moved.
    fn place(&mut self, piece: Piece, pos: Position) {
        let mut placement = Placement::new(piece, pos);
        if piece.role == Role::Pawn {
            let start = piece.color.fold(1, self.size.saturating_sub(2));
            placement.moved = pos.rank() != start;
        }
        self.placements.push(placement);
        if piece.role == Role::King {
            self.record_king_position(piece.color, pos);
        }
    }

    /// Number of files, which is also the number of ranks.
    #[inline]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Tests if `pos` lies on this board.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.file() < self.size && pos.rank() < self.size
    }

    /// Shifts `pos` by `(dx, dy)`, unless that leaves the board.
    #[inline]
    pub fn offset(&self, pos: Position, dx: i8, dy: i8) -> Option<Position> {
        pos.offset(dx, dy).filter(|&to| self.contains(to))
    }

    /// All pieces on the board, in no particular order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn occupant(&self, pos: Position) -> Option<&Placement> {
        self.placements.iter().find(|p| p.position == pos)
    }

    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.occupant(pos).map(|p| p.piece)
    }

    pub fn color_at(&self, pos: Position) -> Option<Color> {
        self.occupant(pos).map(|p| p.color())
    }

    /// Gets the square of the king of `color`, as recorded in the king index.
    #[inline]
    pub fn king(&self, color: Color) -> Option<Position> {
        self.kings.copied(color)
    }

    /// Walks from `start` in direction `(dx, dy)` until the edge of the
    /// board or the first occupied square. Empty squares are included. The
    /// occupied square is included only if it holds a piece of the other
    /// color.
    ///
    /// Directions are expected to be nonzero.
    pub fn ray_scan(&self, start: Position, own: Color, dx: i8, dy: i8) -> Targets {
        debug_assert!(dx != 0 || dy != 0, "ray without direction");
        let mut targets = Targets::new();
        let mut current = start;
        while let Some(next) = self.offset(current, dx, dy) {
            match self.color_at(next) {
                None => targets.push(next),
                Some(color) => {
                    if color != own {
                        targets.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
        targets
    }

    /// Examines the single square `start + (dx, dy)`.
    ///
    /// Squares off the board and squares held by `own` pieces are never
    /// returned. [`Probe::FreeOnly`] also rejects enemy pieces and
    /// [`Probe::ThreatOnly`] rejects empty squares.
    pub fn step_probe(
        &self,
        start: Position,
        own: Color,
        dx: i8,
        dy: i8,
        probe: Probe,
    ) -> Option<Position> {
        let target = self.offset(start, dx, dy)?;
        match (self.color_at(target), probe) {
            (Some(color), _) if color == own => None,
            (Some(_), Probe::FreeOnly) => None,
            (None, Probe::ThreatOnly) => None,
            _ => Some(target),
        }
    }

    /// Squares the piece on `pos` could capture on. Empty for empty squares.
    pub fn threatened_squares(&self, pos: Position) -> Targets {
        self.occupant(pos)
            .map_or_else(Targets::new, |placement| attacks::threatened_squares(self, placement))
    }

    /// Squares the piece on `pos` may relocate to, not considering the
    /// safety of its own king. Empty for empty squares.
    pub fn moveable_squares(&self, pos: Position) -> Targets {
        self.occupant(pos)
            .map_or_else(Targets::new, |placement| attacks::moveable_squares(self, placement))
    }

    /// Tests if any piece of color `by` threatens `pos`.
    pub fn is_threatened(&self, pos: Position, by: Color) -> bool {
        self.placements
            .iter()
            .filter(|p| p.color() == by)
            .any(|p| attacks::threatened_squares(self, p).contains(&pos))
    }

    /// Executes a move without any legality checks: removes the piece on the
    /// destination, if any, and relocates the piece from the source. Returns
    /// the captured piece.
    ///
    /// Does nothing if the source square is empty or equal to the
    /// destination.
    pub fn apply_move(&mut self, request: MoveRequest) -> Option<Piece> {
        let MoveRequest { from, to } = request;
        if from == to || self.occupant(from).is_none() {
            return None;
        }

        let captured = self
            .placements
            .iter()
            .position(|p| p.position == to)
            .map(|idx| self.placements.swap_remove(idx).piece);
        if let Some(captured) = captured {
            if captured.role == Role::King {
                *self.kings.get_mut(captured.color) = None;
            }
        }

        let mut king_moved = None;
        if let Some(moving) = self.placements.iter_mut().find(|p| p.position == from) {
            moving.position = to;
            moving.moved = true;
            if moving.role() == Role::King {
                king_moved = Some(moving.color());
            }
        }
        if let Some(color) = king_moved {
            self.record_king_position(color, to);
        }

        trace!(%request, ?captured, "applied move");
        captured
    }

    /// Plays `request` on a copy of the board, leaving this board untouched.
    pub fn simulate(&self, request: MoveRequest) -> Board {
        let mut board = self.clone();
        board.apply_move(request);
        board
    }

    /// Updates the king index after the king of `color` arrived on `pos`.
    pub fn record_king_position(&mut self, color: Color, pos: Position) {
        *self.kings.get_mut(color) = Some(pos);
    }

    /// Copies the pieces in reading order: ranks from top to bottom, files
    /// from left to right.
    pub fn snapshot(&self) -> Snapshot {
        let mut pieces: Vec<(Piece, Position)> =
            self.placements.iter().map(|p| (p.piece, p.position)).collect();
        pieces.sort_by_key(|&(_, pos)| (std::cmp::Reverse(pos.rank()), pos.file()));
        Snapshot {
            size: self.size,
            pieces,
        }
    }

    /// Renders the piece placement part of a FEN, with runs of empty squares
    /// as decimal numbers.
    ///
    /// ```
    /// use warden::Board;
    ///
    /// assert_eq!(Board::new().placement(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    /// ```
    pub fn placement(&self) -> String {
        let mut text = String::new();
        for rank in (0..self.size).rev() {
            let mut empty = 0;
            for file in 0..self.size {
                match self.piece_at(Position::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            let _ = write!(text, "{}", empty);
                            empty = 0;
                        }
                        text.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                let _ = write!(text, "{}", empty);
            }
            if rank > 0 {
                text.push('/');
            }
        }
        text
    }

    /// Checks that no two pieces share a square, all pieces are on the
    /// board, and the king index matches the kings on the board.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        for (i, placement) in self.placements.iter().enumerate() {
            if !self.contains(placement.position) {
                return Err(InvariantViolation::OutOfBounds(placement.position));
            }
            if self.placements[i + 1..]
                .iter()
                .any(|other| other.position == placement.position)
            {
                return Err(InvariantViolation::Overlap(placement.position));
            }
        }

        for color in Color::ALL {
            let mut kings = self
                .placements
                .iter()
                .filter(|p| p.piece == color.king())
                .map(|p| p.position);
            let actual = kings.next();
            if kings.next().is_some() || actual != self.king(color) {
                return Err(InvariantViolation::KingIndex(color));
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..self.size).rev() {
            for file in 0..self.size {
                f.write_char(
                    self.piece_at(Position::new(file, rank))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if file + 1 < self.size { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

/// An independent copy of the pieces on a board, for rendering.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snapshot {
    /// Number of files and ranks.
    pub size: u8,
    /// Pieces in reading order, see [`Board::snapshot()`].
    pub pieces: Vec<(Piece, Position)>,
}

impl Snapshot {
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.pieces
            .iter()
            .find(|&&(_, p)| p == pos)
            .map(|&(piece, _)| piece)
    }
}
