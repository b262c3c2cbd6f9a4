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

//! Turn order and move legality.
//!
//! A move request is checked against a copy of the board. Only when every
//! check passes is the move committed to the live board and the turn passed
//! to the other side.
//!
//! # Examples
//!
//! ```
//! use warden::{Color, Game, PlayError, Setup};
//!
//! // The white king on e1 is pinned against the e-file by the rook on e8.
//! let setup: Setup = "k3r3/8/8/8/8/8/4B3/4K3".parse()?;
//! let mut game = Game::from_setup(&setup, Color::White)?;
//!
//! // Moving the bishop would expose the king.
//! assert_eq!(game.play("e2 d3".parse()?), Err(PlayError::SelfCheck));
//! // Stepping off the file is fine.
//! assert_eq!(game.play("e1 d1".parse()?), Ok(()));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::{error::Error, fmt};

use tracing::{debug, trace};

use crate::{
    board::{Board, Snapshot},
    color::Color,
    request::MoveRequest,
    setup::{Setup, SetupError, SetupErrorKinds},
};

/// Side to move, or the outcome of a finished game.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Status {
    WhiteToMove,
    BlackToMove,
    /// Terminal. Nothing in this crate produces it, as checkmate is not
    /// detected.
    WhiteVictory,
    /// Terminal. See [`Status::WhiteVictory`].
    BlackVictory,
}

impl Status {
    #[inline]
    pub fn to_move(color: Color) -> Status {
        color.fold(Status::WhiteToMove, Status::BlackToMove)
    }

    #[inline]
    pub fn victory(winner: Color) -> Status {
        winner.fold(Status::WhiteVictory, Status::BlackVictory)
    }

    /// The side to move, or `None` if the game is over.
    pub fn turn(self) -> Option<Color> {
        match self {
            Status::WhiteToMove => Some(Color::White),
            Status::BlackToMove => Some(Color::Black),
            Status::WhiteVictory | Status::BlackVictory => None,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            Status::WhiteVictory => Some(Color::White),
            Status::BlackVictory => Some(Color::Black),
            Status::WhiteToMove | Status::BlackToMove => None,
        }
    }

    #[inline]
    pub fn is_over(self) -> bool {
        self.turn().is_none()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.turn(), self.winner()) {
            (Some(color), _) => write!(f, "{} to move", color),
            (_, Some(color)) => write!(f, "{} wins", color),
            (None, None) => Ok(()),
        }
    }
}

/// Reason a move request was rejected.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PlayError {
    /// The game is already decided.
    GameOver,
    /// A square of the request lies outside of the board.
    OutOfBounds,
    /// There is no piece on the source square.
    EmptySource,
    /// The piece on the source square belongs to the side not to move.
    WrongTurn,
    /// The piece cannot reach the destination.
    Unreachable,
    /// The move would leave the mover's king threatened.
    SelfCheck,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            PlayError::GameOver => "game is over",
            PlayError::OutOfBounds => "square outside of the board",
            PlayError::EmptySource => "no piece on source square",
            PlayError::WrongTurn => "not this side's turn",
            PlayError::Unreachable => "piece cannot reach destination",
            PlayError::SelfCheck => "move leaves own king in check",
        })
    }
}

impl Error for PlayError {}

/// A game in progress: the live board and whose turn it is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Game {
    board: Board,
    status: Status,
}

impl Game {
    /// Starts a game from the standard position, White to move.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            status: Status::WhiteToMove,
        }
    }

    /// Starts a game from a custom setup.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the setup is invalid, or if the side not
    /// to move is already in check.
    pub fn from_setup(setup: &Setup, turn: Color) -> Result<Game, SetupError> {
        let board = Board::from_setup(setup)?;
        let exposed = board
            .king(!turn)
            .is_some_and(|king| board.is_threatened(king, turn));
        if exposed {
            SetupError::from_kinds(SetupErrorKinds::OPPOSITE_CHECK)?;
        }
        Ok(Game {
            board,
            status: Status::to_move(turn),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The side to move, or `None` if the game is over.
    pub fn turn(&self) -> Option<Color> {
        self.status.turn()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }

    /// Tests if the king of the side to move is threatened.
    pub fn is_check(&self) -> bool {
        self.turn().is_some_and(|turn| {
            self.board
                .king(turn)
                .is_some_and(|king| self.board.is_threatened(king, !turn))
        })
    }

    /// Checks a move request without committing it. Returns the board as it
    /// would be after the move.
    ///
    /// # Errors
    ///
    /// Returns the first reason the move is illegal.
    pub fn validate(&self, request: MoveRequest) -> Result<Board, PlayError> {
        let turn = self.turn().ok_or(PlayError::GameOver)?;
        if !self.board.contains(request.from) || !self.board.contains(request.to) {
            return Err(PlayError::OutOfBounds);
        }

        let mut simulation = self.board.clone();

        let mover = *simulation.occupant(request.from).ok_or(PlayError::EmptySource)?;
        if mover.color() != turn {
            return Err(PlayError::WrongTurn);
        }

        // Pawns threaten squares they cannot move to, so both sets count.
        let reachable = simulation.moveable_squares(request.from).contains(&request.to)
            || simulation.threatened_squares(request.from).contains(&request.to);
        if !reachable {
            return Err(PlayError::Unreachable);
        }

        simulation.apply_move(request);

        if let Some(king) = simulation.king(turn) {
            if simulation.is_threatened(king, !turn) {
                return Err(PlayError::SelfCheck);
            }
        }

        trace!(%request, role = %mover.role(), "validated move");
        Ok(simulation)
    }

    pub fn is_legal(&self, request: MoveRequest) -> bool {
        self.validate(request).is_ok()
    }

    /// Validates a move request and, if it is legal, plays it and passes the
    /// turn. Rejected requests leave the game unchanged.
    ///
    /// # Errors
    ///
    /// Returns the reason the move is illegal.
    pub fn play(&mut self, request: MoveRequest) -> Result<(), PlayError> {
        if let Err(err) = self.validate(request) {
            debug!(%request, %err, "rejected move");
            return Err(err);
        }

        self.board.apply_move(request);
        debug_assert_eq!(self.board.verify(), Ok(()));

        if let Some(turn) = self.turn() {
            self.status = Status::to_move(!turn);
        }
        trace!(%request, status = %self.status, "played move");
        Ok(())
    }

    /// Generates all legal move requests for the side to move.
    ///
    /// ```
    /// use warden::Game;
    ///
    /// assert_eq!(Game::new().legal_moves().len(), 34);
    /// ```
    pub fn legal_moves(&self) -> Vec<MoveRequest> {
        let Some(turn) = self.turn() else {
            return Vec::new();
        };

        let mut moves = Vec::new();
        for placement in self.board.placements().iter().filter(|p| p.color() == turn) {
            let from = placement.position;
            let mut targets = self.board.moveable_squares(from);
            for to in self.board.threatened_squares(from) {
                if !targets.contains(&to) {
                    targets.push(to);
                }
            }
            moves.extend(
                targets
                    .into_iter()
                    .map(|to| MoveRequest::new(from, to))
                    .filter(|&request| self.is_legal(request)),
            );
        }
        moves
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}
