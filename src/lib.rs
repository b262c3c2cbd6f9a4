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

//! A chess rule engine that tracks piece placement, generates the squares
//! each piece can reach, and refuses every move that would leave the mover's
//! own king capturable.
//!
//! # Examples
//!
//! Play moves from the standard starting position:
//!
//! ```
//! use warden::{Color, Game, MoveRequest, Position, Role, Status};
//!
//! let mut game = Game::new();
//! let e2e4: MoveRequest = "e2 e4".parse()?;
//! game.play(e2e4)?;
//!
//! assert_eq!(game.status(), Status::BlackToMove);
//! let e4 = Position::new(4, 3);
//! assert_eq!(game.board().piece_at(e4), Some(Role::Pawn.of(Color::White)));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Illegal moves are rejected without touching the board:
//!
//! ```
//! use warden::{Game, PlayError};
//!
//! let mut game = Game::new();
//! assert_eq!(game.play("e7 e5".parse()?), Err(PlayError::WrongTurn));
//! assert_eq!(game.play("e2 e5".parse()?), Err(PlayError::Unreachable));
//! assert_eq!(game.board(), Game::new().board());
//! # Ok::<_, warden::ParseMoveRequestError>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.

#![doc(html_root_url = "https://docs.rs/warden/0.1.0")]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_cfg))]

mod color;
mod position;
mod request;
mod role;
mod types;

pub mod attacks;
pub mod board;
pub mod game;
pub mod perft;
pub mod session;
pub mod setup;

pub use attacks::Targets;
pub use board::{Board, InvariantViolation, Probe, Snapshot};
pub use color::{ByColor, Color, ParseColorError};
pub use game::{Game, PlayError, Status};
pub use perft::perft;
pub use position::{ParsePositionError, Position};
pub use request::{MoveRequest, ParseMoveRequestError};
pub use role::Role;
pub use setup::{ParsePlacementError, Setup, SetupError, SetupErrorKinds};
pub use types::{Piece, Placement};
