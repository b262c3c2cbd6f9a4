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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use warden::{perft, Game};
//!
//! let game = Game::new();
//! assert_eq!(perft(&game, 1), 34);
//! assert_eq!(perft(&game, 2), 1156);
//! ```

use crate::game::Game;

/// Counts legal move paths of a given length.
///
/// Useful for comparing, testing and debugging move generation correctness
/// and performance.
pub fn perft(game: &Game, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves = game.legal_moves();
    if depth == 1 {
        moves.len() as u64
    } else {
        moves
            .into_iter()
            .map(|request| {
                let mut child = game.clone();
                match child.play(request) {
                    Ok(()) => perft(&child, depth - 1),
                    Err(_) => 0,
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, setup::Setup};

    #[test]
    fn test_zero_depth() {
        assert_eq!(perft(&Game::new(), 0), 1);
    }

    #[test]
    fn test_lone_kings() {
        let setup: Setup = "k7/8/8/8/8/8/8/7K".parse().expect("valid placement");
        let game = Game::from_setup(&setup, Color::White).expect("valid setup");
        assert_eq!(perft(&game, 1), 3);
        assert_eq!(perft(&game, 2), 9);
        assert_eq!(perft(&game, 3), 54);
    }
}
