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

//! Movement rules of the six piece types.
//!
//! Every piece except the pawn is described by a [`Rule`]: a set of
//! directions and whether it moves a single step or slides along them.
//! Threatened and moveable squares coincide for those pieces. Pawns move
//! straight ahead but capture diagonally, so they are handled separately.
//!
//! # Example
//!
//! ```
//! use warden::{attacks, Board, Position};
//!
//! let board = Board::new();
//! let b1 = Position::new(1, 0);
//! let knight = board.occupant(b1).expect("knight on b1");
//!
//! let targets = attacks::moveable_squares(&board, knight);
//! assert_eq!(targets.len(), 2); // a3 and c3
//! ```

use arrayvec::ArrayVec;

use crate::{
    board::{Board, Probe},
    position::Position,
    role::Role,
    types::Placement,
};

/// Most target squares a single piece can have: a queen in the middle of
/// the largest board.
pub const MAX_TARGETS: usize = 4 * (Board::MAX_SIZE as usize - 1);

/// Target squares of a single piece, stored inline.
pub type Targets = ArrayVec<Position, MAX_TARGETS>;

const KING_DELTAS: [(i8, i8); 8] = [
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
];
const QUEEN_DELTAS: [(i8, i8); 8] = [
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
];
const ROOK_DELTAS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// File deltas of pawn captures. The rank delta is the color's forward
/// direction.
const PAWN_CAPTURE_FILES: [i8; 2] = [-1, 1];

/// How far a piece travels along each of its directions.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Reach {
    /// Exactly one step.
    Step,
    /// Any number of steps until blocked.
    Ray,
}

/// Movement rule of a piece whose moves and captures coincide.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Rule {
    pub deltas: &'static [(i8, i8)],
    pub reach: Reach,
}

impl Rule {
    /// Gets the rule of a piece type, or `None` for pawns.
    pub const fn of(role: Role) -> Option<Rule> {
        Some(match role {
            Role::King => Rule {
                deltas: &KING_DELTAS,
                reach: Reach::Step,
            },
            Role::Queen => Rule {
                deltas: &QUEEN_DELTAS,
                reach: Reach::Ray,
            },
            Role::Rook => Rule {
                deltas: &ROOK_DELTAS,
                reach: Reach::Ray,
            },
            Role::Bishop => Rule {
                deltas: &BISHOP_DELTAS,
                reach: Reach::Ray,
            },
            Role::Knight => Rule {
                deltas: &KNIGHT_DELTAS,
                reach: Reach::Step,
            },
            Role::Pawn => return None,
        })
    }

    /// Generates the targets of a piece following this rule.
    pub fn targets(self, board: &Board, placement: &Placement) -> Targets {
        let from = placement.position;
        let own = placement.color();
        let mut targets = Targets::new();
        for &(dx, dy) in self.deltas {
            match self.reach {
                Reach::Step => {
                    if let Some(to) = board.step_probe(from, own, dx, dy, Probe::Normal) {
                        targets.push(to);
                    }
                }
                Reach::Ray => targets.extend(board.ray_scan(from, own, dx, dy)),
            }
        }
        targets
    }
}

/// Squares the piece could capture on if an enemy stood there. Used for
/// check detection.
///
/// Pawns threaten both forward diagonals whether or not anything stands
/// there.
pub fn threatened_squares(board: &Board, placement: &Placement) -> Targets {
    match Rule::of(placement.role()) {
        Some(rule) => rule.targets(board, placement),
        None => pawn_threats(board, placement),
    }
}

/// Squares the piece may relocate to, not considering the safety of its
/// own king.
pub fn moveable_squares(board: &Board, placement: &Placement) -> Targets {
    match Rule::of(placement.role()) {
        Some(rule) => rule.targets(board, placement),
        None => pawn_moves(board, placement),
    }
}

fn pawn_threats(board: &Board, pawn: &Placement) -> Targets {
    let forward = pawn.color().forward();
    PAWN_CAPTURE_FILES
        .iter()
        .filter_map(|&dx| board.step_probe(pawn.position, pawn.color(), dx, forward, Probe::Normal))
        .collect()
}

fn pawn_moves(board: &Board, pawn: &Placement) -> Targets {
    let from = pawn.position;
    let own = pawn.color();
    let forward = own.forward();
    let mut targets = Targets::new();

    targets.extend(board.step_probe(from, own, 0, forward, Probe::FreeOnly));
    if !pawn.moved {
        // Only the landing square is probed. The double step may jump.
        targets.extend(board.step_probe(from, own, 0, 2 * forward, Probe::FreeOnly));
    }

    targets.extend(
        PAWN_CAPTURE_FILES
            .iter()
            .filter_map(|&dx| board.step_probe(from, own, dx, forward, Probe::ThreatOnly)),
    );
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color::Color, setup::Setup};

    fn pos(name: &str) -> Position {
        name.parse().expect("valid square")
    }

    fn board(placement: &str) -> Board {
        let setup: Setup = placement.parse().expect("valid placement");
        Board::from_setup(&setup).expect("valid setup")
    }

    fn sorted(targets: Targets) -> Vec<String> {
        let mut names: Vec<String> = targets.iter().map(|t| t.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_starting_position_targets() {
        let board = Board::new();
        let moves: usize = board
            .placements()
            .iter()
            .filter(|p| p.color() == Color::White)
            .map(|p| moveable_squares(&board, p).len())
            .sum();
        assert_eq!(moves, 20);
    }

    #[test]
    fn test_queen_in_open_center() {
        let board = board("4k3/8/8/8/3Q4/8/8/4K3");
        assert_eq!(board.moveable_squares(pos("d4")).len(), 27);
        assert_eq!(board.threatened_squares(pos("d4")), board.moveable_squares(pos("d4")));
    }

    #[test]
    fn test_queen_on_largest_board_fits() {
        let mut setup = Setup::empty(Board::MAX_SIZE);
        setup.push(Color::White.king(), Position::new(0, 1));
        setup.push(Color::Black.king(), Position::new(25, 1));
        setup.push(Color::White.queen(), Position::new(12, 12));
        let board = Board::from_setup(&setup).expect("valid setup");
        assert_eq!(board.moveable_squares(Position::new(12, 12)).len(), MAX_TARGETS - 1);
    }

    #[test]
    fn test_knight_in_corner() {
        let board = board("4k3/8/8/8/8/8/8/N3K3");
        assert_eq!(sorted(board.moveable_squares(pos("a1"))), ["b3", "c2"]);
    }

    #[test]
    fn test_king_captures() {
        let board = board("4k3/8/8/8/8/8/3p4/4K3");
        assert_eq!(
            sorted(board.moveable_squares(pos("e1"))),
            ["d1", "d2", "e2", "f1", "f2"]
        );
    }

    #[test]
    fn test_rook_and_bishop() {
        let board = board("4k3/8/8/8/8/1p6/8/RB2K3");
        assert_eq!(
            sorted(board.moveable_squares(pos("a1"))),
            ["a2", "a3", "a4", "a5", "a6", "a7", "a8"]
        );
        assert_eq!(
            sorted(board.moveable_squares(pos("b1"))),
            ["a2", "c2", "d3", "e4", "f5", "g6", "h7"]
        );
    }

    #[test]
    fn test_pawn_first_move() {
        let board = Board::new();
        assert_eq!(sorted(board.moveable_squares(pos("e2"))), ["e3", "e4"]);
        assert_eq!(sorted(board.moveable_squares(pos("e7"))), ["e5", "e6"]);
        assert_eq!(sorted(board.threatened_squares(pos("e2"))), ["d3", "f3"]);
        assert_eq!(sorted(board.threatened_squares(pos("a7"))), ["b6"]);
    }

    #[test]
    fn test_pawn_after_first_move() {
        let mut board = Board::new();
        board.apply_move("e2 e3".parse().unwrap());
        assert_eq!(sorted(board.moveable_squares(pos("e3"))), ["e4"]);
    }

    #[test]
    fn test_pawn_blocked() {
        let jump = board("4k3/8/8/8/8/4n3/4P3/4K3");
        assert_eq!(sorted(jump.moveable_squares(pos("e2"))), ["e4"]);
        assert_eq!(sorted(jump.threatened_squares(pos("e2"))), ["d3", "f3"]);

        let single_only = board("4k3/8/8/8/4n3/8/4P3/4K3");
        assert_eq!(sorted(single_only.moveable_squares(pos("e2"))), ["e3"]);

        let walled = board("4k3/8/8/8/4n3/4n3/4P3/4K3");
        assert!(walled.moveable_squares(pos("e2")).is_empty());
    }

    #[test]
    fn test_pawn_captures() {
        let board = board("4k3/8/8/8/8/3p1P2/4P3/4K3");
        assert_eq!(sorted(board.moveable_squares(pos("e2"))), ["d3", "e3", "e4"]);
        assert_eq!(sorted(board.threatened_squares(pos("e2"))), ["d3"]);
    }

    #[test]
    fn test_black_pawn_direction() {
        let board = board("4k3/3p4/2P5/8/8/8/8/4K3");
        assert_eq!(sorted(board.moveable_squares(pos("d7"))), ["c6", "d5", "d6"]);
    }

    #[test]
    fn test_pawn_moved_flag_from_setup() {
        let board = board("4k3/8/8/8/4P3/8/8/4K3");
        assert_eq!(sorted(board.moveable_squares(pos("e4"))), ["e5"]);
    }
}
