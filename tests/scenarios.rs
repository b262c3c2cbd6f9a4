use warden::{Board, Color, Game, MoveRequest, PlayError, Position, Role, Setup, Status};

fn pos(name: &str) -> Position {
    name.parse().expect("valid square")
}

fn game(placement: &str, turn: Color) -> Game {
    let setup: Setup = placement.parse().expect("valid placement");
    Game::from_setup(&setup, turn).expect("valid setup")
}

/// Every request whose destination the source piece can move to or
/// threatens, legal or not.
fn candidates(game: &Game) -> Vec<MoveRequest> {
    let board = game.board();
    let turn = game.turn().expect("game in progress");
    let mut requests: Vec<MoveRequest> = board
        .placements()
        .iter()
        .filter(|p| p.color() == turn)
        .flat_map(|p| {
            board
                .moveable_squares(p.position)
                .into_iter()
                .chain(board.threatened_squares(p.position))
                .map(move |to| MoveRequest::new(p.position, to))
        })
        .collect();
    requests.sort_by_key(|r| (r.from, r.to));
    requests.dedup();
    requests
}

fn assert_consistent(board: &Board) {
    assert_eq!(board.verify(), Ok(()));
    for color in Color::ALL {
        let kings: Vec<Position> = board
            .placements()
            .iter()
            .filter(|p| p.piece == color.king())
            .map(|p| p.position)
            .collect();
        assert_eq!(board.king(color), kings.first().copied(), "{} king index", color);
    }
}

#[test]
fn test_pawn_double_step() {
    let mut game = Game::new();
    assert_eq!(game.play("e2 e4".parse().unwrap()), Ok(()));
    assert_eq!(game.status(), Status::BlackToMove);
    assert_eq!(game.board().piece_at(pos("e4")), Some(Color::White.pawn()));
    assert_eq!(game.board().piece_at(pos("e2")), None);
}

#[test]
fn test_wrong_color_source() {
    let mut game = Game::new();
    assert_eq!(game.play("e7 e5".parse().unwrap()), Err(PlayError::WrongTurn));
    assert_eq!(game, Game::new());
}

#[test]
fn test_rook_on_open_file() {
    let game = game("4k3/8/8/8/4r3/8/R7/4K3", Color::White);
    assert!(game.is_check());

    let mut legal: Vec<String> = game.legal_moves().iter().map(|m| m.to_string()).collect();
    legal.sort();
    assert_eq!(legal, ["a2 e2", "e1 d1", "e1 d2", "e1 f1", "e1 f2"]);

    for request in ["e1 e2", "a2 a3", "a2 b2", "a2 a8"] {
        assert_eq!(
            game.validate(request.parse().unwrap()),
            Err(PlayError::SelfCheck),
            "{}",
            request
        );
    }
}

#[test]
fn test_pawn_cannot_step_three() {
    let mut game = Game::new();
    assert_eq!(game.play("e2 e5".parse().unwrap()), Err(PlayError::Unreachable));
    assert_eq!(game, Game::new());
}

#[test]
fn test_pawn_diagonal_onto_empty_square() {
    let mut game = Game::new();
    let e2 = pos("e2");
    assert!(game.board().threatened_squares(e2).contains(&pos("f3")));
    assert!(!game.board().moveable_squares(e2).contains(&pos("f3")));

    assert_eq!(game.play("e2 f3".parse().unwrap()), Ok(()));
    assert_eq!(game.board().piece_at(pos("f3")), Some(Color::White.pawn()));
    assert_eq!(game.status(), Status::BlackToMove);
    assert!(game.legal_moves().contains(&"d7 c6".parse().unwrap()));
}

#[test]
fn test_pawn_double_step_over_piece() {
    let mut game = game("4k3/8/8/8/8/4n3/4P3/4K3", Color::White);
    assert_eq!(game.play("e2 e4".parse().unwrap()), Ok(()));
    assert_eq!(game.board().piece_at(pos("e4")), Some(Color::White.pawn()));
    assert_eq!(game.board().piece_at(pos("e3")), Some(Color::Black.knight()));
}

#[test]
fn test_off_board_request() {
    let game = Game::new();
    assert!(MoveRequest::from_ascii_within(b"a1 a9", game.board().size()).is_err());

    // Parsing without a size bound succeeds, but the game still refuses.
    let request: MoveRequest = "a1 a9".parse().unwrap();
    assert_eq!(game.validate(request), Err(PlayError::OutOfBounds));
}

#[test]
fn test_self_check_is_always_rejected() {
    for (placement, turn) in [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", Color::White),
        ("k3r3/8/8/8/8/8/4B3/4K3", Color::White),
        ("4k3/8/8/8/4r3/8/R7/4K3", Color::White),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White),
        ("r3k2r/8/8/3B4/8/8/8/R3K2R", Color::Black),
    ] {
        let game = game(placement, turn);
        for request in candidates(&game) {
            let after = game.board().simulate(request);
            let exposed = after
                .king(turn)
                .is_some_and(|king| after.is_threatened(king, !turn));
            assert_eq!(
                game.is_legal(request),
                !exposed,
                "{} {} {}",
                placement,
                turn,
                request
            );
        }
    }
}

#[test]
fn test_invariants_hold_during_play() {
    let mut game = Game::new();
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;

    for _ in 0..300 {
        let moves = game.legal_moves();
        if moves.is_empty() {
            break;
        }
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let request = moves[(seed % moves.len() as u64) as usize];

        let mover = game.board().piece_at(request.from).expect("source piece");
        assert_eq!(game.play(request), Ok(()));
        assert_consistent(game.board());
        if mover.role == Role::King {
            assert_eq!(game.board().king(mover.color), Some(request.to));
        }
        assert!(game.board().placements().iter().any(|p| p.position == request.to && p.moved));
    }
}

#[test]
fn test_pawn_moved_flag() {
    let mut game = Game::new();
    for request in ["e2 e3", "a7 a6", "e3 e4", "a6 a5"] {
        assert_eq!(game.play(request.parse().unwrap()), Ok(()));
    }
    // Having moved, the pawn has lost its double step.
    assert_eq!(game.play("e4 e6".parse().unwrap()), Err(PlayError::Unreachable));
    assert_eq!(game.play("e4 e5".parse().unwrap()), Ok(()));
}
