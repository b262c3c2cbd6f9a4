use std::{
    fs::File,
    io::{prelude::*, BufReader},
};

use warden::{perft, Color, Game, Setup};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut game = Game::default();

    for line in reader.lines().map(|l| l.unwrap()) {
        println!("{}", line);

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("epd") => {
                let mut params = slices.next().expect("missing epd").split(' ');

                let setup: Setup = params
                    .next()
                    .expect("missing placement")
                    .parse()
                    .expect("invalid placement");

                let turn = params
                    .next()
                    .and_then(|turn| turn.chars().next())
                    .and_then(Color::from_char)
                    .expect("invalid turn");

                game = Game::from_setup(&setup, turn).expect("illegal setup");
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&game, depth), nodes);
                }
            }
            _ => {}
        }
    }
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_warden() {
    test_perft_file("tests/warden.perft", 20_000);
}

#[test]
#[ignore = "slow in debug builds"]
fn test_warden_deep() {
    test_perft_file("tests/warden.perft", 1_500_000);
}

#[test]
fn test_initial() {
    let game = Game::new();
    assert_eq!(perft(&game, 1), 34);
    assert_eq!(perft(&game, 2), 1156);
    assert_eq!(perft(&game, 3), 40768);
}
