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

use std::{
    error::Error,
    io::{self, IsTerminal},
};

use clap::{ArgAction, Parser};
use tracing::{info, Level};
use warden::{
    session::{run, LineSource, TextRenderer},
    Color, Game, Setup,
};

#[derive(Debug, Parser)]
#[command(version, about = "Play a game of chess on the command line")]
struct Opt {
    /// Starting piece placement, like the first field of a FEN
    #[arg(long)]
    placement: Option<Setup>,
    /// Black moves first
    #[arg(long)]
    black_to_move: bool,
    /// Draw squares with terminal colors
    #[arg(long)]
    color: bool,
    /// Log more (repeat for even more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::parse();

    tracing_subscriber::fmt()
        .with_max_level(match opt.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .with_writer(io::stderr)
        .init();

    let turn = Color::from_white(!opt.black_to_move);
    let mut game = match opt.placement {
        Some(setup) => Game::from_setup(&setup, turn)?,
        None if opt.black_to_move => Game::from_setup(&Setup::standard(), turn)?,
        None => Game::new(),
    };
    info!(size = game.board().size(), status = %game.status(), "starting session");

    let stdout = io::stdout();
    let colored = opt.color && stdout.is_terminal();
    let renderer = TextRenderer::new(stdout.lock()).colored(colored);
    run(&mut game, LineSource::new(io::stdin().lock()), renderer)?;

    info!(status = %game.status(), "session ended");
    Ok(())
}
