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

//! Line based play session.
//!
//! [`run()`] drives a [`Game`] from a [`CommandSource`] and reports through a
//! [`Renderer`]. Both are small traits so that a session can be scripted in
//! tests or attached to a terminal.
//!
//! # Examples
//!
//! ```
//! use warden::{
//!     session::{run, LineSource, TextRenderer},
//!     Game,
//! };
//!
//! let mut game = Game::new();
//! let mut commands = LineSource::new(&b"e2 e4\ne7 e9\nquit\n"[..]);
//! let mut renderer = TextRenderer::new(Vec::new());
//! run(&mut game, &mut commands, &mut renderer)?;
//!
//! let output = String::from_utf8(renderer.into_inner())?;
//! assert!(output.contains("Invalid command, please re-enter."));
//! assert!(output.ends_with("   abcdefgh\nInvalid command, please re-enter.\n"));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, BufRead, Write};

use tracing::{debug, trace};

use crate::{board::Snapshot, game::Game, position::Position, request::MoveRequest};

/// Printed for every command that cannot be parsed or played.
pub const INVALID_COMMAND: &str = "Invalid command, please re-enter.";

/// Printed after a move that leaves the side to move in check.
pub const CHECK: &str = "Check.";

/// Supplies one command line per call.
pub trait CommandSource {
    /// Reads the next command, without the line terminator. Returns `None`
    /// once input is exhausted.
    fn read_command(&mut self) -> io::Result<Option<String>>;
}

/// Presents the board and status messages.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()>;

    fn print_line(&mut self, line: &str) -> io::Result<()>;
}

impl<C: CommandSource + ?Sized> CommandSource for &mut C {
    fn read_command(&mut self) -> io::Result<Option<String>> {
        (**self).read_command()
    }
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        (**self).render(snapshot)
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        (**self).print_line(line)
    }
}

/// Reads commands line by line from a buffered reader.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> LineSource<R> {
        LineSource {
            reader,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> CommandSource for LineSource<R> {
    fn read_command(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(self.buf.trim_end_matches(['\r', '\n']).to_owned()))
    }
}

/// Draws the board as text, one rank per line, with rank numbers on the left
/// and file letters below.
///
/// Uppercase letters are white pieces, lowercase letters are black pieces.
/// In plain mode empty squares are drawn as `.`. In colored mode squares get
/// alternating ANSI background colors instead.
#[derive(Debug)]
pub struct TextRenderer<W> {
    writer: W,
    colored: bool,
}

const LIGHT_SQUARE: &str = "\u{1b}[47m";
const DARK_SQUARE: &str = "\u{1b}[40m";
const RESET: &str = "\u{1b}[0m";

impl<W: Write> TextRenderer<W> {
    pub fn new(writer: W) -> TextRenderer<W> {
        TextRenderer {
            writer,
            colored: false,
        }
    }

    #[must_use]
    pub fn colored(mut self, colored: bool) -> TextRenderer<W> {
        self.colored = colored;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        for rank in (0..snapshot.size).rev() {
            write!(self.writer, "{:<2} ", rank + 1)?;
            for file in 0..snapshot.size {
                let pos = Position::new(file, rank);
                let piece = snapshot.piece_at(pos);
                if self.colored {
                    // a1 is light.
                    let background = if (file + rank) % 2 == 0 {
                        LIGHT_SQUARE
                    } else {
                        DARK_SQUARE
                    };
                    let contents = piece.map_or(' ', |piece| piece.char());
                    write!(self.writer, "{background}{contents}{RESET}")?;
                } else {
                    write!(self.writer, "{}", piece.map_or('.', |piece| piece.char()))?;
                }
            }
            writeln!(self.writer)?;
        }

        write!(self.writer, "   ")?;
        for file in 0..snapshot.size {
            write!(self.writer, "{}", char::from(b'a' + file))?;
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }

    fn print_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}

/// Runs a session until input is exhausted, a quit command is read, or the
/// game is over.
///
/// Blank lines are ignored. `quit` and `exit` end the session. Any other line
/// must be a move request such as `e2 e4`. Malformed and illegal requests
/// alike are answered with [`INVALID_COMMAND`] and leave the game unchanged.
///
/// # Errors
///
/// Returns I/O errors of the command source or the renderer.
pub fn run<C, R>(game: &mut Game, mut commands: C, mut renderer: R) -> io::Result<()>
where
    C: CommandSource,
    R: Renderer,
{
    renderer.render(&game.snapshot())?;

    while !game.status().is_over() {
        let Some(line) = commands.read_command()? else {
            debug!("input exhausted");
            break;
        };

        let line = line.trim();
        match line {
            "" => continue,
            "quit" | "exit" => {
                debug!(command = line, "session ended by user");
                break;
            }
            _ => (),
        }

        let played = MoveRequest::from_ascii_within(line.as_bytes(), game.board().size())
            .map_err(|err| trace!(line, %err, "unparsable command"))
            .and_then(|request| game.play(request).map_err(|_| ()));

        match played {
            Ok(()) => {
                renderer.render(&game.snapshot())?;
                if game.is_check() {
                    renderer.print_line(CHECK)?;
                }
            }
            Err(()) => renderer.print_line(INVALID_COMMAND)?,
        }
    }

    Ok(())
}
