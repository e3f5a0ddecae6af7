//! Line-oriented human player.
//!
//! Lists every legal action, reads one line, and resolves it against the
//! successors. Unrecognised input is reported and the prompt repeats; `quit`
//! or end of input hands `None` back to the game loop.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::engines::controller::Controller;
use crate::errors::{CheckersError, CheckersResult};
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::{format_action, parse_action};

const MOVES_PER_LINE: usize = 4;

pub const INPUT_HELP: &str = "NOTE: Moves are entered as <from>-<to>, e.g. 'F2-E3' moves the piece on F2 to E3.\n\
NOTE: Multi-jumps list every landing square, e.g. 'F2-D4-F6'.";

/// Source of input lines. Implemented for stdin and in-memory cursors so two
/// human seats never hold competing stdin locks.
pub trait LineInput {
    /// Append one line to `buf`. Returns 0 at end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineInput for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        io::Stdin::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for io::Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

pub struct HumanController<R: LineInput, W: Write> {
    input: R,
    output: W,
}

impl HumanController<io::Stdin, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: LineInput, W: Write> HumanController<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn list_moves(&mut self, children: &[GameState]) -> io::Result<()> {
        writeln!(self.output, "Your possible moves:")?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 && i % MOVES_PER_LINE == 0 {
                writeln!(self.output)?;
            }
            write!(self.output, "{:<10}\t", child.action())?;
        }
        writeln!(self.output)?;
        writeln!(self.output, "What is your next move? \ne.g.'F2-E3' or 'Quit'")?;
        self.output.flush()
    }
}

/// Child whose action matches `text`, ignoring case and stray whitespace
/// around squares.
pub fn match_action(children: &[GameState], text: &str) -> CheckersResult<GameState> {
    let text = text.trim();
    if let Some(child) = children
        .iter()
        .find(|child| child.action().eq_ignore_ascii_case(text))
    {
        return Ok(child.clone());
    }

    let squares = parse_action(text)?;
    let normalised = format_action(squares[0], &squares[1..]);
    children
        .iter()
        .find(|child| child.action() == normalised)
        .cloned()
        .ok_or_else(|| CheckersError::InvalidMove(format!("{text} is not a legal move")))
}

impl<R: LineInput, W: Write> Controller for HumanController<R, W> {
    fn name(&self) -> &str {
        "Human"
    }

    fn is_ai(&self) -> bool {
        false
    }

    fn play_move(&mut self, game_state: &GameState) -> CheckersResult<Option<GameState>> {
        let children = game_state.successors()?;
        loop {
            self.list_moves(&children)?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let entry = line.trim();
            if entry.eq_ignore_ascii_case("quit") {
                return Ok(None);
            }

            match match_action(&children, entry) {
                Ok(child) => return Ok(Some(child)),
                Err(CheckersError::InvalidMove(reason)) => {
                    warn!(input = entry, %reason, "rejected move input");
                    writeln!(self.output, "Invalid move!! Please try again...\n")?;
                }
                Err(other) => return Err(other),
            }
        }
    }
}
