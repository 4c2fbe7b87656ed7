//! Text game loop against a human.
//!
//! The driver reads answers and columns line by line and writes the board
//! from the human's side after every machine move. It is generic over the
//! reader and writer so whole games can be scripted.
//!
//! ## Example
//!
//! ```ignore
//! use toguz::driver::Driver;
//! use toguz::session::Session;
//! let stdin = std::io::stdin();
//! let mut driver = Driver::new(Session::new(8), stdin.lock(), std::io::stdout());
//! driver.run()?;
//! ```

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::board::Pit;
use crate::search::{dump_moves, evaluate_moves};
use crate::session::{HUMAN, MACHINE, Outcome, Session};

pub struct Driver<R, W> {
    session: Session,
    input: R,
    output: W,
    verbose: bool,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(session: Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
            verbose: false,
        }
    }

    /// Report search statistics on stderr.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Play one game. Returns `None` if the input ran out first.
    pub fn run(&mut self) -> Result<Option<Outcome>> {
        write!(self.output, "Do you want to begin (Y/N)? ")?;
        self.output.flush()?;
        let Some(answer) = read_token(&mut self.input)? else {
            return Ok(None);
        };
        let mut machine_first = !answer.eq_ignore_ascii_case("y");

        loop {
            if machine_first {
                machine_first = false;
                if !self.machine_turn()? {
                    return self.finish().map(Some);
                }
            }

            writeln!(self.output, "{}", self.session.human_view())?;

            if let Some(outcome) = self.session.outcome() {
                self.announce(outcome)?;
                return Ok(Some(outcome));
            }
            if !self.session.human_can_move() {
                writeln!(self.output, "You have no seeds to sow.")?;
                return self.finish().map(Some);
            }

            write!(self.output, "Your move: ")?;
            self.output.flush()?;
            let Some(token) = read_token(&mut self.input)? else {
                return Ok(None);
            };
            let Ok(column) = token.parse::<usize>() else {
                writeln!(self.output, "Cannot play at {token}")?;
                continue;
            };

            let session = &mut self.session;
            let input = &mut self.input;
            let output = &mut self.output;
            let mut asked = Ok(());
            let played = session.play_human(column, |landing| {
                match ask_tuzdek(input, output, landing) {
                    Ok(answer) => answer,
                    Err(e) => {
                        asked = Err(e);
                        false
                    }
                }
            });
            asked?;
            if let Err(e) = played {
                if self.verbose {
                    eprintln!("rejected move: {e}");
                }
                writeln!(self.output, "Cannot play at {column}")?;
                continue;
            }
            if self.session.outcome().is_some() {
                continue;
            }

            if !self.machine_turn()? {
                return self.finish().map(Some);
            }
        }
    }

    /// Let the machine move. Returns `false` when it has no move.
    fn machine_turn(&mut self) -> Result<bool> {
        writeln!(self.output, "thinking...")?;
        self.output.flush()?;

        if self.verbose {
            dump_moves(&evaluate_moves(
                self.session.board(),
                self.session.depth(),
                MACHINE,
            ));
        }

        let Some(mv) = self.session.play_machine() else {
            return Ok(false);
        };
        if self.verbose {
            eprintln!(
                "searched {} nodes at depth {}, value {}",
                mv.nodes,
                self.session.depth(),
                mv.value
            );
        }

        write!(self.output, "Opponent's move: {}", mv.pit + 1)?;
        if mv.tuzdek {
            write!(self.output, " with tuzdek")?;
        }
        writeln!(self.output, " (worst outcome: {})", mv.value)?;
        Ok(true)
    }

    /// End a game that stopped before a store passed half of the seeds.
    fn finish(&mut self) -> Result<Outcome> {
        writeln!(self.output, "Game ended.")?;
        writeln!(self.output, "{}", self.session.human_view())?;
        let outcome = self.session.final_outcome();
        self.announce(outcome)?;
        Ok(outcome)
    }

    fn announce(&mut self, outcome: Outcome) -> Result<()> {
        let text = match outcome {
            Outcome::Win(p) if p == HUMAN => "You win.",
            Outcome::Win(_) => "You lose.",
            Outcome::Draw => "Draw.",
        };
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Read the next non-empty line, trimmed. `None` at end of input.
fn read_token(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        let read = input.read_line(&mut line).context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        let token = line.trim();
        if !token.is_empty() {
            return Ok(Some(token.to_string()));
        }
    }
}

fn ask_tuzdek(input: &mut impl BufRead, output: &mut impl Write, landing: Pit) -> Result<bool> {
    write!(output, "Create tuzdek at opponent's {} (Y/N) ", landing + 1)?;
    output.flush()?;
    Ok(read_token(input)?.is_some_and(|a| a.eq_ignore_ascii_case("y")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::constants::PITS;

    fn play(session: Session, script: &str) -> (Option<Outcome>, String) {
        let mut out = Vec::new();
        let outcome = {
            let mut driver = Driver::new(session, script.as_bytes(), &mut out);
            driver.run().unwrap()
        };
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_read_token_skips_blank_lines() {
        let mut input = "\n  \n 7 \n".as_bytes();
        assert_eq!(read_token(&mut input).unwrap(), Some("7".to_string()));
        assert_eq!(read_token(&mut input).unwrap(), None);
    }

    #[test]
    fn test_human_first() {
        let (outcome, text) = play(Session::new(1), "Y\n2\n");
        assert_eq!(outcome, None);
        assert!(text.starts_with("Do you want to begin (Y/N)? "));
        // Column 2 lands on the machine's first pit and captures its 10 seeds.
        assert!(text.contains("Kazna: 10"));
        assert!(text.contains("Opponent's move: "));
        assert_eq!(text.matches("Your move: ").count(), 2);
    }

    #[test]
    fn test_machine_first() {
        let (outcome, text) = play(Session::new(1), "N\n");
        assert_eq!(outcome, None);
        let machine = text.find("Opponent's move: ").unwrap();
        let prompt = text.find("Your move: ").unwrap();
        assert!(machine < prompt);
    }

    #[test]
    fn test_rejects_bad_columns() {
        let (_, text) = play(Session::new(1), "Y\n12\nabc\n");
        assert!(text.contains("Cannot play at 12"));
        assert!(text.contains("Cannot play at abc"));
        assert!(!text.contains("Opponent's move"));
    }

    #[test]
    fn test_tuzdek_prompt() {
        let mut pits = [0; PITS];
        pits[16] = 3;
        pits[0] = 2;
        pits[4] = 5;
        let board = Board::from_parts(pits, [73, 79], [None, None]);
        let (outcome, text) = play(Session::with_board(board, 2), "Y\n8\nY\n");
        assert!(text.contains("Create tuzdek at opponent's 1 (Y/N) "));
        assert!(text.contains("You win."));
        assert!(!text.contains("Game ended."));
        assert_eq!(outcome, Some(Outcome::Win(HUMAN)));
    }

    #[test]
    fn test_game_ends_without_machine_move() {
        let mut pits = [0; PITS];
        pits[9] = 1;
        let board = Board::from_parts(pits, [81, 80], [None, None]);
        let (outcome, text) = play(Session::with_board(board, 2), "Y\n1\n");
        assert!(text.contains("Game ended."));
        assert!(text.contains("You lose."));
        assert_eq!(outcome, Some(Outcome::Win(MACHINE)));
    }
}
