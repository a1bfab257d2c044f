//! Line-oriented prompts over any reader/writer pair
//!
//! End of input is treated like the player walking away: prompts return
//! `None` and the move prompt reports [`MoveInput::Quit`].

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use rps_logic::{Move, RuleSet};

/// What the player typed at the move prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveInput {
    Move(Move),
    Quit,
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        // undecodable bytes become U+FFFD and fail parsing like any other typo
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    /// Read an integer, re-prompting until it parses and is in range.
    /// Empty input takes `default` when there is one.
    pub fn read_int(
        &mut self,
        prompt: &str,
        default: Option<u32>,
        min: Option<u32>,
        max: Option<u32>,
    ) -> io::Result<Option<u32>> {
        loop {
            let Some(raw) = self.ask(prompt)? else {
                return Ok(None);
            };
            if raw.is_empty() {
                if let Some(default) = default {
                    return Ok(Some(default));
                }
            }
            match raw.parse::<u32>() {
                Ok(v) if min.is_some_and(|min| v < min) => self.say("Too Small")?,
                Ok(v) if max.is_some_and(|max| v > max) => self.say("Too Big.")?,
                Ok(v) => return Ok(Some(v)),
                Err(_) => self.say("Enter an integer.")?,
            }
        }
    }

    /// Prompt for a move until the player gives a legal one or quits
    pub fn read_move(&mut self, ruleset: RuleSet) -> io::Result<MoveInput> {
        let names: Vec<&str> = ruleset.moves().iter().map(Move::as_str).collect();
        let prompt = format!("Choose move ({}). Or type help or quit: ", names.join("/"));

        loop {
            let Some(choice) = self.ask(&prompt)? else {
                return Ok(MoveInput::Quit);
            };
            let choice = choice.to_ascii_lowercase();
            match choice.as_str() {
                "help" => self.say(format!("Moves: {}.", names.join(", ")))?,
                "quit" | "exit" => return Ok(MoveInput::Quit),
                _ => match ruleset.parse_move(&choice) {
                    Ok(mv) => return Ok(MoveInput::Move(mv)),
                    Err(_) => self.say("Invalid move. Type 'help' for options")?,
                },
            }
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}
