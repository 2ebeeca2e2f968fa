/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    io::{BufRead, Write},
    ops::ControlFlow,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
    legal_destinations, perft, splitperft, Activation, Command, Game, Move, MoveOutcome, Player,
    RuleResult, DEFAULT_SAVE_FILE,
};

/// An interactive game, driven by text [`Command`]s.
///
/// Commands are read one per line. Rule violations and failed saves or loads are reported
/// and the session keeps running; only `exit` or the end of input stops it.
#[derive(Debug, Clone)]
pub struct Session {
    /// The game being played.
    ///
    /// Reset by `restart` and replaced wholesale by a successful `load`.
    game: Game,

    /// File used by `save` and `load` when no path is given.
    save_file: PathBuf,
}

impl Session {
    /// Constructs a new [`Session`] at the starting position.
    pub fn new(save_file: impl Into<PathBuf>) -> Self {
        Self::with_game(Game::default(), save_file)
    }

    /// Constructs a new [`Session`] that continues the provided [`Game`].
    pub fn with_game(game: Game, save_file: impl Into<PathBuf>) -> Self {
        Self {
            game,
            save_file: save_file.into(),
        }
    }

    #[inline(always)]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    #[inline(always)]
    pub fn save_file(&self) -> &Path {
        &self.save_file
    }

    /// Execute the main loop, reading commands from `input` until it is exhausted or `exit` is received.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read command from input")?;

            if self.execute_line(&line, out)?.is_break() {
                break;
            }
        }

        out.flush().context("Failed to flush output")?;
        Ok(())
    }

    /// Parses and executes a single line of input. Blank lines are ignored.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<ControlFlow<()>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(ControlFlow::Continue(()));
        }

        match line.parse::<Command>() {
            Ok(cmd) => self.execute(cmd, out),

            // If an invalid command was received, just print the error and continue running
            Err(err) => {
                write!(out, "{err}")?;
                Ok(ControlFlow::Continue(()))
            }
        }
    }

    /// Execute a single [`Command`], writing any response to `out`.
    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<ControlFlow<()>> {
        debug!("Executing {cmd:?}");

        match cmd {
            Command::Activate { square } => {
                if !self.refuse_if_over(out)? {
                    let result = self.game.activate(square);
                    self.report(result, out)?;
                }
            }

            Command::Select { square } => {
                if !self.refuse_if_over(out)? {
                    let result = self.game.select(square).map(|()| Activation::Selected(square));
                    self.report(result, out)?;
                }
            }

            Command::Move { square } => {
                if !self.refuse_if_over(out)? {
                    let result = self.game.move_to(square).map(Activation::Moved);
                    self.report(result, out)?;
                }
            }

            Command::Deselect => match self.game.deselect() {
                Ok(()) => writeln!(out, "Selection cleared")?,
                Err(err) => writeln!(out, "{err}")?,
            },

            Command::Display => writeln!(out, "{}", self.game)?,

            Command::Moves { square } => {
                let moves: Vec<Move> = if let Some(square) = square {
                    legal_destinations(self.game.board(), square, false)
                        .into_iter()
                        .map(|to| Move::new(square, to))
                        .collect()
                } else {
                    self.game.legal_moves().to_vec()
                };

                writeln!(out, "{}", join_or_none(&moves))?;
            }

            Command::Perft { depth } => {
                let now = Instant::now();
                let nodes = perft(&self.game, depth);
                let elapsed = now.elapsed();
                writeln!(out, "{nodes}")?;
                debug!("perft({depth}) took {elapsed:?}");
            }

            Command::Splitperft { depth } => {
                let split = splitperft(&self.game, depth);
                for (mv, nodes) in &split {
                    writeln!(out, "{mv}\t{nodes}")?;
                }
                let total: u64 = split.iter().map(|(_, nodes)| nodes).sum();
                writeln!(out, "\n{total}")?;
            }

            Command::Place { piece, square } => self.game.place(piece, square),

            Command::Take { square } => {
                if self.game.take(square).is_none() {
                    writeln!(out, "There is no piece on {square}")?;
                }
            }

            Command::Flip => {
                self.game.toggle_side_to_move();
                writeln!(out, "{:#} to move", self.game.side_to_move())?;
            }

            Command::Placement => writeln!(out, "{}", self.game.to_placement())?,

            Command::Restart => {
                self.game.restart();
                writeln!(out, "New game started")?;
            }

            Command::Save { path } => {
                let path = path.unwrap_or_else(|| self.save_file.clone());
                match self.game.save(&path) {
                    Ok(()) => writeln!(out, "Saved game to {}", path.display())?,
                    Err(err) => {
                        warn!("{err:#}");
                        writeln!(out, "Could not save: {err:#}")?;
                    }
                }
            }

            Command::Load { path } => {
                let path = path.unwrap_or_else(|| self.save_file.clone());
                // The live game is only replaced once the whole file has been validated
                match Game::load(&path) {
                    Ok(game) => {
                        self.game = game;
                        writeln!(out, "Loaded game from {}", path.display())?;
                    }
                    Err(err) => {
                        warn!("{err:#}");
                        writeln!(out, "Could not load: {err:#}")?;
                    }
                }
            }

            Command::Status => self.status(out)?,

            Command::Exit => return Ok(ControlFlow::Break(())),
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Writes a message and returns `true` if the game has already ended.
    fn refuse_if_over<W: Write>(&self, out: &mut W) -> Result<bool> {
        let outcome = self.game.outcome();
        if outcome.is_over() {
            writeln!(out, "The game is over ({outcome}). Use `restart` to play again")?;
        }
        Ok(outcome.is_over())
    }

    fn report<W: Write>(&self, result: RuleResult<Activation>, out: &mut W) -> Result<()> {
        match result {
            Ok(Activation::Selected(square)) => {
                writeln!(
                    out,
                    "Selected {square}: {}",
                    join_or_none(self.game.destinations())
                )?;
            }

            Ok(Activation::Moved(outcome)) => self.report_move(outcome, out)?,

            Err(err) => writeln!(out, "{err}")?,
        }

        Ok(())
    }

    fn report_move<W: Write>(&self, outcome: MoveOutcome, out: &mut W) -> Result<()> {
        let MoveOutcome {
            mv,
            applied,
            continues_capture,
        } = outcome;

        write!(out, "Played {mv}")?;
        if let Some(captured) = applied.captured {
            write!(out, ", capturing {captured}")?;
        }
        if applied.promoted {
            write!(out, ", promoted to King")?;
        }
        writeln!(out)?;

        if continues_capture {
            writeln!(
                out,
                "{:#} must continue capturing from {}: {}",
                self.game.side_to_move(),
                mv.to(),
                join_or_none(self.game.destinations())
            )?;
        } else if let Some(winner) = self.game.outcome().winner() {
            writeln!(out, "Game over: {winner:#} wins")?;
        } else {
            writeln!(out, "{:#} to move", self.game.side_to_move())?;
        }

        Ok(())
    }

    fn status<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Turn: {:#}", self.game.side_to_move())?;
        for player in Player::all() {
            writeln!(
                out,
                "{player:#}: {} pieces, {} captured",
                self.game.board().count(player),
                self.game.score(player)
            )?;
        }
        if let Some(selected) = self.game.selected() {
            let chain = if self.game.is_capture_chain() {
                " (must continue capturing)"
            } else {
                ""
            };
            writeln!(
                out,
                "Selected: {selected}{chain}: {}",
                join_or_none(self.game.destinations())
            )?;
        }
        writeln!(out, "Outcome: {}", self.game.outcome())?;

        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_SAVE_FILE)
    }
}

/// Joins items by comma-space, or returns `"(none)"` if there are none.
fn join_or_none<T: ToString>(items: &[T]) -> String {
    if items.is_empty() {
        String::from("(none)")
    } else {
        items
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
