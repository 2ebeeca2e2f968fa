/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{path::PathBuf, str::FromStr};

use clap::Parser;

use crate::{Piece, Square, DEFAULT_SAVE_FILE};

/// Startup configuration for the `qorki` binary.
#[derive(Debug, Clone, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// File used by `save` and `load` when no path is given.
    #[arg(long, env = "QORKI_SAVE_FILE", default_value = DEFAULT_SAVE_FILE)]
    pub save_file: PathBuf,

    /// Log filter used when `RUST_LOG` is not set, such as `info` or `qorki=debug`.
    #[arg(long, default_value = "warn")]
    pub log: String,

    /// Commands to execute before reading from stdin. May be given multiple times.
    #[arg(short, long = "command", value_name = "COMMAND")]
    pub commands: Vec<String>,
}

/// A command to be sent to the host.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<COMMAND>")
)]
pub enum Command {
    /// Select the piece on a cell, or move the selected piece there.
    ///
    /// Mirrors clicking on a cell of the board.
    #[command(aliases = ["a", "click"])]
    Activate { square: Square },

    /// Hand the turn to the other player, dropping any selection.
    Flip,

    /// Select a piece, listing where it may move.
    #[command(alias = "s")]
    Select { square: Square },

    /// Let go of the selected piece.
    Deselect,

    /// Print a visual representation of the current game.
    #[command(alias = "d")]
    Display,

    /// Move the selected piece to the provided cell.
    #[command(alias = "m")]
    Move { square: Square },

    /// Shows all legal moves for the side to move, or the destinations of a specific piece.
    Moves { square: Option<Square> },

    /// Performs a perft on the current game at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Place a piece on the provided cell.
    Place { piece: Piece, square: Square },

    /// Print the placement string of the current game.
    #[command(alias = "fen")]
    Placement,

    /// Quit the host.
    #[command(alias = "quit")]
    Exit,

    /// Start a new game from the starting position.
    #[command(alias = "new")]
    Restart,

    /// Write the current game to a file.
    Save { path: Option<PathBuf> },

    /// Replace the current game with one read from a file.
    Load { path: Option<PathBuf> },

    /// Performs a split perft on the current game at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// Print whose turn it is, the scores, and whether the game has ended.
    Status,

    /// Remove the piece at the provided cell.
    Take { square: Square },
}

impl FromStr for Command {
    type Err = clap::Error;
    /// Attempt to parse a [`Command`] from a line of input.
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}
