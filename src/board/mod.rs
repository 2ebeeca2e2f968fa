/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The turn and capture-chain controller.
mod game;

/// Legal destination generation for Men and Kings.
mod movegen;

/// Moves, and applying them to a board.
mod moves;

/// Terminal state detection.
mod outcome;

/// Move path enumeration, for testing and debugging.
mod perft;

/// Enums for the players and kinds of pieces.
mod piece;

/// The mailbox board and placement strings.
mod position;

/// Binary save files.
mod save;

/// Cells on the board.
mod square;

/// Misc constants.
mod utils;

pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use outcome::*;
pub use perft::*;
pub use piece::*;
pub use position::*;
pub use save::*;
pub use square::*;
pub use utils::*;
