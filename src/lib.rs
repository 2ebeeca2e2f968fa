/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation, move generation, and the rules of play.
mod board;

/// Commands accepted by the interactive host, and startup configuration.
mod cli;

/// Errors for refused selections and moves.
mod error;

/// The interactive host that plays a game from text commands.
mod session;

pub use board::*;
pub use cli::*;
pub use error::*;
pub use session::*;
