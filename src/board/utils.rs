/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Placement string for the starting position of a game.
///
/// Red holds the dark squares of rows 1-3, Blue holds those of rows 6-8, and Red moves first.
pub const PLACEMENT_STARTPOS: &str =
    "b1b1b1b1/1b1b1b1b/b1b1b1b1/8/8/1r1r1r1r/r1r1r1r1/1r1r1r1r r";

/// Maximum number of destinations a single piece can ever have.
///
/// A King on `d5` sees 13 squares across its four diagonals (3 + 3 + 3 + 4),
/// and a capture landing always lies on one of those diagonals.
/// A cap of 12, as is sometimes assumed, would overflow on an open board.
pub const MAX_DESTINATIONS: usize = 13;

/// Maximum number of moves available to one side in any position.
///
/// This is the number of ordered square pairs sharing a diagonal on an `8x8` board.
pub const MAX_NUM_MOVES: usize = 560;

/// File the host saves to and loads from when no path is given.
pub const DEFAULT_SAVE_FILE: &str = "checkers_save.dat";
