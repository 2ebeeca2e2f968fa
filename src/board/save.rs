/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use tracing::info;

use super::{
    legal_destinations, Board, Destinations, Game, Piece, Player, Selection, Square, TurnPhase,
    MAX_DESTINATIONS,
};

/// Size, in bytes, of a saved [`Game`].
///
/// Laid out as follows:
/// ```text
///   0..64  one byte per cell: 0 when empty, otherwise 1 + the piece's bits
///      64  side to move
///  65..69  Red's score, little-endian
///  69..73  Blue's score, little-endian
///      73  turn phase: 0 idle, 1 selected, 2 capture chain
///      74  selected cell, or 0xFF
///      75  number of destinations
///  76..89  destination cells, padded with 0xFF
/// ```
pub const SAVE_SIZE: usize = 89;

const SIDE_OFFSET: usize = Square::COUNT;
const SCORES_OFFSET: usize = SIDE_OFFSET + 1;
const PHASE_OFFSET: usize = SCORES_OFFSET + 4 * Player::COUNT;
const SELECTED_OFFSET: usize = PHASE_OFFSET + 1;
const COUNT_OFFSET: usize = SELECTED_OFFSET + 1;
const DESTINATIONS_OFFSET: usize = COUNT_OFFSET + 1;

/// Marks an unused cell byte.
const NO_SQUARE: u8 = 0xFF;

const PHASE_IDLE: u8 = 0;
const PHASE_SELECTED: u8 = 1;
const PHASE_CHAIN: u8 = 2;

impl Game {
    /// Encodes this [`Game`] as a fixed-size byte image. See [`SAVE_SIZE`] for the layout.
    pub fn to_bytes(&self) -> [u8; SAVE_SIZE] {
        let mut bytes = [0; SAVE_SIZE];

        for (square, piece) in self.board.iter() {
            bytes[square.index()] = piece.bits() + 1;
        }

        bytes[SIDE_OFFSET] = self.side_to_move.bits();

        for player in Player::all() {
            let start = SCORES_OFFSET + 4 * player.index();
            bytes[start..start + 4].copy_from_slice(&self.scores[player].to_le_bytes());
        }

        let (phase, selection) = match &self.phase {
            TurnPhase::Idle => (PHASE_IDLE, None),
            TurnPhase::Selected(selection) => (PHASE_SELECTED, Some(selection)),
            TurnPhase::MustContinueCapture(selection) => (PHASE_CHAIN, Some(selection)),
        };
        bytes[PHASE_OFFSET] = phase;

        bytes[SELECTED_OFFSET] = selection.map_or(NO_SQUARE, |selection| selection.from.inner());
        let destinations = selection.map(Selection::destinations).unwrap_or_default();
        bytes[COUNT_OFFSET] = destinations.len() as u8;

        let padded = destinations
            .iter()
            .map(|to| to.inner())
            .chain(std::iter::repeat(NO_SQUARE));
        for (byte, value) in bytes[DESTINATIONS_OFFSET..].iter_mut().zip(padded) {
            *byte = value;
        }

        bytes
    }

    /// Decodes a [`Game`] from a byte image produced by [`Game::to_bytes`].
    ///
    /// Fails if `bytes` is not exactly [`SAVE_SIZE`] long, or if any byte is out of range.
    /// A saved selection must hold a piece of the side to move, and its destinations must be
    /// the ones [`legal_destinations`] gives for the saved board.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SAVE_SIZE {
            bail!(
                "Saved game must be exactly {SAVE_SIZE} bytes long. Got {} bytes",
                bytes.len()
            );
        }

        let mut board = Board::new();
        for square in Square::iter() {
            match bytes[square.index()] {
                0 => {}
                byte => {
                    let piece = Piece::from_bits(byte - 1)
                        .with_context(|| format!("Invalid piece byte {byte} on {square}"))?;
                    board.place(piece, square);
                }
            }
        }

        let side_to_move =
            Player::from_bits(bytes[SIDE_OFFSET]).context("Invalid side to move byte")?;

        let mut game = Self::new(board, side_to_move);
        for player in Player::all() {
            let start = SCORES_OFFSET + 4 * player.index();
            let mut score = [0; 4];
            score.copy_from_slice(&bytes[start..start + 4]);
            game.scores[player] = u32::from_le_bytes(score);
        }

        let phase = bytes[PHASE_OFFSET];
        let selected = bytes[SELECTED_OFFSET];
        let count = bytes[COUNT_OFFSET] as usize;

        if count > MAX_DESTINATIONS {
            bail!("Saved game lists {count} destinations, but at most {MAX_DESTINATIONS} are possible");
        }

        if phase == PHASE_IDLE {
            if selected != NO_SQUARE || count != 0 {
                bail!("Saved game has a selection while idle");
            }
            return Ok(game);
        }

        if phase != PHASE_SELECTED && phase != PHASE_CHAIN {
            bail!("Invalid turn phase byte {phase}");
        }

        let from = Square::try_from(selected).context("Invalid selected cell byte")?;
        if game.board.owner_at(from) != Some(side_to_move) {
            bail!("Saved game selects {from}, which holds no piece of {side_to_move:#}");
        }

        let mut destinations = Destinations::new();
        for &byte in &bytes[DESTINATIONS_OFFSET..DESTINATIONS_OFFSET + count] {
            destinations.push(Square::try_from(byte).context("Invalid destination cell byte")?);
        }

        // The stored destinations must be exactly what the rules give for this board
        let capture_chain = phase == PHASE_CHAIN;
        let legal = legal_destinations(&game.board, from, capture_chain);
        if destinations != legal {
            bail!("Saved destinations of {from} do not match its legal destinations");
        }
        if capture_chain && destinations.is_empty() {
            bail!("Saved game continues a capture chain from {from}, but it has no captures");
        }

        let selection = Selection::new(from, destinations);
        game.phase = if capture_chain {
            TurnPhase::MustContinueCapture(selection)
        } else {
            TurnPhase::Selected(selection)
        };

        Ok(game)
    }

    /// Writes this [`Game`] to the file at `path`, replacing it if it exists.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes())
            .with_context(|| format!("Failed to save game to {}", path.display()))?;

        info!("Saved game to {}", path.display());
        Ok(())
    }

    /// Reads a [`Game`] from the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read saved game from {}", path.display()))?;

        let game = Self::from_bytes(&bytes)
            .with_context(|| format!("{} does not hold a valid saved game", path.display()))?;

        info!("Loaded game from {}", path.display());
        Ok(game)
    }
}
