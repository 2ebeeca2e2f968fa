/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::Result;
use tracing::{debug, info};

use super::{
    legal_destinations, outcome, perft, AppliedMove, Board, Destinations, GameOutcome, Move,
    MoveList, Piece, Player, Square,
};
use crate::{RuleError, RuleResult};

/// A selected piece and every cell it may currently land on.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Selection {
    pub(crate) from: Square,
    pub(crate) destinations: Destinations,
}

impl Selection {
    #[inline(always)]
    pub(crate) fn new(from: Square, destinations: Destinations) -> Self {
        Self { from, destinations }
    }

    /// Cell of the selected piece.
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline(always)]
    pub fn destinations(&self) -> &[Square] {
        &self.destinations
    }

    #[inline(always)]
    pub fn contains(&self, to: Square) -> bool {
        self.destinations.contains(&to)
    }
}

/// Where the side to move is within its turn.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum TurnPhase {
    /// Nothing is selected.
    #[default]
    Idle,

    /// A piece is selected, and may be swapped for another or let go of.
    Selected(Selection),

    /// The selected piece has captured this turn and can capture again, so it must.
    ///
    /// Only capture landings are listed, and no other piece may be selected.
    MustContinueCapture(Selection),
}

impl TurnPhase {
    #[inline(always)]
    pub const fn selection(&self) -> Option<&Selection> {
        match self {
            Self::Idle => None,
            Self::Selected(selection) | Self::MustContinueCapture(selection) => Some(selection),
        }
    }

    #[inline(always)]
    pub const fn is_capture_chain(&self) -> bool {
        matches!(self, Self::MustContinueCapture(_))
    }
}

/// Result of landing the selected piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    /// The landing that was played.
    pub mv: Move,

    /// What the landing did to the board.
    pub applied: AppliedMove,

    /// If `true`, the same player remains on move and must capture again with the same piece.
    pub continues_capture: bool,
}

/// What a cell activation ended up doing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Activation {
    /// The piece on this cell is now selected.
    Selected(Square),

    /// The selected piece moved.
    Moved(MoveOutcome),
}

/// A game of Ethiopian checkers.
///
/// This type wraps a [`Board`] with the side to move, each player's capture score, and the progress of the current turn.
/// It is the primary type for playing a game.
///
/// A turn is played by selecting one of the side to move's pieces with [`Game::select`]
/// and landing it with [`Game::move_to`]. After a capture, if the same piece can capture again,
/// it must do so before the turn passes. A Man that is promoted ends the turn immediately.
///
/// # Example
/// ```
/// # use qorki::{Game, Player, Square};
/// let mut game = Game::default();
/// game.select("b3".parse().unwrap()).unwrap();
/// let outcome = game.move_to("c4".parse().unwrap()).unwrap();
/// assert!(!outcome.continues_capture);
/// assert_eq!(game.side_to_move(), Player::Blue);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) side_to_move: Player,
    pub(crate) scores: [u32; Player::COUNT],
    pub(crate) phase: TurnPhase,
}

impl Game {
    /// Creates a new [`Game`] from the provided [`Board`], with nothing selected and no captures scored.
    #[inline(always)]
    pub fn new(board: Board, side_to_move: Player) -> Self {
        Self {
            board,
            side_to_move,
            scores: [0; Player::COUNT],
            phase: TurnPhase::Idle,
        }
    }

    /// Creates a new [`Game`] from a placement string, optionally followed by the side to move (`r` or `b`).
    ///
    /// # Example
    /// ```
    /// # use qorki::{Game, Player};
    /// let game = Game::from_placement("8/8/8/8/8/8/8/R6b b").unwrap();
    /// assert_eq!(game.side_to_move(), Player::Blue);
    /// assert_eq!(Game::from_placement("8/8/8/8/8/8/8/R6b").unwrap().side_to_move(), Player::Red);
    /// ```
    pub fn from_placement(placement: &str) -> Result<Self> {
        let mut split = placement.split_whitespace();
        let board = Board::from_placement(split.next().unwrap_or_default())?;
        let side_to_move = split.next().unwrap_or("r").parse()?;

        Ok(Self::new(board, side_to_move))
    }

    /// Generates the placement string of this [`Game`], including the side to move.
    ///
    /// # Example
    /// ```
    /// # use qorki::{Game, PLACEMENT_STARTPOS};
    /// assert_eq!(Game::default().to_placement(), PLACEMENT_STARTPOS);
    /// ```
    pub fn to_placement(&self) -> String {
        format!("{} {}", self.board.to_placement(), self.side_to_move)
    }

    /// Puts every piece back where it started, clears the scores, and gives the move to Red.
    pub fn restart(&mut self) {
        *self = Self::default();
        info!("Game restarted");
    }

    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[inline(always)]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Number of opponent's pieces `player` has captured.
    #[inline(always)]
    pub const fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    #[inline(always)]
    pub const fn phase(&self) -> &TurnPhase {
        &self.phase
    }

    /// Cell of the currently selected piece, if any.
    #[inline(always)]
    pub fn selected(&self) -> Option<Square> {
        self.phase.selection().map(|selection| selection.from)
    }

    /// Destinations of the currently selected piece. Empty if nothing is selected.
    #[inline(always)]
    pub fn destinations(&self) -> &[Square] {
        self.phase
            .selection()
            .map(Selection::destinations)
            .unwrap_or_default()
    }

    /// Returns `true` if the side to move is in the middle of a capture chain.
    #[inline(always)]
    pub const fn is_capture_chain(&self) -> bool {
        self.phase.is_capture_chain()
    }

    /// Hands the move to the other player, dropping any selection.
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        self.phase = TurnPhase::Idle;
    }

    /// Puts `piece` on `square`, dropping any selection.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.board.place(piece, square);
        self.phase = TurnPhase::Idle;
    }

    /// Removes whatever is on `square`, dropping any selection.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.phase = TurnPhase::Idle;
        self.board.take(square)
    }

    /// Selects the side to move's piece on `square`, computing where it may go.
    ///
    /// While a capture chain is in progress, only the capturing piece may be selected,
    /// and selecting it again changes nothing.
    pub fn select(&mut self, square: Square) -> RuleResult<()> {
        if let TurnPhase::MustContinueCapture(selection) = &self.phase {
            if selection.from == square {
                return Ok(());
            }
            return Err(RuleError::ChainInProgress {
                locked: selection.from,
            });
        }

        let piece = self
            .board
            .piece_at(square)
            .ok_or(RuleError::EmptySquare(square))?;

        if piece.owner() != self.side_to_move {
            return Err(RuleError::NotYourPiece {
                square,
                owner: piece.owner(),
                side_to_move: self.side_to_move,
            });
        }

        let destinations = legal_destinations(&self.board, square, false);
        debug!(
            "Selected {piece:#} on {square} with {} destination(s)",
            destinations.len()
        );
        self.phase = TurnPhase::Selected(Selection::new(square, destinations));

        Ok(())
    }

    /// Lets go of the selected piece. Refused during a capture chain.
    pub fn deselect(&mut self) -> RuleResult<()> {
        if let TurnPhase::MustContinueCapture(selection) = &self.phase {
            return Err(RuleError::ChainInProgress {
                locked: selection.from,
            });
        }

        self.phase = TurnPhase::Idle;
        Ok(())
    }

    /// Lands the selected piece on `to`, if it is one of its destinations.
    ///
    /// An illegal destination drops the selection, unless a capture chain is in progress,
    /// in which case the capturing piece stays selected.
    pub fn move_to(&mut self, to: Square) -> RuleResult<MoveOutcome> {
        let selection = self.phase.selection().ok_or(RuleError::NothingSelected)?;

        if !selection.contains(to) {
            let err = RuleError::IllegalDestination {
                from: selection.from,
                to,
            };
            if !self.is_capture_chain() {
                self.phase = TurnPhase::Idle;
            }
            return Err(err);
        }

        Ok(self.apply_move(to))
    }

    /// Lands the selected piece on `to`. No enforcement of legality.
    ///
    /// Captures score a point for the side to move. If the piece captured, was not promoted,
    /// and can capture again from `to`, the turn continues as a capture chain.
    /// Otherwise the move passes to the opponent.
    ///
    /// # Panics
    ///
    /// If no piece is selected.
    pub fn apply_move(&mut self, to: Square) -> MoveOutcome {
        let Some(selection) = self.phase.selection() else {
            panic!("Cannot apply a move to {to} without a selected piece");
        };
        debug_assert!(
            selection.contains(to),
            "{to} is not a destination of {}",
            selection.from
        );

        let mv = Move::new(selection.from, to);
        let applied = self.board.make_move(mv);
        let player = self.side_to_move;

        if let Some(captured) = applied.captured {
            self.scores[player] = self.scores[player].saturating_add(1);
            info!("{player:#} played {mv}, capturing on {captured}");
        } else {
            info!("{player:#} played {mv}");
        }

        if applied.promoted {
            info!("{player:#} promoted a King on {to}");
        }

        // Promotion ends the turn even if more captures are available
        let continuation = if applied.is_capture() && !applied.promoted {
            legal_destinations(&self.board, to, true)
        } else {
            Destinations::new()
        };

        let continues_capture = !continuation.is_empty();
        if continues_capture {
            debug!("{player:#} must continue capturing from {to}");
            self.phase = TurnPhase::MustContinueCapture(Selection::new(to, continuation));
        } else {
            self.complete_turn();
        }

        MoveOutcome {
            mv,
            applied,
            continues_capture,
        }
    }

    /// Routes a cell activation to the right action for the current phase.
    ///
    /// With nothing selected, or when the cell holds one of the side to move's pieces, the cell is selected.
    /// Otherwise the selected piece attempts to move there.
    ///
    /// # Example
    /// ```
    /// # use qorki::{Activation, Game};
    /// let mut game = Game::default();
    /// let b3 = "b3".parse().unwrap();
    /// assert_eq!(game.activate(b3).unwrap(), Activation::Selected(b3));
    /// assert!(matches!(game.activate("c4".parse().unwrap()).unwrap(), Activation::Moved(_)));
    /// ```
    pub fn activate(&mut self, square: Square) -> RuleResult<Activation> {
        let own_piece = self.board.owner_at(square) == Some(self.side_to_move);

        if own_piece || self.phase == TurnPhase::Idle {
            self.select(square)?;
            Ok(Activation::Selected(square))
        } else {
            self.move_to(square).map(Activation::Moved)
        }
    }

    /// Selects `mv.from()` and lands it on `mv.to()`.
    #[inline(always)]
    pub fn play(&mut self, mv: Move) -> RuleResult<MoveOutcome> {
        self.select(mv.from())?;
        self.move_to(mv.to())
    }

    /// Copies `self` and returns a [`Game`] after having played the provided [`Move`].
    #[inline(always)]
    pub fn with_move_played(&self, mv: Move) -> RuleResult<Self> {
        let mut copied = self.clone();
        copied.play(mv)?;
        Ok(copied)
    }

    /// Every landing the side to move may play right now.
    ///
    /// During a capture chain, only the capturing piece's landings are listed.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();

        if let TurnPhase::MustContinueCapture(selection) = &self.phase {
            moves.extend(
                selection
                    .destinations
                    .iter()
                    .map(|&to| Move::new(selection.from, to)),
            );
            return moves;
        }

        for (from, _) in self.board.iter_for(self.side_to_move) {
            for to in legal_destinations(&self.board, from, false) {
                moves.push(Move::new(from, to));
            }
        }

        moves
    }

    /// Decides whether the game has ended.
    #[inline(always)]
    pub fn outcome(&self) -> GameOutcome {
        outcome(&self.board, self.side_to_move)
    }

    /// Recursively plays every legal move until `depth` plies are reached, returning the number of leaves.
    ///
    /// This is just a convenience method.
    /// See [`perft()`] for more.
    #[inline(always)]
    pub fn perft(&self, depth: usize) -> u64 {
        perft(self, depth)
    }

    fn complete_turn(&mut self) {
        self.toggle_side_to_move();

        match self.outcome() {
            GameOutcome::Won(winner) => info!("{winner:#} has won the game"),
            GameOutcome::Ongoing => debug!("{:#} to move", self.side_to_move),
        }
    }
}

impl FromStr for Game {
    type Err = anyhow::Error;
    /// Wrapper for [`Game::from_placement`]
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_placement(s)
    }
}

impl Default for Game {
    /// Starting position, Red to move.
    #[inline(always)]
    fn default() -> Self {
        Self::new(Board::starting(), Player::Red)
    }
}

impl fmt::Display for Game {
    /// Draws the board alongside the state of the turn.
    ///
    /// The selected piece is marked with `>` and its destinations with `*`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let squares_to_string = |squares: &[Square]| {
            if squares.is_empty() {
                String::from("-")
            } else {
                squares
                    .iter()
                    .map(|sq| sq.to_uci())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        };

        let player_summary = |player: Player| {
            format!(
                "{} pieces, {} captured",
                self.board.count(player),
                self.score(player)
            )
        };

        let selected = self.selected();
        let destinations = self.destinations();

        for row in (0..Square::SIZE).rev() {
            write!(f, "{}|", row + 1)?;
            for col in 0..Square::SIZE {
                let square = Square::new_unchecked(col, row);
                let marker = if selected == Some(square) { '>' } else { ' ' };
                let occupant = match self.board.piece_at(square) {
                    Some(piece) => piece.char(),
                    None if destinations.contains(&square) => '*',
                    None => '.',
                };
                write!(f, "{marker}{occupant}")?;
            }

            match row {
                7 => write!(f, "        Turn: {:#}", self.side_to_move)?,
                6 => write!(f, "         Red: {}", player_summary(Player::Red))?,
                5 => write!(f, "        Blue: {}", player_summary(Player::Blue))?,
                4 => {
                    let selected = selected.map(|sq| sq.to_uci());
                    write!(f, "    Selected: {}", selected.as_deref().unwrap_or("-"))?
                }
                3 => write!(f, "       Moves: {}", squares_to_string(destinations))?,
                2 => {
                    let chain = if self.is_capture_chain() { "yes" } else { "no" };
                    write!(f, "       Chain: {chain}")?
                }
                1 => write!(f, "     Outcome: {}", self.outcome())?,
                _ => {}
            }
            writeln!(f)?;
        }
        write!(f, " +")?;
        for _ in 0..Square::SIZE {
            write!(f, "--")?;
        }
        write!(f, "\n  ")?;
        for col in 0..Square::SIZE {
            write!(f, " {}", (b'a' + col) as char)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_selection_rules() {
        let mut game = Game::default();

        assert_eq!(game.select(sq("d4")), Err(RuleError::EmptySquare(sq("d4"))));
        assert!(matches!(
            game.select(sq("a6")),
            Err(RuleError::NotYourPiece { owner: Player::Blue, .. })
        ));
        assert_eq!(game.phase(), &TurnPhase::Idle);

        game.select(sq("b3")).unwrap();
        assert_eq!(game.selected(), Some(sq("b3")));
        assert_eq!(game.destinations().len(), 2);

        // Reselecting another friendly piece
        game.select(sq("d3")).unwrap();
        assert_eq!(game.selected(), Some(sq("d3")));

        game.deselect().unwrap();
        assert_eq!(game.selected(), None);
        assert!(game.destinations().is_empty());
    }

    #[test]
    fn test_move_requires_selection() {
        let mut game = Game::default();
        assert_eq!(game.move_to(sq("c4")), Err(RuleError::NothingSelected));
    }

    #[test]
    fn test_illegal_destination_clears_selection() {
        let mut game = Game::default();
        game.select(sq("b3")).unwrap();

        assert_eq!(
            game.move_to(sq("b4")),
            Err(RuleError::IllegalDestination {
                from: sq("b3"),
                to: sq("b4")
            })
        );
        assert_eq!(game.phase(), &TurnPhase::Idle);
        assert_eq!(game.board(), &Board::starting());
        assert_eq!(game.side_to_move(), Player::Red);
    }

    #[test]
    fn test_legal_moves_from_start() {
        let game = Game::default();
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|&mv| game.board().captured_by(mv).is_none()));
        assert!(moves.iter().all(|mv| mv.from().row() == 2));
    }

    #[test]
    fn test_king_slide_passes_turn() {
        let mut game: Game = "8/8/8/8/8/8/8/R6b r".parse().unwrap();
        let outcome = game.play("a1c3".parse().unwrap()).unwrap();
        assert!(!outcome.applied.is_capture());
        assert!(!outcome.continues_capture);
        assert_eq!(game.score(Player::Red), 0);
        assert_eq!(game.side_to_move(), Player::Blue);
    }

    #[test]
    fn test_editing_drops_selection() {
        let mut game = Game::default();
        game.select(sq("b3")).unwrap();
        game.place(Piece::BLUE_MAN, sq("c4"));
        assert_eq!(game.selected(), None);

        game.select(sq("b3")).unwrap();
        assert_eq!(game.take(sq("c4")), Some(Piece::BLUE_MAN));
        assert_eq!(game.selected(), None);

        game.toggle_side_to_move();
        assert_eq!(game.side_to_move(), Player::Blue);
    }

    #[test]
    fn test_restart() {
        let mut game = Game::from_placement("8/8/8/8/8/8/8/R6b b").unwrap();
        game.restart();
        assert_eq!(game, Game::default());
    }

    #[test]
    fn test_display_marks_selection() {
        let mut game = Game::default();
        game.select(sq("b3")).unwrap();
        let text = game.to_string();
        assert!(text.contains("5| . . . . . . . .    Selected: b3"));
        assert!(text.contains("4| * . * . . . . .       Moves: a4, c4"));
        assert!(text.contains("3| .>r . r . r . r       Chain: no"));
        assert!(text.contains("Turn: red"));
        assert!(text.contains("Outcome: ongoing"));
    }
}
