use crate::types::GameRecord;

use pgn_reader::SanPlus;
use shakmaty::{Chess, Color, Position, Role, Square};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    /// 1-based ply number of this move.
    pub ply: u32,
    pub from: Option<Square>,
    pub to: Square,
    pub role: Role,
    pub is_capture: bool,
    pub is_castle: bool,
    /// SAN as a PGN writer renders it, check suffix included.
    pub notation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("unresolvable move '{san}' at ply {ply}: {reason}")]
    Unresolved { ply: u32, san: String, reason: String },

    #[error("board halted before ply {ply} after an earlier rejected move")]
    Halted { ply: u32 },
}

/// Why a full-game ply count is undefined.
pub type ReplayError = MoveError;

/// Replays SAN tokens against the standard initial position.
///
/// Moves are applied strictly in order. The first token that does not
/// resolve against the current position is rejected and halts the tracker;
/// every later `apply` fails with `MoveError::Halted`.
#[derive(Debug, Clone, Default)]
pub struct BoardTracker {
    pos: Chess,
    ply: u32,
    failure: Option<MoveError>,
}

impl BoardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay a whole game, stopping at the first unresolvable move.
    pub fn replay(game: &GameRecord) -> Self {
        let mut tracker = Self::new();
        for san in &game.moves {
            if tracker.apply(san).is_err() {
                break;
            }
        }
        tracker
    }

    pub fn apply(&mut self, san: &SanPlus) -> Result<AppliedMove, MoveError> {
        if self.failure.is_some() {
            return Err(MoveError::Halted { ply: self.ply + 1 });
        }

        let m = match san.san.to_move(&self.pos) {
            Ok(m) => m,
            Err(err) => {
                let failure = MoveError::Unresolved {
                    ply: self.ply + 1,
                    san: san.to_string(),
                    reason: err.to_string(),
                };
                self.failure = Some(failure.clone());
                return Err(failure);
            }
        };

        let from = m.from();
        let to = m.to();
        let role = m.role();
        let is_capture = m.is_capture();
        let is_castle = m.is_castle();

        let rendered = SanPlus::from_move_and_play_unchecked(&mut self.pos, m);
        self.ply += 1;

        Ok(AppliedMove {
            ply: self.ply,
            from,
            to,
            role,
            is_capture,
            is_castle,
            notation: rendered.to_string(),
        })
    }

    pub fn plies_applied(&self) -> u32 {
        self.ply
    }

    pub fn side_to_move(&self) -> Color {
        self.pos.turn()
    }

    pub fn is_halted(&self) -> bool {
        self.failure.is_some()
    }

    /// Ply count of the replayed game, or the move that made it undefined.
    pub fn end_ply_count(&self) -> Result<u32, ReplayError> {
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(self.ply),
        }
    }
}
