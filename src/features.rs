use crate::board::{AppliedMove, BoardTracker, MoveError};
use crate::types::{FeatureVector, GameRecord};

use shakmaty::Role;

pub const DEFAULT_MAX_PLIES: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningPush {
    KingPawn,
    QueenPawn,
}

/// Pawn-opening signal read off the rendered SAN.
///
/// Prefix match on the notation rather than a first-move check, so any
/// later `e4`/`d4` push inside the window also counts.
pub fn opening_push(notation: &str) -> Option<OpeningPush> {
    if notation.starts_with("e4") {
        Some(OpeningPush::KingPawn)
    } else if notation.starts_with("d4") {
        Some(OpeningPush::QueenPawn)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// The window (or the whole game, if shorter) replayed cleanly.
    Complete,
    /// Replay stopped early; counters cover the resolvable prefix only.
    Truncated(MoveError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureExtraction {
    pub features: FeatureVector,
    pub status: ExtractionStatus,
}

impl FeatureExtraction {
    pub fn is_complete(&self) -> bool {
        self.status == ExtractionStatus::Complete
    }
}

fn accumulate(features: &mut FeatureVector, applied: &AppliedMove) {
    match opening_push(&applied.notation) {
        Some(OpeningPush::KingPawn) => features.e4_count += 1,
        Some(OpeningPush::QueenPawn) => features.d4_count += 1,
        None => {}
    }

    match applied.role {
        Role::Knight => features.knight_moves += 1,
        Role::Bishop => features.bishop_moves += 1,
        Role::Queen => features.queen_moves_early += 1,
        _ => {}
    }

    if applied.is_capture {
        features.captures_early += 1;
    }

    if is_castle_notation(&applied.notation) {
        features.early_castle = 1;
    }
}

/// Only the bare castle literals count; `O-O+` and `O-O-O#` do not.
fn is_castle_notation(notation: &str) -> bool {
    matches!(notation, "O-O" | "O-O-O")
}

/// Walk the first `max_plies` plies of `game` and count stylistic signals.
pub fn extract(game: &GameRecord, player: &str, max_plies: u32) -> FeatureExtraction {
    let mut features = FeatureVector {
        player: player.to_string(),
        ..FeatureVector::default()
    };
    let mut tracker = BoardTracker::new();

    for san in game.moves.iter().take(max_plies as usize) {
        match tracker.apply(san) {
            Ok(applied) => accumulate(&mut features, &applied),
            Err(err) => {
                return FeatureExtraction {
                    features,
                    status: ExtractionStatus::Truncated(err),
                };
            }
        }
    }

    FeatureExtraction {
        features,
        status: ExtractionStatus::Complete,
    }
}
