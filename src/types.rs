use pgn_reader::SanPlus;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

pub type MoveList = SmallVec<[SanPlus; 64]>;

/// One parsed PGN record: headers in file order plus the mainline moves.
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    pub headers: Vec<(String, String)>,
    pub moves: MoveList,
    /// Result marker found at the end of the movetext (`1-0`, `0-1`, ...).
    pub outcome: Option<String>,
    /// NULL-equivalent for clean records, joined diagnostics otherwise.
    pub parse_error: Option<String>,
}

impl GameRecord {
    pub fn header(&self, tag: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == tag)
            .map(|(_, v)| v.as_str())
    }

    pub fn white(&self) -> Option<&str> {
        self.header("White")
    }

    pub fn black(&self) -> Option<&str> {
        self.header("Black")
    }

    pub fn event(&self) -> Option<&str> {
        self.header("Event")
    }

    pub fn site(&self) -> Option<&str> {
        self.header("Site")
    }

    pub fn date(&self) -> Option<&str> {
        self.header("Date")
    }

    pub fn eco(&self) -> Option<&str> {
        self.header("ECO")
    }

    /// `Result` tag, falling back to the movetext result marker.
    pub fn result(&self) -> Option<&str> {
        self.header("Result").or(self.outcome.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
    Unknown,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Unknown => "unknown",
        })
    }
}

/// Column order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetadataRow {
    pub player: String,
    pub color: Color,
    pub opponent: Option<String>,
    pub result: Option<String>,
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    pub year: String,
    pub eco: Option<String>,
    pub opening: String,
    pub plycount: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub e4_count: u32,
    pub d4_count: u32,
    pub knight_moves: u32,
    pub bishop_moves: u32,
    pub queen_moves_early: u32,
    pub captures_early: u32,
    pub early_castle: u32,
    pub player: String,
}
