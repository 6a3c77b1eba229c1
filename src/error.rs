use std::io;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("invalid input pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("invalid player input '{0}', expected NAME=PATH")]
    PlayerInput(String),

    #[error("no files match '{0}'")]
    NoMatches(String),

    #[error("invalid configuration '{path}': {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Decode notes gathered while one game is read. Rendered as a single
/// `"; "`-joined message on the finished record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    notes: Vec<String>,
}

impl Diagnostics {
    pub fn note(&mut self, msg: impl Into<String>) {
        self.notes.push(msg.into());
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Drain the notes into one message, leaving the collector empty.
    pub fn take_message(&mut self) -> Option<String> {
        if self.notes.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.notes).join("; "))
    }
}
