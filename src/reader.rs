use crate::error::{Error, Result};
use crate::log;
use crate::types::GameRecord;
use crate::visitor::GameVisitor;

use pgn_reader::Reader;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub type PgnInput = Box<dyn Read>;

/// Consecutive parser-stage errors tolerated before a source is abandoned.
const MAX_CONSECUTIVE_ERRORS: usize = 16;

pub enum ReadNextGameOutcome {
    GameReady(GameRecord),
    /// The block between two record boundaries was not a game; keep reading.
    Skipped,
    ReaderFinished,
}

/// Pull-based cursor over the games of one PGN stream.
///
/// The sequence is finite and not restartable: once `ReaderFinished` is
/// returned every later call returns it again.
pub struct GameReader {
    pgn_reader: Reader<PgnInput>,
    visitor: GameVisitor,
    source: String,
    next_game_index: usize,
    consecutive_errors: usize,
    finished: bool,
}

impl GameReader {
    pub fn new(input: PgnInput, source: impl Into<String>) -> Self {
        // pgn-reader buffers internally, so no extra BufReader layer here.
        Self {
            pgn_reader: Reader::new(input),
            visitor: GameVisitor::new(),
            source: source.into(),
            next_game_index: 1,
            consecutive_errors: 0,
            finished: false,
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let input = open_input_stream(path)?;
        Ok(Self::new(input, path.display().to_string()))
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let input: PgnInput = Box::new(std::io::Cursor::new(bytes.into()));
        Self::new(input, "<memory>")
    }

    pub fn read_next(&mut self) -> ReadNextGameOutcome {
        if self.finished {
            return ReadNextGameOutcome::ReaderFinished;
        }

        let game_index = self.next_game_index;

        match self.pgn_reader.read_game(&mut self.visitor) {
            Ok(Some(())) => {
                self.next_game_index += 1;
                self.consecutive_errors = 0;
                match self.visitor.current_game.take() {
                    Some(game) => ReadNextGameOutcome::GameReady(game),
                    None => {
                        log::warn(format!(
                            "Skipped block without tags or moves: file='{}'; game_index={}",
                            self.source, game_index
                        ));
                        ReadNextGameOutcome::Skipped
                    }
                }
            }
            Ok(None) => {
                self.finished = true;
                ReadNextGameOutcome::ReaderFinished
            }
            Err(error) => {
                self.next_game_index += 1;
                self.consecutive_errors += 1;
                log::warn(format!(
                    "Parser-stage error: stage=read_game; file='{}'; game_index={}; error={}",
                    self.source, game_index, error
                ));

                if self.consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    log::warn(format!(
                        "Giving up on '{}' after {} consecutive errors",
                        self.source, self.consecutive_errors
                    ));
                    self.finished = true;
                    ReadNextGameOutcome::ReaderFinished
                } else {
                    ReadNextGameOutcome::Skipped
                }
            }
        }
    }
}

impl Iterator for GameReader {
    type Item = GameRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.read_next() {
                ReadNextGameOutcome::GameReady(game) => return Some(game),
                ReadNextGameOutcome::Skipped => continue,
                ReadNextGameOutcome::ReaderFinished => return None,
            }
        }
    }
}

fn open_input_stream(path: &Path) -> Result<PgnInput> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(file))
}

/// Expand a glob pattern or pass a single file path through unchanged.
pub fn expand_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
        let mut paths: Vec<PathBuf> = glob::glob(pattern)
            .map_err(|source| Error::Pattern {
                pattern: pattern.to_string(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(Error::NoMatches(pattern.to_string()));
        }
        Ok(paths)
    } else {
        Ok(vec![PathBuf::from(pattern)])
    }
}

/// Open every file a pattern resolves to, in sorted path order.
///
/// A single named file that cannot be opened is an error; when a pattern
/// matched several files the unreadable ones are logged and skipped.
pub fn open_readers(pattern: &str) -> Result<Vec<GameReader>> {
    let paths = expand_paths(pattern)?;
    let single = paths.len() == 1;
    let mut readers = Vec::with_capacity(paths.len());

    for path in &paths {
        match GameReader::open(path) {
            Ok(reader) => readers.push(reader),
            Err(err) if !single => log::warn(err.to_string()),
            Err(err) => return Err(err),
        }
    }

    Ok(readers)
}
