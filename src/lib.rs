pub mod board;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod features;
pub mod log;
pub mod mapper;
pub mod openings;
pub mod reader;
pub mod table;
pub mod types;
pub mod visitor;

pub use board::{AppliedMove, BoardTracker, MoveError, ReplayError};
pub use cleaner::{CleanRules, CleanStats, CleanedRow, CleanedTable, clean};
pub use config::Config;
pub use error::{Diagnostics, Error, Result};
pub use features::{DEFAULT_MAX_PLIES, ExtractionStatus, FeatureExtraction, extract};
pub use mapper::{side_of, to_row};
pub use openings::{OpeningTable, UNKNOWN_OPENING};
pub use reader::{GameReader, ReadNextGameOutcome};
pub use table::PlayerInput;
pub use types::{Color, FeatureVector, GameRecord, MetadataRow};
