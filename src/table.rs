use crate::config::Config;
use crate::error::{Error, Result};
use crate::features::extract;
use crate::log;
use crate::mapper::to_row;
use crate::openings::OpeningTable;
use crate::reader::open_readers;
use crate::types::{FeatureVector, GameRecord, MetadataRow};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// One tracked player and the PGN file (or glob pattern) holding their games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInput {
    pub player: String,
    pub pattern: String,
}

impl FromStr for PlayerInput {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (player, pattern) = s
            .split_once('=')
            .ok_or_else(|| Error::PlayerInput(s.to_string()))?;
        let (player, pattern) = (player.trim(), pattern.trim());
        if player.is_empty() || pattern.is_empty() {
            return Err(Error::PlayerInput(s.to_string()));
        }
        Ok(Self {
            player: player.to_string(),
            pattern: pattern.to_string(),
        })
    }
}

/// Every game behind one input, in sorted file order. Per-game decode notes
/// are reported at `warn`.
fn player_games(input: &PlayerInput) -> Result<impl Iterator<Item = GameRecord>> {
    let readers = open_readers(&input.pattern)?;
    Ok(readers.into_iter().flatten().inspect(|game| {
        if let Some(note) = &game.parse_error {
            log::warn(format!(
                "{} vs {}: {}",
                game.white().unwrap_or("?"),
                game.black().unwrap_or("?"),
                note
            ));
        }
    }))
}

/// Metadata rows for every game of one player, before any filtering.
pub fn metadata_rows(input: &PlayerInput, openings: &OpeningTable) -> Result<Vec<MetadataRow>> {
    log::info(format!("Processing: {}", input.player));

    Ok(player_games(input)?
        .map(|game| to_row(&game, &input.player, openings))
        .collect())
}

fn has_numeric_year(row: &MetadataRow) -> bool {
    !row.year.is_empty() && row.year.chars().all(|c| c.is_ascii_digit())
}

/// Metadata table across players, without games whose ply count is
/// undefined or whose year is not numeric.
pub fn build_metadata_table(inputs: &[PlayerInput], config: &Config) -> Result<Vec<MetadataRow>> {
    let openings = config.opening_table();
    let mut table = Vec::new();

    for input in inputs {
        let rows = metadata_rows(input, &openings)?;
        let total = rows.len();
        table.extend(
            rows.into_iter()
                .filter(|row| row.plycount.is_some() && has_numeric_year(row)),
        );
        log::info(format!("{}: {} games read", input.player, total));
    }

    log::info(format!("Total games: {}", table.len()));
    Ok(table)
}

/// Feature rows across players, one per parsed game.
pub fn build_feature_table(inputs: &[PlayerInput], config: &Config) -> Result<Vec<FeatureVector>> {
    let mut table = Vec::new();

    for input in inputs {
        log::info(format!("Processing {}...", input.player));
        for game in player_games(input)? {
            let extraction = extract(&game, &input.player, config.max_plies);
            if !extraction.is_complete() {
                log::warn(format!(
                    "{}: feature window truncated ({:?})",
                    input.player, extraction.status
                ));
                if config.drop_truncated_features {
                    continue;
                }
            }
            table.push(extraction.features);
        }
    }

    Ok(table)
}

pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = File::create(path)?;
    write_rows(file, rows)
}

pub fn read_rows<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

pub fn read_metadata_csv(path: &Path) -> Result<Vec<MetadataRow>> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(file)
}
