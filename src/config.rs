use crate::cleaner::CleanRules;
use crate::error::{Error, Result};
use crate::features::DEFAULT_MAX_PLIES;
use crate::openings::OpeningTable;

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Run configuration, loaded once and passed by reference.
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_plies: u32,
    /// Drop feature rows whose replay stopped before the window ended.
    pub drop_truncated_features: bool,
    /// ECO entries merged over the built-in opening table.
    pub openings: HashMap<String, String>,
    pub cleaning: CleanRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_plies: DEFAULT_MAX_PLIES,
            drop_truncated_features: false,
            openings: HashMap::new(),
            cleaning: CleanRules::default(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn opening_table(&self) -> OpeningTable {
        OpeningTable::builtin().with_overrides(&self.openings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::DEFAULT_MIN_PLIES;

    #[test]
    fn test_empty_object_yields_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_plies, 20);
        assert_eq!(config.cleaning.min_plies, DEFAULT_MIN_PLIES);
        assert!(config.cleaning.event_exclusions.contains(&"simul".to_string()));
    }

    #[test]
    fn test_partial_cleaning_section_keeps_other_defaults() {
        let config = Config::from_json(
            r#"{"max_plies": 30, "cleaning": {"min_plies": 12}, "openings": {"C50": "Hungarian"}}"#,
        )
        .unwrap();

        assert_eq!(config.max_plies, 30);
        assert_eq!(config.cleaning.min_plies, 12);
        assert_eq!(config.cleaning.opponent_exclusions, vec!["NN", "anonymous"]);
        assert_eq!(config.opening_table().lookup(Some("C50")), "Hungarian");
        assert_eq!(config.opening_table().lookup(Some("C60")), "Ruy Lopez");
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Config::from_json(r#"{"max_plies": "twenty"}"#).is_err());
    }

    #[test]
    fn test_load_missing_file_is_open_error() {
        let err = Config::load(Path::new("/nonexistent-chess-style-dir/config.json")).unwrap_err();
        assert!(matches!(err, Error::Open { .. }));
    }
}
