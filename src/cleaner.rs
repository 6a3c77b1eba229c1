use crate::log;
use crate::types::{Color, MetadataRow};

use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashSet;
use std::sync::LazyLock;

static YEAR_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"[0-9]{4}").expect("valid year regex"));

pub const DEFAULT_MIN_PLIES: u32 = 8;

/// Stems matched case-insensitively against `event`: simultaneous,
/// blindfold, odds, exhibition, casual, training, friendly, handicap.
pub const DEFAULT_EVENT_EXCLUSIONS: &[&str] = &[
    "simul", "blind", "odds", "exhib", "casual", "training", "friendly", "handicap",
];

/// Unknown or non-serious opponent markers, matched case-insensitively.
pub const DEFAULT_OPPONENT_EXCLUSIONS: &[&str] = &["NN", "anonymous"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CleanRules {
    pub event_exclusions: Vec<String>,
    pub opponent_exclusions: Vec<String>,
    pub min_plies: u32,
}

impl Default for CleanRules {
    fn default() -> Self {
        Self {
            event_exclusions: DEFAULT_EVENT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            opponent_exclusions: DEFAULT_OPPONENT_EXCLUSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_plies: DEFAULT_MIN_PLIES,
        }
    }
}

/// A metadata row that passed every cleaning stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CleanedRow {
    pub player: String,
    pub color: Color,
    pub opponent: Option<String>,
    pub result: Option<String>,
    pub event: Option<String>,
    pub site: Option<String>,
    pub date: Option<String>,
    #[serde(serialize_with = "serialize_year")]
    pub year: u16,
    pub eco: Option<String>,
    pub opening: String,
    pub plycount: Option<u32>,
}

/// Years are written as exactly four digits so `0850` survives a re-clean.
fn serialize_year<S: Serializer>(year: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{year:04}"))
}

impl From<CleanedRow> for MetadataRow {
    fn from(row: CleanedRow) -> Self {
        Self {
            player: row.player,
            color: row.color,
            opponent: row.opponent,
            result: row.result,
            event: row.event,
            site: row.site,
            date: row.date,
            year: format!("{:04}", row.year),
            eco: row.eco,
            opening: row.opening,
            plycount: row.plycount,
        }
    }
}

/// Rows dropped by each stage, in stage order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub input: usize,
    pub bad_year: usize,
    pub excluded_event: usize,
    pub excluded_opponent: usize,
    pub missing_eco: usize,
    pub too_short: usize,
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanedTable {
    pub rows: Vec<CleanedRow>,
    pub stats: CleanStats,
}

fn contains_any(value: Option<&str>, needles: &[String]) -> bool {
    let Some(value) = value else {
        return false;
    };
    let value = value.to_lowercase();
    needles
        .iter()
        .any(|needle| value.contains(&needle.to_lowercase()))
}

fn normalize_year(row: MetadataRow) -> Option<CleanedRow> {
    let year = YEAR_RE.find(&row.year)?.as_str().parse::<u16>().ok()?;
    Some(CleanedRow {
        player: row.player,
        color: row.color,
        opponent: row.opponent,
        result: row.result,
        event: row.event,
        site: row.site,
        date: row.date,
        year,
        eco: row.eco,
        opening: row.opening,
        plycount: row.plycount,
    })
}

fn has_eco(row: &CleanedRow) -> bool {
    matches!(row.eco.as_deref(), Some(eco) if eco != "?")
}

fn retain_counted(rows: &mut Vec<CleanedRow>, keep: impl FnMut(&CleanedRow) -> bool) -> usize {
    let before = rows.len();
    rows.retain(keep);
    before - rows.len()
}

/// Apply the cleaning stages in order:
/// year normalization, event exclusion, opponent exclusion, ECO completeness,
/// minimum length, exact-duplicate collapse.
///
/// Text columns are compared as stored; no whitespace normalization happens,
/// so rows differing only in surrounding whitespace are distinct.
pub fn clean(rows: impl IntoIterator<Item = MetadataRow>, rules: &CleanRules) -> CleanedTable {
    let mut stats = CleanStats::default();

    let mut rows: Vec<CleanedRow> = rows
        .into_iter()
        .inspect(|_| stats.input += 1)
        .filter_map(normalize_year)
        .collect();
    stats.bad_year = stats.input - rows.len();

    stats.excluded_event = retain_counted(&mut rows, |row| {
        !contains_any(row.event.as_deref(), &rules.event_exclusions)
    });
    stats.excluded_opponent = retain_counted(&mut rows, |row| {
        !contains_any(row.opponent.as_deref(), &rules.opponent_exclusions)
    });
    stats.missing_eco = retain_counted(&mut rows, has_eco);
    stats.too_short = retain_counted(&mut rows, |row| {
        row.plycount.is_some_and(|plies| plies >= rules.min_plies)
    });

    let mut seen = HashSet::with_capacity(rows.len());
    stats.duplicates = retain_counted(&mut rows, |row| seen.insert(row.clone()));

    log::info(format!(
        "Cleaned {} rows -> {} (year {}, event {}, opponent {}, eco {}, short {}, duplicate {})",
        stats.input,
        rows.len(),
        stats.bad_year,
        stats.excluded_event,
        stats.excluded_opponent,
        stats.missing_eco,
        stats.too_short,
        stats.duplicates
    ));

    CleanedTable { rows, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> MetadataRow {
        MetadataRow {
            player: "Mikhail Tal".to_string(),
            color: Color::White,
            opponent: Some("Smyslov, Vassily".to_string()),
            result: Some("1-0".to_string()),
            event: Some("Candidates Tournament".to_string()),
            site: Some("Bled".to_string()),
            date: Some("1959.09.07".to_string()),
            year: "1959".to_string(),
            eco: Some("B10".to_string()),
            opening: "Caro-Kann Defense".to_string(),
            plycount: Some(62),
        }
    }

    fn clean_one(row: MetadataRow) -> CleanedTable {
        clean([row], &CleanRules::default())
    }

    #[test]
    fn test_valid_row_survives_with_integer_year() {
        let table = clean_one(row());
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].year, 1959);
        assert_eq!(table.stats.input, 1);
    }

    #[test]
    fn test_unknown_date_dropped_by_year_stage() {
        let mut r = row();
        r.date = Some("????.??.??".to_string());
        r.year = "????".to_string();

        let table = clean_one(r);
        assert!(table.rows.is_empty());
        assert_eq!(table.stats.bad_year, 1);
    }

    #[test]
    fn test_year_uses_first_four_digit_run() {
        let mut r = row();
        r.year = "c1959".to_string();
        assert_eq!(clean_one(r).rows[0].year, 1959);

        let mut short = row();
        short.year = "85".to_string();
        assert_eq!(clean_one(short).stats.bad_year, 1);
    }

    #[test]
    fn test_event_exclusion_vocabulary() {
        for event in [
            "Simultaneous display",
            "Blindfold simul",
            "Odds game",
            "Exhibition match",
            "CASUAL GAME",
            "Training game",
            "Friendly match",
            "Handicap games",
        ] {
            let mut r = row();
            r.event = Some(event.to_string());
            let table = clean_one(r);
            assert!(table.rows.is_empty(), "{event} should be excluded");
            assert_eq!(table.stats.excluded_event, 1);
        }
    }

    #[test]
    fn test_missing_event_and_opponent_are_kept() {
        let mut r = row();
        r.event = None;
        r.opponent = None;
        assert_eq!(clean_one(r).rows.len(), 1);
    }

    #[test]
    fn test_opponent_exclusion() {
        for opponent in ["NN", "nn", "Anonymous", "Amateur (anonymous)"] {
            let mut r = row();
            r.opponent = Some(opponent.to_string());
            let table = clean_one(r);
            assert!(table.rows.is_empty(), "{opponent} should be excluded");
            assert_eq!(table.stats.excluded_opponent, 1);
        }
    }

    #[test]
    fn test_opponent_marker_is_a_plain_substring() {
        // The marker is matched anywhere in the name, as a substring.
        let mut r = row();
        r.opponent = Some("Nunn, John".to_string());
        assert!(clean_one(r).rows.is_empty());
    }

    #[test]
    fn test_eco_completeness() {
        let mut missing = row();
        missing.eco = None;
        assert_eq!(clean_one(missing).stats.missing_eco, 1);

        let mut question = row();
        question.eco = Some("?".to_string());
        assert_eq!(clean_one(question).stats.missing_eco, 1);
    }

    #[test]
    fn test_minimum_length() {
        let mut short = row();
        short.plycount = Some(7);
        assert_eq!(clean_one(short).stats.too_short, 1);

        let mut undefined = row();
        undefined.plycount = None;
        assert_eq!(clean_one(undefined).stats.too_short, 1);

        let mut boundary = row();
        boundary.plycount = Some(8);
        assert_eq!(clean_one(boundary).rows.len(), 1);
    }

    #[test]
    fn test_duplicates_collapse_after_year_normalization() {
        let mut formatted = row();
        formatted.year = " 1959".to_string();

        let table = clean([row(), formatted, row()], &CleanRules::default());
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.stats.duplicates, 2);
    }

    #[test]
    fn test_event_whitespace_is_part_of_row_identity() {
        let mut padded = row();
        padded.event = Some(" Candidates Tournament ".to_string());

        let table = clean([row(), padded], &CleanRules::default());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.stats.duplicates, 0);
    }

    #[test]
    fn test_stage_order_counts_each_row_once() {
        let mut nn_and_short = row();
        nn_and_short.opponent = Some("NN".to_string());
        nn_and_short.plycount = Some(2);

        let table = clean([nn_and_short], &CleanRules::default());
        assert_eq!(table.stats.excluded_opponent, 1);
        assert_eq!(table.stats.too_short, 0);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let mut early = row();
        early.year = "0850".to_string();
        let mut second = row();
        second.opponent = Some("Botvinnik".to_string());
        let mut dropped = row();
        dropped.event = Some("Exhibition".to_string());

        let rules = CleanRules::default();
        let once = clean([row(), early, second, dropped, row()], &rules);
        let twice = clean(once.rows.iter().cloned().map(MetadataRow::from), &rules);

        assert_eq!(once.rows.len(), 3);
        assert_eq!(twice.rows, once.rows);
        assert_eq!(twice.stats.input, 3);
        assert_eq!(twice.stats.duplicates, 0);
    }

    #[test]
    fn test_survivors_satisfy_every_predicate() {
        let mut rows = Vec::new();
        for (i, event) in ["Olympiad", "simul", "Match"].iter().enumerate() {
            for opponent in ["Keres", "NN"] {
                for eco in [Some("B10"), None, Some("?")] {
                    let mut r = row();
                    r.event = Some(event.to_string());
                    r.opponent = Some(opponent.to_string());
                    r.eco = eco.map(str::to_string);
                    r.plycount = Some(6 + i as u32 * 2);
                    rows.push(r);
                }
            }
        }

        let rules = CleanRules::default();
        let table = clean(rows, &rules);
        assert!(!table.rows.is_empty());
        for r in &table.rows {
            assert!((1000..=9999).contains(&r.year));
            assert!(has_eco(r));
            assert!(r.plycount.unwrap() >= rules.min_plies);
            assert!(!contains_any(r.event.as_deref(), &rules.event_exclusions));
            assert!(!contains_any(r.opponent.as_deref(), &rules.opponent_exclusions));
        }
    }
}
