use std::collections::HashMap;

pub const UNKNOWN_OPENING: &str = "Unknown Opening";

/// ECO volume breakdown: (first code, last code, name).
const ECO_RANGES: &[(&str, &str, &str)] = &[
    ("A00", "A00", "Uncommon Opening"),
    ("A01", "A01", "Nimzo-Larsen Attack"),
    ("A02", "A03", "Bird's Opening"),
    ("A04", "A06", "Reti Opening"),
    ("A07", "A08", "King's Indian Attack"),
    ("A09", "A09", "Reti Opening"),
    ("A10", "A39", "English Opening"),
    ("A40", "A41", "Queen's Pawn Game"),
    ("A42", "A42", "Modern Defense, Averbakh System"),
    ("A43", "A44", "Old Benoni Defense"),
    ("A45", "A46", "Queen's Pawn Game"),
    ("A47", "A47", "Queen's Indian Defense"),
    ("A48", "A49", "King's Indian Defense, East Indian"),
    ("A50", "A50", "Queen's Pawn Game"),
    ("A51", "A52", "Budapest Gambit"),
    ("A53", "A55", "Old Indian Defense"),
    ("A56", "A56", "Benoni Defense"),
    ("A57", "A59", "Benko Gambit"),
    ("A60", "A79", "Benoni Defense, Modern"),
    ("A80", "A99", "Dutch Defense"),
    ("B00", "B00", "King's Pawn Opening"),
    ("B01", "B01", "Scandinavian Defense"),
    ("B02", "B05", "Alekhine's Defense"),
    ("B06", "B06", "Modern Defense"),
    ("B07", "B09", "Pirc Defense"),
    ("B10", "B19", "Caro-Kann Defense"),
    ("B20", "B99", "Sicilian Defense"),
    ("C00", "C19", "French Defense"),
    ("C20", "C20", "King's Pawn Game"),
    ("C21", "C22", "Center Game"),
    ("C23", "C24", "Bishop's Opening"),
    ("C25", "C29", "Vienna Game"),
    ("C30", "C39", "King's Gambit"),
    ("C40", "C40", "King's Knight Opening"),
    ("C41", "C41", "Philidor Defense"),
    ("C42", "C43", "Petrov's Defense"),
    ("C44", "C44", "King's Pawn Game"),
    ("C45", "C45", "Scotch Game"),
    ("C46", "C46", "Three Knights Game"),
    ("C47", "C49", "Four Knights Game"),
    ("C50", "C50", "Italian Game"),
    ("C51", "C52", "Evans Gambit"),
    ("C53", "C54", "Giuoco Piano"),
    ("C55", "C59", "Two Knights Defense"),
    ("C60", "C99", "Ruy Lopez"),
    ("D00", "D00", "Queen's Pawn Game"),
    ("D01", "D01", "Richter-Veresov Attack"),
    ("D02", "D02", "Queen's Pawn Game"),
    ("D03", "D03", "Torre Attack"),
    ("D04", "D05", "Colle System"),
    ("D06", "D06", "Queen's Gambit"),
    ("D07", "D07", "Chigorin Defense"),
    ("D08", "D09", "Albin Countergambit"),
    ("D10", "D19", "Slav Defense"),
    ("D20", "D29", "Queen's Gambit Accepted"),
    ("D30", "D42", "Queen's Gambit Declined"),
    ("D43", "D49", "Semi-Slav Defense"),
    ("D50", "D69", "Queen's Gambit Declined"),
    ("D70", "D79", "Neo-Grunfeld Defense"),
    ("D80", "D99", "Grunfeld Defense"),
    ("E00", "E00", "Queen's Pawn Game"),
    ("E01", "E09", "Catalan Opening"),
    ("E10", "E10", "Queen's Pawn Game"),
    ("E11", "E11", "Bogo-Indian Defense"),
    ("E12", "E19", "Queen's Indian Defense"),
    ("E20", "E59", "Nimzo-Indian Defense"),
    ("E60", "E99", "King's Indian Defense"),
];

/// Read-only ECO code to opening name map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningTable {
    names: HashMap<String, String>,
}

impl OpeningTable {
    /// Table covering every code from A00 to E99.
    pub fn builtin() -> Self {
        let mut names = HashMap::with_capacity(500);
        for &(first, last, name) in ECO_RANGES {
            let Some((volume, lo)) = split_code(first) else {
                continue;
            };
            let Some((_, hi)) = split_code(last) else {
                continue;
            };
            for n in lo..=hi {
                names.insert(format!("{volume}{n:02}"), name.to_string());
            }
        }
        Self { names }
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Entries in `overrides` replace or extend the current ones.
    pub fn with_overrides(mut self, overrides: &HashMap<String, String>) -> Self {
        for (code, name) in overrides {
            self.names.insert(code.clone(), name.clone());
        }
        self
    }

    /// Opening name for `code`, or [`UNKNOWN_OPENING`] when absent or unmatched.
    pub fn lookup(&self, code: Option<&str>) -> &str {
        code.and_then(|c| self.names.get(c))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_OPENING)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn split_code(code: &str) -> Option<(char, u8)> {
    let mut chars = code.chars();
    let volume = chars.next()?;
    let number = chars.as_str().parse::<u8>().ok()?;
    Some((volume, number))
}
