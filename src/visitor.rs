use crate::error::Diagnostics;
use crate::types::{GameRecord, MoveList};

use pgn_reader::{Outcome, RawTag, SanPlus, Skip, Visitor};
use std::mem;
use std::ops::ControlFlow;

/// Streaming PGN visitor (pgn-reader).
///
/// Keeps every header in file order (first value wins on duplicate tags) and
/// the mainline SAN tokens. Variations are skipped; comments and NAGs are
/// dropped. Invalid UTF-8 in tags is replaced and noted in `parse_error`.
pub struct GameVisitor {
    headers: Vec<(String, String)>,
    moves: MoveList,
    result_marker: Option<String>,
    diagnostics: Diagnostics,
    pub current_game: Option<GameRecord>,
}

impl GameVisitor {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            moves: MoveList::new(),
            result_marker: None,
            diagnostics: Diagnostics::default(),
            current_game: None,
        }
    }

    fn decode_lossy(bytes: &[u8], label: &str, diagnostics: &mut Diagnostics) -> String {
        match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => {
                diagnostics.note(format!("Replaced invalid UTF-8 in {label}"));
                String::from_utf8_lossy(bytes).into_owned()
            }
        }
    }

    fn set_tag(&mut self, key: &[u8], value: RawTag<'_>) {
        let bytes = value.as_bytes();
        if bytes.is_empty() {
            return;
        }

        let key = String::from_utf8_lossy(key).into_owned();
        if self.headers.iter().any(|(k, _)| *k == key) {
            return;
        }

        let value = Self::decode_lossy(bytes, &key, &mut self.diagnostics);
        self.headers.push((key, value));
    }

    fn build_game_record(&mut self) {
        let headers = mem::take(&mut self.headers);
        let moves = mem::take(&mut self.moves);
        let outcome = self.result_marker.take();

        // Nothing recognisable between two record boundaries.
        if headers.is_empty() && moves.is_empty() && outcome.is_none() {
            self.diagnostics = Diagnostics::default();
            self.current_game = None;
            return;
        }

        self.current_game = Some(GameRecord {
            headers,
            moves,
            outcome,
            parse_error: self.diagnostics.take_message(),
        });
    }
}

impl Default for GameVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for GameVisitor {
    type Tags = ();
    type Movetext = ();
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.headers.clear();
        self.moves.clear();
        self.result_marker = None;
        self.diagnostics = Diagnostics::default();
        self.current_game = None;
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        self.set_tag(key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, _: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        self.moves.push(san);
        ControlFlow::Continue(())
    }

    fn outcome(&mut self, _: &mut Self::Movetext, outcome: Outcome) -> ControlFlow<Self::Output> {
        self.result_marker = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _: Self::Movetext) -> Self::Output {
        self.build_game_record();
    }
}
