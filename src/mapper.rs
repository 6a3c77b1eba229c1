use crate::board::BoardTracker;
use crate::log;
use crate::openings::OpeningTable;
use crate::types::{Color, GameRecord, MetadataRow};

/// Which side `player` played, by last-name substring match on the headers.
///
/// The last whitespace token of `player` is compared case-insensitively
/// against White first, then Black.
pub fn side_of(player: &str, white: Option<&str>, black: Option<&str>) -> Color {
    let Some(last_name) = player.split_whitespace().last() else {
        return Color::Unknown;
    };
    let needle = last_name.to_lowercase();

    let contains = |header: Option<&str>| {
        header.is_some_and(|value| value.to_lowercase().contains(&needle))
    };

    if contains(white) {
        Color::White
    } else if contains(black) {
        Color::Black
    } else {
        Color::Unknown
    }
}

fn opponent_of(
    color: Color,
    player: &str,
    white: Option<&str>,
    black: Option<&str>,
) -> Option<String> {
    let opponent = match color {
        Color::White => black,
        Color::Black => white,
        Color::Unknown if white == Some(player) => black,
        Color::Unknown => white,
    };
    opponent.map(str::to_string)
}

/// First four characters of the Date header, numeric or not.
fn year_prefix(date: Option<&str>) -> String {
    date.unwrap_or_default().chars().take(4).collect()
}

/// Build the metadata row for one game as seen from `player`.
pub fn to_row(game: &GameRecord, player: &str, openings: &OpeningTable) -> MetadataRow {
    let white = game.white();
    let black = game.black();
    let color = side_of(player, white, black);

    let plycount = match BoardTracker::replay(game).end_ply_count() {
        Ok(plies) => Some(plies),
        Err(err) => {
            log::warn(format!(
                "Undefined ply count for {} vs {}: {}",
                white.unwrap_or("?"),
                black.unwrap_or("?"),
                err
            ));
            None
        }
    };

    MetadataRow {
        player: player.to_string(),
        color,
        opponent: opponent_of(color, player, white, black),
        result: game.result().map(str::to_string),
        event: game.event().map(str::to_string),
        site: game.site().map(str::to_string),
        date: game.date().map(str::to_string),
        year: year_prefix(game.date()),
        eco: game.eco().map(str::to_string),
        opening: openings.lookup(game.eco()).to_string(),
        plycount,
    }
}
