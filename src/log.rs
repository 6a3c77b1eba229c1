//! Leveled stderr logging. The threshold comes from `CHESS_STYLE_LOG`
//! (`error`, `warn` or `info`) and defaults to `error`.

use std::env;
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Error,
    Warn,
    Info,
}

impl Level {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "err" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" | "debug" | "trace" => Some(Self::Info),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
        }
    }
}

static THRESHOLD: LazyLock<Level> = LazyLock::new(|| {
    env::var("CHESS_STYLE_LOG")
        .ok()
        .and_then(|s| Level::parse(&s))
        .unwrap_or(Level::Error)
});

fn emit(level: Level, msg: &str) {
    if level <= *THRESHOLD {
        eprintln!("[chess-style] {}: {}", level.label(), msg);
    }
}

pub fn error(msg: impl AsRef<str>) {
    emit(Level::Error, msg.as_ref());
}

pub fn warn(msg: impl AsRef<str>) {
    emit(Level::Warn, msg.as_ref());
}

/// Progress and per-stage counts.
pub fn info(msg: impl AsRef<str>) {
    emit(Level::Info, msg.as_ref());
}

#[cfg(test)]
mod tests {
    use super::Level;

    #[test]
    fn test_level_parse_aliases() {
        assert_eq!(Level::parse("warning"), Some(Level::Warn));
        assert_eq!(Level::parse(" INFO "), Some(Level::Info));
        assert_eq!(Level::parse("err"), Some(Level::Error));
    }

    #[test]
    fn test_level_parse_rejects_unknown() {
        assert_eq!(Level::parse("verbose"), None);
        assert_eq!(Level::parse(""), None);
    }

    #[test]
    fn test_info_is_most_verbose() {
        assert!(Level::Info > Level::Warn);
        assert!(Level::Warn > Level::Error);
        assert_eq!(Level::Warn.label(), "WARN");
    }
}
