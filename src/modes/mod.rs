mod dump_today;
mod live;
mod replay;
mod shared;

use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunMode {
    Live,
    DumpToday,
    Replay,
}

impl RunMode {
    fn from_env() -> Self {
        let raw = std::env::var("RUN_MODE").unwrap_or_else(|_| "chat".into());
        Self::parse(&raw)
    }

    fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "dump_today" | "dump" => Self::DumpToday,
            "replay" => Self::Replay,
            _ => Self::Live,
        }
    }
}

pub async fn run_from_env() -> Result<()> {
    match RunMode::from_env() {
        RunMode::Live => live::run().await,
        RunMode::DumpToday => dump_today::run().await,
        RunMode::Replay => replay::run().await,
    }
}

#[cfg(test)]
mod tests {
    use super::RunMode;

    #[test]
    fn parses_run_modes() {
        assert_eq!(RunMode::parse("chat"), RunMode::Live);
        assert_eq!(RunMode::parse(" Replay "), RunMode::Replay);
        assert_eq!(RunMode::parse("dump"), RunMode::DumpToday);
        assert_eq!(RunMode::parse("dump_today"), RunMode::DumpToday);
        assert_eq!(RunMode::parse("anything-else"), RunMode::Live);
    }
}
