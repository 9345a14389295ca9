use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A lichess rating pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    Classical,
    Correspondence,
    Chess960,
    Crazyhouse,
    Antichess,
    Atomic,
    Horde,
    KingOfTheHill,
    RacingKings,
    ThreeCheck,
}

impl GameMode {
    /// The `perfType` value the lichess API expects.
    pub fn perf_type(&self) -> &'static str {
        match self {
            GameMode::UltraBullet => "ultraBullet",
            GameMode::Bullet => "bullet",
            GameMode::Blitz => "blitz",
            GameMode::Rapid => "rapid",
            GameMode::Classical => "classical",
            GameMode::Correspondence => "correspondence",
            GameMode::Chess960 => "chess960",
            GameMode::Crazyhouse => "crazyhouse",
            GameMode::Antichess => "antichess",
            GameMode::Atomic => "atomic",
            GameMode::Horde => "horde",
            GameMode::KingOfTheHill => "kingOfTheHill",
            GameMode::RacingKings => "racingKings",
            GameMode::ThreeCheck => "threeCheck",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GameMode::UltraBullet => "UltraBullet",
            GameMode::Bullet => "Bullet",
            GameMode::Blitz => "Blitz",
            GameMode::Rapid => "Rapid",
            GameMode::Classical => "Classical",
            GameMode::Correspondence => "Correspondence",
            GameMode::Chess960 => "Chess960",
            GameMode::Crazyhouse => "Crazyhouse",
            GameMode::Antichess => "Antichess",
            GameMode::Atomic => "Atomic",
            GameMode::Horde => "Horde",
            GameMode::KingOfTheHill => "King of the Hill",
            GameMode::RacingKings => "Racing Kings",
            GameMode::ThreeCheck => "Three-check",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_name_matches_perf_type() {
        for mode in GameMode::value_variants() {
            let json = serde_json::to_string(mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.perf_type()));
        }
    }
}
