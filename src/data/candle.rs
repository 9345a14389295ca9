use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;

/// One rated game played by the tracked user, ratings from their side of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatedGame {
    pub id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub rating_before: i32,
    pub rating_after: i32,
}

/// The user's rating after the n-th rated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub sequence_index: u64,
    pub rating: i32,
}

impl Sample {
    pub fn new(sequence_index: u64, rating: i32) -> Self {
        Self {
            sequence_index,
            rating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Candle {
    pub index: usize,
    pub open: i32,
    pub high: i32,
    pub low: i32,
    pub close: i32,
    pub games: usize,
    /// Calendar day covered, set only for daily candles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    pub fn change(&self) -> i32 {
        self.close - self.open
    }

    /// The day for daily candles, the position otherwise.
    pub fn label(&self) -> String {
        match self.date {
            Some(date) => date.to_string(),
            None => format!("#{}", self.index),
        }
    }
}

pub fn candles_to_json(candles: &[Candle]) -> Result<String> {
    Ok(serde_json::to_string_pretty(candles)?)
}

pub fn samples_from_games(games: &[RatedGame]) -> Vec<Sample> {
    games
        .iter()
        .enumerate()
        .map(|(idx, game)| Sample::new(idx as u64, game.rating_after))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn game(id: &str, before: i32, after: i32) -> RatedGame {
        RatedGame {
            id: id.to_string(),
            created_at: chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            rating_before: before,
            rating_after: after,
        }
    }

    #[test]
    fn samples_use_post_game_rating_in_order() {
        let games = vec![game("a", 1500, 1508), game("b", 1508, 1499)];
        let samples = samples_from_games(&games);
        assert_eq!(samples, vec![Sample::new(0, 1508), Sample::new(1, 1499)]);
    }

    #[test]
    fn bearish_candle() {
        let candle = Candle {
            index: 0,
            open: 1600,
            high: 1610,
            low: 1580,
            close: 1590,
            games: 4,
            date: None,
        };
        assert!(!candle.is_bullish());
        assert_eq!(candle.change(), -10);
        assert_eq!(candle.label(), "#0");
    }

    #[test]
    fn json_dump_carries_dates_for_daily_candles() {
        let daily = Candle {
            index: 1,
            open: 1500,
            high: 1520,
            low: 1495,
            close: 1510,
            games: 3,
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 20),
        };
        let counted = Candle { date: None, ..daily };

        let json = candles_to_json(&[daily, counted]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["date"], "2024-05-20");
        assert_eq!(parsed[0]["games"], 3);
        assert!(parsed[1].get("date").is_none());
        assert_eq!(daily.label(), "2024-05-20");
    }
}
