use crate::data::candle::{Candle, RatedGame, Sample};
use crate::error::{AppError, Result};

/// Groups consecutive samples into windows of `bucket_size` games and
/// summarises each window as one OHLC candle.
///
/// Samples are taken in the order given; nothing is re-sorted. The last
/// window may be shorter than `bucket_size`. An empty slice yields no
/// candles, a non-positive `bucket_size` is rejected.
pub fn bucketize(samples: &[Sample], bucket_size: i64) -> Result<Vec<Candle>> {
    if bucket_size <= 0 {
        return Err(AppError::InvalidArgument(format!(
            "bucket size must be at least 1, got {}",
            bucket_size
        )));
    }

    // Anything past the slice length behaves like one bucket.
    let size = usize::try_from(bucket_size).unwrap_or(usize::MAX);

    let candles = samples
        .chunks(size)
        .enumerate()
        .filter_map(|(index, window)| candle_from_window(index, window))
        .collect();

    Ok(candles)
}

fn candle_from_window(index: usize, window: &[Sample]) -> Option<Candle> {
    let first = window.first()?;
    let last = window.last()?;

    let (low, high) = window
        .iter()
        .fold((first.rating, first.rating), |(low, high), s| {
            (low.min(s.rating), high.max(s.rating))
        });

    Some(Candle {
        index,
        open: first.rating,
        high,
        low,
        close: last.rating,
        games: window.len(),
        date: None,
    })
}

/// One candle per UTC calendar day. Opens on the first game's pre-game
/// rating and closes on the last game's post-game rating; the range covers
/// both ratings of every game that day.
pub fn bucketize_by_day(games: &[RatedGame]) -> Vec<Candle> {
    let mut days: Vec<Candle> = Vec::new();

    for game in games {
        let date = game.created_at.date_naive();
        let low = game.rating_before.min(game.rating_after);
        let high = game.rating_before.max(game.rating_after);

        if let Some(day) = days.last_mut() {
            if day.date == Some(date) {
                day.high = day.high.max(high);
                day.low = day.low.min(low);
                day.close = game.rating_after;
                day.games += 1;
                continue;
            }
        }

        days.push(Candle {
            index: days.len(),
            open: game.rating_before,
            high,
            low,
            close: game.rating_after,
            games: 1,
            date: Some(date),
        });
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn samples(ratings: &[i32]) -> Vec<Sample> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, r)| Sample::new(i as u64, *r))
            .collect()
    }

    fn game(day: u32, hour: u32, before: i32, after: i32) -> RatedGame {
        RatedGame {
            id: format!("{}-{}", day, hour),
            created_at: chrono::Utc
                .with_ymd_and_hms(2024, 5, day, hour, 0, 0)
                .unwrap(),
            rating_before: before,
            rating_after: after,
        }
    }

    #[test]
    fn single_sample_windows() {
        let candles = bucketize(&samples(&[1500, 1490]), 1).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].open, 1490);
        assert_eq!(candles[1].close, 1490);
        assert_eq!(candles[1].high, 1490);
        assert_eq!(candles[1].low, 1490);
        assert_eq!(candles[1].games, 1);
    }

    #[test]
    fn bucket_larger_than_input_is_one_candle() {
        let candles = bucketize(&samples(&[1500, 1540, 1470, 1510]), 100).unwrap();
        assert_eq!(candles.len(), 1);
        assert_eq!(candles[0].open, 1500);
        assert_eq!(candles[0].high, 1540);
        assert_eq!(candles[0].low, 1470);
        assert_eq!(candles[0].close, 1510);
        assert_eq!(candles[0].games, 4);
    }

    #[test]
    fn huge_bucket_size_does_not_overflow() {
        let candles = bucketize(&samples(&[1500, 1501]), i64::MAX).unwrap();
        assert_eq!(candles.len(), 1);
    }

    #[test]
    fn input_order_is_kept() {
        let candles = bucketize(&samples(&[1600, 1400, 1500]), 3).unwrap();
        assert_eq!(candles[0].open, 1600);
        assert_eq!(candles[0].close, 1500);
    }

    #[test]
    fn rejects_non_positive_size_message() {
        let err = bucketize(&[], -1).unwrap_err();
        assert!(err.to_string().contains("bucket size"));
    }

    #[test]
    fn daily_groups_by_date() {
        let games = vec![
            game(1, 9, 1500, 1508),
            game(1, 10, 1508, 1530),
            game(1, 22, 1530, 1495),
            game(3, 8, 1495, 1502),
        ];

        let days = bucketize_by_day(&games);
        assert_eq!(days.len(), 2);

        let first = &days[0];
        assert_eq!(first.date, chrono::NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(first.index, 0);
        assert_eq!(first.open, 1500);
        assert_eq!(first.high, 1530);
        assert_eq!(first.low, 1495);
        assert_eq!(first.close, 1495);
        assert_eq!(first.games, 3);

        let second = &days[1];
        assert_eq!(second.index, 1);
        assert_eq!(second.date, chrono::NaiveDate::from_ymd_opt(2024, 5, 3));
        assert_eq!(second.open, 1495);
        assert_eq!(second.close, 1502);
        assert_eq!(second.games, 1);
    }

    #[test]
    fn daily_range_includes_pre_game_rating() {
        // Lost the only game of the day: the open is the high.
        let days = bucketize_by_day(&[game(2, 12, 1550, 1542)]);
        assert_eq!(days[0].high, 1550);
        assert_eq!(days[0].low, 1542);
        assert!(!days[0].is_bullish());
    }

    #[test]
    fn counted_candles_have_no_date() {
        let candles = bucketize(&samples(&[1500, 1510, 1520]), 2).unwrap();
        assert!(candles.iter().all(|c| c.date.is_none()));
    }

    #[test]
    fn daily_empty_history() {
        assert!(bucketize_by_day(&[]).is_empty());
    }
}
