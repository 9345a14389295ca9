use crate::config::AppConfig;
use crate::data::GameMode;
use crate::error::{AppError, Result};
use crate::logging::LogSink;
use crate::ui::BucketChoice;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lichess-candles")]
#[command(about = "Candlestick chart of a lichess player's rating history")]
pub struct Cli {
    /// Lichess username
    pub username: String,

    /// Rating pool to chart
    #[arg(short, long, value_enum)]
    pub mode: Option<GameMode>,

    /// Rated games per candle
    #[arg(short, long, allow_negative_numbers = true)]
    pub bucket_size: Option<i64>,

    /// One candle per calendar day instead of a fixed number of games
    #[arg(long, conflicts_with = "bucket_size")]
    pub daily: bool,

    /// Open the interactive chart
    #[arg(long)]
    pub show: bool,

    /// Print the candles as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Save the chart as SVG
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only fetch the most recent N games
    #[arg(long)]
    pub max_games: Option<u32>,

    /// Config file (defaults to ./.lichess-candles.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    pub save_config: bool,

    /// Log filter, e.g. "debug" or "lichess_candles=trace"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log file used while the interactive chart is open
    #[arg(long, default_value = "lichess-candles.log")]
    pub log_file: PathBuf,
}

/// Everything one run needs, after merging flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub user: String,
    pub mode: GameMode,
    pub bucket: BucketChoice,
    pub show: bool,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub log_sink: LogSink,
    pub config: AppConfig,
}

impl Cli {
    /// Applies flags over `config` and rejects unusable values before anything is fetched.
    pub fn resolve(&self, mut config: AppConfig) -> Result<Settings> {
        let user = self.username.trim();
        if user.is_empty() {
            return Err(AppError::InvalidArgument("username must not be empty".to_string()));
        }

        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(size) = self.bucket_size {
            config.bucket_size = size;
        }
        if self.max_games.is_some() {
            config.max_games = self.max_games;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }

        let bucket = if self.daily {
            BucketChoice::Daily
        } else if config.bucket_size <= 0 {
            return Err(AppError::InvalidArgument(format!(
                "bucket size must be at least 1, got {}",
                config.bucket_size
            )));
        } else {
            BucketChoice::Games(config.bucket_size)
        };

        let log_sink = if self.show {
            LogSink::File(self.log_file.clone())
        } else {
            LogSink::Stderr
        };

        Ok(Settings {
            user: user.to_string(),
            mode: config.mode,
            bucket,
            show: self.show,
            json: self.json,
            output: self.output.clone(),
            log_sink,
            config: config.sanitized(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lichess-candles").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&["alice", "--mode", "bullet", "-b", "25", "--max-games", "300"]);
        let settings = cli.resolve(AppConfig::default()).unwrap();
        assert_eq!(settings.user, "alice");
        assert_eq!(settings.mode, GameMode::Bullet);
        assert_eq!(settings.bucket, BucketChoice::Games(25));
        assert_eq!(settings.config.max_games, Some(300));
        assert_eq!(settings.log_sink, LogSink::Stderr);
    }

    #[test]
    fn config_supplies_defaults() {
        let config = AppConfig {
            mode: GameMode::Rapid,
            bucket_size: 7,
            ..AppConfig::default()
        };
        let settings = parse(&["bob"]).resolve(config).unwrap();
        assert_eq!(settings.mode, GameMode::Rapid);
        assert_eq!(settings.bucket, BucketChoice::Games(7));
    }

    #[test]
    fn zero_and_negative_sizes_are_rejected() {
        for size in ["0", "-5"] {
            let err = parse(&["alice", "--bucket-size", size])
                .resolve(AppConfig::default())
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidArgument(_)));
        }
    }

    #[test]
    fn non_integer_size_fails_to_parse() {
        assert!(Cli::try_parse_from(["lichess-candles", "alice", "-b", "ten"]).is_err());
    }

    #[test]
    fn daily_and_size_conflict() {
        assert!(Cli::try_parse_from(["lichess-candles", "alice", "--daily", "-b", "3"]).is_err());
        let settings = parse(&["alice", "--daily"]).resolve(AppConfig::default()).unwrap();
        assert_eq!(settings.bucket, BucketChoice::Daily);
    }

    #[test]
    fn json_flag_is_carried() {
        assert!(parse(&["alice", "--json"]).resolve(AppConfig::default()).unwrap().json);
        assert!(!parse(&["alice"]).resolve(AppConfig::default()).unwrap().json);
    }

    #[test]
    fn show_logs_to_file() {
        let settings = parse(&["alice", "--show"]).resolve(AppConfig::default()).unwrap();
        assert_eq!(settings.log_sink, LogSink::File(PathBuf::from("lichess-candles.log")));
    }

    #[test]
    fn blank_username_is_rejected() {
        assert!(parse(&["  "]).resolve(AppConfig::default()).is_err());
    }
}
