pub mod bucket;
pub mod candle;
pub mod fetch;
pub mod mode;

pub use bucket::*;
pub use candle::*;
pub use fetch::{parse_game_line, parse_history, HistoryFetcher};
pub use mode::GameMode;
