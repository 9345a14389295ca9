pub mod app;
pub mod bucket_selector;
pub mod chart;
pub mod export;
pub mod statusbar;

pub use app::{candles_for, run, App};
pub use bucket_selector::{BucketChoice, BucketSelector};
pub use chart::Chart;
pub use export::export_svg;
pub use statusbar::StatusBar;
