use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Where log records go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    Stderr,
    /// Used while the terminal chart owns the screen.
    File(PathBuf),
}

/// `RUST_LOG` wins over the configured level.
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")))
}

pub fn init(level: &str, sink: &LogSink) -> std::io::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(level));

    match sink {
        LogSink::Stderr => builder.with_writer(std::io::stderr).init(),
        LogSink::File(path) => {
            let file = std::fs::File::create(path)?;
            builder.with_writer(file).with_ansi(false).init();
        }
    }

    Ok(())
}
