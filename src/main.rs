use clap::Parser;
use lichess_candles::cli::Cli;
use lichess_candles::config::{config_path, load_config, save_config};
use lichess_candles::data::{candles_to_json, samples_from_games, HistoryFetcher};
use lichess_candles::{logging, ui};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let path = cli.config.clone().unwrap_or_else(config_path);
    let loaded = load_config(&path);
    let settings = cli.resolve(loaded.config.clone().with_env_token())?;

    logging::init(&settings.config.log_level, &settings.log_sink)?;
    loaded.report(&path);
    tracing::info!(
        user = %settings.user,
        mode = settings.mode.perf_type(),
        bucket = %settings.bucket.label(),
        "starting lichess-candles"
    );

    if cli.save_config {
        save_config(&path, &settings.config)?;
        tracing::info!(path = %path.display(), "config saved");
    }

    let fetcher = HistoryFetcher::new(&settings.config)?;
    let games = fetcher.fetch_games(&settings.user, settings.mode).await?;
    let samples = samples_from_games(&games);
    let candles = ui::candles_for(settings.bucket, &games, &samples)?;

    if let Some(output) = &settings.output {
        ui::export_svg(&candles, output)?;
    }

    if settings.json {
        println!("{}", candles_to_json(&candles)?);
    }

    if settings.show {
        let app = ui::App::new(settings.user, settings.mode, games, settings.bucket)?;
        ui::run(app)?;
    } else {
        for candle in &candles {
            tracing::info!(
                candle = %candle.label(),
                open = candle.open,
                high = candle.high,
                low = candle.low,
                close = candle.close,
                games = candle.games,
                "rating candle"
            );
        }
        tracing::info!(candles = candles.len(), games = games.len(), "done");
    }

    Ok(())
}
