use crate::data::Candle;
use crate::error::{AppError, Result};
use plotters::prelude::*;
use std::path::Path;

const SIZE: (u32, u32) = (1280, 720);

fn render_err(err: impl std::fmt::Display) -> AppError {
    AppError::Render(err.to_string())
}

/// Writes the candles to `path` as an SVG candlestick plot.
pub fn export_svg(candles: &[Candle], path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let range = candles.iter().fold(None, |acc: Option<(i32, i32)>, c| match acc {
        Some((low, high)) => Some((low.min(c.low), high.max(c.high))),
        None => Some((c.low, c.high)),
    });

    if let Some((low, high)) = range {
        let pad = ((high - low) / 20).max(5);
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .build_cartesian_2d(-1i32..candles.len() as i32, (low - pad)..(high + pad))
            .map_err(render_err)?;

        let width = (SIZE.0 / candles.len() as u32).clamp(1, 15);
        chart
            .draw_series(candles.iter().map(|c| {
                CandleStick::new(
                    c.index as i32,
                    c.open,
                    c.high,
                    c.low,
                    c.close,
                    GREEN.filled(),
                    RED.filled(),
                    width,
                )
            }))
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    tracing::info!(path = %path.display(), candles = candles.len(), "chart saved");
    Ok(())
}
