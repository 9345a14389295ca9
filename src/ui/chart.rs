use crate::data::{Candle, GameMode};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const AXIS_WIDTH: u16 = 8;

#[derive(Debug, Clone)]
pub struct Chart {
    pub candles: Vec<Candle>,
    pub user: String,
    pub mode: GameMode,
    pub bucket_label: String,
    pub zoom: usize,
    pub offset: usize,
}

impl Chart {
    pub fn new(user: String, mode: GameMode) -> Self {
        Self {
            candles: Vec::new(),
            user,
            mode,
            bucket_label: String::new(),
            zoom: 1,
            offset: 0,
        }
    }

    pub fn set_candles(&mut self, candles: Vec<Candle>, bucket_label: String) {
        self.candles = candles;
        self.bucket_label = bucket_label;
        self.offset = 0;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 2).min(32);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 2).max(1);
    }

    pub fn pan_left(&mut self) {
        let visible = self.visible_count();
        if self.offset + visible < self.candles.len() {
            self.offset += (visible / 4).max(1);
        }
    }

    pub fn pan_right(&mut self) {
        self.offset = self.offset.saturating_sub((self.visible_count() / 4).max(1));
    }

    fn visible_count(&self) -> usize {
        (100 / self.zoom).max(10)
    }

    /// The window of candles on screen, at most `max_columns` wide.
    pub fn visible_candles(&self, max_columns: usize) -> &[Candle] {
        let count = self.visible_count().min(max_columns.max(1));
        let end = self.candles.len().saturating_sub(self.offset);
        let start = end.saturating_sub(count);
        &self.candles[start..end]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(4),
                Constraint::Length(3),
            ])
            .split(area);

        let title = format!(
            "{} / {} / {}",
            self.user,
            self.mode.label(),
            self.bucket_label
        );
        let title_block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        frame.render_widget(title_block, vertical[0]);

        if self.candles.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No rated games in this mode",
                Style::default().fg(Color::Gray),
            )));
            frame.render_widget(empty, vertical[1]);
            return;
        }

        self.render_candlesticks(frame, vertical[1]);
        self.render_games(frame, vertical[2]);
        self.render_stats(frame, vertical[3]);
    }

    fn render_candlesticks(&self, frame: &mut Frame, area: Rect) {
        if area.width <= AXIS_WIDTH + 2 || area.height < 5 {
            return;
        }

        let chart_width = area.width - AXIS_WIDTH;
        let chart_height = area.height.saturating_sub(2);
        let visible = self.visible_candles(chart_width as usize);
        if visible.is_empty() {
            return;
        }

        let (min_rating, max_rating) = visible
            .iter()
            .fold((i32::MAX, i32::MIN), |(min, max), c| {
                (min.min(c.low), max.max(c.high))
            });

        let range = f64::from(max_rating - min_rating).max(1.0);
        let candle_width = (chart_width as usize / visible.len()).max(1);

        let inner = Rect {
            x: area.x + AXIS_WIDTH,
            y: area.y + 1,
            width: chart_width,
            height: chart_height,
        };

        let row_of = |rating: i32| -> u16 {
            inner.y
                + (f64::from(max_rating - rating) / range * f64::from(chart_height - 1)) as u16
        };

        for (idx, candle) in visible.iter().enumerate() {
            let x = inner.x + (idx * candle_width) as u16 + candle_width as u16 / 2;
            if x >= inner.x + inner.width {
                break;
            }

            let high_y = row_of(candle.high);
            let low_y = row_of(candle.low);
            let open_y = row_of(candle.open);
            let close_y = row_of(candle.close);

            let color = if candle.is_bullish() {
                Color::Green
            } else {
                Color::Red
            };

            for y in high_y..=low_y {
                if y >= inner.y && y < inner.y + inner.height {
                    frame.buffer_mut()[(x, y)].set_char('│').set_fg(color);
                }
            }

            for y in open_y.min(close_y)..=open_y.max(close_y) {
                if y >= inner.y && y < inner.y + inner.height {
                    frame.buffer_mut()[(x, y)].set_char('█').set_fg(color);
                }
            }
        }

        let label_count = 5.min(chart_height as usize / 2).max(1);
        for i in 0..=label_count {
            let y = inner.y + (i as u16) * chart_height.saturating_sub(1) / label_count as u16;
            let rating = f64::from(max_rating) - (i as f64 / label_count as f64) * range;
            let label = format!("{:>6.0}", rating);

            for (j, ch) in label.chars().enumerate() {
                let x_pos = area.x + j as u16;
                if x_pos < inner.x && y < area.y + area.height {
                    frame.buffer_mut()[(x_pos, y)].set_char(ch).set_fg(Color::Gray);
                }
            }
        }

        if let (Some(first), Some(last)) = (visible.first(), visible.last()) {
            let change = last.close - first.open;
            let change_color = if change >= 0 { Color::Green } else { Color::Red };
            let rating_text = Line::from(vec![
                Span::styled("Rating: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    last.close.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(format!("{:+}", change), Style::default().fg(change_color)),
            ]);

            frame.render_widget(
                Paragraph::new(rating_text),
                Rect {
                    x: inner.x,
                    y: area.y + area.height - 1,
                    width: chart_width,
                    height: 1,
                },
            );
        }
    }

    fn render_games(&self, frame: &mut Frame, area: Rect) {
        if area.width <= AXIS_WIDTH + 2 || area.height < 2 {
            return;
        }

        let chart_width = area.width - AXIS_WIDTH;
        let chart_height = area.height - 1;
        let visible = self.visible_candles(chart_width as usize);
        let max_games = visible.iter().map(|c| c.games).max().unwrap_or(0);
        if max_games == 0 {
            return;
        }

        let candle_width = (chart_width as usize / visible.len()).max(1);
        let inner = Rect {
            x: area.x + AXIS_WIDTH,
            y: area.y,
            width: chart_width,
            height: chart_height,
        };

        for (idx, candle) in visible.iter().enumerate() {
            let x = inner.x + (idx * candle_width) as u16 + candle_width as u16 / 2;
            if x >= inner.x + inner.width {
                break;
            }

            let height = (candle.games * chart_height as usize / max_games) as u16;
            for y in inner.y + inner.height - height..inner.y + inner.height {
                frame.buffer_mut()[(x, y)].set_char('▊').set_fg(Color::Yellow);
            }
        }

        let label = Line::from(Span::styled(
            format!("G:{}", max_games),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(
            Paragraph::new(label),
            Rect {
                x: area.x,
                y: area.y,
                width: AXIS_WIDTH - 1,
                height: 1,
            },
        );
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let Some(latest) = self.candles.last() else {
            return;
        };

        let change = latest.change();
        let change_color = if change >= 0 { Color::Green } else { Color::Red };

        let stats_text = Line::from(vec![
            Span::styled(format!("{}  ", latest.label()), Style::default().fg(Color::Cyan)),
            Span::styled("O: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}  ", latest.open), Style::default().fg(Color::White)),
            Span::styled("H: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}  ", latest.high), Style::default().fg(Color::Green)),
            Span::styled("L: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}  ", latest.low), Style::default().fg(Color::Red)),
            Span::styled("C: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}  ", latest.close), Style::default().fg(Color::White)),
            Span::styled("Games: ", Style::default().fg(Color::Gray)),
            Span::styled(format!("{}  ", latest.games), Style::default().fg(Color::Yellow)),
            Span::styled("Chg: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:+}", change),
                Style::default().fg(change_color).add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));
        frame.render_widget(Paragraph::new(stats_text).block(stats_block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|index| Candle {
                index,
                open: 1500,
                high: 1510,
                low: 1490,
                close: 1505,
                games: 5,
                date: None,
            })
            .collect()
    }

    #[test]
    fn visible_window_follows_offset() {
        let mut chart = Chart::new("alice".into(), GameMode::Blitz);
        chart.set_candles(candles(300), "10 games".into());

        let visible = chart.visible_candles(500);
        assert_eq!(visible.len(), 100);
        assert_eq!(visible.last().unwrap().index, 299);

        chart.pan_left();
        let visible = chart.visible_candles(500);
        assert_eq!(visible.last().unwrap().index, 274);

        chart.pan_right();
        assert_eq!(chart.offset, 0);
    }

    #[test]
    fn visible_window_fits_the_columns() {
        let mut chart = Chart::new("alice".into(), GameMode::Blitz);
        chart.set_candles(candles(300), "1 game".into());
        assert_eq!(chart.visible_candles(40).len(), 40);
    }

    #[test]
    fn zoom_is_bounded() {
        let mut chart = Chart::new("alice".into(), GameMode::Blitz);
        for _ in 0..10 {
            chart.zoom_in();
        }
        assert_eq!(chart.zoom, 32);
        for _ in 0..10 {
            chart.zoom_out();
        }
        assert_eq!(chart.zoom, 1);
    }

    #[test]
    fn new_candles_reset_pan() {
        let mut chart = Chart::new("alice".into(), GameMode::Blitz);
        chart.set_candles(candles(300), "1 game".into());
        chart.pan_left();
        assert!(chart.offset > 0);
        chart.set_candles(candles(10), "5 games".into());
        assert_eq!(chart.offset, 0);
    }
}
