use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub struct StatusBar {
    pub games: usize,
    pub candles: usize,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            games: 0,
            candles: 0,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let text = Line::from(vec![
            Span::styled(
                format!("{} games", self.games),
                Style::default().fg(Color::White),
            ),
            Span::raw(" / "),
            Span::styled(
                format!("{} candles", self.candles),
                Style::default().fg(Color::White),
            ),
            Span::raw(" | "),
            Span::styled("Q", Style::default().fg(Color::Yellow)),
            Span::raw(":Quit "),
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::raw(":Size "),
            Span::styled("←→", Style::default().fg(Color::Yellow)),
            Span::raw(":Pan "),
            Span::styled("+/-", Style::default().fg(Color::Yellow)),
            Span::raw(":Zoom"),
        ]);

        frame.render_widget(Paragraph::new(text).block(Block::default()), area);
    }
}
