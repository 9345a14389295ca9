use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// How games are grouped into candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketChoice {
    Games(i64),
    Daily,
}

impl BucketChoice {
    pub fn presets() -> Vec<BucketChoice> {
        vec![
            BucketChoice::Games(1),
            BucketChoice::Games(5),
            BucketChoice::Games(10),
            BucketChoice::Games(25),
            BucketChoice::Games(50),
            BucketChoice::Games(100),
            BucketChoice::Daily,
        ]
    }

    pub fn label(&self) -> String {
        match self {
            BucketChoice::Games(1) => "1 game".to_string(),
            BucketChoice::Games(n) => format!("{} games", n),
            BucketChoice::Daily => "daily".to_string(),
        }
    }

    fn short_label(&self) -> String {
        match self {
            BucketChoice::Games(n) => format!("{}G", n),
            BucketChoice::Daily => "1D".to_string(),
        }
    }
}

pub struct BucketSelector {
    pub choices: Vec<BucketChoice>,
    pub selected: usize,
}

impl BucketSelector {
    /// Presets, plus `initial` slotted in by size when it is not one of them.
    pub fn new(initial: BucketChoice) -> Self {
        let mut choices = BucketChoice::presets();
        if !choices.contains(&initial) {
            let pos = match initial {
                BucketChoice::Games(n) => choices
                    .iter()
                    .position(|c| match c {
                        BucketChoice::Games(m) => *m > n,
                        BucketChoice::Daily => true,
                    })
                    .unwrap_or(choices.len()),
                BucketChoice::Daily => choices.len(),
            };
            choices.insert(pos, initial);
        }

        let selected = choices.iter().position(|c| *c == initial).unwrap_or(0);
        Self { choices, selected }
    }

    pub fn current(&self) -> BucketChoice {
        self.choices[self.selected]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.choices.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = if self.selected == 0 {
            self.choices.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Candle size")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let text: Vec<Span> = self
            .choices
            .iter()
            .enumerate()
            .flat_map(|(idx, choice)| {
                let style = if idx == self.selected {
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::White)
                };
                vec![Span::styled(choice.short_label(), style), Span::raw(" ")]
            })
            .collect();

        let para = Paragraph::new(Line::from(text)).alignment(Alignment::Center);
        frame.render_widget(para, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_initial_is_selected() {
        let selector = BucketSelector::new(BucketChoice::Games(10));
        assert_eq!(selector.choices.len(), 7);
        assert_eq!(selector.current(), BucketChoice::Games(10));
    }

    #[test]
    fn custom_size_is_inserted_in_order() {
        let selector = BucketSelector::new(BucketChoice::Games(7));
        assert_eq!(selector.choices.len(), 8);
        assert_eq!(selector.choices[2], BucketChoice::Games(7));
        assert_eq!(selector.current(), BucketChoice::Games(7));

        let selector = BucketSelector::new(BucketChoice::Games(500));
        assert_eq!(selector.choices[6], BucketChoice::Games(500));
        assert_eq!(selector.choices[7], BucketChoice::Daily);
    }

    #[test]
    fn cycling_wraps_both_ways() {
        let mut selector = BucketSelector::new(BucketChoice::Games(1));
        selector.select_prev();
        assert_eq!(selector.current(), BucketChoice::Daily);
        selector.select_next();
        assert_eq!(selector.current(), BucketChoice::Games(1));
    }

    #[test]
    fn labels() {
        assert_eq!(BucketChoice::Games(1).label(), "1 game");
        assert_eq!(BucketChoice::Games(25).label(), "25 games");
        assert_eq!(BucketChoice::Daily.label(), "daily");
    }
}
