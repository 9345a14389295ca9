use crate::data::{bucketize, bucketize_by_day, samples_from_games, Candle, GameMode, RatedGame, Sample};
use crate::error::Result;
use crate::ui::{BucketChoice, BucketSelector, Chart, StatusBar};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};

/// Candles for an already downloaded history.
pub fn candles_for(choice: BucketChoice, games: &[RatedGame], samples: &[Sample]) -> Result<Vec<Candle>> {
    match choice {
        BucketChoice::Games(size) => bucketize(samples, size),
        BucketChoice::Daily => Ok(bucketize_by_day(games)),
    }
}

pub struct App {
    games: Vec<RatedGame>,
    samples: Vec<Sample>,
    pub chart: Chart,
    pub selector: BucketSelector,
    pub statusbar: StatusBar,
    pub should_quit: bool,
}

impl App {
    pub fn new(user: String, mode: GameMode, games: Vec<RatedGame>, initial: BucketChoice) -> Result<Self> {
        let samples = samples_from_games(&games);
        let mut app = Self {
            statusbar: StatusBar::new(),
            chart: Chart::new(user, mode),
            selector: BucketSelector::new(initial),
            games,
            samples,
            should_quit: false,
        };
        app.rebucket()?;
        Ok(app)
    }

    fn rebucket(&mut self) -> Result<()> {
        let choice = self.selector.current();
        let candles = candles_for(choice, &self.games, &self.samples)?;
        tracing::debug!(bucket = %choice.label(), candles = candles.len(), "rebucketed");

        self.statusbar.games = self.games.len();
        self.statusbar.candles = candles.len();
        self.chart.set_candles(candles, choice.label());
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('+') | KeyCode::Char('=') => self.chart.zoom_in(),
            KeyCode::Char('-') => self.chart.zoom_out(),
            KeyCode::Left | KeyCode::Char('h') => self.chart.pan_left(),
            KeyCode::Right | KeyCode::Char('l') => self.chart.pan_right(),
            KeyCode::Tab | KeyCode::Char(']') => {
                self.selector.select_next();
                self.rebucket()?;
            }
            KeyCode::BackTab | KeyCode::Char('[') => {
                self.selector.select_prev();
                self.rebucket()?;
            }
            _ => {}
        }
        Ok(())
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.selector.render(frame, chunks[0]);
        self.chart.render(frame, chunks[1]);
        self.statusbar.render(frame, chunks[2]);
    }
}

/// Takes over the terminal until the user quits.
pub fn run(mut app: App) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| app.render(frame))?;
        if let Event::Key(key) = event::read()? {
            app.handle_key(key)?;
        }
    }
    Ok(())
}
