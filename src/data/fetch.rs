use crate::config::AppConfig;
use crate::data::candle::RatedGame;
use crate::data::mode::GameMode;
use crate::error::{AppError, Result};
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

const NDJSON: &str = "application/x-ndjson";

pub struct HistoryFetcher {
    client: Client,
    base_url: String,
    token: Option<String>,
    max_games: Option<u32>,
}

impl HistoryFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("lichess-candles/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            max_games: config.max_games,
        })
    }

    /// Downloads every rated game of `user` in `mode`, oldest first.
    pub async fn fetch_games(&self, user: &str, mode: GameMode) -> Result<Vec<RatedGame>> {
        let url = games_url(&self.base_url, user)?;
        let mut query = vec![
            ("rated", "true".to_string()),
            ("perfType", mode.perf_type().to_string()),
            ("moves", "false".to_string()),
            ("pgnInJson", "false".to_string()),
        ];
        if let Some(max) = self.max_games {
            query.push(("max", max.to_string()));
        }

        tracing::info!(%user, perf_type = mode.perf_type(), max_games = ?self.max_games, "fetching rated games");

        let mut request = self.client.get(url).query(&query).header(ACCEPT, NDJSON);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let res = request.send().await?;
        match res.status() {
            StatusCode::NOT_FOUND => return Err(AppError::UnknownUser(user.to_string())),
            status if !status.is_success() => {
                return Err(AppError::Upstream {
                    status: status.as_u16(),
                })
            }
            _ => {}
        }

        let mut lines = LineBuffer::default();
        let mut history = GameCollector::new(user);
        let mut body = res.bytes_stream();

        while let Some(chunk) = body.next().await {
            for line in lines.push(&chunk?) {
                history.push_line(&line)?;
            }
        }
        if let Some(line) = lines.finish() {
            history.push_line(&line)?;
        }

        Ok(history.finish())
    }
}

/// `{base}/api/games/user/{user}`, with the username escaped as a single path segment.
fn games_url(base_url: &str, user: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|err| AppError::InvalidArgument(format!("invalid base url {}: {}", base_url, err)))?;
    url.path_segments_mut()
        .map_err(|_| AppError::InvalidArgument(format!("base url {} cannot take a path", base_url)))?
        .pop_if_empty()
        .extend(["api", "games", "user", user]);
    Ok(url)
}

/// Splits a chunked byte stream into complete lines.
#[derive(Debug, Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(String::from_utf8_lossy(&raw[..pos]).into_owned());
        }
        lines
    }

    fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.pending).into_owned())
        }
    }
}

/// Accumulates games from the newest-first export and hands them back oldest first.
struct GameCollector<'a> {
    user: &'a str,
    games: Vec<RatedGame>,
    skipped: usize,
}

impl<'a> GameCollector<'a> {
    fn new(user: &'a str) -> Self {
        Self {
            user,
            games: Vec::new(),
            skipped: 0,
        }
    }

    fn push_line(&mut self, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        match parse_game_line(line, self.user)? {
            Some(game) => {
                tracing::debug!(id = %game.id, before = game.rating_before, after = game.rating_after, "game");
                self.games.push(game);
            }
            None => self.skipped += 1,
        }
        Ok(())
    }

    fn finish(mut self) -> Vec<RatedGame> {
        tracing::info!(games = self.games.len(), skipped = self.skipped, "history downloaded");
        self.games.reverse();
        self.games
    }
}

/// Parses one NDJSON line of the games export.
///
/// Returns `Ok(None)` for games that carry no rating change for `user`
/// (user not found on either side, or no `ratingDiff`).
pub fn parse_game_line(line: &str, user: &str) -> Result<Option<RatedGame>> {
    let json: Value = serde_json::from_str(line)?;
    Ok(parse_game(&json, user))
}

/// Parses a full NDJSON body, oldest game first.
pub fn parse_history(body: &str, user: &str) -> Result<Vec<RatedGame>> {
    let mut history = GameCollector::new(user);
    for line in body.lines() {
        history.push_line(line)?;
    }
    Ok(history.finish())
}

fn parse_game(json: &Value, user: &str) -> Option<RatedGame> {
    let players = json.get("players")?;
    let side = ["white", "black"]
        .iter()
        .filter_map(|color| players.get(color))
        .find(|player| {
            player
                .get("user")
                .and_then(|u| u.get("id"))
                .and_then(|id| id.as_str())
                .is_some_and(|id| id.eq_ignore_ascii_case(user))
        })?;

    let rating_before = i32::try_from(side.get("rating")?.as_i64()?).ok()?;
    let diff = i32::try_from(side.get("ratingDiff")?.as_i64()?).ok()?;
    let created_at = chrono::DateTime::from_timestamp_millis(json.get("createdAt")?.as_i64()?)?;

    Some(RatedGame {
        id: json.get("id")?.as_str()?.to_string(),
        created_at,
        rating_before,
        rating_after: rating_before + diff,
    })
}
