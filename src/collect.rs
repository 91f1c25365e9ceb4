//! Scraping pipeline: overview page → season logs → games → plays
//!
//! Each stage returns a fresh list instead of pushing into shared state, and
//! output order is always season, then game discovery order, then play order
//! within the page, however many threads fetch game pages.

use crate::config::PlayerConfig;
use crate::discovery::{discover_games, discover_season_logs};
use crate::error::{PbpError, Result};
use crate::extract::extract_game;
use crate::fetch::PageSource;
use crate::model::{GameRecord, GameReference, PlayEvent, SeasonLogReference};
use rayon::prelude::*;

/// Totals for one collector run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectSummary {
    pub seasons: usize,
    pub games: usize,
    /// Pages that matched neither layout (usually games the player sat out)
    pub skipped_games: usize,
    pub events: usize,
}

pub struct Collector<'a, S: PageSource> {
    source: &'a S,
    config: &'a PlayerConfig,
    threads: usize,
}

impl<'a, S: PageSource> Collector<'a, S> {
    pub fn new(source: &'a S, config: &'a PlayerConfig) -> Self {
        Self {
            source,
            config,
            threads: 1,
        }
    }

    /// Number of game pages fetched at once
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    pub fn season_logs(&self) -> Result<Vec<SeasonLogReference>> {
        let html = self.source.fetch(&self.config.overview_url())?;
        discover_season_logs(&html, self.config)
    }

    pub fn games(&self, season_log: &SeasonLogReference) -> Result<Vec<GameReference>> {
        let html = self.source.fetch(&season_log.url)?;
        discover_games(&html, season_log, &self.config.schedule, &self.config.base_url)
    }

    /// All games across the given seasons, in season order
    pub fn all_games(&self, season_logs: &[SeasonLogReference]) -> Result<Vec<GameReference>> {
        let mut games = Vec::new();
        for season_log in season_logs {
            games.extend(self.games(season_log)?);
        }
        log::info!("Found {} games across {} seasons", games.len(), season_logs.len());
        Ok(games)
    }

    /// Fetch one game; `None` when the page has no plays by the player
    pub fn game(&self, game: &GameReference) -> Result<Option<GameRecord>> {
        let html = self.source.fetch(&game.url)?;
        match extract_game(&html, &game.url, &self.config.display_name) {
            Ok(record) => {
                log::info!("{} has been added ({} plays)", record.title, record.len());
                Ok(Some(record))
            }
            Err(PbpError::ParseMismatch { .. }) => {
                log::warn!("No plays by {} found at {}, skipping", self.config.display_name, game.url);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch every game page on a bounded pool, keeping discovery order
    pub fn records(&self, games: &[GameReference]) -> Result<Vec<Option<GameRecord>>> {
        if self.threads == 1 {
            return games.iter().map(|g| self.game(g)).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| PbpError::Config(format!("Failed to build thread pool: {}", e)))?;

        pool.install(|| games.par_iter().map(|g| self.game(g)).collect())
    }

    /// Run the whole pipeline
    pub fn run(&self) -> Result<(Vec<PlayEvent>, CollectSummary)> {
        let season_logs = self.season_logs()?;
        let games = self.all_games(&season_logs)?;
        let records = self.records(&games)?;

        let mut summary = CollectSummary {
            seasons: season_logs.len(),
            games: games.len(),
            ..CollectSummary::default()
        };

        let mut events = Vec::new();
        for record in records {
            match record {
                Some(record) => events.extend(record.events),
                None => summary.skipped_games += 1,
            }
        }
        summary.events = events.len();

        Ok((events, summary))
    }
}
