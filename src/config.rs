//! Player and fetch configuration
//!
//! Defaults describe Kobe Bryant's career on basketball-reference.com, which
//! is what every flag of the command line falls back to.

use crate::error::{PbpError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.basketball-reference.com";
pub const DEFAULT_PLAYER_ID: &str = "bryanko01";
pub const DEFAULT_PLAYER_NAME: &str = "K. Bryant";
pub const DEFAULT_HOME_TEAM: &str = "Los Angeles Lakers";
/// First season the site has play-by-play data for
pub const DEFAULT_MIN_SEASON: u16 = 2001;

/// Regular-season games played per season. Game logs list playoff games after
/// these, so the count is where game discovery stops.
const DEFAULT_GAMES_PLAYED: [(u16, usize); 16] = [
    (2001, 68),
    (2002, 80),
    (2003, 82),
    (2004, 65),
    (2005, 66),
    (2006, 80),
    (2007, 77),
    (2008, 82),
    (2009, 82),
    (2010, 73),
    (2011, 82),
    (2012, 58),
    // From 2013 on the log lists all 82 games, inactive ones included
    (2013, 82),
    (2014, 82),
    (2015, 82),
    (2016, 82),
];

/// One line of a schedule CSV
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ScheduleRow {
    season: u16,
    games: usize,
}

/// Regular-season game counts keyed by season end year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonSchedule {
    games: BTreeMap<u16, usize>,
}

impl SeasonSchedule {
    pub fn new() -> Self {
        Self {
            games: BTreeMap::new(),
        }
    }

    pub fn with_season(mut self, season: u16, games: usize) -> Self {
        self.games.insert(season, games);
        self
    }

    /// Number of regular-season games for a season, if known
    pub fn games_in(&self, season: u16) -> Option<usize> {
        self.games.get(&season).copied()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Read a `Season,Games` CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv_reader(reader)
    }

    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(csv::Reader::from_reader(content.as_bytes()))
    }

    fn from_csv_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let mut schedule = SeasonSchedule::new();
        for result in reader.deserialize() {
            let row: ScheduleRow = result?;
            if row.games == 0 {
                return Err(PbpError::Config(format!(
                    "season {} has a game count of zero",
                    row.season
                )));
            }
            if schedule.games.insert(row.season, row.games).is_some() {
                return Err(PbpError::Config(format!(
                    "season {} is listed more than once",
                    row.season
                )));
            }
        }
        if schedule.is_empty() {
            return Err(PbpError::Config("schedule has no seasons".to_string()));
        }
        Ok(schedule)
    }
}

impl Default for SeasonSchedule {
    fn default() -> Self {
        Self {
            games: DEFAULT_GAMES_PLAYED.into_iter().collect(),
        }
    }
}

/// Who to scrape and where
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub base_url: String,
    /// Site id, e.g. "bryanko01"
    pub player_id: String,
    /// Name as printed in play-by-play tables, e.g. "K. Bryant"
    pub display_name: String,
    pub home_team: String,
    pub min_season: u16,
    pub schedule: SeasonSchedule,
}

impl PlayerConfig {
    /// Path of the player's overview page, e.g. "/players/b/bryanko01.html"
    pub fn overview_path(&self) -> String {
        format!("{}.html", self.player_dir())
    }

    pub fn overview_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.overview_path())
    }

    /// "/players/b/bryanko01"; the site files players under the first letter of their id
    pub fn player_dir(&self) -> String {
        let initial = self.player_id.chars().next().unwrap_or('_');
        format!("/players/{}/{}", initial, self.player_id)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            player_id: DEFAULT_PLAYER_ID.to_string(),
            display_name: DEFAULT_PLAYER_NAME.to_string(),
            home_team: DEFAULT_HOME_TEAM.to_string(),
            min_season: DEFAULT_MIN_SEASON,
            schedule: SeasonSchedule::default(),
        }
    }
}

/// Retry budget for a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based), doubling each time
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub retry: RetryPolicy,
    pub timeout: Duration,
    /// Pause before every request
    pub delay: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(30),
            delay: Duration::ZERO,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule() {
        let schedule = SeasonSchedule::default();
        assert_eq!(schedule.len(), 16);
        assert_eq!(schedule.games_in(2001), Some(68));
        assert_eq!(schedule.games_in(2012), Some(58));
        assert_eq!(schedule.games_in(2000), None);
    }

    #[test]
    fn test_schedule_from_csv() {
        let schedule = SeasonSchedule::from_csv_str("Season,Games\n2006,80\n2007,77\n").unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.games_in(2007), Some(77));
    }

    #[test]
    fn test_schedule_rejects_duplicates_and_zero() {
        assert!(matches!(
            SeasonSchedule::from_csv_str("Season,Games\n2006,80\n2006,81\n"),
            Err(PbpError::Config(_))
        ));
        assert!(matches!(
            SeasonSchedule::from_csv_str("Season,Games\n2006,0\n"),
            Err(PbpError::Config(_))
        ));
        assert!(matches!(
            SeasonSchedule::from_csv_str("Season,Games\n"),
            Err(PbpError::Config(_))
        ));
    }

    #[test]
    fn test_player_paths() {
        let config = PlayerConfig::default();
        assert_eq!(config.overview_path(), "/players/b/bryanko01.html");
        assert_eq!(
            config.overview_url(),
            "https://www.basketball-reference.com/players/b/bryanko01.html"
        );
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_millis(500),
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
        assert_eq!(policy.backoff(4), Duration::from_millis(500));
        assert_eq!(policy.backoff(40), Duration::from_millis(500));
    }
}
