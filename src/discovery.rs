//! Season log and game link discovery
//!
//! The overview page links every season's game log, and each game log links
//! the box score of every game played that season. Links are pulled straight
//! out of the markup with patterns built for the configured player.

use crate::config::{PlayerConfig, SeasonSchedule};
use crate::error::{PbpError, Result};
use crate::model::{GameReference, SeasonLogReference};
use regex::Regex;
use url::Url;

/// Pattern matching the player's season game log links, capturing the path and the year
pub fn season_log_pattern(config: &PlayerConfig) -> Result<Regex> {
    let pattern = format!(
        r#"<a href="({}/gamelog/(\d{{4}}))/?">"#,
        regex::escape(&config.player_dir())
    );
    Regex::new(&pattern).map_err(|e| PbpError::Discovery(format!("Bad season log pattern: {}", e)))
}

/// Find the season game logs on a player overview page.
///
/// Seasons before `min_season` are skipped. The page repeats the whole list
/// further down, so the scan stops at the first link already seen.
pub fn discover_season_logs(html: &str, config: &PlayerConfig) -> Result<Vec<SeasonLogReference>> {
    let pattern = season_log_pattern(config)?;
    let base = Url::parse(&config.base_url)?;
    let mut logs: Vec<SeasonLogReference> = Vec::new();

    for caps in pattern.captures_iter(html) {
        let season: u16 = caps[2]
            .parse()
            .map_err(|_| PbpError::Discovery(format!("Bad season year '{}'", &caps[2])))?;

        if season < config.min_season {
            continue;
        }

        let url = base.join(&caps[1])?.to_string();
        if logs.iter().any(|log| log.url == url) {
            break;
        }

        logs.push(SeasonLogReference { url, season });
    }

    log::info!("Found {} season logs on the player overview page", logs.len());
    Ok(logs)
}

/// Two-digit suffixes of a season's end year and the year before, zero-padded.
///
/// The 2005-06 season gives ("06", "05"); 2010 gives ("10", "09").
pub fn season_suffixes(season: u16) -> (String, String) {
    let current = season % 100;
    let previous = (season + 99) % 100;
    (format!("{:02}", current), format!("{:02}", previous))
}

/// Pattern matching box score links dated in either year of a season
pub fn game_link_pattern(season: u16) -> Result<Regex> {
    let (current, previous) = season_suffixes(season);
    let pattern = format!(
        r#"<a href="(/boxscores/\d{{2}}(?:{}|{})\w{{8}}\.html)">"#,
        previous, current
    );
    Regex::new(&pattern).map_err(|e| PbpError::Discovery(format!("Bad game link pattern: {}", e)))
}

/// Turn a box score path into its play-by-play path
pub fn to_play_by_play_url(boxscore: &str) -> String {
    boxscore.replacen("/boxscores/", "/boxscores/pbp/", 1)
}

/// Find the regular-season games on a season game log page.
///
/// Playoff games follow the regular season in document order, so the list
/// is cut at the season's scheduled game count.
pub fn discover_games(
    html: &str,
    season_log: &SeasonLogReference,
    schedule: &SeasonSchedule,
    base_url: &str,
) -> Result<Vec<GameReference>> {
    let limit = schedule.games_in(season_log.season).ok_or_else(|| {
        PbpError::Config(format!(
            "No regular-season game count configured for season {}",
            season_log.season
        ))
    })?;

    let pattern = game_link_pattern(season_log.season)?;
    let base = Url::parse(base_url)?;

    let games = pattern
        .captures_iter(html)
        .take(limit)
        .map(|caps| -> Result<GameReference> {
            let url = base.join(&to_play_by_play_url(&caps[1]))?.to_string();
            Ok(GameReference {
                url,
                season: season_log.season,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::info!("Season {}: found {} games", season_log.season, games.len());
    Ok(games)
}
