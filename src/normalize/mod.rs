//! Raw play table → typed rows

pub mod derive;

use crate::config::DEFAULT_HOME_TEAM;
use crate::dataset::RawEventRow;
use crate::error::{PbpError, Result};
use crate::model::{NormalizedRow, PlayEvent, NOT_APPLICABLE};

pub use derive::*;

/// Normalizer settings
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Team whose arena counts as "Home"
    pub home_team: String,
    /// Drop rows from seasons before this one
    pub min_season: Option<u16>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            home_team: DEFAULT_HOME_TEAM.to_string(),
            min_season: None,
        }
    }
}

fn filled(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_APPLICABLE.to_string(),
    }
}

/// Replace every blank cell of the raw table with "N/A"
pub fn fill_missing(rows: Vec<RawEventRow>) -> Vec<PlayEvent> {
    rows.into_iter()
        .map(|row| PlayEvent {
            game: filled(row.game),
            time: filled(row.time),
            score: filled(row.score),
            play: filled(row.play),
            shot_location: filled(row.shot_location),
        })
        .collect()
}

fn field_error(index: usize, field: &'static str, value: &str, reason: String) -> PbpError {
    PbpError::Normalization {
        index,
        field,
        value: value.to_string(),
        reason,
    }
}

/// Derive every column of one row. `index` is only used in errors.
pub fn normalize_event(index: usize, event: &PlayEvent, home_team: &str) -> Result<NormalizedRow> {
    let game = event.game.as_str();
    let date = game_date(game).map_err(|r| field_error(index, "Date", game, r))?;
    let opponent = opponent(game, home_team).map_err(|r| field_error(index, "Opponent", game, r))?;

    let location_text = event.shot_location.as_str();
    let shot_location =
        shot_location(location_text).map_err(|r| field_error(index, "Shot Location", location_text, r))?;

    let play = event.play.as_str();
    let outcome = outcome(play).map_err(|r| field_error(index, "Make or Miss", play, r))?;
    let points = point_value(play).map_err(|r| field_error(index, "Points", play, r))?;
    let player_name = player_name(play).map_err(|r| field_error(index, "Player Name", play, r))?;

    Ok(NormalizedRow {
        season: season_for(date),
        month: month_name(date),
        date,
        opponent,
        venue: venue(game, home_team),
        time: event.time.clone(),
        score: event.score.clone(),
        player_name,
        outcome,
        points,
        shot_location,
        distance: distance_bucket(shot_location),
    })
}

/// Normalize a whole table, stopping at the first row that cannot be parsed.
///
/// Every input row yields exactly one output row unless `min_season` filters it.
pub fn normalize_events(events: &[PlayEvent], config: &NormalizeConfig) -> Result<Vec<NormalizedRow>> {
    let mut rows = Vec::with_capacity(events.len());
    let mut filtered = 0;

    for (index, event) in events.iter().enumerate() {
        let row = normalize_event(index, event, &config.home_team)?;
        if config.min_season.is_some_and(|min| row.season < min) {
            filtered += 1;
            continue;
        }
        rows.push(row);
    }

    log::info!("Normalized {} rows ({} filtered by season)", rows.len(), filtered);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DistanceBucket, Month, Outcome, ShotLocation, Venue};
    use chrono::NaiveDate;

    fn raw(game: &str, play: &str, location: Option<&str>) -> RawEventRow {
        RawEventRow {
            game: Some(game.to_string()),
            time: Some("10:00.0".to_string()),
            score: Some("10-8".to_string()),
            play: Some(play.to_string()),
            shot_location: location.map(str::to_string),
        }
    }

    const HOME_TITLE: &str = "Boston Celtics at Los Angeles Lakers Play-By-Play, November 2, 2005";
    const AWAY_TITLE: &str = "Los Angeles Lakers at Phoenix Suns Play-By-Play, January 10, 2001";

    #[test]
    fn test_fill_missing() {
        let events = fill_missing(vec![
            raw(HOME_TITLE, "K. Bryant makes free throw", None),
            raw(HOME_TITLE, "K. Bryant makes free throw", Some("  ")),
        ]);
        assert!(events.iter().all(|e| e.shot_location == "N/A"));
    }

    #[test]
    fn test_normalize_event() {
        let events = fill_missing(vec![raw(HOME_TITLE, "K. Bryant misses 3-pt shot", Some("from 26 ft"))]);
        let row = normalize_event(0, &events[0], "Los Angeles Lakers").unwrap();

        assert_eq!(row.season, 2006);
        assert_eq!(row.month, Some(Month::November));
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2005, 11, 2).unwrap());
        assert_eq!(row.opponent, "Boston Celtics");
        assert_eq!(row.venue, Venue::Home);
        assert_eq!(row.time, "10:00.0");
        assert_eq!(row.score, "10-8");
        assert_eq!(row.player_name, "K. Bryant");
        assert_eq!(row.outcome, Outcome::Miss);
        assert_eq!(row.points, 3);
        assert_eq!(row.shot_location, ShotLocation::Feet(26));
        assert_eq!(row.distance, DistanceBucket::TwentySixToThirty);
    }

    #[test]
    fn test_row_count_preserved() {
        let events = fill_missing(vec![
            raw(HOME_TITLE, "K. Bryant makes 2-pt shot", Some("at rim")),
            raw(HOME_TITLE, "K. Bryant makes free throw", Some("1 of 2")),
            raw(AWAY_TITLE, "K. Bryant makes free throw", None),
            raw(AWAY_TITLE, "K. Bryant misses 2-pt shot", Some("from 4 ft (block by S. Marion)")),
        ]);
        let rows = normalize_events(&events, &NormalizeConfig::default()).unwrap();
        assert_eq!(rows.len(), events.len());
        assert_eq!(rows[0].distance, DistanceBucket::AtRim);
        assert_eq!(rows[1].distance, DistanceBucket::NotApplicable);
        assert_eq!(rows[2].venue, Venue::Away);
        assert_eq!(rows[2].season, 2001);
        assert_eq!(rows[3].distance, DistanceBucket::TwoToFive);
    }

    #[test]
    fn test_season_filter() {
        let events = fill_missing(vec![
            raw(HOME_TITLE, "K. Bryant makes 2-pt shot", Some("at rim")),
            raw(AWAY_TITLE, "K. Bryant makes 2-pt shot", Some("at rim")),
        ]);
        let config = NormalizeConfig {
            min_season: Some(2002),
            ..NormalizeConfig::default()
        };
        let rows = normalize_events(&events, &config).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].season, 2006);
    }

    #[test]
    fn test_bad_row_reports_index_and_field() {
        let events = fill_missing(vec![
            raw(HOME_TITLE, "K. Bryant makes 2-pt shot", Some("at rim")),
            raw(HOME_TITLE, "K. Bryant makes 2-pt shot", Some("from downtown")),
        ]);
        match normalize_events(&events, &NormalizeConfig::default()) {
            Err(PbpError::Normalization { index, field, value, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "Shot Location");
                assert_eq!(value, "from downtown");
            }
            other => panic!("Expected a normalization error, got {:?}", other.map(|r| r.len())),
        }
    }
}
