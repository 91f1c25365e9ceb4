//! Column derivations
//!
//! Each function turns one text field into one typed value. A failure comes
//! back as a short reason; the caller attaches the row and field.

use crate::model::{DistanceBucket, Month, Outcome, ShotLocation, Venue, NOT_APPLICABLE};
use chrono::{Datelike, NaiveDate};

pub type DeriveResult<T> = std::result::Result<T, String>;

/// "Home" when the title reads "<opponent> at <home team>"
pub fn venue(title: &str, home_team: &str) -> Venue {
    if title.contains(&format!("at {}", home_team)) {
        Venue::Home
    } else {
        Venue::Away
    }
}

/// Date from the last two comma-separated parts of a game title
pub fn game_date(title: &str) -> DeriveResult<NaiveDate> {
    let parts: Vec<&str> = title.split(',').collect();
    if parts.len() < 2 {
        return Err("expected a title ending in ', <Month> <Day>, <Year>'".to_string());
    }

    let text = format!("{} {}", parts[parts.len() - 2].trim(), parts[parts.len() - 1].trim());
    NaiveDate::parse_from_str(&text, "%B %d %Y")
        .map_err(|e| format!("'{}' is not a 'Month Day Year' date: {}", text, e))
}

/// Season a game date belongs to, named by its end year.
///
/// Games from May on count toward the next season. Dates in 2000 are all
/// filed under 2001, the first season with play-by-play data.
pub fn season_for(date: NaiveDate) -> u16 {
    let year = date.year() as u16;
    if year == 2000 {
        2001
    } else if date.month() < 5 {
        year
    } else {
        year + 1
    }
}

pub fn month_name(date: NaiveDate) -> Option<Month> {
    Month::from_number(date.month())
}

/// Opponent name: the title minus the home team, " at " and the page label
pub fn opponent(title: &str, home_team: &str) -> DeriveResult<String> {
    let stripped = title
        .replace(home_team, "")
        .replace(" at ", "")
        .replace("Play-By-Play", "");

    let name = stripped.trim().split(',').next().unwrap_or("").trim();
    if name.is_empty() {
        return Err("no opponent left after removing the home team".to_string());
    }
    Ok(name.to_string())
}

/// Distance in feet from the trailing location text.
///
/// "1 of 2" style free throw counters and technicals carry no distance.
pub fn shot_location(text: &str) -> DeriveResult<ShotLocation> {
    if text == NOT_APPLICABLE || text.contains(" of ") || text.contains("technical") {
        return Ok(ShotLocation::NotApplicable);
    }

    let head = text.split('(').next().unwrap_or("");
    let cleaned = head
        .replace("at rim", "1")
        .replace("from ", "")
        .replace("ft", "");

    cleaned
        .trim()
        .parse::<u32>()
        .map(ShotLocation::Feet)
        .map_err(|_| "expected 'from <n> ft' or 'at rim'".to_string())
}

pub fn distance_bucket(location: ShotLocation) -> DistanceBucket {
    match location {
        ShotLocation::NotApplicable => DistanceBucket::NotApplicable,
        ShotLocation::Feet(1) => DistanceBucket::AtRim,
        ShotLocation::Feet(ft) if ft <= 5 => DistanceBucket::TwoToFive,
        ShotLocation::Feet(ft) if ft <= 10 => DistanceBucket::SixToTen,
        ShotLocation::Feet(ft) if ft <= 15 => DistanceBucket::ElevenToFifteen,
        ShotLocation::Feet(ft) if ft <= 20 => DistanceBucket::SixteenToTwenty,
        ShotLocation::Feet(ft) if ft <= 25 => DistanceBucket::TwentyOneToTwentyFive,
        ShotLocation::Feet(ft) if ft <= 30 => DistanceBucket::TwentySixToThirty,
        ShotLocation::Feet(_) => DistanceBucket::ThirtyOnePlus,
    }
}

/// Make or miss from the third word of the play
pub fn outcome(play: &str) -> DeriveResult<Outcome> {
    let word = play
        .split_whitespace()
        .nth(2)
        .ok_or_else(|| "play has fewer than three words".to_string())?;
    Outcome::from_verb(word).ok_or_else(|| format!("'{}' is neither 'makes' nor 'misses'", word))
}

/// 1 for free throws, otherwise the N of the fourth word "N-pt"
pub fn point_value(play: &str) -> DeriveResult<u8> {
    if play.contains("free throw") {
        return Ok(1);
    }

    let word = play
        .split_whitespace()
        .nth(3)
        .ok_or_else(|| "play has fewer than four words".to_string())?;
    match word.strip_suffix("-pt").map(str::parse::<u8>) {
        Some(Ok(points @ (2 | 3))) => Ok(points),
        _ => Err(format!("'{}' is not a 2-pt or 3-pt shot", word)),
    }
}

/// First two words of the play ("K. Bryant")
pub fn player_name(play: &str) -> DeriveResult<String> {
    let mut words = play.split_whitespace();
    match (words.next(), words.next()) {
        (Some(first), Some(last)) => Ok(format!("{} {}", first, last)),
        _ => Err("play has fewer than two words".to_string()),
    }
}
