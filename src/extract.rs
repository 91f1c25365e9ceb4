//! Play-by-play page extraction
//!
//! A play-by-play table row reads: time, away play, away points, score,
//! home points, home play. The tracked player's plays sit on the home side
//! of the score cell in home games and on the away side in road games, so
//! each page is parsed once into a tree and then read through one of two
//! layout adapters.

use crate::error::{PbpError, Result};
use crate::model::{GameRecord, PlayEvent};
use lazy_static::lazy_static;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space1},
    combinator::{opt, recognize},
    IResult, Parser,
};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::fmt;

lazy_static! {
    static ref TIME_PATTERN: Regex = Regex::new(r"^\d{1,2}:\d{2}\.\d$").unwrap();
    static ref SCORE_PATTERN: Regex = Regex::new(r"^\d{1,3}-\d{1,3}$").unwrap();
    static ref TITLE_SELECTOR: Selector = Selector::parse("h1").unwrap();
    static ref ROW_SELECTOR: Selector = Selector::parse("tr").unwrap();
    static ref CELL_SELECTOR: Selector = Selector::parse("td").unwrap();
}

/// Which side of the score column the tracked player's plays are on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Player's team at home: play cell after the score
    Home,
    /// Player's team on the road: play cell before the score
    Away,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Home, Layout::Away];

    /// Cells that may hold the player's play, given the score cell's index
    fn play_cells<'a, 'b>(&self, cells: &'b [ElementRef<'a>], score_idx: usize) -> &'b [ElementRef<'a>] {
        match self {
            Layout::Home => &cells[score_idx + 1..],
            // Cell 0 is the clock
            Layout::Away => &cells[1..score_idx],
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Home => write!(f, "home"),
            Layout::Away => write!(f, "away"),
        }
    }
}

/// Play text split into the action and whatever trails it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPlay {
    /// "K. Bryant makes 2-pt shot"
    pub play: String,
    /// "from 18 ft (assist by D. Fisher)"
    pub location: String,
}

/// "2-pt shot", "3-pt shot", "free throw", "technical free throw", "flagrant free throw"
fn shot_kind(input: &str) -> IResult<&str, &str> {
    alt((
        recognize((digit1, tag("-pt shot"))),
        recognize((
            opt(alt((tag("technical "), tag("flagrant ")))),
            tag("free throw"),
        )),
    ))
    .parse(input)
}

fn verb(input: &str) -> IResult<&str, &str> {
    alt((tag("makes"), tag("misses"))).parse(input)
}

/// Parse "<player> makes|misses <shot kind><rest>"
fn play_parts<'a>(input: &'a str, player: &str) -> IResult<&'a str, (&'a str, &'a str)> {
    let (input, _) = tag(player).parse(input)?;
    let (input, _) = char(' ').parse(input)?;
    let (input, verb) = verb(input)?;
    let (input, _) = space1.parse(input)?;
    let (input, kind) = shot_kind(input)?;
    Ok((input, (verb, kind)))
}

/// Parse a play cell's text if it is a shot or free throw by `player`
pub fn parse_play(text: &str, player: &str) -> Option<ParsedPlay> {
    let (rest, (verb, kind)) = play_parts(text, player).ok()?;

    // "free throws" or "3-pt shots" would mean the tag matched a longer word
    if rest.starts_with(|c: char| c.is_alphanumeric()) {
        return None;
    }

    Some(ParsedPlay {
        play: format!("{} {} {}", player, verb, kind),
        location: rest.trim().to_string(),
    })
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The page's first heading, e.g. "Boston Celtics at Los Angeles Lakers Play-By-Play, November 2, 2005"
pub fn game_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|h1| cell_text(&h1))
        .filter(|t| !t.is_empty())
}

fn events_in_document(document: &Html, title: &str, layout: Layout, player: &str) -> Vec<PlayEvent> {
    let mut events = Vec::new();

    for row in document.select(&ROW_SELECTOR) {
        let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
        if cells.len() < 3 {
            continue;
        }

        let time = cell_text(&cells[0]);
        if !TIME_PATTERN.is_match(&time) {
            continue;
        }

        let score_idx = match cells
            .iter()
            .skip(1)
            .position(|c| SCORE_PATTERN.is_match(&cell_text(c)))
        {
            Some(i) => i + 1,
            None => continue,
        };

        for cell in layout.play_cells(&cells, score_idx) {
            if let Some(parsed) = parse_play(&cell_text(cell), player) {
                events.push(PlayEvent {
                    game: title.to_string(),
                    time: time.clone(),
                    score: cell_text(&cells[score_idx]),
                    play: parsed.play,
                    shot_location: parsed.location,
                });
            }
        }
    }

    events
}

/// Pull the player's plays from a page assuming one layout.
///
/// Zero matches is `ParseMismatch`: the page is most likely the other layout.
pub fn extract_events(html: &str, layout: Layout, player: &str) -> Result<Vec<PlayEvent>> {
    let document = Html::parse_document(html);
    let title = game_title(&document).unwrap_or_default();
    let events = events_in_document(&document, &title, layout, player);

    if events.is_empty() {
        return Err(PbpError::ParseMismatch { tried: vec![layout] });
    }
    Ok(events)
}

/// Pull the player's plays from a page, trying the home layout then the away one
pub fn extract_game(html: &str, url: &str, player: &str) -> Result<GameRecord> {
    let document = Html::parse_document(html);
    let title = game_title(&document).unwrap_or_default();

    for layout in Layout::ALL {
        let events = events_in_document(&document, &title, layout, player);
        if !events.is_empty() {
            log::debug!("{}: {} plays using the {} layout", url, events.len(), layout);
            let mut record = GameRecord::new(title, url);
            record.events = events;
            return Ok(record);
        }
    }

    Err(PbpError::ParseMismatch {
        tried: Layout::ALL.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAYER: &str = "K. Bryant";

    const HOME_PAGE: &str = r#"<html><body>
<h1>Boston Celtics at Los Angeles Lakers Play-By-Play, November 2, 2005</h1>
<table id="pbp">
<tr><th colspan="6">1st Quarter</th></tr>
<tr><td>11:34.0</td><td class="left">P. Pierce misses 2-pt shot from 15 ft</td><td class="center"></td><td class="center">0-0</td><td class="center"></td><td class="left"></td></tr>
<tr><td>11:02.0</td><td class="left"></td><td class="center"></td><td class="center">0-2</td><td class="center">+2</td><td class="left"><a href="/players/b/bryanko01.html">K. Bryant</a> makes 2-pt shot from 18 ft (assist by <a href="/players/o/odomla01.html">L. Odom</a>)</td></tr>
<tr><td>9:45.0</td><td class="left"></td><td class="center"></td><td class="center">0-2</td><td class="center"></td><td class="left"><a href="/players/b/bryanko01.html">K. Bryant</a> misses 3-pt shot from 25 ft</td></tr>
<tr><td>8:10.0</td><td class="left"></td><td class="center"></td><td class="center">0-3</td><td class="center">+1</td><td class="left"><a href="/players/b/bryanko01.html">K. Bryant</a> makes free throw 1 of 2</td></tr>
<tr><td>7:55.0</td><td class="left"></td><td class="center"></td><td class="center">0-3</td><td class="center"></td><td class="left">Defensive rebound by <a href="/players/b/bryanko01.html">K. Bryant</a></td></tr>
</table></body></html>"#;

    const AWAY_PAGE: &str = r#"<html><body>
<h1>Los Angeles Lakers at Boston Celtics Play-By-Play, January 5, 2006</h1>
<table id="pbp">
<tr><td>10:20.0</td><td class="left"><a href="/players/b/bryanko01.html">K. Bryant</a> makes 2-pt shot at rim</td><td class="center">+2</td><td class="center">2-0</td><td class="center"></td><td class="left"></td></tr>
<tr><td>6:01.0</td><td class="left"><a href="/players/b/bryanko01.html">K. Bryant</a> misses technical free throw</td><td class="center"></td><td class="center">2-0</td><td class="center"></td><td class="left"></td></tr>
<tr><td>5:30.0</td><td class="left"></td><td class="center"></td><td class="center">2-2</td><td class="center">+2</td><td class="left">P. Pierce makes 2-pt shot from 8 ft</td></tr>
</table></body></html>"#;

    #[test]
    fn test_parse_play() {
        let parsed = parse_play("K. Bryant makes 2-pt shot from 18 ft (assist by L. Odom)", PLAYER).unwrap();
        assert_eq!(parsed.play, "K. Bryant makes 2-pt shot");
        assert_eq!(parsed.location, "from 18 ft (assist by L. Odom)");

        let parsed = parse_play("K. Bryant makes flagrant free throw 1 of 2", PLAYER).unwrap();
        assert_eq!(parsed.play, "K. Bryant makes flagrant free throw");
        assert_eq!(parsed.location, "1 of 2");

        let parsed = parse_play("K. Bryant misses technical free throw", PLAYER).unwrap();
        assert_eq!(parsed.location, "");

        assert_eq!(parse_play("Defensive rebound by K. Bryant", PLAYER), None);
        assert_eq!(parse_play("K. Bryant turnover (bad pass)", PLAYER), None);
        assert_eq!(parse_play("P. Pierce makes 2-pt shot from 8 ft", PLAYER), None);
    }

    #[test]
    fn test_home_layout() {
        let events = extract_events(HOME_PAGE, Layout::Home, PLAYER).unwrap();
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].time, "11:02.0");
        assert_eq!(events[0].score, "0-2");
        assert_eq!(events[0].play, "K. Bryant makes 2-pt shot");
        assert_eq!(events[0].shot_location, "from 18 ft (assist by L. Odom)");
        assert_eq!(
            events[0].game,
            "Boston Celtics at Los Angeles Lakers Play-By-Play, November 2, 2005"
        );

        assert_eq!(events[1].play, "K. Bryant misses 3-pt shot");
        assert_eq!(events[2].play, "K. Bryant makes free throw");
        assert_eq!(events[2].shot_location, "1 of 2");
    }

    #[test]
    fn test_away_layout() {
        let events = extract_events(AWAY_PAGE, Layout::Away, PLAYER).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].score, "2-0");
        assert_eq!(events[0].shot_location, "at rim");
        assert_eq!(events[1].play, "K. Bryant misses technical free throw");
    }

    #[test]
    fn test_layouts_do_not_cross_match() {
        assert!(matches!(
            extract_events(AWAY_PAGE, Layout::Home, PLAYER),
            Err(PbpError::ParseMismatch { tried }) if tried == [Layout::Home]
        ));
        assert!(matches!(
            extract_events(HOME_PAGE, Layout::Away, PLAYER),
            Err(PbpError::ParseMismatch { tried }) if tried == [Layout::Away]
        ));
    }

    #[test]
    fn test_extract_game_picks_layout() {
        let home = extract_game(HOME_PAGE, "home-url", PLAYER).unwrap();
        assert_eq!(home.len(), 3);
        assert_eq!(home.url, "home-url");

        let away = extract_game(AWAY_PAGE, "away-url", PLAYER).unwrap();
        assert_eq!(away.len(), 2);
        assert!(away.title.starts_with("Los Angeles Lakers at Boston Celtics"));

        let err = extract_game(HOME_PAGE, "url", "M. Jordan").unwrap_err();
        assert_eq!(err.to_string(), "No plays matched the home or away layout");
        assert!(matches!(err, PbpError::ParseMismatch { tried } if tried == Layout::ALL));
    }
}
