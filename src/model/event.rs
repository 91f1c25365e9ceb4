/// A player's game log page for one season
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonLogReference {
    pub url: String,
    /// Season end year, e.g. 2006 for 2005-06
    pub season: u16,
}

/// Play-by-play page for a single game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReference {
    pub url: String,
    pub season: u16,
}

/// One shot or free throw by the tracked player, as scraped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayEvent {
    /// Page heading of the game, e.g. "Boston Celtics at Los Angeles Lakers Play-By-Play, November 2, 2005"
    pub game: String,
    /// Remaining time in the period ("11:34.0")
    pub time: String,
    /// Score when the play happened ("12-10")
    pub score: String,
    /// Player name plus action ("K. Bryant makes 2-pt shot")
    pub play: String,
    /// Whatever follows the action ("from 18 ft", "1 of 2"); empty when the page gives nothing
    pub shot_location: String,
}

/// All events for one game, in page order
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    pub title: String,
    pub url: String,
    pub events: Vec<PlayEvent>,
}

impl GameRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            events: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
