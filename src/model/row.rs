use chrono::NaiveDate;
use std::fmt;

/// Sentinel used for free throws and plays without a usable location
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Venue {
    Home,
    Away,
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Home => write!(f, "Home"),
            Venue::Away => write!(f, "Away"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Make,
    Miss,
}

impl Outcome {
    /// Map the verb of a play description
    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "makes" => Some(Outcome::Make),
            "misses" => Some(Outcome::Miss),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Make => write!(f, "Make"),
            Outcome::Miss => write!(f, "Miss"),
        }
    }
}

/// Regular-season months, October through April
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    October,
    November,
    December,
    January,
    February,
    March,
    April,
}

impl Month {
    /// Months in season order
    pub const ALL: [Month; 7] = [
        Month::October,
        Month::November,
        Month::December,
        Month::January,
        Month::February,
        Month::March,
        Month::April,
    ];

    /// Calendar month number (1-12) to season month; None outside October-April
    pub fn from_number(month: u32) -> Option<Self> {
        match month {
            10 => Some(Month::October),
            11 => Some(Month::November),
            12 => Some(Month::December),
            1 => Some(Month::January),
            2 => Some(Month::February),
            3 => Some(Month::March),
            4 => Some(Month::April),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Month::ALL.into_iter().find(|m| m.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShotLocation {
    NotApplicable,
    Feet(u32),
}

impl fmt::Display for ShotLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotLocation::NotApplicable => f.write_str(NOT_APPLICABLE),
            ShotLocation::Feet(ft) => write!(f, "{}", ft),
        }
    }
}

/// Shot distance band. At-rim attempts keep their own "1" bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DistanceBucket {
    NotApplicable,
    AtRim,
    TwoToFive,
    SixToTen,
    ElevenToFifteen,
    SixteenToTwenty,
    TwentyOneToTwentyFive,
    TwentySixToThirty,
    ThirtyOnePlus,
}

impl DistanceBucket {
    /// Bands shown on the heatmap, nearest first
    pub const BANDS: [DistanceBucket; 7] = [
        DistanceBucket::TwoToFive,
        DistanceBucket::SixToTen,
        DistanceBucket::ElevenToFifteen,
        DistanceBucket::SixteenToTwenty,
        DistanceBucket::TwentyOneToTwentyFive,
        DistanceBucket::TwentySixToThirty,
        DistanceBucket::ThirtyOnePlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DistanceBucket::NotApplicable => NOT_APPLICABLE,
            DistanceBucket::AtRim => "1",
            DistanceBucket::TwoToFive => "2-5",
            DistanceBucket::SixToTen => "6-10",
            DistanceBucket::ElevenToFifteen => "11-15",
            DistanceBucket::SixteenToTwenty => "16-20",
            DistanceBucket::TwentyOneToTwentyFive => "21-25",
            DistanceBucket::TwentySixToThirty => "26-30",
            DistanceBucket::ThirtyOnePlus => "31+",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [DistanceBucket::NotApplicable, DistanceBucket::AtRim]
            .into_iter()
            .chain(DistanceBucket::BANDS)
            .find(|b| b.label() == label)
    }
}

impl fmt::Display for DistanceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scraped play after every text field has been split into typed columns
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub season: u16,
    pub month: Option<Month>,
    pub date: NaiveDate,
    pub opponent: String,
    pub venue: Venue,
    pub time: String,
    pub score: String,
    pub player_name: String,
    pub outcome: Outcome,
    pub points: u8,
    pub shot_location: ShotLocation,
    pub distance: DistanceBucket,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_window() {
        assert_eq!(Month::from_number(10), Some(Month::October));
        assert_eq!(Month::from_number(4), Some(Month::April));
        assert_eq!(Month::from_number(5), None);
        assert_eq!(Month::from_number(9), None);
        assert_eq!(Month::from_name("March"), Some(Month::March));
    }

    #[test]
    fn test_bucket_labels() {
        for bucket in DistanceBucket::BANDS {
            assert_eq!(DistanceBucket::from_label(bucket.label()), Some(bucket));
        }
        assert_eq!(DistanceBucket::from_label("N/A"), Some(DistanceBucket::NotApplicable));
        assert_eq!(DistanceBucket::from_label("1"), Some(DistanceBucket::AtRim));
        assert_eq!(DistanceBucket::from_label("40"), None);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Venue::Home.to_string(), "Home");
        assert_eq!(Outcome::Miss.to_string(), "Miss");
        assert_eq!(ShotLocation::Feet(18).to_string(), "18");
        assert_eq!(ShotLocation::NotApplicable.to_string(), "N/A");
    }
}
