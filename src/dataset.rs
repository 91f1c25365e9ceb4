//! CSV tables passed between the collector and the normalizer

use crate::error::Result;
use crate::model::{NormalizedRow, PlayEvent};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Columns of the raw export, in order
pub const RAW_COLUMNS: [&str; 5] = ["Game", "Time", "Score", "Play", "Shot Location"];

/// Columns of the normalized table, in order
pub const NORMALIZED_COLUMNS: [&str; 12] = [
    "Season",
    "Month",
    "Date",
    "Opponent",
    "Home or Away",
    "Time",
    "Score",
    "Player Name",
    "Make or Miss",
    "Points",
    "Shot Location",
    "Distance",
];

/// One line of the raw export. Cells may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawEventRow {
    pub game: Option<String>,
    pub time: Option<String>,
    pub score: Option<String>,
    pub play: Option<String>,
    #[serde(rename = "Shot Location")]
    pub shot_location: Option<String>,
}

impl From<&PlayEvent> for RawEventRow {
    fn from(event: &PlayEvent) -> Self {
        let cell = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            game: cell(&event.game),
            time: cell(&event.time),
            score: cell(&event.score),
            play: cell(&event.play),
            shot_location: cell(&event.shot_location),
        }
    }
}

/// Write scraped events as the raw CSV table
pub fn write_raw_csv(events: &[PlayEvent], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for event in events {
        writer.serialize(RawEventRow::from(event))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read the raw CSV table
pub fn read_raw_csv(path: &Path) -> Result<Vec<RawEventRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Cell text of a normalized row, in `NORMALIZED_COLUMNS` order
pub fn normalized_cells(row: &NormalizedRow) -> [String; 12] {
    [
        row.season.to_string(),
        row.month.map(|m| m.to_string()).unwrap_or_default(),
        row.date.format("%Y-%m-%d").to_string(),
        row.opponent.clone(),
        row.venue.to_string(),
        row.time.clone(),
        row.score.clone(),
        row.player_name.clone(),
        row.outcome.to_string(),
        row.points.to_string(),
        row.shot_location.to_string(),
        row.distance.to_string(),
    ]
}

/// Write the normalized table as CSV
pub fn write_normalized_csv(rows: &[NormalizedRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(NORMALIZED_COLUMNS)?;
    for row in rows {
        writer.write_record(normalized_cells(row))?;
    }
    writer.flush()?;
    Ok(())
}
