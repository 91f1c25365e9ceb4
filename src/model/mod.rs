pub mod event;
pub mod row;

pub use event::{GameRecord, GameReference, PlayEvent, SeasonLogReference};
pub use row::{DistanceBucket, Month, NormalizedRow, Outcome, ShotLocation, Venue, NOT_APPLICABLE};
