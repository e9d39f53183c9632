//! The trip intake record: the wizard's accumulated answers.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{Result, TripError};

/// Display format for arrival/departure times, e.g. `02:30 PM`.
pub const TIME_FORMAT: &str = "%I:%M %p";

/// Long-form date used in trip summaries, e.g. `June 01, 2024`.
pub const LONG_DATE_FORMAT: &str = "%B %d, %Y";

/// Completed trip intake. Duration is always derived from the dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripIntake {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub arrival_time: NaiveTime,
    pub departure_time: NaiveTime,
    pub traveling_via: TravelMode,
    /// Pets or children along on the trip
    pub traveling_with: bool,
    pub interests: Vec<String>,
}

impl TripIntake {
    /// Inclusive number of days between start and end.
    pub fn duration(&self) -> u32 {
        trip_duration(self.start_date, self.end_date).unwrap_or(0)
    }

    /// Check the record-level invariants.
    pub fn validate(&self) -> Result<()> {
        if self.destination.trim().is_empty() {
            return Err(TripError::Validation("destination is required".to_string()));
        }
        if trip_duration(self.start_date, self.end_date).is_none() {
            return Err(TripError::Validation(
                "Start date must be before the end date.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn companions_label(&self) -> &'static str {
        if self.traveling_with {
            "Yes"
        } else {
            "No"
        }
    }

    pub fn interests_label(&self) -> String {
        self.interests.join(", ")
    }
}

/// Inclusive day count, or `None` when `end` precedes `start`.
pub fn trip_duration(start: NaiveDate, end: NaiveDate) -> Option<u32> {
    let days = (end - start).num_days();
    if days < 0 {
        return None;
    }
    u32::try_from(days + 1).ok()
}

/// Split a comma-separated interests answer, dropping blanks.
pub fn parse_interests(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// How the traveler gets to the destination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TravelMode {
    #[default]
    Vehicle,
    Train,
    Flight,
    Bus,
    Other(String),
}

impl TravelMode {
    /// Map a free-text answer onto a known mode, keeping anything else verbatim.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "vehicle" | "car" => TravelMode::Vehicle,
            "train" | "rail" => TravelMode::Train,
            "flight" | "plane" | "air" => TravelMode::Flight,
            "bus" | "coach" => TravelMode::Bus,
            _ => TravelMode::Other(trimmed.to_string()),
        }
    }

    /// Modes offered when the traveler has not picked one yet.
    pub fn suggested() -> &'static [TravelMode] {
        &[TravelMode::Train, TravelMode::Flight, TravelMode::Bus]
    }

    pub fn label(&self) -> &str {
        match self {
            TravelMode::Vehicle => "Vehicle",
            TravelMode::Train => "Train",
            TravelMode::Flight => "Flight",
            TravelMode::Bus => "Bus",
            TravelMode::Other(s) => s,
        }
    }

    /// Where tickets for this mode can be booked.
    pub fn booking_hint(&self) -> Option<&'static str> {
        match self {
            TravelMode::Train => Some(
                "You can book train tickets on websites like [Trainline](https://www.thetrainline.com) or [Amtrak](https://www.amtrak.com).",
            ),
            TravelMode::Flight => Some(
                "You can book flights on websites like [Skyscanner](https://www.skyscanner.com) or [Kayak](https://www.kayak.com).",
            ),
            TravelMode::Bus => Some(
                "You can book bus tickets on websites like [Greyhound](https://www.greyhound.com) or [FlixBus](https://www.flixbus.com).",
            ),
            TravelMode::Vehicle | TravelMode::Other(_) => None,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for TravelMode {
    fn from(s: String) -> Self {
        TravelMode::parse(&s)
    }
}

impl From<TravelMode> for String {
    fn from(mode: TravelMode) -> Self {
        mode.label().to_string()
    }
}
