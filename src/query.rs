use serde::{Deserialize, Serialize};

use crate::error::FlightError;
use crate::model::null_as_default;

pub const PASSENGERS_KIND: &str = "qpxexpress#passengerCounts";
pub const SLICE_KIND: &str = "qpxexpress#sliceInput";
pub const TIME_WINDOW_KIND: &str = "qpxexpress#timeOfDayRange";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Passengers {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub adult_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub child_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub infant_in_lap_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub infant_in_seat_count: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub senior_count: u32,
}

impl Passengers {
    pub fn adults(n: u32) -> Self {
        Self {
            kind: PASSENGERS_KIND.to_string(),
            adult_count: n,
            ..Default::default()
        }
    }

    /// Sum of all counts, in `u64` so five `u32::MAX` counts still fit.
    pub fn total(&self) -> u64 {
        [
            self.adult_count,
            self.child_count,
            self.infant_in_lap_count,
            self.infant_in_seat_count,
            self.senior_count,
        ]
        .iter()
        .map(|&n| u64::from(n))
        .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cabin {
    Coach,
    PremiumCoach,
    Business,
    First,
}

impl Cabin {
    pub fn from_str_loose(s: &str) -> Result<Self, FlightError> {
        match s.to_lowercase().as_str() {
            "economy" | "coach" => Ok(Self::Coach),
            "premium-economy" | "premium_coach" | "premium-coach" => Ok(Self::PremiumCoach),
            "business" => Ok(Self::Business),
            "first" => Ok(Self::First),
            _ => Err(FlightError::Validation(format!("invalid cabin: {s}"))),
        }
    }
}

/// Departure time-of-day window, `HH:MM` on both ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimeWindow {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub earliest_time: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub latest_time: String,
}

impl TimeWindow {
    pub fn new(earliest: Option<&str>, latest: Option<&str>) -> Self {
        Self {
            kind: TIME_WINDOW_KIND.to_string(),
            earliest_time: earliest.unwrap_or_default().to_string(),
            latest_time: latest.unwrap_or_default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripSlice {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub origin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub destination: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_stops: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connection_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_cabin: Option<Cabin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted_departure_time: Option<TimeWindow>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub permitted_carrier: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_default")]
    pub prohibited_carrier: Vec<String>,
}

impl TripSlice {
    pub fn new(origin: &str, destination: &str, date: &str) -> Self {
        Self {
            kind: SLICE_KIND.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            date: date.to_string(),
            ..Default::default()
        }
    }

    /// Same constraints, opposite direction, new date.
    pub fn reversed(&self, date: &str) -> Self {
        Self {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
            date: date.to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub passengers: Passengers,
    #[serde(deserialize_with = "null_as_default")]
    pub slice: Vec<TripSlice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refundable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solutions: Option<u32>,
}

impl SearchRequest {
    pub fn new(slice: Vec<TripSlice>) -> Self {
        Self {
            passengers: Passengers::adults(1),
            slice,
            ..Default::default()
        }
    }

    pub fn one_way(origin: &str, destination: &str, date: &str) -> Self {
        Self::new(vec![TripSlice::new(origin, destination, date)])
    }

    pub fn round_trip(origin: &str, destination: &str, date: &str, return_date: &str) -> Self {
        let outbound = TripSlice::new(origin, destination, date);
        let inbound = outbound.reversed(return_date);
        Self::new(vec![outbound, inbound])
    }
}

/// Splits `"AA, dl,UA"` into upper-cased carrier codes, dropping empties.
pub fn parse_carriers(s: &str) -> Vec<String> {
    s.split(',')
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Parses a `"DATE FROM TO"` leg description.
pub fn parse_leg(s: &str) -> Result<TripSlice, FlightError> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(FlightError::Validation(format!(
            "--leg must be \"DATE FROM TO\", got: \"{s}\""
        )));
    }
    Ok(TripSlice::new(
        &parts[1].to_uppercase(),
        &parts[2].to_uppercase(),
        parts[0],
    ))
}
