use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::weekend::WeekendWindow;

// Fixed search parameters, not user inputs
pub const ADULT_COUNT: u32 = 2;
pub const SOLUTION_CAP: u32 = 500;
pub const MAX_STOPS: u32 = 0;
pub const REFUNDABLE: bool = false;
pub const LATEST_DEPARTURE_TIME: &str = "23:59";

// Data structures for the fare search JSON request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareQuery {
    pub request: TripsSearchRequest,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripsSearchRequest {
    pub passengers: PassengerCounts,
    pub slice: Vec<SliceInput>,
    pub solutions: u32,
    pub refundable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerCounts {
    pub kind: String,
    pub adult_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceInput {
    pub origin: String,
    pub kind: String,
    pub destination: String,
    pub max_stops: u32,
    pub permitted_departure_time: TimeOfDayRange,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeOfDayRange {
    pub latest_time: String,
    pub kind: String,
    pub earliest_time: String,
}

impl SliceInput {
    fn nonstop(origin: &str, destination: &str, earliest: NaiveDateTime) -> Self {
        Self {
            origin: origin.to_string(),
            kind: "qpxexpress#sliceInput".to_string(),
            destination: destination.to_string(),
            max_stops: MAX_STOPS,
            permitted_departure_time: TimeOfDayRange {
                latest_time: LATEST_DEPARTURE_TIME.to_string(),
                kind: "qpxexpress#timeOfDayRange".to_string(),
                earliest_time: earliest.format("%H:%M").to_string(),
            },
            date: earliest.date(),
        }
    }
}

/// Round trip: origin to destination leaving no earlier than `departure`,
/// back the other way leaving no earlier than `return_at`.
pub fn build_query(
    departure: NaiveDateTime,
    return_at: NaiveDateTime,
    origin: &str,
    destination: &str,
) -> FareQuery {
    FareQuery {
        request: TripsSearchRequest {
            passengers: PassengerCounts {
                kind: "qpxexpress#passengerCounts".to_string(),
                adult_count: ADULT_COUNT,
            },
            slice: vec![
                SliceInput::nonstop(origin, destination, departure),
                SliceInput::nonstop(destination, origin, return_at),
            ],
            solutions: SOLUTION_CAP,
            refundable: REFUNDABLE,
        },
    }
}

impl FareQuery {
    pub fn for_weekend(window: &WeekendWindow, origin: &str, destination: &str) -> Self {
        build_query(window.departure, window.return_at, origin, destination)
    }
}
