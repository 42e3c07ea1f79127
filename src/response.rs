use serde::{Deserialize, Serialize};

use crate::error::FareError;

// Data structures for the fare search JSON response.
// Trip options are decoded down to the sale total; slices stay raw until an
// option is kept, so incomplete options that rank too low are never read.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TripsSearchResponse {
    pub trips: TripsData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripsData {
    pub trip_option: Vec<TripOption>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOption {
    pub sale_total: String,
    #[serde(default)]
    pub slice: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SliceInfo {
    pub segment: Vec<SegmentInfo>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SegmentInfo {
    pub flight: FlightInfo,
    pub leg: Vec<LegInfo>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlightInfo {
    pub carrier: String,
    pub number: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegInfo {
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
}

impl TripsSearchResponse {
    pub fn decode(value: serde_json::Value) -> Result<Self, FareError> {
        serde_json::from_value(value).map_err(|e| FareError::UnexpectedShape(e.to_string()))
    }
}

impl TripOption {
    /// First segment of the given slice, with its first leg.
    pub fn first_segment(&self, slice: usize) -> Result<(FlightInfo, LegInfo), FareError> {
        let raw = self
            .slice
            .get(slice)
            .ok_or_else(|| FareError::UnexpectedShape(format!("no slice {}", slice)))?;
        let info: SliceInfo = serde_json::from_value(raw.clone())
            .map_err(|e| FareError::UnexpectedShape(format!("slice {}: {}", slice, e)))?;

        let mut segment = info.segment.into_iter().next().ok_or_else(|| {
            FareError::UnexpectedShape(format!("slice {} has no segment", slice))
        })?;
        if segment.leg.is_empty() {
            return Err(FareError::UnexpectedShape(format!(
                "slice {} segment has no leg",
                slice
            )));
        }
        let leg = segment.leg.swap_remove(0);
        Ok((segment.flight, leg))
    }
}

// Sample file path (stored in the samples directory)
pub const SAMPLE_RESPONSE_PATH: &str = "samples/trips_search_response.json";
