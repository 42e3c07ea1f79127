use serde_json::Value;

use crate::error::FareError;
use crate::response::{FlightInfo, LegInfo, TripOption, TripsSearchResponse};

pub const CURRENCY_PREFIX_LEN: usize = 3;
pub const FIELDS_PER_OPTION: usize = 11;

#[derive(Debug, Clone, PartialEq)]
pub struct FlightLeg {
    pub carrier: String,
    pub number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
}

impl FlightLeg {
    fn new(flight: FlightInfo, leg: LegInfo) -> Self {
        Self {
            carrier: flight.carrier,
            number: flight.number,
            origin: leg.origin,
            destination: leg.destination,
            departure_time: leg.departure_time,
            arrival_time: leg.arrival_time,
        }
    }
}

/// A priced round trip kept for the result table.
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryOption {
    pub sale_total: String,
    pub price: f64,
    pub outbound: FlightLeg,
    pub inbound: FlightLeg,
}

impl ItineraryOption {
    fn from_trip(trip: &TripOption, price: f64) -> Result<Self, FareError> {
        let (out_flight, out_leg) = trip.first_segment(0)?;
        let (in_flight, in_leg) = trip.first_segment(1)?;
        Ok(Self {
            sale_total: trip.sale_total.clone(),
            price,
            outbound: FlightLeg::new(out_flight, out_leg),
            inbound: FlightLeg::new(in_flight, in_leg),
        })
    }

    /// One cell per `OptionField`, in column order.
    pub fn fields(&self) -> [String; FIELDS_PER_OPTION] {
        [
            self.sale_total.clone(),
            format!("{}{}", self.outbound.carrier, self.outbound.number),
            self.outbound.origin.clone(),
            self.outbound.destination.clone(),
            self.outbound.departure_time.clone(),
            self.outbound.arrival_time.clone(),
            // Inbound carrier with the outbound flight number, as in
            // tables produced by earlier versions of this tool.
            format!("{}{}", self.inbound.carrier, self.outbound.number),
            self.inbound.origin.clone(),
            self.inbound.destination.clone(),
            self.inbound.departure_time.clone(),
            self.inbound.arrival_time.clone(),
        ]
    }
}

/// "USD1020.00" -> 1020.0
pub fn parse_sale_total(sale_total: &str) -> Result<f64, FareError> {
    sale_total
        .get(CURRENCY_PREFIX_LEN..)
        .and_then(|amount| amount.parse::<f64>().ok())
        .ok_or_else(|| FareError::PriceFormat(sale_total.to_string()))
}

/// Cheapest `limit` options of one search response, ascending by price.
///
/// Fails with `UnexpectedShape` when the response carries no trip options or
/// a kept option has an incomplete slice, segment or leg. Options outside the
/// cheapest `limit` are only read for their sale total. Every sale total is
/// parsed before sorting, so one unreadable price fails the whole response.
pub fn rank_options(response: Value, limit: usize) -> Result<Vec<ItineraryOption>, FareError> {
    let response = TripsSearchResponse::decode(response)?;

    let mut priced = response
        .trips
        .trip_option
        .iter()
        .map(|trip| parse_sale_total(&trip.sale_total).map(|price| (price, trip)))
        .collect::<Result<Vec<_>, _>>()?;

    priced.sort_by(|a, b| a.0.total_cmp(&b.0));

    priced
        .into_iter()
        .take(limit)
        .map(|(price, trip)| ItineraryOption::from_trip(trip, price))
        .collect()
}
