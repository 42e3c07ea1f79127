use chrono::NaiveDate;
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::FareError;
use crate::fetcher::FareSource;
use crate::ranker::rank_options;
use crate::request::FareQuery;
use crate::table::ResultTable;
use crate::weekend::weekends;

/// Prices every remaining weekend of the year, one search at a time.
pub struct FareMonitor<S> {
    source: S,
    search: SearchConfig,
}

impl<S: FareSource> FareMonitor<S> {
    pub fn new(source: S, search: SearchConfig) -> Self {
        Self { source, search }
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    /// Builds the table for `destination` from the weekends after `start`.
    ///
    /// A weekend whose response has an unexpected shape contributes no row;
    /// any other error ends the run.
    pub async fn collect(
        &self,
        destination: &str,
        start: NaiveDate,
    ) -> Result<ResultTable, FareError> {
        let origin = self.search.origin.as_str();
        let mut table = ResultTable::new(self.search.options_per_weekend);

        for window in weekends(start) {
            info!(
                departure = %window.departure,
                return_at = %window.return_at,
                "Searching {} -> {}",
                origin,
                destination
            );
            debug!(url = %window.google_flights_url(origin, destination), "Google Flights link");

            let query = FareQuery::for_weekend(&window, origin, destination);
            let response = self.source.search(&query).await?;

            match rank_options(response, self.search.options_per_weekend) {
                Ok(options) => table.push(window, &options),
                Err(e) if e.is_recoverable() => {
                    debug!(departure = %window.departure, "Skipping weekend: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        info!(rows = table.len(), "Collected weekend fares");
        Ok(table)
    }
}

#[cfg(test)]
pub mod mock_source {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::VecDeque;
    use tokio::sync::Mutex;

    pub enum Reply {
        Body(Value),
        Fail(FareError),
    }

    // Replays canned replies in order and records every query it receives
    pub struct MockSource {
        replies: Mutex<VecDeque<Reply>>,
        fallback: Value,
        pub queries: Mutex<Vec<FareQuery>>,
    }

    impl MockSource {
        pub fn new(replies: Vec<Reply>, fallback: Value) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                fallback,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FareSource for MockSource {
        async fn search(&self, query: &FareQuery) -> Result<Value, FareError> {
            self.queries.lock().await.push(query.clone());
            match self.replies.lock().await.pop_front() {
                Some(Reply::Body(body)) => Ok(body),
                Some(Reply::Fail(e)) => Err(e),
                None => Ok(self.fallback.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock_source::{MockSource, Reply};
    use super::*;
    use crate::table::{ColumnKey, OptionField};
    use crate::weekend::WeekendWindow;
    use serde_json::{json, Value};
    use tokio_test::{assert_err, assert_ok};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip(sale_total: &str, number: &str) -> Value {
        let slice = |origin: &str, destination: &str| {
            json!({
                "segment": [{
                    "flight": { "carrier": "AA", "number": number },
                    "leg": [{
                        "origin": origin,
                        "destination": destination,
                        "departureTime": "2024-12-13T18:30-05:00",
                        "arrivalTime": "2024-12-13T21:45-06:00"
                    }]
                }]
            })
        };
        json!({ "saleTotal": sale_total, "slice": [slice("JFK", "AUS"), slice("AUS", "JFK")] })
    }

    fn body(trips: Vec<Value>) -> Value {
        json!({ "trips": { "tripOption": trips } })
    }

    fn search(origin: &str, options_per_weekend: usize) -> SearchConfig {
        SearchConfig {
            origin: origin.to_string(),
            options_per_weekend,
        }
    }

    fn sale_total(option: usize) -> ColumnKey {
        ColumnKey { option, field: OptionField::SaleTotal }
    }

    // Start on Monday 2 Dec 2024: weekends of the 6th, 13th, 20th and 27th
    const START: (i32, u32, u32) = (2024, 12, 2);

    fn start() -> NaiveDate {
        date(START.0, START.1, START.2)
    }

    #[tokio::test]
    async fn test_collect_one_row_per_weekend() {
        let source = MockSource::new(
            vec![
                Reply::Body(body(vec![
                    trip("USD450.00", "1"),
                    trip("USD300.00", "2"),
                    trip("USD900.00", "3"),
                    trip("USD700.00", "4"),
                ])),
                Reply::Body(body(vec![trip("USD210.00", "5")])),
            ],
            body(vec![]),
        );
        let monitor = FareMonitor::new(source, search("NYC", 3));

        let table = assert_ok!(monitor.collect("AUS", start()).await);
        assert_eq!(table.len(), 4);

        let first = WeekendWindow::starting(date(2024, 12, 6));
        assert_eq!(table.get(&first, sale_total(1)), Some("USD300.00"));
        assert_eq!(table.get(&first, sale_total(2)), Some("USD450.00"));
        assert_eq!(table.get(&first, sale_total(3)), Some("USD700.00"));

        let second = WeekendWindow::starting(date(2024, 12, 13));
        assert_eq!(table.get(&second, sale_total(1)), Some("USD210.00"));
        assert_eq!(table.get(&second, sale_total(2)), None);

        let departures: Vec<_> = table.rows().iter().map(|r| r.window.departure).collect();
        let mut sorted = departures.clone();
        sorted.sort();
        assert_eq!(departures, sorted);
        assert!(table.rows().iter().all(|r| r.cells.len() == 33));
    }

    #[tokio::test]
    async fn test_malformed_response_skips_weekend() {
        let source = MockSource::new(
            vec![
                Reply::Body(body(vec![trip("USD300.00", "1")])),
                Reply::Body(json!({ "trips": { "requestId": "abc" } })),
                Reply::Body(json!({})),
            ],
            body(vec![trip("USD150.00", "2")]),
        );
        let monitor = FareMonitor::new(source, search("NYC", 3));

        let table = assert_ok!(monitor.collect("AUS", start()).await);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].window, WeekendWindow::starting(date(2024, 12, 6)));
        assert_eq!(table.rows()[1].window, WeekendWindow::starting(date(2024, 12, 27)));

        // Every weekend was still searched
        assert_eq!(monitor.source().queries.lock().await.len(), 4);
    }

    #[tokio::test]
    async fn test_incomplete_expensive_option_keeps_row() {
        let mut partial = trip("USD999.00", "9");
        partial["slice"][0]["segment"][0]["leg"][0]
            .as_object_mut()
            .unwrap()
            .remove("arrivalTime");
        let source = MockSource::new(
            vec![Reply::Body(body(vec![partial, trip("USD100.00", "1")]))],
            body(vec![]),
        );
        let monitor = FareMonitor::new(source, search("NYC", 1));

        let table = assert_ok!(monitor.collect("AUS", start()).await);
        assert_eq!(table.len(), 4);

        let first = WeekendWindow::starting(date(2024, 12, 6));
        assert_eq!(table.get(&first, sale_total(1)), Some("USD100.00"));
    }

    #[tokio::test]
    async fn test_network_error_stops_the_run() {
        let source = MockSource::new(
            vec![
                Reply::Body(body(vec![trip("USD300.00", "1")])),
                Reply::Fail(FareError::InvalidEndpoint("connection refused".to_string())),
            ],
            body(vec![]),
        );
        let monitor = FareMonitor::new(source, search("NYC", 3));

        let err = assert_err!(monitor.collect("AUS", start()).await);
        assert!(matches!(err, FareError::InvalidEndpoint(_)));
        assert_eq!(monitor.source().queries.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn test_bad_price_stops_the_run() {
        let source = MockSource::new(
            vec![Reply::Body(body(vec![trip("free", "1")]))],
            body(vec![]),
        );
        let monitor = FareMonitor::new(source, search("NYC", 3));

        let err = assert_err!(monitor.collect("AUS", start()).await);
        assert!(matches!(err, FareError::PriceFormat(_)));
    }

    #[tokio::test]
    async fn test_queries_follow_weekends() {
        let source = MockSource::new(vec![], body(vec![]));
        let monitor = FareMonitor::new(source, search("BOS", 2));

        let table = assert_ok!(monitor.collect("SFO", start()).await);
        assert_eq!(table.options_per_weekend(), 2);
        assert_eq!(table.row_width(), 24);

        let queries = monitor.source().queries.lock().await;
        let expected: Vec<FareQuery> = weekends(start())
            .map(|w| FareQuery::for_weekend(&w, "BOS", "SFO"))
            .collect();
        assert_eq!(*queries, expected);
        assert_eq!(queries[0].request.slice[0].origin, "BOS");
        assert_eq!(queries[0].request.slice[1].origin, "SFO");
    }
}
