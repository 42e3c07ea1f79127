// Weekend fare monitor: prices every remaining weekend of the year for one destination

pub mod config;
pub mod error;
pub mod fetcher;
pub mod monitor;
pub mod ranker;
pub mod request;
pub mod response;
pub mod table;
pub mod weekend;

// Re-export key types for convenience
pub use config::{ApiConfig, SearchConfig, Settings};
pub use error::FareError;
pub use fetcher::{FareSource, QpxClient};
pub use monitor::FareMonitor;
pub use ranker::{parse_sale_total, rank_options, FlightLeg, ItineraryOption};
pub use request::{build_query, FareQuery};
pub use response::TripsSearchResponse;
pub use table::{output_path, ColumnKey, OptionField, ResultRow, ResultTable};
pub use weekend::{first_friday, weekends, WeekendWindow};
