//! Friday-evening to Sunday-afternoon windows from a start date through year-end.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub const DEPARTURE_HOUR: i64 = 18;
pub const RETURN_HOUR: i64 = 14;

/// One weekend trip: leave Friday at 18:00, come back Sunday at 14:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekendWindow {
    pub departure: NaiveDateTime,
    #[serde(rename = "return")]
    pub return_at: NaiveDateTime,
}

impl WeekendWindow {
    pub fn starting(friday: NaiveDate) -> Self {
        let midnight = NaiveTime::default();
        let sunday = friday + Duration::days(2);
        Self {
            departure: friday.and_time(midnight) + Duration::hours(DEPARTURE_HOUR),
            return_at: sunday.and_time(midnight) + Duration::hours(RETURN_HOUR),
        }
    }

    fn shifted(&self, days: i64) -> Self {
        Self {
            departure: self.departure + Duration::days(days),
            return_at: self.return_at + Duration::days(days),
        }
    }

    /// Google Flights deep link showing the same search in a browser.
    pub fn google_flights_url(&self, origin: &str, destination: &str) -> String {
        format!(
            "https://www.google.com/flights/#search;f={};t={};d={};r={};s=0;ti=t{}-2400,t{}-2400",
            origin,
            destination,
            self.departure.format("%Y-%m-%d"),
            self.return_at.format("%Y-%m-%d"),
            self.departure.format("%H%M"),
            self.return_at.format("%H%M"),
        )
    }
}

/// `(11 - weekday) mod 7` days ahead, Monday = 0. A zero result (the start is
/// itself a Friday) counts as a full week.
pub fn first_friday(start: NaiveDate) -> NaiveDate {
    let weekday = start.weekday().num_days_from_monday() as i64;
    let days_ahead = match (11 - weekday).rem_euclid(7) {
        0 => 7,
        days => days,
    };
    start + Duration::days(days_ahead)
}

/// Every weekend from the first Friday after `start`, stepping a week at a time.
/// The offset is bounded by the days left in `start`'s year, counted once from
/// `start`, and no window returns after December 31.
pub fn weekends(start: NaiveDate) -> Weekends {
    let end_of_year = NaiveDate::from_ymd_opt(start.year(), 12, 31).unwrap_or(start);

    Weekends {
        first: WeekendWindow::starting(first_friday(start)),
        offset: 0,
        days_left: (end_of_year - start).num_days(),
        end_of_year,
    }
}

#[derive(Debug)]
pub struct Weekends {
    first: WeekendWindow,
    offset: i64,
    days_left: i64,
    end_of_year: NaiveDate,
}

impl Iterator for Weekends {
    type Item = WeekendWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.days_left {
            return None;
        }
        let window = self.first.shifted(self.offset);
        if window.return_at.date() > self.end_of_year {
            self.offset = self.days_left;
            return None;
        }
        self.offset += 7;
        Some(window)
    }
}
